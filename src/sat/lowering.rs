use log::debug;

use super::Cnf;
use super::Literal;
use crate::basic_types::HashMap;
use crate::encodings::create_encoder;
use crate::encodings::LinearEncoding;
use crate::encodings::UnitSumEncoder;
use crate::smt::Count;
use crate::smt::EnumTerm;
use crate::smt::Formula;
use crate::smt::Model;
use crate::smt::Problem;
use crate::timetabler_assert_moderate;

/// Up to this many values, an enumerated variable's at-most-one constraint is encoded with
/// pairwise exclusions; above it a sequential ladder is used.
const PAIRWISE_AMO_LIMIT: usize = 6;

/// A [`Problem`] translated to CNF, together with the literals needed to read a [`Model`] back.
#[derive(Debug)]
pub struct LoweredProblem {
    cnf: Cnf,
    bools: Vec<Literal>,
    /// One selector literal per value, for every enumerated variable.
    selectors: Vec<Vec<Literal>>,
}

impl LoweredProblem {
    /// Translate `problem` to CNF.
    ///
    /// Boolean variables map to literals, every enumerated variable gets a one-hot vector of
    /// selectors, connectives are introduced through Tseitin definitions and counts through a
    /// unary sum built with `encoding`.
    pub fn new(problem: &Problem, encoding: LinearEncoding) -> LoweredProblem {
        let mut lowering = Lowering {
            cnf: Cnf::default(),
            bools: Vec::with_capacity(problem.num_bool_vars()),
            selectors: Vec::with_capacity(problem.enum_vars().len()),
            equalities: HashMap::default(),
            encoder: create_encoder(encoding),
        };

        for _ in 0..problem.num_bool_vars() {
            let literal = lowering.cnf.new_literal();
            lowering.bools.push(literal);
        }

        for (_, sort) in problem.enum_vars() {
            let cardinality = problem.sort(sort).cardinality();
            let selectors = (0..cardinality)
                .map(|_| lowering.cnf.new_literal())
                .collect::<Vec<_>>();
            lowering.exactly_one(&selectors);
            lowering.selectors.push(selectors);
        }

        for assertion in problem.assertions() {
            lowering.assert(assertion);
        }

        debug!(
            "lowered {} assertions to {} variables and {} clauses",
            problem.assertions().len(),
            lowering.cnf.num_vars(),
            lowering.cnf.clauses().len()
        );

        LoweredProblem {
            cnf: lowering.cnf,
            bools: lowering.bools,
            selectors: lowering.selectors,
        }
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Read a [`Model`] from a satisfying assignment, given as DIMACS literals. Variables which
    /// do not occur in `assignment` are taken to be false.
    pub fn model(&self, assignment: &[i32]) -> Model {
        let mut values = vec![false; self.cnf.num_vars() as usize + 1];
        for &literal in assignment {
            if let Some(value) = values.get_mut(literal.unsigned_abs() as usize) {
                *value = literal > 0;
            }
        }

        let holds = |literal: Literal| values[literal.var() as usize] == literal.is_positive();

        let bools = self.bools.iter().map(|&literal| holds(literal)).collect();
        let enums = self
            .selectors
            .iter()
            .map(|selectors| {
                selectors
                    .iter()
                    .position(|&selector| holds(selector))
                    .unwrap_or(0)
            })
            .collect();

        Model::new(bools, enums)
    }
}

struct Lowering {
    cnf: Cnf,
    bools: Vec<Literal>,
    selectors: Vec<Vec<Literal>>,
    equalities: HashMap<(EnumTerm, EnumTerm), Literal>,
    encoder: Box<dyn UnitSumEncoder>,
}

impl Lowering {
    fn exactly_one(&mut self, literals: &[Literal]) {
        self.cnf.add_clause(literals.iter().copied());

        if literals.len() <= PAIRWISE_AMO_LIMIT {
            for (index, &first) in literals.iter().enumerate() {
                for &second in &literals[index + 1..] {
                    self.cnf.add_clause([!first, !second]);
                }
            }
            return;
        }

        // `seen` holds iff one of the literals up to and including the current one holds.
        let mut seen = literals[0];
        for &literal in &literals[1..] {
            let next = self.cnf.new_literal();
            self.cnf.add_clause([!seen, next]);
            self.cnf.add_clause([!literal, next]);
            self.cnf.add_clause([!literal, !seen]);
            seen = next;
        }
    }

    /// Add `formula` as a top-level constraint. Conjunctions and disjunctions at the top level
    /// do not need a defining literal.
    fn assert(&mut self, formula: &Formula) {
        match formula {
            Formula::Const(value) => {
                if !*value {
                    self.cnf.add_unit(self.cnf.false_literal());
                }
            }
            Formula::And(formulas) => formulas.iter().for_each(|formula| self.assert(formula)),
            Formula::Or(formulas) => {
                let clause = formulas
                    .iter()
                    .map(|formula| self.literal(formula))
                    .collect::<Vec<_>>();
                self.cnf.add_clause(clause);
            }
            Formula::Implies(premise, conclusion) => {
                let premise = self.literal(premise);
                let conclusion = self.literal(conclusion);
                self.cnf.add_clause([!premise, conclusion]);
            }
            Formula::Count(count) => {
                for literal in self.count_conditions(count) {
                    self.cnf.add_unit(literal);
                }
            }
            other => {
                let literal = self.literal(other);
                self.cnf.add_unit(literal);
            }
        }
    }

    /// A literal which is equivalent to `formula`.
    fn literal(&mut self, formula: &Formula) -> Literal {
        match formula {
            Formula::Const(value) => self.cnf.constant(*value),
            Formula::Var(var) => self.bools[var.index()],
            Formula::Not(inner) => !self.literal(inner),
            Formula::And(formulas) => {
                let literals = formulas
                    .iter()
                    .map(|formula| self.literal(formula))
                    .collect::<Vec<_>>();
                self.conjunction(&literals)
            }
            Formula::Or(formulas) => {
                let negated = formulas
                    .iter()
                    .map(|formula| !self.literal(formula))
                    .collect::<Vec<_>>();
                !self.conjunction(&negated)
            }
            Formula::Xor(lhs, rhs) => {
                let lhs = self.literal(lhs);
                let rhs = self.literal(rhs);
                let result = self.cnf.new_literal();
                self.cnf.add_clause([!result, lhs, rhs]);
                self.cnf.add_clause([!result, !lhs, !rhs]);
                self.cnf.add_clause([result, !lhs, rhs]);
                self.cnf.add_clause([result, lhs, !rhs]);
                result
            }
            Formula::Implies(premise, conclusion) => {
                let premise = self.literal(premise);
                let conclusion = self.literal(conclusion);
                !self.conjunction(&[premise, !conclusion])
            }
            Formula::Eq(lhs, rhs) => self.equality(*lhs, *rhs),
            Formula::Count(count) => {
                let conditions = self.count_conditions(count);
                self.conjunction(&conditions)
            }
        }
    }

    fn conjunction(&mut self, literals: &[Literal]) -> Literal {
        match literals {
            [] => self.cnf.true_literal(),
            [literal] => *literal,
            _ => {
                let result = self.cnf.new_literal();
                for &literal in literals {
                    self.cnf.add_clause([!result, literal]);
                }
                self.cnf
                    .add_clause(literals.iter().map(|&literal| !literal).chain([result]));
                result
            }
        }
    }

    fn equality(&mut self, lhs: EnumTerm, rhs: EnumTerm) -> Literal {
        match (lhs, rhs) {
            (EnumTerm::Const { value: a, .. }, EnumTerm::Const { value: b, .. }) => {
                self.cnf.constant(a == b)
            }
            (EnumTerm::Var { var, .. }, EnumTerm::Const { value, .. })
            | (EnumTerm::Const { value, .. }, EnumTerm::Var { var, .. }) => {
                match self.selectors[var.index()].get(value) {
                    Some(&selector) => selector,
                    None => self.cnf.false_literal(),
                }
            }
            (EnumTerm::Var { var: a, .. }, EnumTerm::Var { var: b, .. }) => {
                if a == b {
                    return self.cnf.true_literal();
                }

                let key = if a < b { (lhs, rhs) } else { (rhs, lhs) };
                if let Some(&literal) = self.equalities.get(&key) {
                    return literal;
                }

                let result = self.cnf.new_literal();
                let lhs = self.selectors[a.index()].clone();
                let rhs = self.selectors[b.index()].clone();
                timetabler_assert_moderate!(lhs.len() == rhs.len());

                for (&a, &b) in lhs.iter().zip(&rhs) {
                    self.cnf.add_clause([!result, !a, b]);
                    self.cnf.add_clause([result, !a, !b]);
                }

                let _ = self.equalities.insert(key, result);
                result
            }
        }
    }

    /// Literals whose conjunction is equivalent to `count`.
    fn count_conditions(&mut self, count: &Count) -> Vec<Literal> {
        let mut inputs = Vec::new();
        for (weight, formula) in &count.terms {
            let literal = self.literal(formula);
            inputs.extend(std::iter::repeat_n(literal, *weight as usize));
        }

        let rhs = count.rhs as usize;
        if rhs > inputs.len() {
            return vec![self.cnf.false_literal()];
        }
        if rhs == 0 && inputs.is_empty() {
            return vec![];
        }

        let cap = inputs.len().min(rhs + 1);
        let outputs = self.encoder.encode(&mut self.cnf, &inputs, cap);
        timetabler_assert_moderate!(outputs.len() == cap);

        let mut conditions = Vec::with_capacity(2);
        if rhs >= 1 {
            conditions.push(outputs[rhs - 1]);
        }
        if rhs < inputs.len() {
            conditions.push(!outputs[rhs]);
        }
        conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smt::EnumVar;
    use crate::smt::SortId;

    fn colours(problem: &mut Problem, count: usize) -> SortId {
        problem.declare_sort(
            "Colour",
            (0..count).map(|index| format!("c{index}")).collect(),
        )
    }

    #[test]
    fn enumerated_variables_are_one_hot() {
        let mut problem = Problem::default();
        let small = colours(&mut problem, 3);
        let _ = problem.new_enum("x", small);

        let lowered = LoweredProblem::new(&problem, LinearEncoding::Totalizer);

        // Unit true literal, one at-least-one clause and three exclusions.
        assert_eq!(lowered.cnf().clauses().len(), 5);
    }

    #[test]
    fn models_are_read_from_assignments() {
        let mut problem = Problem::default();
        let sort = colours(&mut problem, 3);
        let p = problem.new_bool("p");
        let _ = problem.new_enum("x", sort);

        let lowered = LoweredProblem::new(&problem, LinearEncoding::Totalizer);
        // Variable 1 is the constant, 2 is `p`, 3..=5 select the value of `x`.
        let model = lowered.model(&[1, -2, -3, 4, -5]);

        assert!(!model.bool_value(p));
        assert_eq!(model.enum_value(&EnumTerm::Var { sort, var: EnumVar(0) }), 1);
    }
}
