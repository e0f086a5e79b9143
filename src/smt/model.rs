use super::BoolVar;
use super::Count;
use super::EnumTerm;
use super::Formula;

/// A total valuation of the variables of a [`crate::smt::Problem`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    bools: Vec<bool>,
    enums: Vec<usize>,
}

impl Model {
    /// Create a model from the value of every boolean variable and the value index of every
    /// enumerated variable, both in declaration order.
    pub fn new(bools: Vec<bool>, enums: Vec<usize>) -> Model {
        Model { bools, enums }
    }

    pub fn bool_value(&self, var: BoolVar) -> bool {
        self.bools[var.index()]
    }

    /// The index of the value `term` takes within its sort.
    pub fn enum_value(&self, term: &EnumTerm) -> usize {
        match *term {
            EnumTerm::Const { value, .. } => value,
            EnumTerm::Var { var, .. } => self.enums[var.index()],
        }
    }

    pub fn eval(&self, formula: &Formula) -> bool {
        match formula {
            Formula::Const(value) => *value,
            Formula::Var(var) => self.bool_value(*var),
            Formula::Not(inner) => !self.eval(inner),
            Formula::And(formulas) => formulas.iter().all(|formula| self.eval(formula)),
            Formula::Or(formulas) => formulas.iter().any(|formula| self.eval(formula)),
            Formula::Xor(lhs, rhs) => self.eval(lhs) != self.eval(rhs),
            Formula::Implies(premise, conclusion) => !self.eval(premise) || self.eval(conclusion),
            Formula::Eq(lhs, rhs) => self.enum_value(lhs) == self.enum_value(rhs),
            Formula::Count(count) => self.sum(count) == count.rhs,
        }
    }

    /// The value of the left-hand side of `count`.
    pub fn sum(&self, count: &Count) -> u32 {
        count
            .terms
            .iter()
            .filter(|(_, formula)| self.eval(formula))
            .map(|(weight, _)| weight)
            .sum()
    }
}
