use std::fmt::Display;
use std::fmt::Formatter;

use super::BoolVar;
use super::EnumTerm;
use super::EnumVar;
use super::Formula;
use super::SortId;
use crate::basic_types::SortMismatchError;
use crate::timetabler_assert_simple;

/// A finite sort: a name and its ordered values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortDecl {
    pub name: String,
    pub values: Vec<String>,
}

impl SortDecl {
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }
}

/// Builds up the declarations and assertions which are handed to a
/// [`Backend`](crate::smt::Backend).
///
/// It is important to only use terms and formulas with variables created on the same instance
/// of [`Problem`].
#[derive(Clone, Debug, Default)]
pub struct Problem {
    sorts: Vec<SortDecl>,
    /// The names of the boolean variables.
    bool_vars: Vec<String>,
    /// The names and sorts of the enumerated variables.
    enum_vars: Vec<(String, SortId)>,
    assertions: Vec<Formula>,
}

impl Problem {
    /// Declare a new finite sort. A sort needs at least one value.
    pub fn declare_sort(&mut self, name: impl Display, values: Vec<String>) -> SortId {
        timetabler_assert_simple!(!values.is_empty(), "sorts cannot be empty");

        let id = SortId(self.sorts.len() as u32);
        self.sorts.push(SortDecl {
            name: name.to_string(),
            values,
        });

        id
    }

    pub fn sort(&self, sort: SortId) -> &SortDecl {
        &self.sorts[sort.index()]
    }

    pub fn sorts(&self) -> &[SortDecl] {
        &self.sorts
    }

    /// The term denoting the `value`-th value of `sort`.
    pub fn constant(&self, sort: SortId, value: usize) -> EnumTerm {
        timetabler_assert_simple!(value < self.sort(sort).cardinality());
        EnumTerm::Const { sort, value }
    }

    pub fn new_bool(&mut self, name: impl Display) -> BoolVar {
        let id = BoolVar(self.bool_vars.len() as u32);
        self.bool_vars.push(name.to_string());
        id
    }

    pub fn new_enum(&mut self, name: impl Display, sort: SortId) -> EnumTerm {
        let var = EnumVar(self.enum_vars.len() as u32);
        self.enum_vars.push((name.to_string(), sort));
        EnumTerm::Var { sort, var }
    }

    pub fn num_bool_vars(&self) -> usize {
        self.bool_vars.len()
    }

    pub fn bool_var_name(&self, var: BoolVar) -> &str {
        &self.bool_vars[var.index()]
    }

    /// The enumerated variables in declaration order, with their sorts.
    pub fn enum_vars(&self) -> impl ExactSizeIterator<Item = (EnumVar, SortId)> + '_ {
        self.enum_vars
            .iter()
            .enumerate()
            .map(|(index, (_, sort))| (EnumVar(index as u32), *sort))
    }

    pub fn enum_var_name(&self, var: EnumVar) -> &str {
        &self.enum_vars[var.index()].0
    }

    /// Fail with a [`SortMismatchError`] unless `term` is of sort `expected`.
    pub fn check_sort(&self, expected: SortId, term: &EnumTerm) -> Result<(), SortMismatchError> {
        if term.sort() == expected {
            Ok(())
        } else {
            Err(SortMismatchError {
                expected: self.sort(expected).name.clone(),
                found: self.sort(term.sort()).name.clone(),
            })
        }
    }

    /// The formula `lhs == rhs`; both terms must be of the same sort.
    pub fn eq(&self, lhs: EnumTerm, rhs: EnumTerm) -> Result<Formula, SortMismatchError> {
        self.check_sort(lhs.sort(), &rhs)?;

        Ok(match (lhs, rhs) {
            (EnumTerm::Const { value: a, .. }, EnumTerm::Const { value: b, .. }) => {
                Formula::Const(a == b)
            }
            (EnumTerm::Var { var: a, .. }, EnumTerm::Var { var: b, .. }) if a == b => {
                Formula::TRUE
            }
            (lhs, rhs) => Formula::Eq(lhs, rhs),
        })
    }

    /// The formula `term` is one of `values`.
    pub fn is_one_of(
        &self,
        term: EnumTerm,
        values: impl IntoIterator<Item = EnumTerm>,
    ) -> Result<Formula, SortMismatchError> {
        let equalities = values
            .into_iter()
            .map(|value| self.eq(term, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Formula::or(equalities))
    }

    /// Assert `formula`. A top-level conjunction is split into one assertion per conjunct.
    pub fn assert(&mut self, formula: Formula) {
        match formula {
            Formula::And(conjuncts) => self.assertions.extend(conjuncts),
            other => self.assertions.push(other),
        }
    }

    pub fn assertions(&self) -> &[Formula] {
        &self.assertions
    }

    /// Renders `formula` as an SMT-LIB term using the names of this problem.
    pub fn display<'a>(&'a self, formula: &'a Formula) -> impl Display + 'a {
        SmtLib {
            problem: self,
            formula,
        }
    }

    fn write_term(&self, f: &mut Formatter<'_>, term: &EnumTerm) -> std::fmt::Result {
        match *term {
            EnumTerm::Const { sort, value } => {
                let decl = self.sort(sort);
                write!(f, "{}.{}", decl.name, decl.values[value])
            }
            EnumTerm::Var { var, .. } => f.write_str(self.enum_var_name(var)),
        }
    }

    fn write_formula(&self, f: &mut Formatter<'_>, formula: &Formula) -> std::fmt::Result {
        match formula {
            Formula::Const(value) => write!(f, "{value}"),
            Formula::Var(var) => f.write_str(self.bool_var_name(*var)),
            Formula::Not(inner) => {
                f.write_str("(not ")?;
                self.write_formula(f, inner)?;
                f.write_str(")")
            }
            Formula::And(formulas) => self.write_application(f, "and", formulas),
            Formula::Or(formulas) => self.write_application(f, "or", formulas),
            Formula::Xor(lhs, rhs) => {
                f.write_str("(xor ")?;
                self.write_formula(f, lhs)?;
                f.write_str(" ")?;
                self.write_formula(f, rhs)?;
                f.write_str(")")
            }
            Formula::Implies(premise, conclusion) => {
                f.write_str("(=> ")?;
                self.write_formula(f, premise)?;
                f.write_str(" ")?;
                self.write_formula(f, conclusion)?;
                f.write_str(")")
            }
            Formula::Eq(lhs, rhs) => {
                f.write_str("(= ")?;
                self.write_term(f, lhs)?;
                f.write_str(" ")?;
                self.write_term(f, rhs)?;
                f.write_str(")")
            }
            Formula::Count(count) => {
                f.write_str("(= (+")?;
                for (weight, term) in &count.terms {
                    f.write_str(" (ite ")?;
                    self.write_formula(f, term)?;
                    write!(f, " {weight} 0)")?;
                }
                write!(f, " 0) {})", count.rhs)
            }
        }
    }

    fn write_application(
        &self,
        f: &mut Formatter<'_>,
        operator: &str,
        formulas: &[Formula],
    ) -> std::fmt::Result {
        write!(f, "({operator}")?;
        for formula in formulas {
            f.write_str(" ")?;
            self.write_formula(f, formula)?;
        }
        f.write_str(")")
    }
}

struct SmtLib<'a> {
    problem: &'a Problem,
    formula: &'a Formula,
}

impl Display for SmtLib<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.problem.write_formula(f, self.formula)
    }
}

/// The problem as an SMT-LIB 2 script, ending in `(check-sat)`.
impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "(set-logic ALL)")?;

        for decl in &self.sorts {
            write!(f, "(declare-datatype {} (", decl.name)?;
            for (index, value) in decl.values.iter().enumerate() {
                if index > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "({}.{value})", decl.name)?;
            }
            writeln!(f, "))")?;
        }

        for name in &self.bool_vars {
            writeln!(f, "(declare-const {name} Bool)")?;
        }

        for (name, sort) in &self.enum_vars {
            writeln!(f, "(declare-const {name} {})", self.sort(*sort).name)?;
        }

        for assertion in &self.assertions {
            f.write_str("(assert ")?;
            self.write_formula(f, assertion)?;
            writeln!(f, ")")?;
        }

        writeln!(f, "(check-sat)")
    }
}
