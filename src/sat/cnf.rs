use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

/// A propositional literal in DIMACS numbering: variable `v` is `v`, its negation is `-v`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(i32);

impl Literal {
    pub fn positive(var: u32) -> Literal {
        Literal(var as i32)
    }

    pub fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn to_dimacs(self) -> i32 {
        self.0
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal(-self.0)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A formula in conjunctive normal form under construction.
///
/// Variable 1 is reserved and fixed to true, so constants can be used as literals. Clauses are
/// simplified as they are added: false literals are dropped, and clauses containing a true
/// literal or a complementary pair are not stored at all.
#[derive(Clone, Debug)]
pub struct Cnf {
    num_vars: u32,
    clauses: Vec<Vec<Literal>>,
    inconsistent: bool,
}

impl Default for Cnf {
    fn default() -> Self {
        Cnf {
            num_vars: 1,
            clauses: vec![vec![Literal(1)]],
            inconsistent: false,
        }
    }
}

impl Cnf {
    pub fn true_literal(&self) -> Literal {
        Literal(1)
    }

    pub fn false_literal(&self) -> Literal {
        Literal(-1)
    }

    pub fn constant(&self, value: bool) -> Literal {
        if value {
            self.true_literal()
        } else {
            self.false_literal()
        }
    }

    pub fn new_literal(&mut self) -> Literal {
        self.num_vars += 1;
        Literal::positive(self.num_vars)
    }

    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = Literal>) {
        let mut clause: Vec<Literal> = Vec::new();

        for literal in literals {
            if literal == self.true_literal() || clause.contains(&!literal) {
                return;
            }
            if literal == self.false_literal() || clause.contains(&literal) {
                continue;
            }
            clause.push(literal);
        }

        if clause.is_empty() {
            self.inconsistent = true;
            clause.push(self.false_literal());
        }

        self.clauses.push(clause);
    }

    pub fn add_unit(&mut self, literal: Literal) {
        self.add_clause([literal]);
    }

    /// Whether an empty clause was added, which makes the formula trivially unsatisfiable.
    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }

    pub fn to_dimacs_clauses(&self) -> Vec<Vec<i32>> {
        self.clauses
            .iter()
            .map(|clause| clause.iter().map(|literal| literal.to_dimacs()).collect())
            .collect()
    }
}

/// The formula in the DIMACS CNF format.
impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;

        for clause in &self.clauses {
            for literal in clause {
                write!(f, "{literal} ")?;
            }
            writeln!(f, "0")?;
        }

        Ok(())
    }
}
