/// Identifies a finite sort declared on a [`crate::smt::Problem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortId(pub(crate) u32);

impl SortId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A boolean variable declared on a [`crate::smt::Problem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoolVar(pub(crate) u32);

impl BoolVar {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A variable ranging over a finite sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnumVar(pub(crate) u32);

impl EnumVar {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A term of a finite sort: either one of the sort's values or a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumTerm {
    Const { sort: SortId, value: usize },
    Var { sort: SortId, var: EnumVar },
}

impl EnumTerm {
    pub fn sort(&self) -> SortId {
        match *self {
            EnumTerm::Const { sort, .. } | EnumTerm::Var { sort, .. } => sort,
        }
    }
}

/// `sum(weight * [formula]) == rhs` over non-negative integer weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Count {
    pub terms: Vec<(u32, Formula)>,
    pub rhs: u32,
}

impl Count {
    /// The largest value the sum can take.
    pub fn max_sum(&self) -> u32 {
        self.terms.iter().map(|(weight, _)| weight).sum()
    }
}

/// A quantifier-free boolean formula.
///
/// The constructor functions ([`Formula::and`], [`Formula::or`], ...) fold constants away, so a
/// formula built only through them never contains a nested [`Formula::Const`]. Equality between
/// enumerated terms is created through [`crate::smt::Problem::eq`], which checks the sorts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    Const(bool),
    Var(BoolVar),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Xor(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Eq(EnumTerm, EnumTerm),
    Count(Count),
}

impl Formula {
    pub const TRUE: Formula = Formula::Const(true);
    pub const FALSE: Formula = Formula::Const(false);

    pub fn var(var: BoolVar) -> Formula {
        Formula::Var(var)
    }

    pub fn is_const(&self, value: bool) -> bool {
        matches!(self, Formula::Const(c) if *c == value)
    }

    pub fn not(formula: Formula) -> Formula {
        match formula {
            Formula::Const(value) => Formula::Const(!value),
            Formula::Not(inner) => *inner,
            other => Formula::Not(Box::new(other)),
        }
    }

    pub fn and(formulas: impl IntoIterator<Item = Formula>) -> Formula {
        let mut conjuncts = Vec::new();

        for formula in formulas {
            match formula {
                Formula::Const(true) => {}
                Formula::Const(false) => return Formula::FALSE,
                Formula::And(nested) => conjuncts.extend(nested),
                other => conjuncts.push(other),
            }
        }

        match conjuncts.len() {
            0 => Formula::TRUE,
            1 => conjuncts.pop().unwrap_or(Formula::TRUE),
            _ => Formula::And(conjuncts),
        }
    }

    pub fn or(formulas: impl IntoIterator<Item = Formula>) -> Formula {
        let mut disjuncts = Vec::new();

        for formula in formulas {
            match formula {
                Formula::Const(false) => {}
                Formula::Const(true) => return Formula::TRUE,
                Formula::Or(nested) => disjuncts.extend(nested),
                other => disjuncts.push(other),
            }
        }

        match disjuncts.len() {
            0 => Formula::FALSE,
            1 => disjuncts.pop().unwrap_or(Formula::FALSE),
            _ => Formula::Or(disjuncts),
        }
    }

    pub fn implies(premise: Formula, conclusion: Formula) -> Formula {
        match (premise, conclusion) {
            (Formula::Const(false), _) | (_, Formula::Const(true)) => Formula::TRUE,
            (Formula::Const(true), conclusion) => conclusion,
            (premise, Formula::Const(false)) => Formula::not(premise),
            (premise, conclusion) => Formula::Implies(Box::new(premise), Box::new(conclusion)),
        }
    }

    pub fn xor(lhs: Formula, rhs: Formula) -> Formula {
        match (lhs, rhs) {
            (Formula::Const(a), Formula::Const(b)) => Formula::Const(a != b),
            (Formula::Const(false), other) | (other, Formula::Const(false)) => other,
            (Formula::Const(true), other) | (other, Formula::Const(true)) => Formula::not(other),
            (lhs, rhs) => Formula::Xor(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// `sum(weight * [formula]) == rhs`.
    pub fn count_eq(terms: impl IntoIterator<Item = (u32, Formula)>, rhs: u32) -> Formula {
        let mut remaining = rhs;
        let mut kept = Vec::new();

        for (weight, formula) in terms {
            match formula {
                _ if weight == 0 => {}
                Formula::Const(false) => {}
                Formula::Const(true) => {
                    if weight > remaining {
                        return Formula::FALSE;
                    }
                    remaining -= weight;
                }
                other => kept.push((weight, other)),
            }
        }

        let count = Count {
            terms: kept,
            rhs: remaining,
        };

        if count.terms.is_empty() {
            Formula::Const(count.rhs == 0)
        } else if count.max_sum() < count.rhs {
            Formula::FALSE
        } else {
            Formula::Count(count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(index: u32) -> Formula {
        Formula::var(BoolVar(index))
    }

    #[test]
    fn constants_are_folded() {
        assert_eq!(Formula::and([var(0), Formula::TRUE]), var(0));
        assert_eq!(Formula::and([var(0), Formula::FALSE]), Formula::FALSE);
        assert_eq!(Formula::or([var(0), Formula::TRUE]), Formula::TRUE);
        assert_eq!(Formula::or(Vec::new()), Formula::FALSE);
        assert_eq!(Formula::and(Vec::new()), Formula::TRUE);
        assert_eq!(Formula::not(Formula::not(var(1))), var(1));
        assert_eq!(Formula::implies(var(1), Formula::FALSE), Formula::not(var(1)));
        assert_eq!(Formula::xor(Formula::TRUE, var(2)), Formula::not(var(2)));
    }

    #[test]
    fn nested_conjunctions_are_flattened() {
        let formula = Formula::and([Formula::and([var(0), var(1)]), var(2)]);

        assert_eq!(formula, Formula::And(vec![var(0), var(1), var(2)]));
    }

    #[test]
    fn counts_absorb_constant_terms() {
        assert_eq!(
            Formula::count_eq([(2, Formula::TRUE), (1, var(0))], 3),
            Formula::Count(Count {
                terms: vec![(1, var(0))],
                rhs: 1,
            })
        );
        assert_eq!(Formula::count_eq([(2, Formula::TRUE)], 1), Formula::FALSE);
        assert_eq!(Formula::count_eq([(1, var(0))], 2), Formula::FALSE);
        assert_eq!(Formula::count_eq([(1, Formula::FALSE)], 0), Formula::TRUE);
    }
}
