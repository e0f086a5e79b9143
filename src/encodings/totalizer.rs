use super::UnitSumEncoder;
use crate::sat::Cnf;
use crate::sat::Literal;
use crate::timetabler_assert_simple;

/// The totalizer of Bailleux and Boufkhad: a balanced tree of unary adders, truncated at `cap`.
#[derive(Clone, Copy, Debug)]
pub struct Totalizer;

impl UnitSumEncoder for Totalizer {
    fn encode(&self, cnf: &mut Cnf, inputs: &[Literal], cap: usize) -> Vec<Literal> {
        timetabler_assert_simple!(cap <= inputs.len());

        if cap == 0 {
            return vec![];
        }

        if let [input] = inputs {
            return vec![*input];
        }

        let (left, right) = inputs.split_at(inputs.len() / 2);
        let left = self.encode(cnf, left, cap.min(left.len()));
        let right = self.encode(cnf, right, cap.min(right.len()));

        merge(cnf, &left, &right, cap)
    }
}

/// Combine two unary numbers into their sum, keeping at most `cap` digits.
fn merge(cnf: &mut Cnf, left: &[Literal], right: &[Literal], cap: usize) -> Vec<Literal> {
    let size = cap.min(left.len() + right.len());
    let result = (0..size).map(|_| cnf.new_literal()).collect::<Vec<_>>();

    for i in 0..=left.len() {
        for j in 0..=right.len() {
            // left >= i and right >= j imply sum >= i + j.
            if i + j >= 1 {
                let clause = digit(left, i)
                    .map(|a| !a)
                    .into_iter()
                    .chain(digit(right, j).map(|b| !b))
                    .chain([result[(i + j).min(size) - 1]]);
                cnf.add_clause(clause);
            }

            // left <= i and right <= j imply sum <= i + j.
            if i + j < size {
                let clause = left
                    .get(i)
                    .copied()
                    .into_iter()
                    .chain(right.get(j).copied())
                    .chain([!result[i + j]]);
                cnf.add_clause(clause);
            }
        }
    }

    result
}

/// The literal for `x >= i`; `None` for the zeroth digit, which always holds.
fn digit(digits: &[Literal], i: usize) -> Option<Literal> {
    i.checked_sub(1).and_then(|index| digits.get(index).copied())
}
