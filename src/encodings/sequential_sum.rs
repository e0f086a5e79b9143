use super::UnitSumEncoder;
use crate::sat::Cnf;
use crate::sat::Literal;
use crate::timetabler_assert_simple;

/// The sequential counter of Sinz: one row of registers per input, where register `t` of row
/// `i` holds iff at least `t + 1` of the first `i + 1` inputs hold.
#[derive(Clone, Copy, Debug)]
pub struct SequentialSum;

impl UnitSumEncoder for SequentialSum {
    fn encode(&self, cnf: &mut Cnf, inputs: &[Literal], cap: usize) -> Vec<Literal> {
        timetabler_assert_simple!(cap <= inputs.len());

        let mut row = vec![cnf.false_literal(); cap];

        for (i, &input) in inputs.iter().enumerate() {
            let mut next = Vec::with_capacity(cap);

            for t in 0..cap {
                if t > i {
                    next.push(cnf.false_literal());
                    continue;
                }

                let previous = row[t];
                let carry = if t == 0 {
                    cnf.true_literal()
                } else {
                    row[t - 1]
                };

                // register <-> previous \/ (input /\ carry)
                let register = cnf.new_literal();
                cnf.add_clause([!previous, register]);
                cnf.add_clause([!input, !carry, register]);
                cnf.add_clause([!register, previous, input]);
                cnf.add_clause([!register, previous, carry]);
                next.push(register);
            }

            row = next;
        }

        row
    }
}
