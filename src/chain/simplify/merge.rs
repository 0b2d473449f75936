//! Comparison-pair merging
//!
//! Runs bottom-up over a filter. At each `&` node whose children are already merged:
//!
//! - a contradicted child makes the whole node the contradiction `(1=0)`
//! - two children of the shape `(element op n)` are combined by [merge_pair]
//!
//! Anything else is rebuilt unchanged. Conjunctions of three or more filters therefore
//! collapse pairwise from the left.

use crate::chain::ast::{Expression, LogicOp, Op};

/// Outcome of combining two element constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The pair is equivalent to a single `(element op n)`
    Constraint(LogicOp, i32),
    /// No element satisfies both
    Contradiction,
    /// The conjunction stays as written
    Unmerged,
}

impl MergeOutcome {
    fn into_expression(self) -> Option<Expression> {
        match self {
            MergeOutcome::Constraint(op, n) => Some(Expression::binary(
                Expression::Element,
                Op::Logic(op),
                Expression::Constant(n),
            )),
            MergeOutcome::Contradiction => Some(Expression::contradiction()),
            MergeOutcome::Unmerged => None,
        }
    }
}

/// Combine `(element left_op n1) & (element right_op n2)`
pub fn merge_pair(left: (LogicOp, i32), right: (LogicOp, i32)) -> MergeOutcome {
    use LogicOp::{Eq, Gt, Lt};
    use MergeOutcome::{Constraint, Contradiction, Unmerged};

    let ((left_op, n1), (right_op, n2)) = (left, right);
    let keep_if = |holds: bool, op: LogicOp, n: i32| {
        if holds {
            Constraint(op, n)
        } else {
            Contradiction
        }
    };

    match (left_op, right_op) {
        (Eq, Eq) => keep_if(n1 == n2, Eq, n1),
        (Eq, Gt) => keep_if(n1 > n2, Eq, n1),
        (Eq, Lt) => keep_if(n1 < n2, Eq, n1),
        (Gt, Eq) => keep_if(n1 < n2, Eq, n2),
        (Gt, Gt) => Constraint(Gt, n1.max(n2)),
        (Gt, Lt) if n1.wrapping_add(1) < n2 => Unmerged,
        (Gt, Lt) => Contradiction,
        (Lt, Eq) => keep_if(n1 > n2, Eq, n2),
        (Lt, Gt) if n1.wrapping_sub(1) > n2 => Unmerged,
        (Lt, Gt) => Contradiction,
        (Lt, Lt) => Constraint(Lt, n1.min(n2)),
        _ => Unmerged,
    }
}

/// Merge comparison pairs throughout a filter expression
pub fn merge_comparisons(expr: &Expression) -> Expression {
    match expr {
        Expression::Element | Expression::Constant(_) => expr.clone(),
        Expression::Binary { left, op, right } => {
            let left = merge_comparisons(left);
            let right = merge_comparisons(right);
            if *op == Op::AND {
                if left.is_contradiction() || right.is_contradiction() {
                    return Expression::contradiction();
                }
                if let (Some(l), Some(r)) =
                    (left.as_element_comparison(), right.as_element_comparison())
                {
                    if let Some(merged) = merge_pair(l, r).into_expression() {
                        return merged;
                    }
                }
            }
            Expression::binary(left, *op, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use LogicOp::{Eq, Gt, Lt};
    use MergeOutcome::{Constraint, Contradiction, Unmerged};

    #[rstest]
    #[case((Eq, 5), (Eq, 5), Constraint(Eq, 5))]
    #[case((Eq, 5), (Eq, 6), Contradiction)]
    #[case((Eq, 5), (Gt, 4), Constraint(Eq, 5))]
    #[case((Eq, 5), (Gt, 5), Contradiction)]
    #[case((Eq, 5), (Lt, 6), Constraint(Eq, 5))]
    #[case((Eq, 5), (Lt, 5), Contradiction)]
    #[case((Gt, 0), (Eq, 42), Constraint(Eq, 42))]
    #[case((Gt, 42), (Eq, 42), Contradiction)]
    #[case((Gt, 3), (Gt, 9), Constraint(Gt, 9))]
    #[case((Gt, 9), (Gt, 3), Constraint(Gt, 9))]
    #[case((Gt, 10), (Lt, 20), Unmerged)]
    #[case((Gt, 0), (Lt, 2), Unmerged)]
    #[case((Gt, 0), (Lt, 1), Contradiction)]
    #[case((Gt, 0), (Lt, 0), Contradiction)]
    #[case((Lt, 10), (Eq, 3), Constraint(Eq, 3))]
    #[case((Lt, 3), (Eq, 3), Contradiction)]
    #[case((Lt, 20), (Gt, 10), Unmerged)]
    #[case((Lt, 2), (Gt, 0), Unmerged)]
    #[case((Lt, 1), (Gt, 0), Contradiction)]
    #[case((Lt, 3), (Lt, 9), Constraint(Lt, 3))]
    fn test_rule_table(
        #[case] left: (LogicOp, i32),
        #[case] right: (LogicOp, i32),
        #[case] expected: MergeOutcome,
    ) {
        assert_eq!(merge_pair(left, right), expected);
    }

    #[test]
    fn test_non_comparisons_stay_unmerged() {
        assert_eq!(merge_pair((LogicOp::And, 1), (Gt, 2)), Unmerged);
        assert_eq!(merge_pair((Lt, 1), (LogicOp::Or, 2)), Unmerged);
    }

    fn cmp(op: Op, n: i32) -> Expression {
        Expression::binary(Expression::Element, op, Expression::Constant(n))
    }

    fn and(left: Expression, right: Expression) -> Expression {
        Expression::binary(left, Op::AND, right)
    }

    #[test]
    fn test_merges_nested_conjunctions() {
        let expr = and(and(cmp(Op::GT, 0), cmp(Op::LT, 0)), cmp(Op::GT, 40));
        assert_eq!(merge_comparisons(&expr), Expression::contradiction());

        let expr = and(and(cmp(Op::GT, 0), cmp(Op::GT, 7)), cmp(Op::EQ, 9));
        assert_eq!(merge_comparisons(&expr).to_string(), "(element=9)");
    }

    #[test]
    fn test_contradiction_absorbs_any_sibling() {
        let square = Expression::binary(Expression::Element, Op::TIMES, Expression::Element);
        let other = Expression::binary(square, Op::LT, Expression::Constant(30));
        let expr = and(other, Expression::contradiction());
        assert_eq!(merge_comparisons(&expr), Expression::contradiction());
    }

    #[test]
    fn test_or_is_left_alone() {
        let expr = Expression::binary(cmp(Op::GT, 3), Op::OR, cmp(Op::GT, 5));
        assert_eq!(merge_comparisons(&expr), expr);
    }

    #[test]
    fn test_unmerged_pair_keeps_conjunction() {
        let expr = and(cmp(Op::GT, 10), cmp(Op::LT, 20));
        assert_eq!(merge_comparisons(&expr).to_string(), "((element>10)&(element<20))");
    }
}
