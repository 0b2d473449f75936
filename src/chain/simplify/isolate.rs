//! Offset isolation
//!
//! A comparison whose left side ends in a constant offset moves that offset to the
//! constant on the right:
//!
//!     ((x + c1) cmp c2)  =>  (x cmp (c2 - c1))
//!     ((x - c1) cmp c2)  =>  (x cmp (c2 + c1))
//!
//! for `cmp` one of `> < =`. The rewrite repeats at the same node until the left side no
//! longer ends in an offset, so `(((element+1)+2)>5)` becomes `(element>2)`.

use crate::chain::ast::{Expression, NumOp, Op};

/// Isolate offsets throughout an expression
pub fn isolate_offsets(expr: &Expression) -> Expression {
    match expr {
        Expression::Element | Expression::Constant(_) => expr.clone(),
        Expression::Binary { left, op, right } => match isolate_once(left, *op, right) {
            Some(isolated) => isolate_offsets(&isolated),
            None => Expression::binary(isolate_offsets(left), *op, isolate_offsets(right)),
        },
    }
}

fn isolate_once(left: &Expression, op: Op, right: &Expression) -> Option<Expression> {
    let Op::Logic(cmp) = op else {
        return None;
    };
    if !cmp.is_comparison() {
        return None;
    }
    let Expression::Constant(bound) = *right else {
        return None;
    };
    let Expression::Binary {
        left: inner,
        op: Op::Num(offset_op),
        right: offset,
    } = left
    else {
        return None;
    };
    let Expression::Constant(offset) = **offset else {
        return None;
    };
    let bound = match offset_op {
        NumOp::Plus => bound.wrapping_sub(offset),
        NumOp::Minus => bound.wrapping_add(offset),
        NumOp::Times => return None,
    };
    Some(Expression::binary(
        (**inner).clone(),
        op,
        Expression::Constant(bound),
    ))
}
