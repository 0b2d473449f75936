//! Expression trees over the implicit element
//!
//!     An expression is one of three shapes: the element itself, an integer constant, or a
//!     binary node joining two sub-expressions with an operator. Operators come in two
//!     families:
//!
//!         - [NumOp] (`+ - *`): arithmetic, closed over integers
//!         - [LogicOp] (`> < = & |`): boolean-producing
//!
//!     Well-typedness is not enforced by construction. The parser checks each stage with
//!     [Expression::is_arithmetic] / [Expression::is_boolean] before accepting it.
//!
//! Serialization
//!
//!     `Display` renders the normal form used throughout the crate: `element`, bare
//!     non-negative literals, parenthesized negative literals (`(-3)`), and every binary
//!     node wrapped in parentheses with no whitespace (`(element+(-3))`). Parsing that
//!     text yields the same tree back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumOp {
    Plus,
    Minus,
    Times,
}

impl NumOp {
    /// Apply the operator with two's-complement wrapping
    pub fn apply(self, left: i32, right: i32) -> i32 {
        match self {
            NumOp::Plus => left.wrapping_add(right),
            NumOp::Minus => left.wrapping_sub(right),
            NumOp::Times => left.wrapping_mul(right),
        }
    }
}

/// Boolean-producing operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
    Gt,
    Lt,
    Eq,
    And,
    Or,
}

impl LogicOp {
    /// Check if this operator compares two arithmetic operands
    pub fn is_comparison(self) -> bool {
        matches!(self, LogicOp::Gt | LogicOp::Lt | LogicOp::Eq)
    }
}

/// A binary operator from either family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Num(NumOp),
    Logic(LogicOp),
}

impl Op {
    pub const PLUS: Op = Op::Num(NumOp::Plus);
    pub const MINUS: Op = Op::Num(NumOp::Minus);
    pub const TIMES: Op = Op::Num(NumOp::Times);
    pub const GT: Op = Op::Logic(LogicOp::Gt);
    pub const LT: Op = Op::Logic(LogicOp::Lt);
    pub const EQ: Op = Op::Logic(LogicOp::Eq);
    pub const AND: Op = Op::Logic(LogicOp::And);
    pub const OR: Op = Op::Logic(LogicOp::Or);

    /// Serialized symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Num(NumOp::Plus) => "+",
            Op::Num(NumOp::Minus) => "-",
            Op::Num(NumOp::Times) => "*",
            Op::Logic(LogicOp::Gt) => ">",
            Op::Logic(LogicOp::Lt) => "<",
            Op::Logic(LogicOp::And) => "&",
            Op::Logic(LogicOp::Or) => "|",
            Op::Logic(LogicOp::Eq) => "=",
        }
    }

    /// Operator to use when the operands of a node are swapped.
    ///
    /// `>` and `<` trade places; every other operator maps to itself, `-` included.
    /// Swapping the operands of a subtraction therefore changes its value.
    pub fn converse(self) -> Op {
        match self {
            Op::Logic(LogicOp::Gt) => Op::LT,
            Op::Logic(LogicOp::Lt) => Op::GT,
            other => other,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An expression over the implicit element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    /// The implicit input value
    Element,
    /// An integer literal
    Constant(i32),
    /// `(left op right)`
    Binary {
        left: Box<Expression>,
        op: Op,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(left: Expression, op: Op, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// `(element=element)`, the always-true predicate
    pub fn tautology() -> Self {
        Expression::binary(Expression::Element, Op::EQ, Expression::Element)
    }

    /// `(1=0)`, the always-false predicate
    pub fn contradiction() -> Self {
        Expression::binary(Expression::Constant(1), Op::EQ, Expression::Constant(0))
    }

    /// Replace every occurrence of the element with `replacement`.
    ///
    /// This is function composition: `e.substitute(m)` applies `e` to the output of `m`.
    pub fn substitute(&self, replacement: &Expression) -> Expression {
        match self {
            Expression::Element => replacement.clone(),
            Expression::Constant(value) => Expression::Constant(*value),
            Expression::Binary { left, op, right } => Expression::binary(
                left.substitute(replacement),
                *op,
                right.substitute(replacement),
            ),
        }
    }

    /// True for the element, constants, and `+ - *` nodes over arithmetic operands
    pub fn is_arithmetic(&self) -> bool {
        match self {
            Expression::Element | Expression::Constant(_) => true,
            Expression::Binary {
                left,
                op: Op::Num(_),
                right,
            } => left.is_arithmetic() && right.is_arithmetic(),
            Expression::Binary {
                op: Op::Logic(_), ..
            } => false,
        }
    }

    /// True for logic nodes whose operands are both arithmetic or both boolean
    pub fn is_boolean(&self) -> bool {
        match self {
            Expression::Element | Expression::Constant(_) => false,
            Expression::Binary {
                left,
                op: Op::Logic(_),
                right,
            } => {
                (left.is_arithmetic() && right.is_arithmetic())
                    || (left.is_boolean() && right.is_boolean())
            }
            Expression::Binary { op: Op::Num(_), .. } => false,
        }
    }

    /// Fold arithmetic nodes whose operands are both constants, bottom-up
    pub fn evaluate_constants(&self) -> Expression {
        match self {
            Expression::Element | Expression::Constant(_) => self.clone(),
            Expression::Binary { left, op, right } => {
                let left = left.evaluate_constants();
                let right = right.evaluate_constants();
                match (&left, op, &right) {
                    (Expression::Constant(l), Op::Num(num), Expression::Constant(r)) => {
                        Expression::Constant(num.apply(*l, *r))
                    }
                    _ => Expression::binary(left, *op, right),
                }
            }
        }
    }

    /// Move constants to the right-hand side of every node.
    ///
    /// A node with a constant on the left and a non-constant on the right has its operands
    /// swapped and its operator replaced by [Op::converse]; children are normalized either
    /// way.
    pub fn normalize_operand_order(&self) -> Expression {
        match self {
            Expression::Element | Expression::Constant(_) => self.clone(),
            Expression::Binary { left, op, right } => {
                let left_constant = matches!(**left, Expression::Constant(_));
                let right_constant = matches!(**right, Expression::Constant(_));
                if left_constant && !right_constant {
                    Expression::binary(
                        right.normalize_operand_order(),
                        op.converse(),
                        (**left).clone(),
                    )
                } else {
                    Expression::binary(
                        left.normalize_operand_order(),
                        *op,
                        right.normalize_operand_order(),
                    )
                }
            }
        }
    }

    /// True for `(a=b)` with distinct constants `a` and `b`
    pub fn is_contradiction(&self) -> bool {
        match self {
            Expression::Binary {
                left,
                op: Op::Logic(LogicOp::Eq),
                right,
            } => matches!(
                (&**left, &**right),
                (Expression::Constant(a), Expression::Constant(b)) if a != b
            ),
            _ => false,
        }
    }

    /// Split `(element op n)` into its operator and constant
    pub fn as_element_comparison(&self) -> Option<(LogicOp, i32)> {
        match self {
            Expression::Binary {
                left,
                op: Op::Logic(op),
                right,
            } if op.is_comparison() => match (&**left, &**right) {
                (Expression::Element, Expression::Constant(n)) => Some((*op, *n)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Element => f.write_str("element"),
            Expression::Constant(value) if *value < 0 => write!(f, "({})", value),
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::Binary { left, op, right } => write!(f, "({}{}{})", left, op, right),
        }
    }
}
