//! Abstract syntax tree for call chains
//!
//!     Two layers:
//!
//!     Expressions:
//!         The value/operator tree over the implicit element. See [expression].
//!
//!     Calls:
//!         `map`/`filter` stages wrapping one expression each, the linked chain of
//!         stages, and the canonical filter + map pair. See [call].
//!
//!     Every node is an immutable value. All transforms take a tree and return a new
//!     one; nothing is updated in place.

pub mod call;
pub mod expression;

pub use call::{Call, CallChain, FilterMapCall};
pub use expression::{Expression, LogicOp, NumOp, Op};
