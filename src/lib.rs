//! # chainfold
//!
//! Compiles chains of `map{...}` / `filter{...}` stages over a single integer
//! element into the canonical two-stage form `filter{P}%>%map{M}`.
//!
//! ```text
//! map{(element+10)}%>%filter{(element>10)}
//!     => filter{(element>0)}%>%map{(element+10)}
//! ```
//!
//! The whole pipeline lives in the [chain] module; [compile] is the total
//! top-level entry point.

pub mod chain;

pub use chain::pipeline::{compile, compile_with, try_compile, try_compile_with, CompileOptions};
