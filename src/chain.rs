//! Main module for chainfold library functionality
//!
//! Data flows through the submodules in this order:
//!
//!     text -> lexing -> parsing -> folding -> simplify -> text
//!
//! [pipeline] glues the stages together, [processor] exposes named
//! stage/format views of the same pipeline for tooling.

pub mod ast;
pub mod config;
pub mod error;
pub mod folding;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod processor;
pub mod simplify;
pub mod token;
