//! Parsing module for call chains
//!
//! Source text goes through two steps here:
//! 1. **Lexing**: [tokenize](crate::chain::lexing::tokenize) turns text into tokens
//! 2. **Analysis**: [Parser] consumes the tokens into a type-checked [CallChain]
//!
//! The grammar is small enough to read off the parser's method names:
//!
//! ```text
//! CallChain  := Call ( "%>%" CallChain )?
//! Call       := ("map{" | "filter{") Expression "}"
//! Expression := Element ( Operator Expression )?
//! Element    := "element" | "-" Integer | Integer | "(" Expression ")"
//! ```
//!
//! Operators have no precedence: `a+b*c` nests to the right as `a+(b*c)` and `a*b+c`
//! as `a*(b+c)`. Parentheses are the only grouping tool.

pub mod parser;

pub use parser::Parser;

use crate::chain::ast::CallChain;
use crate::chain::error::CompileError;
use crate::chain::lexing::tokenize;

/// Lex and parse source text into a type-checked call chain.
///
/// Zero tokens is a syntax error.
pub fn parse(source: &str) -> Result<CallChain, CompileError> {
    let tokens = tokenize(source);
    if tokens.is_empty() {
        return Err(CompileError::Syntax);
    }
    Parser::new(tokens).parse()
}
