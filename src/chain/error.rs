//! Compile errors
//!
//! There are exactly two ways a compile can fail, and both abort the whole run: a
//! malformed token stream, or a stage whose expression has the wrong type for its kind.
//! The `Display` strings are the literal results returned by [crate::compile].

use std::fmt;

/// Errors that can occur while compiling a call chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileError {
    /// Unexpected token, premature end of input, unmatched bracket, leftover tokens,
    /// oversized literal, or no tokens at all
    Syntax,
    /// A filter whose expression is not boolean, or a map whose expression is not
    /// arithmetic
    Type,
}

impl std::error::Error for CompileError {}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Syntax => write!(f, "SYNTAX ERROR"),
            CompileError::Type => write!(f, "TYPE ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CompileError::Syntax.to_string(), "SYNTAX ERROR");
        assert_eq!(CompileError::Type.to_string(), "TYPE ERROR");
    }
}
