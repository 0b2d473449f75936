//! End-to-end compile pipeline
//!
//!     text -> tokens -> CallChain -> fold -> simplify -> text
//!
//! [try_compile] returns the simplified pair or the first error; [compile] is the total
//! wrapper that renders either outcome as a string. Nothing here keeps state between
//! calls, so both are safe to call from any number of threads.

use crate::chain::ast::FilterMapCall;
use crate::chain::config::CompileConfig;
use crate::chain::error::CompileError;
use crate::chain::folding::fold;
use crate::chain::lexing::tokenize;
use crate::chain::parsing::Parser;
use crate::chain::simplify::Simplifier;
use tracing::debug;

/// Knobs for a single compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run the algebraic simplifier. When false only the sentinel filter is
    /// materialized.
    pub simplify: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions { simplify: true }
    }
}

impl From<&CompileConfig> for CompileOptions {
    fn from(config: &CompileConfig) -> Self {
        CompileOptions {
            simplify: config.simplify,
        }
    }
}

/// Compile source text to its canonical `filter{..}%>%map{..}` form.
///
/// Never fails: errors are returned as `SYNTAX ERROR` or `TYPE ERROR`.
pub fn compile(source: &str) -> String {
    compile_with(source, CompileOptions::default())
}

/// [compile] with explicit options
pub fn compile_with(source: &str, options: CompileOptions) -> String {
    match try_compile_with(source, options) {
        Ok(pair) => pair.to_string(),
        Err(err) => err.to_string(),
    }
}

/// Compile source text to the simplified canonical pair
pub fn try_compile(source: &str) -> Result<FilterMapCall, CompileError> {
    try_compile_with(source, CompileOptions::default())
}

/// [try_compile] with explicit options
pub fn try_compile_with(
    source: &str,
    options: CompileOptions,
) -> Result<FilterMapCall, CompileError> {
    let tokens = tokenize(source);
    debug!(count = tokens.len(), "tokenized source");
    if tokens.is_empty() {
        return Err(CompileError::Syntax);
    }

    let chain = Parser::new(tokens).parse().map_err(|err| {
        debug!(%err, "parse failed");
        err
    })?;
    debug!(%chain, stages = chain.len(), "parsed chain");

    let folded = fold(&chain);
    debug!(pair = %folded, "folded chain");

    let simplifier = if options.simplify {
        Simplifier::with_defaults()
    } else {
        Simplifier::fold_only()
    };
    Ok(simplifier.run(&folded))
}
