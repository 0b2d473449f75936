//! Lexer
//!
//! Base tokenization for call-chain sources. The lexer is a single regular-expression
//! scan: every leftmost match of the token grammar becomes a token, in source order, and
//! any text between matches (whitespace included) is skipped.
//!
//!     Skipping is silent. `map{ (element + 1) }` and `map{(element+1)}` tokenize the
//!     same, and so does `map{(elementx+1)}`. Callers that need strictness must check the
//!     source themselves; the parser only ever sees well-formed tokens.

use crate::chain::token::Token;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lazy-compiled scanner for the token grammar.
///
/// Alternation order matters: the regex engine is leftmost-first, so `filter{` and
/// `map{` are only reachable because no shorter alternative matches their first byte.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"element|\+|-|\*|<|>|=|&|\||\(|\)|[0-9]+|%>%|\}|filter\{|map\{").unwrap()
});

/// Tokenize source text with location information
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    TOKEN_REGEX
        .find_iter(source)
        .filter_map(|m| Token::from_lexeme(m.as_str()).map(|token| (token, m.range())))
        .collect()
}

/// Tokenize source text, dropping locations
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with_spans(source)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}
