//! Token types produced by the lexer and consumed by the parser.
//!
//!     The token language is deliberately tiny. Every token is a fixed lexeme except
//!     [Token::Number], which carries its digits unparsed: range checking happens in the
//!     parser so that an oversized literal is reported as a syntax error rather than
//!     being dropped by the lexer.
//!
//!     Stage openers include their brace (`map{`, `filter{`), so a bare `{` never forms
//!     a token on its own.

use serde::Serialize;

/// All tokens recognised in a call-chain source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// `element`
    Element,
    /// `+`
    Plus,
    /// `-`, either binary minus or the sign of a negative literal
    Minus,
    /// `*`
    Times,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `=`
    Equals,
    /// `&`
    And,
    /// `|`
    Or,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[0-9]+`
    Number(String),
    /// `%>%`
    Pipe,
    /// `}`
    CloseBrace,
    /// `filter{`
    FilterOpen,
    /// `map{`
    MapOpen,
}

impl Token {
    /// Source text of the token
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Element => "element",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Times => "*",
            Token::Less => "<",
            Token::Greater => ">",
            Token::Equals => "=",
            Token::And => "&",
            Token::Or => "|",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Number(digits) => digits,
            Token::Pipe => "%>%",
            Token::CloseBrace => "}",
            Token::FilterOpen => "filter{",
            Token::MapOpen => "map{",
        }
    }

    /// Build a token from a lexeme matched by the scanner.
    ///
    /// Returns `None` for text outside the token language.
    pub fn from_lexeme(text: &str) -> Option<Token> {
        let token = match text {
            "element" => Token::Element,
            "+" => Token::Plus,
            "-" => Token::Minus,
            "*" => Token::Times,
            "<" => Token::Less,
            ">" => Token::Greater,
            "=" => Token::Equals,
            "&" => Token::And,
            "|" => Token::Or,
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            "%>%" => Token::Pipe,
            "}" => Token::CloseBrace,
            "filter{" => Token::FilterOpen,
            "map{" => Token::MapOpen,
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Token::Number(digits.to_string())
            }
            _ => return None,
        };
        Some(token)
    }

    /// Check if this token is one of the eight binary operators
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Minus
                | Token::Times
                | Token::Less
                | Token::Greater
                | Token::Equals
                | Token::And
                | Token::Or
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexeme_roundtrip() {
        for text in [
            "element", "+", "-", "*", "<", ">", "=", "&", "|", "(", ")", "%>%", "}", "filter{",
            "map{", "42",
        ] {
            let token = Token::from_lexeme(text).unwrap();
            assert_eq!(token.lexeme(), text);
        }
    }

    #[test]
    fn test_unknown_lexeme() {
        assert_eq!(Token::from_lexeme("{"), None);
        assert_eq!(Token::from_lexeme("elem"), None);
        assert_eq!(Token::from_lexeme(""), None);
    }

    #[test]
    fn test_is_operator() {
        assert!(Token::Minus.is_operator());
        assert!(Token::Or.is_operator());
        assert!(!Token::Pipe.is_operator());
        assert!(!Token::Number("1".to_string()).is_operator());
    }
}
