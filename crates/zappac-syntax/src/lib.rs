//! # Zappac Syntax
//!
//! Turns the calculator lexer's sparse token stream into styled display
//! spans for the input line.
//!
//! ## Pipeline
//!
//! ```text
//!  raw input ─┐
//!             ├─► SpanBuilder ──► RenderedInput { spans, cursor locator }
//!  tokens ────┘        │
//!                      └─► NumeralFormatter (Number tokens only)
//! ```
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! mutable state. Re-running a build with the same arguments gives the same
//! spans, which is what lets the editor rebuild on every keystroke.

mod numeral;
mod spans;
mod style;
mod token;

pub use numeral::{NumeralFormatter, NumeralLocale};
pub use spans::{RenderedInput, Span, SpanBuilder};
pub use style::StyleTag;
pub use token::{Token, TokenType};

/// Result type for syntax operations
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Errors resolving lexer or locale identifiers
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown token type: {0}")]
    UnknownTokenType(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_grouped_assignment() {
        // "total = 1500000 * rate"
        let input = "total = 1500000 * rate";
        let tokens = [
            Token::new(TokenType::Variable, 0),
            Token::new(TokenType::Assign, 6),
            Token::new(TokenType::Number, 8),
            Token::new(TokenType::Mult, 16),
            Token::new(TokenType::Variable, 18),
            Token::new(TokenType::Eof, input.len()),
        ];

        let formatter = NumeralFormatter::new(NumeralLocale::EN_US);
        let rendered = SpanBuilder::new(&formatter).build(input, &tokens, true, 10);

        assert_eq!(rendered.text(), "total = 1,500,000 * rate");
        assert_eq!(rendered.cursor_token_index, 2);
        assert!(rendered.cursor_splits_token);

        let left = &rendered.spans[rendered.cursor_span_index().unwrap() - 1];
        assert_eq!(left.text, "1,5");
    }

    #[test]
    fn test_error_messages() {
        let err = "Nope".parse::<TokenType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown token type: Nope");

        let err = NumeralLocale::from_tag("tlh").unwrap_err();
        assert_eq!(err.to_string(), "Unknown locale: tlh");
    }
}
