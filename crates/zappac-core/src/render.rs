//! Renders input lines with configured numeral formatting.

use zappac_syntax::{NumeralFormatter, RenderedInput, SpanBuilder, Token};

use crate::wire::ParseResult;
use crate::{Config, CoreResult};

/// Rendered spans together with the lexer's error, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub view: RenderedInput,
    pub lexer_error: Option<String>,
}

/// Owns the numeral formatter built from configuration.
///
/// Construct once and reuse for every keystroke.
#[derive(Debug, Clone)]
pub struct Renderer {
    formatter: NumeralFormatter,
    format_numbers: bool,
}

impl Renderer {
    pub fn new(formatter: NumeralFormatter, format_numbers: bool) -> Self {
        Self {
            formatter,
            format_numbers,
        }
    }

    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let locale = config.numeral_locale()?;
        Ok(Self::new(
            NumeralFormatter::new(locale),
            config.display.format_numbers,
        ))
    }

    pub fn format_numbers(&self) -> bool {
        self.format_numbers
    }

    /// Renders `input` from a decoded lexer result.
    pub fn render(&self, input: &str, parsed: &ParseResult, cursor: usize) -> Rendered {
        if let Some(error) = parsed.error() {
            tracing::warn!("Lexer reported: {}", error);
        }

        Rendered {
            view: self.render_tokens(input, parsed.tokens(), cursor),
            lexer_error: parsed.error().map(str::to_string),
        }
    }

    /// Renders `input` from tokens already in hand.
    pub fn render_tokens(&self, input: &str, tokens: &[Token], cursor: usize) -> RenderedInput {
        tracing::debug!(
            len = input.len(),
            tokens = tokens.len(),
            cursor,
            "Rendering input line"
        );
        SpanBuilder::new(&self.formatter).build(input, tokens, self.format_numbers, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zappac_syntax::{StyleTag, TokenType};

    fn parsed() -> ParseResult {
        // "1234*x"
        ParseResult::new(
            vec![
                Token::new(TokenType::Number, 0),
                Token::new(TokenType::Mult, 4),
                Token::new(TokenType::Variable, 5),
                Token::new(TokenType::Eof, 6),
            ],
            None,
        )
    }

    #[test]
    fn test_render_uses_config() {
        let renderer = Renderer::from_config(&Config::default()).unwrap();
        let rendered = renderer.render("1234*x", &parsed(), 6);
        assert_eq!(rendered.view.text(), "1,234*x");
        assert_eq!(rendered.lexer_error, None);

        let mut config = Config::default();
        config.display.format_numbers = false;
        let renderer = Renderer::from_config(&config).unwrap();
        assert_eq!(renderer.render("1234*x", &parsed(), 6).view.text(), "1234*x");
    }

    #[test]
    fn test_render_with_locale() {
        let mut config = Config::default();
        config.numerals.locale = "de-DE".to_string();
        let renderer = Renderer::from_config(&config).unwrap();
        assert_eq!(renderer.render("1234*x", &parsed(), 0).view.text(), "1.234*x");
    }

    #[test]
    fn test_render_passes_lexer_error() {
        let parsed = ParseResult::new(
            vec![
                Token::new(TokenType::Number, 0),
                Token::new(TokenType::ParsingStopped, 2),
            ],
            Some("unexpected '$'".to_string()),
        );
        let renderer = Renderer::new(NumeralFormatter::default(), false);
        let rendered = renderer.render("12$", &parsed, 3);

        assert_eq!(rendered.lexer_error.as_deref(), Some("unexpected '$'"));
        let tail = &rendered.view.spans[1];
        assert_eq!(tail.text, "$");
        assert!(tail.has_tag(StyleTag::Unparsed));
    }

    #[test]
    fn test_renderer_is_repeatable() {
        let renderer = Renderer::from_config(&Config::default()).unwrap();
        let first = renderer.render("1234*x", &parsed(), 2);
        let second = renderer.render("1234*x", &parsed(), 2);
        assert_eq!(first, second);
        assert!(first.view.cursor_splits_token);
    }
}
