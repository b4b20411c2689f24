//! Builds styled display spans from raw input and a lexer token stream.
//!
//! ## Learning: Reconstructing Text from Offsets
//!
//! The lexer only reports where each token *starts*. A token's text is the
//! slice up to the next token's start, so walking the stream pairwise
//! recovers every character without the lexer ever copying strings:
//!
//! ```text
//! input   1 2 3 4 + 5 6
//! tokens  Number@0  Add@4  Number@5  EOF@7
//! spans   "1234"    "+"    "56"
//! ```
//!
//! The caret is injected as an empty span tagged `cursor`, splitting the
//! token it falls inside. Numerals may be displayed with grouping
//! separators, so their split point is mapped from raw offsets into
//! display offsets first.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::style::{CURSOR_TAGS, SPACE_TAGS, UNPARSED_TAGS};
use crate::{NumeralFormatter, StyleTag, Token, TokenType};

/// A run of display text with its style tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub tags: &'static [StyleTag],
}

impl Span {
    pub fn new(text: impl Into<String>, tags: &'static [StyleTag]) -> Self {
        Self {
            text: text.into(),
            tags,
        }
    }

    /// The zero-width caret marker.
    pub fn cursor() -> Self {
        Self::new(String::new(), CURSOR_TAGS)
    }

    pub fn is_cursor(&self) -> bool {
        self.tags == CURSOR_TAGS
    }

    pub fn has_tag(&self, tag: StyleTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Spans for one input line plus where the caret sits among the tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedInput {
    /// Index of the token the caret is inside of or just before.
    /// Equals the token count when the caret follows every token.
    pub cursor_token_index: usize,
    /// Whether that token was split in two to place the caret.
    pub cursor_splits_token: bool,
    pub spans: Vec<Span>,
}

impl RenderedInput {
    /// Position of the cursor span within `spans`.
    pub fn cursor_span_index(&self) -> Option<usize> {
        self.spans.iter().position(Span::is_cursor)
    }

    /// Concatenated display text of every span.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Terminal column of the caret, counting wide characters as two cells.
    pub fn cursor_column(&self) -> usize {
        self.spans
            .iter()
            .take_while(|span| !span.is_cursor())
            .map(|span| span.text.width())
            .sum()
    }
}

/// Turns token streams into display spans.
///
/// Holds only a borrowed formatter, so one builder can serve every
/// keystroke and calls with equal arguments produce equal output.
#[derive(Debug, Clone, Copy)]
pub struct SpanBuilder<'f> {
    formatter: &'f NumeralFormatter,
}

impl<'f> SpanBuilder<'f> {
    pub fn new(formatter: &'f NumeralFormatter) -> Self {
        Self { formatter }
    }

    /// Builds the spans for `input` with the caret at byte offset `cursor`.
    ///
    /// `tokens` must be sorted by start offset and `cursor` must not exceed
    /// `input.len()`. A cursor past the end is placed after the last span.
    pub fn build(
        &self,
        input: &str,
        tokens: &[Token],
        format_numerals: bool,
        cursor: usize,
    ) -> RenderedInput {
        let mut sink = SpanSink::new(cursor, tokens.len() + 2);
        let mut last = 0;

        if cursor == 0 {
            sink.place_cursor(0, false);
        }

        for (index, token) in tokens.iter().enumerate() {
            let start = token.start;

            if token.kind.is_sentinel() {
                last = start;
                continue;
            }

            if start > last {
                sink.push_plain(slice(input, last, start), last, SPACE_TAGS, index);
            }

            let end = tokens
                .get(index + 1)
                .map_or_else(|| token.fallback_end(), |next| next.start);
            let raw = slice(input, start, end);
            let tags = token.kind.style_tags();

            if token.kind == TokenType::Number {
                let display = self.formatter.format(raw, format_numerals);
                if !sink.has_cursor() && start < cursor && cursor < end {
                    let separator = self.formatter.grouping_separator();
                    let split = if display == raw {
                        cursor - start
                    } else {
                        display_offset(&display, cursor - start, separator)
                    };
                    sink.push_split(&display, split, tags, index);
                } else {
                    if start == cursor {
                        sink.place_cursor(index, false);
                    }
                    sink.push(&display, tags);
                }
            } else {
                sink.push_plain(raw, start, tags, index);
            }

            last = end;
        }

        if last < input.len() {
            let tail = slice(input, last, input.len());
            sink.push_plain(tail, last, UNPARSED_TAGS, tokens.len());
        }

        // Caret at the end of input, or past it.
        sink.place_cursor(tokens.len(), false);

        let rendered = sink.finish();
        tracing::trace!(
            tokens = tokens.len(),
            spans = rendered.spans.len(),
            cursor_token = rendered.cursor_token_index,
            split = rendered.cursor_splits_token,
            "built input spans"
        );
        rendered
    }
}

/// Accumulates spans and guarantees the caret is placed at most once.
struct SpanSink {
    cursor: usize,
    spans: Vec<Span>,
    placed: Option<(usize, bool)>,
}

impl SpanSink {
    fn new(cursor: usize, capacity: usize) -> Self {
        Self {
            cursor,
            spans: Vec::with_capacity(capacity),
            placed: None,
        }
    }

    fn has_cursor(&self) -> bool {
        self.placed.is_some()
    }

    fn place_cursor(&mut self, token_index: usize, splits_token: bool) {
        if self.placed.is_none() {
            self.spans.push(Span::cursor());
            self.placed = Some((token_index, splits_token));
        }
    }

    fn push(&mut self, text: &str, tags: &'static [StyleTag]) {
        self.spans.push(Span::new(text, tags));
    }

    /// Pushes text whose display form equals the raw input at `start`,
    /// splitting it if the caret falls inside.
    fn push_plain(&mut self, text: &str, start: usize, tags: &'static [StyleTag], index: usize) {
        if self.has_cursor() {
            self.push(text, tags);
        } else if self.cursor == start {
            self.place_cursor(index, false);
            self.push(text, tags);
        } else if start < self.cursor && self.cursor < start + text.len() {
            self.push_split(text, self.cursor - start, tags, index);
        } else {
            self.push(text, tags);
        }
    }

    /// Pushes `text` in two halves around the caret.
    fn push_split(&mut self, text: &str, at: usize, tags: &'static [StyleTag], index: usize) {
        let (left, right) = text.split_at_checked(at).unwrap_or((text, ""));
        self.push(left, tags);
        self.place_cursor(index, true);
        self.push(right, tags);
    }

    fn finish(self) -> RenderedInput {
        let (cursor_token_index, cursor_splits_token) = self.placed.unwrap_or_default();
        RenderedInput {
            cursor_token_index,
            cursor_splits_token,
            spans: self.spans,
        }
    }
}

/// Slices `input[start..end]`, yielding an empty string for offsets that
/// are out of range, reversed, or not on a character boundary.
fn slice(input: &str, start: usize, end: usize) -> &str {
    input.get(start..end).unwrap_or_default()
}

/// Maps a byte offset into a raw numeral onto its grouped display form.
///
/// Only separators between two digits are grouping, so the result points at
/// the first display character after `raw_offset` raw characters and never
/// lands immediately left of a separator.
fn display_offset(display: &str, raw_offset: usize, separator: char) -> usize {
    let mut consumed = 0;
    let mut previous = None;
    let mut chars = display.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        let grouping = ch == separator
            && previous.is_some_and(|p: char| p.is_ascii_digit())
            && chars.peek().is_some_and(|&(_, next)| next.is_ascii_digit());
        previous = Some(ch);
        if grouping {
            continue;
        }
        if consumed >= raw_offset {
            return index;
        }
        // Raw numerals are ASCII; one display character stands for one raw byte.
        consumed += 1;
    }
    display.len()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::NumeralLocale;
    use proptest::prelude::*;

    /// Minimal tokenizer for the calculator alphabet. Spaces are skipped, so
    /// they end up inside the preceding token's span as with the real lexer.
    fn lex(input: &str) -> Vec<Token> {
        let bytes = input.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            let kind = match b {
                b' ' => {
                    i += 1;
                    continue;
                }
                b'0'..=b'9' | b'.' => TokenType::Number,
                b'a'..=b'z' => TokenType::Variable,
                b'=' => TokenType::Assign,
                b'(' => TokenType::LParen,
                b')' => TokenType::RParen,
                b'+' => TokenType::Add,
                b'-' => TokenType::Sub,
                b'*' => TokenType::Mult,
                _ => TokenType::Mod,
            };
            tokens.push(Token::new(kind, i));
            i += 1;
            while i < bytes.len() && matches!(kind, TokenType::Number | TokenType::Variable) {
                let same = match kind {
                    TokenType::Number => bytes[i].is_ascii_digit() || bytes[i] == b'.',
                    _ => bytes[i].is_ascii_lowercase(),
                };
                if !same {
                    break;
                }
                i += 1;
            }
        }
        tokens.push(Token::new(TokenType::Eof, input.len()));
        tokens
    }

    fn input_and_cursor() -> impl Strategy<Value = (String, usize)> {
        "[0-9a-z .=()+*%-]{0,24}".prop_flat_map(|input| {
            let len = input.len();
            (Just(input), 0..=len)
        })
    }

    fn build(input: &str, format: bool, cursor: usize) -> RenderedInput {
        let formatter = NumeralFormatter::new(NumeralLocale::EN_US);
        SpanBuilder::new(&formatter).build(input, &lex(input), format, cursor)
    }

    proptest! {
        #[test]
        fn reconstructs_input_without_formatting((input, cursor) in input_and_cursor()) {
            prop_assert_eq!(build(&input, false, cursor).text(), input);
        }

        #[test]
        fn grouping_only_inserts_separators((input, cursor) in input_and_cursor()) {
            let text = build(&input, true, cursor).text().replace(',', "");
            prop_assert_eq!(text, input);
        }

        #[test]
        fn exactly_one_cursor((input, cursor) in input_and_cursor(), format in any::<bool>()) {
            let rendered = build(&input, format, cursor);
            let cursors = rendered.spans.iter().filter(|s| s.is_cursor()).count();
            prop_assert_eq!(cursors, 1);
        }

        #[test]
        fn cursor_bounds(input in "[0-9a-z .=()+*%-]{0,24}", format in any::<bool>()) {
            let first = build(&input, format, 0);
            prop_assert_eq!(first.cursor_span_index(), Some(0));

            let last = build(&input, format, input.len());
            prop_assert_eq!(last.cursor_span_index(), Some(last.spans.len() - 1));
        }

        #[test]
        fn cursor_moves_monotonically(input in "[0-9a-z .=()+*%-]{0,24}", format in any::<bool>()) {
            let mut previous_text_before = 0;
            for cursor in 0..=input.len() {
                let rendered = build(&input, format, cursor);
                let before: usize = rendered
                    .spans
                    .iter()
                    .take_while(|s| !s.is_cursor())
                    .map(|s| s.text.replace(',', "").len())
                    .sum();
                prop_assert_eq!(before, cursor);
                prop_assert!(before >= previous_text_before);
                previous_text_before = before;
            }
        }

        #[test]
        fn deterministic((input, cursor) in input_and_cursor(), format in any::<bool>()) {
            prop_assert_eq!(build(&input, format, cursor), build(&input, format, cursor));
        }
    }
}
