//! Style tags attached to rendered spans.
//!
//! Each token type maps to a fixed, ordered tag set: its own name first, then
//! any of `value`, `variable`, `assign`, `function`, `operator` that apply.
//! The sets live in a static table so building spans never re-derives them.

use serde::{Serialize, Serializer};

use crate::TokenType;

/// One entry in a span's tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// The token's own type, rendered as its name.
    Token(TokenType),
    Value,
    Variable,
    Assign,
    Function,
    Operator,
    /// The zero-width caret marker.
    Cursor,
    /// Text the lexer could not consume.
    Unparsed,
    /// Leading text no token covers.
    Space,
}

impl StyleTag {
    /// Returns the class name the UI styles by.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::Token(kind) => kind.name(),
            StyleTag::Value => "value",
            StyleTag::Variable => "variable",
            StyleTag::Assign => "assign",
            StyleTag::Function => "function",
            StyleTag::Operator => "operator",
            StyleTag::Cursor => "cursor",
            StyleTag::Unparsed => "unparsed",
            StyleTag::Space => "space",
        }
    }
}

impl Serialize for StyleTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for StyleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) const CURSOR_TAGS: &[StyleTag] = &[StyleTag::Cursor];
pub(crate) const UNPARSED_TAGS: &[StyleTag] = &[StyleTag::Unparsed];
pub(crate) const SPACE_TAGS: &[StyleTag] = &[StyleTag::Space];

impl TokenType {
    /// The tag set for spans produced from a token of this type.
    ///
    /// Sentinels produce no spans and have an empty set.
    pub const fn style_tags(self) -> &'static [StyleTag] {
        use StyleTag::{Assign, Function, Operator, Token, Value, Variable};
        use TokenType as T;

        match self {
            T::Eof | T::ParsingStopped => &[],
            T::Assign => &[Token(T::Assign), Assign],
            T::LParen => &[Token(T::LParen)],
            T::RParen => &[Token(T::RParen)],
            T::Number => &[Token(T::Number), Value],
            T::Variable => &[Token(T::Variable), Value, Variable],
            T::Add => &[Token(T::Add), Operator],
            T::Sub => &[Token(T::Sub), Operator],
            T::Mult => &[Token(T::Mult), Operator],
            T::Exp => &[Token(T::Exp), Operator],
            T::Div => &[Token(T::Div), Operator],
            T::Fdiv => &[Token(T::Fdiv), Operator],
            T::And => &[Token(T::And), Operator],
            T::Or => &[Token(T::Or), Operator],
            T::Xor => &[Token(T::Xor), Operator],
            T::Inv => &[Token(T::Inv), Operator],
            T::Mod => &[Token(T::Mod), Operator],
            T::LShift => &[Token(T::LShift), Operator],
            T::RShift => &[Token(T::RShift), Operator],
            T::Abs => &[Token(T::Abs), Function],
            T::SetOutput => &[Token(T::SetOutput), Function],
            T::Save => &[Token(T::Save), Function],
            T::Load => &[Token(T::Load), Function],
            T::Clear => &[Token(T::Clear), Function],
        }
    }
}
