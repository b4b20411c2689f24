//! Token model shared with the external lexer.
//!
//! ## Learning: Closed Enumerations
//!
//! The lexer speaks in integer codes or names. Resolving them once into a
//! `TokenType` means every later `match` is checked by the compiler: adding a
//! new token kind without deciding how it is styled is a build error, not a
//! silently uncoloured span.

use std::fmt;
use std::str::FromStr;

use crate::SyntaxError;

/// Kind of a lexer token.
///
/// Declaration order matches the lexer's integer encoding, except for
/// `ParsingStopped` which the lexer only reports by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Eof,
    Assign,
    LParen,
    RParen,
    Number,
    Variable,
    Add,
    Sub,
    Mult,
    Exp,
    Div,
    Fdiv,
    And,
    Or,
    Xor,
    Inv,
    Mod,
    LShift,
    RShift,
    Abs,
    SetOutput,
    Save,
    Load,
    Clear,
    ParsingStopped,
}

/// Token types addressable by the lexer's integer code, in code order.
const WIRE_ORDER: [TokenType; 24] = [
    TokenType::Eof,
    TokenType::Assign,
    TokenType::LParen,
    TokenType::RParen,
    TokenType::Number,
    TokenType::Variable,
    TokenType::Add,
    TokenType::Sub,
    TokenType::Mult,
    TokenType::Exp,
    TokenType::Div,
    TokenType::Fdiv,
    TokenType::And,
    TokenType::Or,
    TokenType::Xor,
    TokenType::Inv,
    TokenType::Mod,
    TokenType::LShift,
    TokenType::RShift,
    TokenType::Abs,
    TokenType::SetOutput,
    TokenType::Save,
    TokenType::Load,
    TokenType::Clear,
];

impl TokenType {
    /// Every token type, sentinels included.
    pub const ALL: [TokenType; 25] = {
        let mut all = [TokenType::ParsingStopped; 25];
        let mut i = 0;
        while i < WIRE_ORDER.len() {
            all[i] = WIRE_ORDER[i];
            i += 1;
        }
        all
    };

    /// Resolves the lexer's integer code.
    pub fn from_code(code: u32) -> Option<Self> {
        WIRE_ORDER.get(code as usize).copied()
    }

    /// The name the lexer uses for this type. Also the base style tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Assign => "Assign",
            Self::LParen => "LParen",
            Self::RParen => "RParen",
            Self::Number => "Number",
            Self::Variable => "Variable",
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mult => "Mult",
            Self::Exp => "Exp",
            Self::Div => "Div",
            Self::Fdiv => "Fdiv",
            Self::And => "And",
            Self::Or => "Or",
            Self::Xor => "Xor",
            Self::Inv => "Inv",
            Self::Mod => "Mod",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
            Self::Abs => "Abs",
            Self::SetOutput => "SetOutput",
            Self::Save => "Save",
            Self::Load => "Load",
            Self::Clear => "Clear",
            Self::ParsingStopped => "ParsingStopped",
        }
    }

    /// Stream markers that carry an offset but no visible text.
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::Eof | Self::ParsingStopped)
    }

    /// Numerals and variables.
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Number | Self::Variable)
    }

    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Mult
                | Self::Exp
                | Self::Div
                | Self::Fdiv
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Inv
                | Self::Mod
                | Self::LShift
                | Self::RShift
        )
    }

    /// Built-in calls such as `abs(..)` or `save(..)`.
    pub const fn is_function(self) -> bool {
        matches!(
            self,
            Self::Abs | Self::SetOutput | Self::Save | Self::Load | Self::Clear
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenType {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SyntaxError::UnknownTokenType(s.to_string()))
    }
}

/// A lexer token: a type and the byte offset where it starts.
///
/// The token's end is implied by the next token's start. `len` is only
/// known when the lexer also reported the token's own text, and is used as
/// the end for a token that has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub start: usize,
    pub len: Option<usize>,
}

impl Token {
    /// Creates a token without a known length.
    pub fn new(kind: TokenType, start: usize) -> Self {
        Self {
            kind,
            start,
            len: None,
        }
    }

    /// Creates a token whose own text length is known.
    pub fn with_len(kind: TokenType, start: usize, len: usize) -> Self {
        Self {
            kind,
            start,
            len: Some(len),
        }
    }

    /// End offset used when no token follows this one.
    ///
    /// Zero width unless the lexer reported a length.
    pub fn fallback_end(&self) -> usize {
        self.start + self.len.unwrap_or(0)
    }
}
