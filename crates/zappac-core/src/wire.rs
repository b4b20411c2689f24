//! Decoding of the lexer's parse result.
//!
//! The lexer reports its output as JSON:
//!
//! ```json
//! { "Nodes": [ { "NodeType": 4, "Pos": 0, "Value": "12" },
//!              { "NodeType": "EOF", "Pos": 2 } ],
//!   "Err": "" }
//! ```
//!
//! `NodeType` is either the integer code or the type's name. `Value`, when
//! present, is the token's own text and supplies its length.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use zappac_syntax::{Token, TokenType};

use crate::{CoreError, CoreResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawParseResult {
    #[serde(default)]
    nodes: Option<Vec<RawNode>>,
    #[serde(default)]
    err: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawNode {
    node_type: RawNodeType,
    pos: usize,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNodeType {
    Code(u32),
    Name(String),
}

impl RawNodeType {
    fn resolve(self) -> CoreResult<TokenType> {
        match self {
            RawNodeType::Code(code) => TokenType::from_code(code)
                .ok_or_else(|| CoreError::UnknownNodeType(code.to_string())),
            RawNodeType::Name(name) => name
                .parse()
                .map_err(|_| CoreError::UnknownNodeType(name)),
        }
    }
}

/// Tokens and error text reported by one lexer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    tokens: Vec<Token>,
    error: Option<String>,
}

impl ParseResult {
    pub fn new(tokens: Vec<Token>, error: Option<String>) -> Self {
        Self { tokens, error }
    }

    /// Decodes the lexer's JSON output.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: RawParseResult = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Decodes lexer output from a reader, such as stdin.
    pub fn from_reader(reader: impl Read) -> CoreResult<Self> {
        let raw: RawParseResult = serde_json::from_reader(reader)?;
        Self::try_from(raw)
    }

    /// Decodes lexer output saved to a file.
    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The lexer's error message, if it reported one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl TryFrom<RawParseResult> for ParseResult {
    type Error = CoreError;

    fn try_from(raw: RawParseResult) -> CoreResult<Self> {
        let tokens = raw
            .nodes
            .unwrap_or_default()
            .into_iter()
            .map(|node| {
                let kind = node.node_type.resolve()?;
                Ok(match node.value {
                    Some(value) => Token::with_len(kind, node.pos, value.len()),
                    None => Token::new(kind, node.pos),
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let error = Some(raw.err).filter(|err| !err.is_empty());
        Ok(Self { tokens, error })
    }
}
