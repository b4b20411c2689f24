//! # Zappac Core
//!
//! Glue between the calculator's lexer and its input line display.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                   Renderer                    │
//! │  ┌──────────┐  ┌────────────┐  ┌───────────┐  │
//! │  │  Config  │─►│ Formatter  │─►│SpanBuilder│  │
//! │  └──────────┘  └────────────┘  └─────▲─────┘  │
//! │                                      │        │
//! │  lexer JSON ──► ParseResult ─────────┘        │
//! └───────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod render;
pub mod wire;

pub use config::{Config, ConfigError};
pub use render::{Rendered, Renderer};
pub use wire::ParseResult;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Invalid lexer output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
