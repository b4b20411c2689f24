//! # Zappac - Input Line Renderer
//!
//! Renders one calculator input line from a lexer dump, the same way the
//! editor does on every keystroke.
//!
//! ## Quick Start
//!
//! ```bash
//! # Render with the caret at the end
//! cargo run -- --tokens tokens.json "x = 1234567 * 2"
//!
//! # Read the lexer output from stdin, caret after "x = 12"
//! lexer "x = 1234567 * 2" | cargo run -- --tokens - --cursor 6 --output text "x = 1234567 * 2"
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use zappac_core::{Config, ParseResult, Renderer};
use zappac_syntax::RenderedInput;

/// Zappac - render a calculator input line as styled spans
#[derive(Parser, Debug)]
#[command(name = "zappac")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw input text
    #[arg(value_name = "INPUT")]
    input: String,

    /// Lexer output as JSON (`-` reads stdin)
    #[arg(short, long, value_name = "FILE")]
    tokens: PathBuf,

    /// Caret byte offset (defaults to end of input)
    #[arg(short, long, value_name = "OFFSET")]
    cursor: Option<usize>,

    /// Show numerals exactly as typed
    #[arg(long)]
    no_format_numbers: bool,

    /// Numeral locale, e.g. en-US or de-DE
    #[arg(short, long, value_name = "TAG")]
    locale: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Output::Json)]
    output: Output,

    /// Verbose logging (ignored when RUST_LOG is set)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(log_filter(log_level))
        .init();

    tracing::info!("Starting zappac v{}", env!("CARGO_PKG_VERSION"));

    // Build the renderer from config
    let config = load_config(&args)?;
    let renderer = Renderer::from_config(&config)?;

    // Read the lexer output
    let parsed = if args.tokens.as_os_str() == "-" {
        ParseResult::from_reader(std::io::stdin().lock())
    } else {
        ParseResult::from_path(&args.tokens)
    }
    .with_context(|| format!("reading lexer output from {}", args.tokens.display()))?;

    let cursor = args.cursor.unwrap_or(args.input.len());
    if cursor > args.input.len() || !args.input.is_char_boundary(cursor) {
        anyhow::bail!(
            "cursor {} is not a character boundary within {} bytes of input",
            cursor,
            args.input.len()
        );
    }

    // Render and print
    let rendered = renderer.render(&args.input, &parsed, cursor);

    match args.output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&rendered.view)?),
        Output::Text => print!("{}", describe(&rendered.view)),
    }

    if let Some(error) = rendered.lexer_error {
        eprintln!("lexer: {}", error);
    }

    Ok(())
}

/// `RUST_LOG` wins over the verbosity flag when set.
fn log_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Loads the config file and applies command line overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load(),
    };

    if args.no_format_numbers {
        config.display.format_numbers = false;
    }
    if let Some(locale) = &args.locale {
        config.numerals.locale = locale.clone();
    }

    Ok(config)
}

/// Human-readable rendering: the line with `|` at the caret, then one
/// line per span.
fn describe(view: &RenderedInput) -> String {
    let line: String = view
        .spans
        .iter()
        .map(|span| if span.is_cursor() { "|" } else { span.text.as_str() })
        .collect();

    let mut out = format!("{line}\n");
    for span in view.spans.iter().filter(|span| !span.is_cursor()) {
        let tags: Vec<_> = span.tags.iter().map(|tag| tag.as_str()).collect();
        out.push_str(&format!("{:<24} {:?}\n", tags.join(" "), span.text));
    }
    out.push_str(&format!(
        "caret: token {}{}, column {}\n",
        view.cursor_token_index,
        if view.cursor_splits_token { " (split)" } else { "" },
        view.cursor_column()
    ));
    out
}
