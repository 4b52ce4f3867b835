//! Miette-based error diagnostics for CLI error presentation.
//!
//! Renders configuration parse errors with the offending region of the file
//! highlighted, and attaches help text to the other startup failures.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as CrateConfigError, DispatchError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sprinkle::config))]
pub struct ConfigError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Startup error without a source location.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sprinkle::startup))]
pub struct StartupError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Build a TOML parse diagnostic pointing into the file at `path`.
///
/// Returns `None` when the error carries no span or the file can no longer be
/// read.
pub fn parse_report(err: &toml::de::Error, path: &Path) -> Option<miette::Report> {
    let span = err.span()?;
    let src = std::fs::read_to_string(path).ok()?;
    let len = span.end.saturating_sub(span.start).max(1);
    let diagnostic = ConfigError::new(
        err.message().to_string(),
        path.display().to_string(),
        src,
        span.start,
        len,
    )
    .with_help("see sprinkle.toml.example for the expected layout");
    Some(miette::Report::new(diagnostic))
}

/// Help text for a startup failure, if there is a useful one.
#[must_use]
pub fn help_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Config(CrateConfigError::MissingField { field: "RPC_URL" }) => {
            Some("set RPC_URL in .env or pass --rpc-url")
        }
        Error::Config(CrateConfigError::MissingField { field: "CHAIN_ID" }) => {
            Some("set CHAIN_ID in .env or pass --chain-id")
        }
        Error::Config(CrateConfigError::MissingField { field: "PRIVATE_KEY" }) => {
            Some(r#"set PRIVATE_KEY in .env as a JSON list, e.g. PRIVATE_KEY=["0x..."]"#)
        }
        Error::Config(CrateConfigError::MissingField { field: "count" }) => {
            Some("pass --count or set dispatch.count when stdin is not a terminal")
        }
        Error::Dispatch(DispatchError::Connectivity(_)) => {
            Some("check that RPC_URL points at a reachable JSON-RPC node")
        }
        _ => None,
    }
}

/// Render any startup error as a miette report.
#[must_use]
pub fn report(err: &Error, config_path: Option<&Path>) -> miette::Report {
    if let (Error::Config(CrateConfigError::Parse(parse)), Some(path)) = (err, config_path) {
        if let Some(report) = parse_report(parse, path) {
            return report;
        }
    }
    miette::Report::new(StartupError {
        message: err.to_string(),
        help: help_for(err).map(str::to_string),
    })
}
