//! Error types for ifcbot-core.
//!
//! The pipeline is a best-effort extractor: malformed records and unresolvable
//! references are skipped, never surfaced. What remains are fatal conditions:
//! - reading the source document failed
//! - writing the Turtle output failed
//! - the caller supplied an invalid configuration or an input over the limits
//! - an internal invariant was broken (a stage received the wrong data shape)

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the core crate.
pub type IfcBotResult<T> = Result<T, IfcBotError>;

#[derive(Debug, Error)]
pub enum IfcBotError {
    #[error("failed to read source {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl IfcBotError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Stable, dot-delimited error code for CLI/JSON consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "io.read",
            Self::Write { .. } => "io.write",
            Self::InvalidArgument(_) => "input.invalid_argument",
            Self::Invariant(_) => "pipeline.invariant",
        }
    }

    /// True for I/O failures (read or write).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}
