//! Error types for the rating pipeline

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Which input could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The PGN of finished games
    ResultsLog,
    /// The BayesElo executable
    Backend,
    /// A TOML config file named on the command line
    Config,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::ResultsLog => write!(f, "PGN"),
            InputKind::Backend => write!(f, "BayesElo executable"),
            InputKind::Config => write!(f, "config file"),
        }
    }
}

/// Errors that can occur while rating a PGN
///
/// Every variant is fatal for the run; the binary prints the `Display`
/// form on stderr and exits non-zero.
#[derive(Error, Debug)]
pub enum RateError {
    /// A required input is missing or unusable
    #[error("{kind} not found: {} ({reason})", path.display())]
    InputNotFound {
        kind: InputKind,
        path: PathBuf,
        reason: String,
    },

    /// BayesElo ran but exited with a failure status
    #[error("BayesElo failed ({status})\n{output}")]
    BackendFailure { status: ExitStatus, output: String },

    /// No ratings row was recognized in the BayesElo output
    #[error("could not parse BayesElo ratings output\n--- tail ---\n{tail}")]
    ParseFailure { tail: String },

    /// The requested engine is not among the rated players
    #[error("engine '{name}' not found among players: {known:?}")]
    ParticipantNotFound { name: String, known: Vec<String> },

    /// Config file could not be parsed
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RateError {
    pub(crate) fn input_not_found(
        kind: InputKind,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        RateError::InputNotFound {
            kind,
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RateError>;
