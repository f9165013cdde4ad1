//! Error types.
//!
//! - `FitError`: the library taxonomy. Every fit/ingest failure carries the
//!   `Stage` it happened in so callers can tell a failed Mandelbrot search from
//!   a failed Zipf regression.
//! - `AppError`: what the binary reports (message + process exit code).
//!
//! Exit codes: 2 = input/configuration/I/O, 3 = insufficient data,
//! 4 = numerical failure.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Where in the analysis an error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Regression,
    ZipfFit,
    MandelbrotFit,
    Score,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Ingest => "ingest",
            Stage::Regression => "log-linear regression",
            Stage::ZipfFit => "Zipf fit",
            Stage::MandelbrotFit => "Mandelbrot fit",
            Stage::Score => "R² score",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("Input file '{}' not found.", path.display())]
    InputNotFound { path: PathBuf },

    #[error("{stage}: invalid input: {message}")]
    InvalidInput { stage: Stage, message: String },

    #[error("{stage}: degenerate input: {message}")]
    DegenerateInput { stage: Stage, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl FitError {
    pub fn invalid_input(stage: Stage, message: impl Into<String>) -> Self {
        FitError::InvalidInput {
            stage,
            message: message.into(),
        }
    }

    pub fn degenerate(stage: Stage, message: impl Into<String>) -> Self {
        FitError::DegenerateInput {
            stage,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        FitError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Re-tag a numeric error with the caller's stage.
    ///
    /// The shared regression reports `Stage::Regression`; the fitters wrap it so
    /// the message names the fit that failed.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            FitError::InvalidInput { message, .. } => FitError::InvalidInput { stage, message },
            FitError::DegenerateInput { message, .. } => FitError::DegenerateInput { stage, message },
            other => other,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            FitError::InvalidInput { stage, .. } | FitError::DegenerateInput { stage, .. } => Some(*stage),
            FitError::InputNotFound { .. } => Some(Stage::Ingest),
            FitError::InvalidConfiguration { .. } => None,
        }
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InputNotFound { .. } | FitError::InvalidConfiguration { .. } => 2,
            FitError::InvalidInput { stage: Stage::Ingest, .. } => 2,
            FitError::DegenerateInput { .. } => 3,
            FitError::InvalidInput { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
