//! Reporting utilities: terminal summary, text report, and report files.

use std::fs;
use std::path::Path;

use crate::error::AppError;

pub mod format;

pub use format::*;

/// Write a finished text report to disk.
pub fn write_text_report(path: &Path, text: &str) -> Result<(), AppError> {
    fs::write(path, text)
        .map_err(|e| AppError::new(2, format!("Failed to write report '{}': {e}", path.display())))
}
