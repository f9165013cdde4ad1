//! CSV ingest and normalization.
//!
//! This module is responsible for turning a `Rank,Frequency,Word` table into a
//! clean set of `(rank, frequency)` samples that are safe to fit.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior**: truncation keeps the first N data rows in input
//!   order (malformed ones included), before non-positive frequencies are dropped
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{CorpusStats, RankFrequency, WordRow};
use crate::error::{FitError, Stage};

const REQUIRED_COLUMNS: [&str; 3] = ["rank", "frequency", "word"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: rows for reporting, samples for fitting, plus bookkeeping.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Parsed rows in input order, after truncation (report table source).
    pub rows: Vec<WordRow>,
    /// Rows with frequency > 0, in input order.
    pub samples: Vec<RankFrequency>,
    pub stats: CorpusStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Rows dropped because their frequency was <= 0.
    pub dropped_non_positive: usize,
}

/// Load a rank/frequency CSV from disk.
///
/// `row_limit` keeps only the first N data rows; malformed rows count toward it.
pub fn load_corpus(path: &Path, row_limit: Option<usize>) -> Result<Corpus, FitError> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FitError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => FitError::invalid_input(
            Stage::Ingest,
            format!("Failed to open CSV '{}': {e}", path.display()),
        ),
    })?;
    read_corpus(file, row_limit)
}

/// Parse a rank/frequency CSV from any reader.
pub fn read_corpus<R: Read>(reader: R, row_limit: Option<usize>) -> Result<Corpus, FitError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| FitError::invalid_input(Stage::Ingest, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let limit = row_limit.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        if rows_read >= limit {
            break;
        }
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        tracing::warn!(line = err.line, "Skipping row: {}", err.message);
    }

    let samples: Vec<RankFrequency> = rows
        .iter()
        .filter(|r| r.frequency > 0.0)
        .map(WordRow::sample)
        .collect();
    let dropped_non_positive = rows.len() - samples.len();
    if dropped_non_positive > 0 {
        tracing::warn!(dropped = dropped_non_positive, "Dropped rows with non-positive frequency");
    }

    let stats = compute_stats(&samples).ok_or_else(|| {
        FitError::degenerate(Stage::Ingest, "No rows with positive frequency remain after filtering.")
    })?;

    Ok(Corpus {
        rows,
        samples,
        stats,
        row_errors,
        rows_read,
        dropped_non_positive,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), FitError> {
    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(FitError::invalid_input(
                Stage::Ingest,
                format!("Missing required column: `{}`", capitalize(name)),
            ));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<WordRow, String> {
    let rank = parse_f64(get_required(record, header_map, "rank")?, "Rank")?;
    let frequency = parse_f64(get_required(record, header_map, "frequency")?, "Frequency")?;
    let word = get_optional(record, header_map, "word").unwrap_or_default().to_string();

    if rank <= 0.0 {
        return Err(format!("`Rank` must be > 0, got {rank}."));
    }

    Ok(WordRow { rank, frequency, word })
}

fn compute_stats(samples: &[RankFrequency]) -> Option<CorpusStats> {
    let mut rank_min = f64::INFINITY;
    let mut rank_max = f64::NEG_INFINITY;
    let mut freq_min = f64::INFINITY;
    let mut freq_max = f64::NEG_INFINITY;

    for s in samples {
        rank_min = rank_min.min(s.rank);
        rank_max = rank_max.max(s.rank);
        freq_min = freq_min.min(s.frequency);
        freq_max = freq_max.max(s.frequency);
    }

    if !rank_min.is_finite() || !rank_max.is_finite() || !freq_min.is_finite() || !freq_max.is_finite() {
        return None;
    }

    Some(CorpusStats {
        n_samples: samples.len(),
        rank_min,
        rank_max,
        freq_min,
        freq_max,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{}`", capitalize(name)))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{}`", capitalize(name)))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str, column: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid `{column}` value '{s}'.")),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
