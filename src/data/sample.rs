//! Synthetic rank/frequency generation.
//!
//! Samples follow `f(r) = C / (r + B)^a` with optional multiplicative log-normal
//! noise, which makes them a convenient known-answer input for the fitters.

use std::fs::File;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::WordRow;
use crate::error::AppError;

/// Parameters of a synthetic corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthSpec {
    /// Number of ranks to generate (ranks are `1..=n`).
    pub n: usize,
    pub c: f64,
    pub a: f64,
    pub b: f64,
    /// Standard deviation of the log-space noise; 0 disables noise.
    pub noise: f64,
    pub seed: u64,
    /// Round frequencies to whole counts (min 1), like real word counts.
    pub round: bool,
}

impl Default for SynthSpec {
    fn default() -> Self {
        Self {
            n: 5000,
            c: 1.0e6,
            a: 1.05,
            b: 2.7,
            noise: 0.0,
            seed: 42,
            round: false,
        }
    }
}

pub fn generate_sample(spec: &SynthSpec) -> Result<Vec<WordRow>, AppError> {
    if spec.n == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(spec.c.is_finite() && spec.c > 0.0) {
        return Err(AppError::new(2, "C must be finite and > 0."));
    }
    if !spec.a.is_finite() {
        return Err(AppError::new(2, "Exponent a must be finite."));
    }
    if !(spec.b.is_finite() && spec.b >= 0.0) {
        return Err(AppError::new(2, "Shift B must be finite and >= 0."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise.max(f64::MIN_POSITIVE))
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let width = digits(spec.n).max(5);
    let mut rows = Vec::with_capacity(spec.n);
    for r in 1..=spec.n {
        let rank = r as f64;
        let mut frequency = spec.c / (rank + spec.b).powf(spec.a);
        if spec.noise > 0.0 {
            let z: f64 = normal.sample(&mut rng);
            frequency *= z.exp();
        }
        if spec.round {
            frequency = frequency.round().max(1.0);
        }
        if !frequency.is_finite() {
            return Err(AppError::new(4, format!("Non-finite frequency generated at rank {r}.")));
        }

        rows.push(WordRow {
            rank,
            frequency,
            word: format!("w{r:0width$}"),
        });
    }

    tracing::debug!(n = spec.n, seed = spec.seed, "generated synthetic sample");
    Ok(rows)
}

/// Write rows as `Rank,Frequency,Word` CSV.
pub fn write_sample_csv(path: &Path, rows: &[WordRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
    let mut w = csv::Writer::from_writer(file);

    w.write_record(["Rank", "Frequency", "Word"])
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for row in rows {
        w.write_record([row.rank.to_string(), row.frequency.to_string(), row.word.clone()])
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }

    w.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV: {e}")))?;
    Ok(())
}

fn digits(mut n: usize) -> usize {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::load_corpus;

    #[test]
    fn noiseless_sample_follows_the_law() {
        let spec = SynthSpec {
            n: 10,
            c: 1000.0,
            a: 1.2,
            b: 3.0,
            ..SynthSpec::default()
        };
        let rows = generate_sample(&spec).unwrap();
        assert_eq!(rows.len(), 10);
        for row in &rows {
            let expected = 1000.0 / (row.rank + 3.0).powf(1.2);
            assert_eq!(row.frequency, expected);
        }
        assert_eq!(rows[0].word, "w00001");
        assert_eq!(rows[9].rank, 10.0);
    }

    #[test]
    fn same_seed_same_sample() {
        let spec = SynthSpec {
            n: 200,
            noise: 0.3,
            seed: 7,
            ..SynthSpec::default()
        };
        let a = generate_sample(&spec).unwrap();
        let b = generate_sample(&spec).unwrap();
        assert_eq!(a, b);

        let other = generate_sample(&SynthSpec { seed: 8, ..spec }).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn rounding_keeps_counts_positive() {
        let spec = SynthSpec {
            n: 1000,
            c: 100.0,
            a: 1.0,
            b: 0.0,
            round: true,
            ..SynthSpec::default()
        };
        let rows = generate_sample(&spec).unwrap();
        assert!(rows.iter().all(|r| r.frequency >= 1.0 && r.frequency.fract() == 0.0));
        assert_eq!(rows[0].frequency, 100.0);
        assert_eq!(rows[999].frequency, 1.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(generate_sample(&SynthSpec { n: 0, ..SynthSpec::default() }).is_err());
        assert!(generate_sample(&SynthSpec { b: -1.0, ..SynthSpec::default() }).is_err());
        assert!(generate_sample(&SynthSpec { c: 0.0, ..SynthSpec::default() }).is_err());
        assert!(generate_sample(&SynthSpec { noise: f64::NAN, ..SynthSpec::default() }).is_err());
    }

    #[test]
    fn written_csv_reloads() {
        let spec = SynthSpec {
            n: 25,
            round: true,
            ..SynthSpec::default()
        };
        let rows = generate_sample(&spec).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synth.csv");
        write_sample_csv(&path, &rows).unwrap();

        let corpus = load_corpus(&path, None).unwrap();
        assert_eq!(corpus.rows, rows);
        assert_eq!(corpus.stats.n_samples, 25);
    }
}
