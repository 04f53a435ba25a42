use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use tracing::info;

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::models::BenchmarkRecord;

/// Timing and verification outcome of one sequential-vs-parallel run.
#[derive(Debug)]
pub struct BenchmarkOutcome {
    pub record: BenchmarkRecord,
    /// Whether the parallel product matched the sequential one exactly.
    pub results_match: bool,
    pub product: Matrix,
}

/// Multiply `a * b` sequentially and then with `workers` parallel workers,
/// timing both passes and deriving the speedup.
pub fn run_benchmark(
    a: &Matrix,
    b: &Matrix,
    workers: usize,
) -> Result<BenchmarkOutcome, MatrixError> {
    let start = Instant::now();
    let sequential = a.multiply(b)?;
    let sequential_time = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let parallel = a.multiply_parallel(b, workers)?;
    let parallel_time = start.elapsed().as_secs_f64();

    let speedup = sequential_time / parallel_time;
    let results_match = sequential == parallel;
    info!(sequential_time, parallel_time, speedup, "benchmark complete");

    Ok(BenchmarkOutcome {
        record: BenchmarkRecord {
            matrix_size: a.rows() as u32,
            process_count: workers as u32,
            sequential_time,
            parallel_time,
            speedup,
        },
        results_match,
        product: parallel,
    })
}

/// Append a record to the results CSV, writing the header first when the
/// file is new or empty.
pub fn record_results(record: &BenchmarkRecord, path: &Path) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    if file.metadata()?.len() == 0 {
        writeln!(file, "{}", BenchmarkRecord::csv_header())?;
    }
    writeln!(file, "{record}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_benchmark_outcome() {
        let a = Matrix::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::new(2, 3, vec![1.0, 0.0, 2.0, 0.0, 1.0, 2.0]);

        let outcome = run_benchmark(&a, &b, 2).unwrap();
        assert!(outcome.results_match);
        assert_eq!(outcome.product, a.multiply(&b).unwrap());

        let record = &outcome.record;
        assert_eq!(record.matrix_size, 3);
        assert_eq!(record.process_count, 2);
        assert!(record.sequential_time >= 0.0);
        assert!(record.parallel_time > 0.0);
        let expected = record.sequential_time / record.parallel_time;
        assert!((record.speedup - expected).abs() < 1e-12);
    }

    #[test]
    fn test_run_benchmark_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert!(run_benchmark(&a, &b, 2).is_err());
    }

    #[test]
    fn test_record_results_writes_header_once() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv");

        let record = BenchmarkRecord {
            matrix_size: 100,
            process_count: 2,
            sequential_time: 2.0,
            parallel_time: 1.1,
            speedup: 1.818,
        };
        record_results(&record, &path).unwrap();
        record_results(&record, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], BenchmarkRecord::csv_header());
        assert_eq!(lines[1], lines[2]);

        let parsed = BenchmarkRecord::from_csv_path(&path).unwrap();
        assert_eq!(parsed, vec![record.clone(), record]);
    }
}
