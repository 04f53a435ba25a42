use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A single benchmark measurement, one row of the results CSV.
///
/// `speedup` is recorded by the benchmark runner and trusted as-is when
/// read back for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "Matrix Size")]
    pub matrix_size: u32,
    #[serde(rename = "Process Count")]
    pub process_count: u32,
    #[serde(rename = "Sequential Time")]
    pub sequential_time: f64,
    #[serde(rename = "Parallel Time")]
    pub parallel_time: f64,
    #[serde(rename = "Speedup")]
    pub speedup: f64,
}

impl BenchmarkRecord {
    /// Canonical header of the results CSV.
    pub fn csv_header() -> &'static str {
        "Matrix Size,Process Count,Sequential Time,Parallel Time,Speedup"
    }

    /// Parallel efficiency: speedup divided by worker count.
    pub fn efficiency(&self) -> f64 {
        self.speedup / f64::from(self.process_count)
    }

    /// Parse all records from a CSV reader, in input order. Columns are
    /// matched by header name; extra columns are ignored.
    pub fn from_csv_reader<R: Read>(reader: csv::Reader<R>) -> Result<Vec<Self>, csv::Error> {
        reader.into_deserialize().collect()
    }

    /// Read all records from a CSV file.
    pub fn from_csv_path(path: &Path) -> anyhow::Result<Vec<Self>> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let records = Self::from_csv_reader(csv::Reader::from_reader(file))
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(records)
    }
}

impl fmt::Display for BenchmarkRecord {
    /// One CSV row in `csv_header` column order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.matrix_size,
            self.process_count,
            self.sequential_time,
            self.parallel_time,
            self.speedup
        )
    }
}

/// Partition records by matrix size, preserving input row order within each
/// group and the order in which each distinct size first appears.
pub fn group_by_size(records: &[BenchmarkRecord]) -> Vec<(u32, Vec<&BenchmarkRecord>)> {
    let mut groups: Vec<(u32, Vec<&BenchmarkRecord>)> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|(size, _)| *size == record.matrix_size)
        {
            Some((_, rows)) => rows.push(record),
            None => groups.push((record.matrix_size, vec![record])),
        }
    }
    groups
}
