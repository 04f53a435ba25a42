//! # matmul-bench
//!
//! Matrix multiplication benchmark suite.
//!
//! Multiplies matrices sequentially and with a configurable number of
//! parallel workers, records the timings to a results CSV, and renders
//! performance charts (speedup, execution time, efficiency, and a
//! sequential-vs-parallel comparison) from those results.
//!
//! Three binaries are provided:
//!
//! ```sh
//! gen-matrix <output_file> <rows> <columns> <max_value>
//! matrix-mul <A_file> <B_file> <num_processes> <output_file>
//! generate-graphs <csv_file>
//! ```

use clap::error::ErrorKind;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod error;
pub mod graph;
pub mod matrix;
pub mod models;
pub mod paths;
pub mod runner;

pub fn setup_logger() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()
        .unwrap();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .pretty()
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .set_default()
}

/// Resolve a clap parse result the way the original tools report usage
/// errors: help and version requests keep their normal behavior, anything
/// else prints a one-line usage string to stdout and exits with status 1.
pub fn parse_or_usage<T: clap::Parser>(usage: &str) -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("Usage: {usage}");
            std::process::exit(1);
        }
    }
}
