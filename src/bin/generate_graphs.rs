use std::path::PathBuf;

use clap::Parser;

use matmul_bench::models::BenchmarkRecord;
use matmul_bench::{graph, parse_or_usage, paths, setup_logger};

/// Render performance charts from a benchmark results CSV.
#[derive(Debug, Parser)]
#[command(name = "generate-graphs", version)]
struct Cli {
    /// Benchmark results CSV file.
    csv_file: PathBuf,
}

fn main() {
    let _guard = setup_logger();

    let cli: Cli = parse_or_usage("generate-graphs <csv_file>");
    if let Err(err) = run(&cli) {
        println!("Error generating graphs: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let records = BenchmarkRecord::from_csv_path(&cli.csv_file)?;

    let dir = paths::plots_dir();
    graph::render_all(&records, &dir)?;

    println!(
        "Graphs generated successfully in the '{}' directory",
        dir.display()
    );
    Ok(())
}
