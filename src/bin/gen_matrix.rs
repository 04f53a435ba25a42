use std::path::PathBuf;

use anyhow::ensure;
use clap::Parser;

use matmul_bench::matrix::Matrix;
use matmul_bench::{parse_or_usage, setup_logger};

/// Generate a random test matrix file.
#[derive(Debug, Parser)]
#[command(name = "gen-matrix", version)]
struct Cli {
    /// File to write the matrix to.
    output_file: PathBuf,
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    columns: usize,
    /// Exclusive upper bound for the random integer values.
    max_value: u32,
}

fn main() {
    let _guard = setup_logger();

    let cli: Cli = parse_or_usage("gen-matrix <output_file> <rows> <columns> <max_value>");
    if let Err(err) = run(&cli) {
        println!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    ensure!(cli.max_value > 0, "max_value must be positive");

    let matrix = Matrix::random(cli.rows, cli.columns, cli.max_value);
    matrix.to_file(&cli.output_file)?;

    println!(
        "Generated {}x{} matrix in {}",
        cli.rows,
        cli.columns,
        cli.output_file.display()
    );
    Ok(())
}
