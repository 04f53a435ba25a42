use std::path::PathBuf;

use clap::Parser;

use matmul_bench::matrix::Matrix;
use matmul_bench::{parse_or_usage, runner, setup_logger};

/// Multiply two matrices sequentially and in parallel, reporting timings.
#[derive(Debug, Parser)]
#[command(name = "matrix-mul", version)]
struct Cli {
    /// Left operand matrix file.
    a_file: PathBuf,
    /// Right operand matrix file.
    b_file: PathBuf,
    /// Number of parallel workers.
    num_processes: usize,
    /// File to write the product matrix to.
    output_file: PathBuf,
    /// Append a result row to this benchmark results CSV.
    #[arg(long)]
    results: Option<PathBuf>,
}

fn main() {
    let _guard = setup_logger();

    let cli: Cli = parse_or_usage("matrix-mul <A_file> <B_file> <num_processes> <output_file>");
    if let Err(err) = run(&cli) {
        println!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let a = Matrix::from_file(&cli.a_file)?;
    let b = Matrix::from_file(&cli.b_file)?;

    let mut workers = cli.num_processes.max(1);
    if workers > a.rows() {
        println!(
            "Warning: Number of processes ({}) exceeds number of rows ({}). Setting workers = {}",
            workers,
            a.rows(),
            a.rows()
        );
        workers = a.rows();
    }

    println!(
        "Matrix dimensions: A({}x{}) x B({}x{}) = C({}x{})",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        a.rows(),
        b.cols()
    );

    let outcome = runner::run_benchmark(&a, &b, workers)?;
    let record = &outcome.record;

    println!(
        "Sequential multiplication time: {:.6} seconds",
        record.sequential_time
    );
    println!(
        "Parallel multiplication time ({} processes): {:.6} seconds",
        workers, record.parallel_time
    );
    println!("Speedup: {:.2}x", record.speedup);

    if outcome.results_match {
        println!("Verification: Sequential and parallel results match.");
    } else {
        println!("Verification: Sequential and parallel results DO NOT match!");
    }

    outcome.product.to_file(&cli.output_file)?;
    println!("Result written to {}", cli.output_file.display());

    if let Some(results) = &cli.results {
        runner::record_results(record, results)?;
    }
    Ok(())
}
