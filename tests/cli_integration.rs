//! End-to-end tests for the three command-line tools.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CHART_FILES: [&str; 4] = [
    "speedup_vs_processes.png",
    "execution_time_vs_processes.png",
    "efficiency_vs_processes.png",
    "sequential_vs_parallel.png",
];

fn generate_graphs() -> Command {
    Command::cargo_bin("generate-graphs").expect("generate-graphs binary")
}

fn matrix_mul() -> Command {
    Command::cargo_bin("matrix-mul").expect("matrix-mul binary")
}

fn gen_matrix() -> Command {
    Command::cargo_bin("gen-matrix").expect("gen-matrix binary")
}

fn write_results_csv(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "Matrix Size,Process Count,Speedup,Parallel Time,Sequential Time\n\
         100,1,1.0,2.0,2.0\n\
         100,2,1.818,1.1,2.0\n\
         500,1,1.0,60.0,60.0\n\
         500,2,1.875,32.0,60.0\n",
    )
    .unwrap();
    path
}

#[test]
fn test_generate_graphs_usage_error_without_arguments() {
    let tmp = TempDir::new().unwrap();
    generate_graphs()
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));

    // No output directory is created on a usage error.
    assert!(!tmp.path().join("plots").exists());
}

#[test]
fn test_generate_graphs_usage_error_with_extra_arguments() {
    let tmp = TempDir::new().unwrap();
    generate_graphs()
        .args(["a.csv", "b.csv"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));

    assert!(!tmp.path().join("plots").exists());
}

#[test]
fn test_generate_graphs_missing_input_file() {
    let tmp = TempDir::new().unwrap();
    generate_graphs()
        .arg("no_such_file.csv")
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error generating graphs"));
}

#[test]
fn test_generate_graphs_writes_four_charts() {
    let tmp = TempDir::new().unwrap();
    let csv = write_results_csv(&tmp);

    generate_graphs()
        .arg(&csv)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Graphs generated successfully"));

    let plots = tmp.path().join("plots");
    for name in CHART_FILES {
        assert!(plots.join(name).is_file(), "{name} missing");
    }

    // Re-running against an existing plots directory overwrites in place.
    generate_graphs()
        .arg(&csv)
        .current_dir(tmp.path())
        .assert()
        .success();
    for name in CHART_FILES {
        assert!(plots.join(name).is_file(), "{name} missing after re-run");
    }
}

#[test]
fn test_gen_matrix_writes_requested_shape() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("matrix.txt");

    gen_matrix()
        .args([path.to_str().unwrap(), "3", "4", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3x4 matrix"));

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut tokens = contents.split_ascii_whitespace();
    assert_eq!(tokens.next(), Some("3"));
    assert_eq!(tokens.next(), Some("4"));
    assert_eq!(tokens.count(), 12);
}

#[test]
fn test_matrix_mul_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let a_path = tmp.path().join("a.txt");
    let b_path = tmp.path().join("b.txt");
    let c_path = tmp.path().join("c.txt");
    let results = tmp.path().join("results.csv");

    std::fs::write(&a_path, "2 3\n1 2 3\n4 5 6\n").unwrap();
    std::fs::write(&b_path, "3 2\n7 8\n9 10\n11 12\n").unwrap();

    matrix_mul()
        .args([
            a_path.to_str().unwrap(),
            b_path.to_str().unwrap(),
            "2",
            c_path.to_str().unwrap(),
        ])
        .arg("--results")
        .arg(&results)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Matrix dimensions: A(2x3) x B(3x2) = C(2x2)",
        ))
        .stdout(predicate::str::contains("Speedup:"))
        .stdout(predicate::str::contains(
            "Sequential and parallel results match.",
        ));

    let product = std::fs::read_to_string(&c_path).unwrap();
    let values: Vec<&str> = product.split_ascii_whitespace().collect();
    assert_eq!(values[0], "2");
    assert_eq!(values[1], "2");
    assert_eq!(values[2], "58.000000");

    // The recorded results feed straight into chart generation.
    generate_graphs()
        .arg(&results)
        .current_dir(tmp.path())
        .assert()
        .success();
    assert!(tmp.path().join("plots/sequential_vs_parallel.png").is_file());
}

#[test]
fn test_matrix_mul_wrong_argument_count() {
    matrix_mul()
        .arg("only_one.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_matrix_mul_dimension_mismatch() {
    let tmp = TempDir::new().unwrap();
    let a_path = tmp.path().join("a.txt");
    let b_path = tmp.path().join("b.txt");

    std::fs::write(&a_path, "2 3\n1 2 3\n4 5 6\n").unwrap();
    std::fs::write(&b_path, "2 3\n1 2 3\n4 5 6\n").unwrap();

    matrix_mul()
        .args([
            a_path.to_str().unwrap(),
            b_path.to_str().unwrap(),
            "2",
            tmp.path().join("c.txt").to_str().unwrap(),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("incompatible matrix dimensions"));
}
