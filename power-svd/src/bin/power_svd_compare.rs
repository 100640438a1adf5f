//! Time the power method against a full SVD on a seeded random matrix
//!
//! Usage: `power-svd-compare [rows] [cols]` (default 2000 x 1000).
//! Set `POWER_SVD_SEED` to change the matrix and `RUST_LOG=debug` for solver logs.

use std::env;
use std::time::Instant;

use power_svd::random::{seed_from_env, uniform_matrix};
use power_svd::{compare, DominantSVDSolver, PowerSvdConfig};

fn parse_dim(arg: Option<String>, default: usize) -> Result<usize, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(s.parse()?),
        None => Ok(default),
    }
}

fn head(values: &[f64]) -> String {
    let shown: Vec<String> = values.iter().take(5).map(|x| format!("{:.8}", x)).collect();
    format!("[{}]", shown.join(", "))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let rows = parse_dim(args.next(), 2000)?;
    let cols = parse_dim(args.next(), 1000)?;
    let seed = seed_from_env(0);

    println!("Generating a {}x{} matrix (seed {})", rows, cols, seed);
    let a = uniform_matrix(rows, cols, seed);

    println!("Running power method SVD");
    let solver = DominantSVDSolver::new(PowerSvdConfig::default())?;
    let start = Instant::now();
    let triplet = solver.solve(&a)?;
    let power_duration = start.elapsed();
    log::info!(
        "power method: {} iterations, converged = {}",
        triplet.iterations,
        triplet.converged
    );

    println!("\n--- Power method ---");
    println!("Execution Time: {:.6} seconds", power_duration.as_secs_f64());
    println!("Dominant Singular Value: {}", triplet.value);
    println!(
        "Dominant Singular Vector (first 5 elements): {}",
        head(triplet.vector.as_slice())
    );
    println!("Iterations: {} (converged: {})", triplet.iterations, triplet.converged);

    println!("\nRunning nalgebra SVD for validation");
    let start = Instant::now();
    let comparison = compare(&a, &triplet)?;
    let reference_duration = start.elapsed();

    println!("\n--- nalgebra SVD ---");
    println!("Execution Time: {:.6} seconds", reference_duration.as_secs_f64());
    println!("Dominant Singular Value: {}", comparison.reference_value);
    println!(
        "Dominant Singular Vector (first 5 elements): {}",
        head(comparison.reference_vector.as_slice())
    );

    println!("\n--- Comparison ---");
    println!(
        "Power method was {:.2}x faster.",
        reference_duration.as_secs_f64() / power_duration.as_secs_f64().max(f64::MIN_POSITIVE)
    );
    println!("Singular Value Difference: {:.6e}", comparison.value_difference);
    println!(
        "Singular Vector Cosine Similarity: {:.6}",
        comparison.cosine_similarity
    );

    Ok(())
}
