//! Parameter Sweep Demo
//!
//! Runs a small two-parameter sweep in parallel with per-batch CSV
//! checkpoints, then prints the collected table.
//!
//! Run with: cargo run --example parameter_sweep

use sweeprun::{grid, Record, Runner, Value};

fn experiment(record: &mut Record, params: &[Value]) -> anyhow::Result<()> {
    let size = params[0].as_i64().expect("size is an integer");
    let rate = params[1].as_f64().expect("rate is a float");

    // Stand-in for real work: a score derived from both parameters.
    let score = rate * size as f64 / (1.0 + rate);
    record.set("score", score);
    record.set("converged", score > 1.0);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sweeprun=debug".into()),
        )
        .init();

    let checkpoint_dir = std::env::temp_dir().join("sweeprun_demo");
    std::fs::create_dir_all(&checkpoint_dir)?;

    let tuples = grid(&[
        vec![Value::Int(8), Value::Int(16), Value::Int(32)],
        vec![Value::Float(0.1), Value::Float(0.5), Value::Float(0.9)],
    ]);
    println!("Sweeping {} parameter combinations...\n", tuples.len());

    let table = Runner::new(experiment, ["size", "rate"], tuples)
        .parallelism(4)
        .autosave(3, &checkpoint_dir)
        .run()?;

    let names: Vec<&str> = table.column_names().collect();
    println!("{}", names.join("\t"));
    for row in table.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.map_or_else(String::new, ToString::to_string))
            .collect();
        println!("{}", cells.join("\t"));
    }

    println!(
        "\n{} rows collected; checkpoints in {}",
        table.num_rows(),
        checkpoint_dir.display()
    );
    Ok(())
}
