//! # Sweeprun: Batched Parameter-Sweep Experiment Runner
//!
//! Sweeprun executes a user-supplied experiment function once per parameter
//! combination, collects the per-run outputs into a column-oriented table,
//! optionally parallelizes each batch across a rayon worker pool, and
//! optionally checkpoints partial results to CSV at batch boundaries.
//!
//! The genuinely hard parts are delegated: rayon provides the worker pool,
//! the `csv` crate provides serialization. What this crate owns is the
//! batching, dispatch ordering, result aggregation, and checkpoint cadence.
//!
//! ## Example
//!
//! ```rust
//! use sweeprun::{grid, run_experiment, Record, Value};
//!
//! fn experiment(record: &mut Record, params: &[Value]) -> anyhow::Result<()> {
//!     let var1 = params[0].as_i64().unwrap();
//!     let var2 = params[1].as_i64().unwrap();
//!     record.set("total", var1 + var2);
//!     Ok(())
//! }
//!
//! let axes = [
//!     vec![Value::Int(1), Value::Int(2), Value::Int(3)],
//!     vec![Value::Int(1), Value::Int(2), Value::Int(3)],
//! ];
//! let table = run_experiment(experiment, ["var1", "var2"], grid(&axes))?;
//! assert_eq!(table.num_rows(), 9);
//! # Ok::<(), sweeprun::Error>(())
//! ```
//!
//! For parallelism and checkpointing, configure a [`Runner`]:
//!
//! ```rust,no_run
//! use sweeprun::{Record, Runner, Value};
//!
//! let table = Runner::new(
//!     |record: &mut Record, params: &[Value]| {
//!         record.set("score", params[0].as_f64().unwrap() * 2.0);
//!         Ok(())
//!     },
//!     ["rate"],
//!     vec![vec![Value::Float(0.1)], vec![Value::Float(0.2)]],
//! )
//! .parallelism(2)
//! .autosave(1, "checkpoints")
//! .run()?;
//! # Ok::<(), sweeprun::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod batch;
pub mod error;
pub mod params;
pub mod record;
pub mod runner;
pub mod table;
pub mod value;

pub use batch::batched;
pub use error::{Error, Result};
pub use params::grid;
pub use record::Record;
pub use runner::{run_experiment, Runner};
pub use table::Table;
pub use value::Value;
