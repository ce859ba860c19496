//! Experiment runner: batching, dispatch, accumulation, checkpointing.
//!
//! A run partitions the parameter tuples into batches, dispatches each
//! batch's experiment calls across a rayon pool, merges the returned records
//! into the column-oriented accumulator, and optionally snapshots the
//! accumulator to CSV at every batch boundary. Batches run strictly in
//! order; batch *i + 1* never starts before batch *i*'s dispatch and
//! checkpoint write complete, which is what makes a checkpoint a consistent
//! prefix of the run.

use crate::batch::batched;
use crate::record::Record;
use crate::table::Table;
use crate::value::Value;
use crate::{Error, Result};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Checkpoint cadence and destination.
#[derive(Debug, Clone)]
struct Autosave {
    every: usize,
    dir: PathBuf,
}

/// Configurable parameter-sweep runner.
///
/// Construction takes the experiment function, the ordered parameter names,
/// and one value tuple per planned experiment. Tuple arity must match the
/// number of parameter names; a mismatch is a caller error and is not
/// defensively checked.
///
/// The experiment function receives a fresh [`Record`] and the tuple's
/// values; whatever fields it sets become columns of the result. After each
/// call the runner sets one field per parameter name, so inputs are always
/// recoverable from the output table even when the function does not echo
/// them.
///
/// # Example
///
/// ```rust
/// use sweeprun::{Runner, Value};
///
/// let table = Runner::new(
///     |record: &mut sweeprun::Record, params: &[Value]| {
///         let x = params[0].as_i64().unwrap();
///         record.set("squared", x * x);
///         Ok(())
///     },
///     ["x"],
///     (1..=4).map(|x| vec![Value::Int(x)]),
/// )
/// .parallelism(2)
/// .run()?;
///
/// assert_eq!(table.num_rows(), 4);
/// # Ok::<(), sweeprun::Error>(())
/// ```
pub struct Runner<F> {
    experiment: F,
    param_names: Vec<String>,
    param_vals: Vec<Vec<Value>>,
    parallelism: usize,
    autosave: Option<Autosave>,
}

impl<F> Runner<F>
where
    F: Fn(&mut Record, &[Value]) -> anyhow::Result<()> + Send + Sync,
{
    /// Create a runner with default configuration: sequential execution,
    /// no checkpointing.
    ///
    /// The parameter tuples are materialized up front so batching can slice
    /// them repeatedly.
    pub fn new<N, S, P>(experiment: F, param_names: N, param_vals: P) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = Vec<Value>>,
    {
        Self {
            experiment,
            param_names: param_names.into_iter().map(Into::into).collect(),
            param_vals: param_vals.into_iter().collect(),
            parallelism: 1,
            autosave: None,
        }
    }

    /// Set the number of workers dispatching experiment calls within a
    /// batch. 1 (the default) means sequential execution.
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers;
        self
    }

    /// Enable checkpointing: after every `every` completed experiments,
    /// write the accumulator to `dir` as `{cumulative_count}.csv`.
    ///
    /// The full parameter set is partitioned into `total / every` batches
    /// and a snapshot is written after each. Without autosave the whole
    /// sweep is a single batch with no intermediate snapshots.
    #[must_use]
    pub fn autosave(mut self, every: usize, dir: impl Into<PathBuf>) -> Self {
        self.autosave = Some(Autosave {
            every,
            dir: dir.into(),
        });
        self
    }

    /// Execute the full sweep and return the result table.
    ///
    /// Rows appear in dispatch order; columns are the parameter names
    /// followed by every field name the experiment function set, in first-
    /// appearance order.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] for an invalid configuration, rejected before
    ///   any experiment runs.
    /// - [`Error::Experiment`] when the experiment function fails; the
    ///   first failure aborts the run. Checkpoints already written remain
    ///   on disk.
    /// - [`Error::Csv`] / [`Error::Io`] when a checkpoint cannot be
    ///   written.
    pub fn run(&self) -> Result<Table> {
        let pool = self.build_pool()?;
        let mut table = Table::with_columns(self.param_names.iter().map(String::as_str));

        // floor(total / every), clamped so a cadence longer than the input
        // degrades to one batch instead of zero.
        let n_batches = match &self.autosave {
            Some(autosave) => (self.param_vals.len() / autosave.every).max(1),
            None => 1,
        };

        let mut completed = 0_usize;
        for batch in batched(&self.param_vals, n_batches) {
            debug!(
                batch_len = batch.len(),
                workers = self.parallelism,
                "dispatching batch"
            );
            let records = match &pool {
                Some(pool) => pool.install(|| {
                    batch
                        .par_iter()
                        .map(|params| self.execute(params))
                        .collect::<Result<Vec<Record>>>()
                })?,
                None => batch
                    .iter()
                    .map(|params| self.execute(params))
                    .collect::<Result<Vec<Record>>>()?,
            };

            for record in records {
                for (name, value) in record.into_fields() {
                    table.append(&name, value);
                }
            }
            completed += batch.len();

            if let Some(autosave) = &self.autosave {
                let path = autosave.dir.join(format!("{completed}.csv"));
                debug!(path = %path.display(), rows = completed, "writing checkpoint");
                table.write_csv(&path)?;
            }
        }

        Ok(table)
    }

    /// Run one experiment: fresh record, user call, parameter injection.
    fn execute(&self, params: &[Value]) -> Result<Record> {
        let mut record = Record::new();
        (self.experiment)(&mut record, params).map_err(Error::Experiment)?;
        for (name, value) in self.param_names.iter().zip(params) {
            record.set(name.clone(), value.clone());
        }
        Ok(record)
    }

    /// Validate the configuration and build the worker pool, eagerly at
    /// the start of `run()`. `None` means sequential execution.
    fn build_pool(&self) -> Result<Option<rayon::ThreadPool>> {
        if self.parallelism == 0 {
            return Err(Error::Config("parallelism must be at least 1".to_string()));
        }
        if let Some(autosave) = &self.autosave {
            if autosave.every == 0 {
                return Err(Error::Config(
                    "autosave cadence must be at least 1 experiment".to_string(),
                ));
            }
        }
        if self.parallelism == 1 {
            return Ok(None);
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .build()
            .map(Some)
            .map_err(|e| Error::Config(format!("failed to build worker pool: {e}")))
    }
}

/// Run a sweep with default configuration: sequential execution, no
/// checkpointing. Equivalent to `Runner::new(..).run()` with no
/// configuration applied.
///
/// # Errors
///
/// Propagates the first experiment failure as [`Error::Experiment`].
pub fn run_experiment<F, N, S, P>(experiment: F, param_names: N, param_vals: P) -> Result<Table>
where
    F: Fn(&mut Record, &[Value]) -> anyhow::Result<()> + Send + Sync,
    N: IntoIterator<Item = S>,
    S: Into<String>,
    P: IntoIterator<Item = Vec<Value>>,
{
    Runner::new(experiment, param_names, param_vals).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(record: &mut Record, params: &[Value]) -> anyhow::Result<()> {
        let x = params[0].as_i64().expect("integer parameter");
        record.set("doubled", x * 2);
        Ok(())
    }

    #[test]
    fn test_zero_experiments_still_has_param_columns() {
        let table = run_experiment(double, ["x"], Vec::<Vec<Value>>::new()).unwrap();
        assert_eq!(table.num_rows(), 0);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_parameter_injection_overwrites_echo() {
        // The experiment sets a field with a parameter's name; the runner's
        // injection wins.
        let table = run_experiment(
            |record: &mut Record, params: &[Value]| {
                record.set("x", -1);
                let _ = params;
                Ok(())
            },
            ["x"],
            vec![vec![Value::Int(5)]],
        )
        .unwrap();
        assert_eq!(table.column("x").unwrap(), &[Value::Int(5)]);
    }

    #[test]
    fn test_zero_parallelism_is_a_config_error() {
        let err = Runner::new(double, ["x"], vec![vec![Value::Int(1)]])
            .parallelism(0)
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_cadence_is_a_config_error() {
        let err = Runner::new(double, ["x"], vec![vec![Value::Int(1)]])
            .autosave(0, "/nonexistent")
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_experiment_failure_aborts_run() {
        let err = run_experiment(
            |_record: &mut Record, params: &[Value]| {
                if params[0].as_i64() == Some(2) {
                    anyhow::bail!("bad combination");
                }
                Ok(())
            },
            ["x"],
            (1..=3).map(|x| vec![Value::Int(x)]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Experiment(_)));
    }
}
