//! Error types for sweeprun
//!
//! Every failure propagates directly to the caller of `run()`; there are no
//! retries anywhere in this crate.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Sweeprun error types
#[derive(Error, Debug)]
pub enum Error {
    /// A record field was read before the experiment function set it
    #[error("no field named `{0}` was recorded\nThe experiment function must set it before it can be read")]
    MissingField(String),

    /// Invalid runner configuration, rejected eagerly at the start of `run()`
    #[error("invalid runner configuration: {0}")]
    Config(String),

    /// The user-supplied experiment function failed; the run is aborted
    /// with no partial in-memory result (checkpoints already on disk remain)
    #[error("experiment failed: {0}")]
    Experiment(#[source] anyhow::Error),

    /// Checkpoint serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
