//! Search workers: salt generation, the scan loop, and the per-run pool.

mod cpu;
mod nonce;
mod pool;

pub use cpu::{CpuWorker, WorkerStats};
pub use nonce::NonceStream;
pub use pool::{CancelToken, SearchWorker};

/// A search run's terminal failure.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The configuration failed validation before any search work began.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] crate::config::ConfigError),
    /// The run was cancelled externally.
    #[error("{0}")]
    Cancelled(String),
    /// The engine failed unexpectedly.
    #[error("internal error: {0}")]
    Internal(String),
}
