//! Per-run worker pool with one-shot terminal outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use tracing::{debug, info};

use crate::config::{ConfigError, Configuration};
use crate::matcher::Prefix;
use crate::safe::{Creation, Deployment};

use super::cpu::{CpuWorker, WorkerStats};
use super::SearchError;

/// Cooperative cancellation signal shared between a run's workers, its
/// owner, and external cancellers (e.g. a Ctrl-C handler).
#[derive(Clone, Default)]
pub struct CancelToken {
    raised: Arc<AtomicBool>,
    reason: Arc<Mutex<Option<String>>>,
}

impl CancelToken {
    /// Requests cancellation with the given reason. The first reason wins;
    /// later calls only keep the flag raised.
    pub fn cancel(&self, reason: impl Into<String>) {
        let mut slot = self.reason.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(reason.into());
        }
        drop(slot);
        self.raised.store(true, Ordering::Relaxed);
    }

    /// Raises the flag without recording a cancellation reason. Used by a
    /// matching worker to stop its siblings.
    pub(crate) fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    fn reason(&self) -> Option<String> {
        self.reason
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// A running vanity search.
///
/// Owns a private pool of scanning threads. Produces exactly one terminal
/// outcome: the first `Creation` found, or an error on cancellation. The
/// threads are stopped and joined when the worker is dropped.
pub struct SearchWorker {
    handles: Option<Vec<JoinHandle<()>>>,
    result_rx: Receiver<(usize, Creation)>,
    cancel: CancelToken,
    stats: Arc<WorkerStats>,
    start_time: Instant,
    num_workers: usize,
}

impl SearchWorker {
    /// Starts a search with one scanning thread per CPU core.
    ///
    /// Validates the configuration synchronously: invalid input fails here
    /// and never spawns a thread.
    pub fn start(config: &Configuration, prefix: Prefix) -> Result<Self, ConfigError> {
        Self::with_workers(config, prefix, num_cpus::get())
    }

    /// Starts a search with an explicit number of scanning threads.
    pub fn with_workers(
        config: &Configuration,
        prefix: Prefix,
        num_workers: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let num_workers = num_workers.max(1);
        let deployment = Arc::new(Deployment::new(config));

        // bounded(1): the first successful send is the terminal outcome.
        let (result_tx, result_rx) = bounded(1);
        let cancel = CancelToken::default();
        let stats = Arc::new(WorkerStats::new());

        debug!(
            prefix = prefix.as_str(),
            workers = num_workers,
            difficulty = prefix.estimated_difficulty(),
            "starting vanity search"
        );

        let handles = (0..num_workers)
            .map(|id| {
                let worker = CpuWorker::new(
                    id,
                    deployment.clone(),
                    prefix.clone(),
                    result_tx.clone(),
                    cancel.clone(),
                    stats.clone(),
                );
                thread::Builder::new()
                    .name(format!("vanity-safe-worker-{id}"))
                    .spawn(move || worker.run())
                    .expect("spawn worker thread")
            })
            .collect();

        drop(result_tx);

        Ok(Self {
            handles: Some(handles),
            result_rx,
            cancel,
            stats,
            start_time: Instant::now(),
            num_workers,
        })
    }

    /// Blocks until the run terminates and returns its single outcome.
    pub fn wait(self) -> Result<Creation, SearchError> {
        loop {
            if let Some(outcome) = self.wait_timeout(Duration::from_secs(60)) {
                return outcome;
            }
        }
    }

    /// Waits up to `timeout` for the terminal outcome. Returns `None` while
    /// the search is still running.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<Creation, SearchError>> {
        match self.result_rx.recv_timeout(timeout) {
            Ok((worker_id, creation)) => {
                info!(
                    worker = worker_id,
                    address = %creation.creation_address,
                    salts = self.stats.total_salts(),
                    "found matching salt nonce"
                );
                Some(Ok(creation))
            }
            Err(RecvTimeoutError::Timeout) => None,
            // All senders dropped without a match: either an external
            // cancellation or the workers died.
            Err(RecvTimeoutError::Disconnected) => Some(Err(match self.cancel.reason() {
                Some(reason) => SearchError::Cancelled(reason),
                None => SearchError::Internal("search workers exited without a result".into()),
            })),
        }
    }

    /// Requests cancellation. A pending `wait` fails with the given reason
    /// (or a default). No-op if a match was already produced.
    pub fn cancel(&self, reason: Option<String>) {
        let reason = reason.unwrap_or_else(|| "search cancelled".to_string());
        debug!(reason = %reason, "cancelling vanity search");
        self.cancel.cancel(reason);
    }

    /// A token that cancels this run, usable from another thread or a
    /// signal handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_raised()
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn total_salts(&self) -> u64 {
        self.stats.total_salts()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn salts_per_second(&self) -> f64 {
        let t = self.elapsed().as_secs_f64();
        if t > 0.0 {
            self.total_salts() as f64 / t
        } else {
            0.0
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.cancel.raise();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }
}
