use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

static HARDWARE_PARALLELISM: Lazy<usize> = Lazy::new(|| {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
});

// 0 means "not overridden"
static DEFAULT_MAX_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// Process-wide worker bound used when a [`FlattenConfig`] does not set one.
///
/// Falls back to the hardware parallelism reported by the OS.
pub fn default_max_workers() -> usize {
    match DEFAULT_MAX_WORKERS.load(Ordering::Relaxed) {
        0 => *HARDWARE_PARALLELISM,
        n => n,
    }
}

/// Overrides the process-wide worker bound. Passing `0` restores the
/// hardware default.
pub fn set_default_max_workers(max_workers: usize) {
    log::debug!("Setting default max workers to {}", max_workers);
    DEFAULT_MAX_WORKERS.store(max_workers, Ordering::Relaxed);
}

/// Tunables for parallel flattening.
///
/// Deserializes from `{"max_workers": <integer>}`; a missing field or `0`
/// defers to [`default_max_workers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenConfig {
    #[serde(default)]
    pub max_workers: usize,
}

impl FlattenConfig {
    pub fn with_max_workers(max_workers: usize) -> Self {
        Self { max_workers }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Effective number of workers, never zero.
    pub fn workers(&self) -> usize {
        match self.max_workers {
            0 => default_max_workers().max(1),
            n => n,
        }
    }
}
