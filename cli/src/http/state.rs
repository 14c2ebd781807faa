use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use giftgen_core::api::GiftGenerator;

#[derive(Clone)]
pub struct AppState {
    pub generator: GiftGenerator,
    pub stats: Arc<ServerStats>,
}

impl AppState {
    pub fn new(generator: GiftGenerator) -> Self {
        Self {
            generator,
            stats: Arc::new(ServerStats::new()),
        }
    }
}

/// Request counters reported by `/health`.
#[derive(Debug)]
pub struct ServerStats {
    started: Instant,
    requests_total: AtomicU64,
    validation_errors: AtomicU64,
    internal_errors: AtomicU64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            requests_total: AtomicU64::new(0),
            validation_errors: AtomicU64::new(0),
            internal_errors: AtomicU64::new(0),
        }
    }

    pub fn increment_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_error(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_internal_error(&self) {
        self.internal_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn validation_errors(&self) -> u64 {
        self.validation_errors.load(Ordering::Relaxed)
    }

    pub fn internal_errors(&self) -> u64 {
        self.internal_errors.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
