//! Stale-response guard
//!
//! In-flight requests are not aborted. Instead a view takes a [`Ticket`] when
//! it starts a request and drops the response unless the ticket is still
//! current when it arrives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    tracker: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; every earlier ticket becomes stale
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            tracker: self.generation.clone(),
        }
    }

    /// Make all outstanding tickets stale (view left / unmounted)
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.tracker.load(Ordering::SeqCst) == self.generation
    }
}
