//! Cooperative cancellation for a fetch run.
//!
//! When a `FetchControl` is passed to [`super::fetch_all`], URLs that have not
//! started yet are reported as cancelled once [`FetchControl::cancel`] is called.
//! Transfers already in flight run to completion.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct FetchControl {
    cancelled: AtomicBool,
}

impl FetchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation (e.g. from a Ctrl-C handler).
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
