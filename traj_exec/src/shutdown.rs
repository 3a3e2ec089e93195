//! # Shutdown signal
//!
//! An externally settable flag which asks the running trajectory to stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An external request to cancel the running trajectory.
pub trait ShutdownSignal {
    fn is_set(&self) -> bool;
}

/// A shutdown flag shared between the thread that requests the stop (e.g. a Ctrl-C handler)
/// and the controller that honours it.
#[derive(Clone, Default)]
pub struct ShutdownFlag {
    flag: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl ShutdownSignal for ShutdownFlag {
    fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
