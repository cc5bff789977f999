//! Host-side control surface
//!
//! UI threads hold a [`ControlSurface`] and may request a reset at any time.
//! The request is applied at the start of the next tick, so a tick never
//! observes a half-reset world.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle for out-of-band requests
#[derive(Debug, Clone, Default)]
pub struct ControlSurface {
    reset_requested: Arc<AtomicBool>,
}

impl ControlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a full reset before the next tick
    pub fn request_reset(&self) {
        self.reset_requested.store(true, Ordering::Release);
    }

    /// Whether a reset is waiting
    pub fn reset_pending(&self) -> bool {
        self.reset_requested.load(Ordering::Acquire)
    }

    /// Consume a pending reset request
    pub(crate) fn take_reset(&self) -> bool {
        self.reset_requested.swap(false, Ordering::AcqRel)
    }
}
