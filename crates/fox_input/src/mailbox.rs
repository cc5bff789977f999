//! Thread-safe input mailbox
//!
//! Producers on any thread push events through an [`InputSender`]; the tick
//! thread calls [`InputMailbox::poll`] once per frame.

use crate::event::InputEvent;
use crate::state::{InputConfig, InputSnapshot, InputState};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

/// Cloneable producer handle
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Returns false if the mailbox is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Event queue plus the state it feeds
pub struct InputMailbox {
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
    state: Mutex<InputState>,
}

impl InputMailbox {
    /// Create an empty mailbox
    pub fn new(config: InputConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            tx,
            rx,
            state: Mutex::new(InputState::new(config)),
        }
    }

    /// New producer handle
    pub fn sender(&self) -> InputSender {
        InputSender { tx: self.tx.clone() }
    }

    /// Events waiting to be folded in
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Fold queued events into the state and take this tick's snapshot
    pub fn poll(&self) -> InputSnapshot {
        let mut state = self.state.lock();
        let mut count = 0;
        while let Ok(event) = self.rx.try_recv() {
            state.apply(&event);
            count += 1;
        }
        if count > 0 {
            log::trace!("Folded {} input events", count);
        }
        state.snapshot()
    }
}

impl Default for InputMailbox {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
