//! Fox Input - Intent Normalization
//!
//! Hosts feed raw key, pointer-drag and device-tilt events in from any
//! thread; the simulation reads one [`InputSnapshot`] per tick.
//!
//! # Example
//!
//! ```ignore
//! use fox_input::prelude::*;
//!
//! let mailbox = InputMailbox::new(InputConfig::default());
//! let sender = mailbox.sender();
//! std::thread::spawn(move || sender.send(InputEvent::KeyDown(MoveKey::Forward)));
//!
//! let snapshot = mailbox.poll();
//! sim.tick(dt, &snapshot, &mut scene);
//! ```

pub mod event;
pub mod mailbox;
pub mod state;

pub mod prelude {
    pub use crate::event::{InputEvent, MoveKey};
    pub use crate::mailbox::{InputMailbox, InputSender};
    pub use crate::state::{InputConfig, InputSnapshot, InputState, OrbitDelta};
}

pub use prelude::*;
