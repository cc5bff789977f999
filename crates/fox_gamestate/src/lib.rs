//! Fox GameState - Progress and Immunity
//!
//! This crate owns the only mutable progress of a session: how many pickups
//! the player carries and whether the one-way giant latch has fired.
//!
//! # Features
//!
//! - `Normal` / `Threshold` / `Giant` phase derived from count and latch
//! - Collection, theft and rare-pickup transitions with clamping
//! - Configurable outcome for being caught with an empty pouch
//! - Pending notification drain, with phase changes traced through `log`
//!
//! # Example
//!
//! ```ignore
//! use fox_gamestate::prelude::*;
//!
//! let mut state = GameState::new(5, CaughtEmptyHanded::Reset);
//! if state.collect() {
//!     director.spawn_hostile(player_position);
//! }
//! for event in state.drain_events() {
//!     observer.notify(&event);
//! }
//! ```

pub mod state;

pub mod prelude {
    pub use crate::state::{CaughtEmptyHanded, ContactOutcome, GameEvent, GamePhase, GameState};
}

pub use prelude::*;
