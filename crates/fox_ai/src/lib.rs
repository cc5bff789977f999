//! Fox AI - Steering and State Machines
//!
//! This crate provides the behaviour building blocks for the forest:
//!
//! - Finite State Machines with declared transition tables
//! - Seek/flee steering on the forest floor
//! - Hostile pursuit with difficulty scaling and contact checks
//!
//! # Example
//!
//! ```ignore
//! use fox_ai::prelude::*;
//!
//! let params = PursuitConfig::default();
//! let speed = params.chase_speed(collected);
//! let next = step_pursuer(hostile_pos, player_pos, PursuitMode::Chase, speed, dt);
//! ```

pub mod pursuit;
pub mod state_machine;
pub mod steering;

pub mod prelude {
    pub use crate::pursuit::{in_contact, step_pursuer, PursuitConfig, PursuitMode};
    pub use crate::state_machine::{State, StateMachine, Transition, TransitionRecord};
    pub use crate::steering::{SteeringBehavior, SteeringBehaviorType, SteeringOutput};
}

pub use prelude::*;
