//! Fox Player - Locomotion and Animation
//!
//! Turns a normalized movement intent into motion of the player character.
//!
//! # Features
//!
//! - Camera-relative acceleration with per-tick damping
//! - Idle / Walk / Run gait machine driven by how long movement is held
//! - Cross-faded animation weights (no hard cuts between clips)
//! - Smooth model scale transition into and out of giant mode
//!
//! # Example
//!
//! ```ignore
//! use fox_player::prelude::*;
//!
//! let mut controller = LocomotionController::new(LocomotionConfig::default());
//! let mut motion = PlayerMotion::default();
//! let step = controller.step(&mut motion, intent, camera_yaw, giant, dt);
//! let weights = controller.weights();
//! ```

pub mod animation;
pub mod locomotion;

pub mod prelude {
    pub use crate::animation::{ClipWeights, CrossFadeMixer};
    pub use crate::locomotion::{
        LocomotionConfig, LocomotionController, LocomotionState, LocomotionStep, PlayerMotion,
    };
}

pub use prelude::*;
