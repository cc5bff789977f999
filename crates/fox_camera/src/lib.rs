//! Fox Camera - Third-person follow rig
//!
//! The rig orbits the player at a fixed distance and height. The user moves an
//! [`OrbitTarget`] (by dragging or tilting the device) and the rig's actual
//! yaw/pitch chase that target with exponential damping, so the camera never
//! jumps.

pub mod rig;

pub mod prelude {
    pub use crate::rig::{CameraConfig, CameraPose, CameraRig, OrbitTarget};
}

pub use prelude::*;
