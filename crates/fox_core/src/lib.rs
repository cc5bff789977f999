//! # fox_core - Immortal Fox Core
//!
//! Small shared primitives used by every other crate in the workspace:
//! - **Arena**: generational storage for world entities, addressed by typed handles
//! - **Math**: scalar and planar helpers on top of `glam`
//!
//! Entity records never own their visuals. They hold an opaque handle into the
//! render scene, and the scene is the only owner of the visual itself.

pub mod arena;
pub mod math;

pub use arena::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::arena::{Arena, Handle};
    pub use crate::math::{damp, lerp, lerp_angle, planar_distance, wrap_angle};
    pub use glam::{Vec2, Vec3};
}
