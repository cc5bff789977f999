//! Steering behaviors
//!
//! Steering here is kinematic: the output is a velocity, not a force. Hostiles
//! have no inertia, they simply advance along the output each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Output of a steering behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringOutput {
    /// Linear velocity
    pub linear: Vec3,
}

impl SteeringOutput {
    /// Scale the output
    pub fn scale(&mut self, factor: f32) {
        self.linear *= factor;
    }

    /// Clamp the speed to `max`
    pub fn limit(&mut self, max: f32) {
        self.linear = self.linear.clamp_length_max(max);
    }
}

/// Steering behavior type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringBehaviorType {
    /// Head straight for the target
    Seek,
    /// Head straight away from the target
    Flee,
}

/// Steering behavior configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteeringBehavior {
    pub behavior_type: SteeringBehaviorType,
}

impl SteeringBehavior {
    /// Create a seek behavior
    pub fn seek() -> Self {
        Self {
            behavior_type: SteeringBehaviorType::Seek,
        }
    }

    /// Create a flee behavior
    pub fn flee() -> Self {
        Self {
            behavior_type: SteeringBehaviorType::Flee,
        }
    }

    /// Calculate steering output on the ground plane.
    ///
    /// Height differences are ignored so agents stay on the floor. Returns
    /// zero when the agent already stands on the target.
    pub fn calculate(&self, position: Vec3, target: Vec3, speed: f32) -> SteeringOutput {
        let mut to_target = target - position;
        to_target.y = 0.0;
        let direction = to_target.normalize_or_zero();

        let direction = match self.behavior_type {
            SteeringBehaviorType::Seek => direction,
            SteeringBehaviorType::Flee => -direction,
        };

        SteeringOutput {
            linear: direction * speed,
        }
    }
}
