//! Hostile pursuit
//!
//! Hostiles chase the player while the player is vulnerable and scatter once
//! the player has turned giant. Chase speed grows with the number of pickups
//! the player is carrying, so more progress means faster pursuers.

use crate::steering::SteeringBehavior;
use fox_core::math::planar_distance;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How hostiles react to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuitMode {
    /// Close in on the player
    Chase,
    /// Run away from a giant player
    Scatter,
}

impl PursuitMode {
    /// Mode for the current immunity state
    pub fn for_giant(giant: bool) -> Self {
        if giant {
            Self::Scatter
        } else {
            Self::Chase
        }
    }
}

/// Pursuit tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Chase speed with an empty pouch (units per second)
    pub base_speed: f32,
    /// Fractional speed-up per carried pickup
    pub speed_per_pickup: f32,
    /// Scatter speed while the player is giant
    pub flee_speed: f32,
    /// Contact distance between player and hostile
    pub contact_radius: f32,
    /// Contact distance while the player is giant
    pub giant_contact_radius: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            base_speed: 22.0,
            speed_per_pickup: 0.15,
            flee_speed: 60.0,
            contact_radius: 3.5,
            giant_contact_radius: 35.0,
        }
    }
}

impl PursuitConfig {
    /// Set base chase speed
    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self
    }

    /// Set flee speed
    pub fn with_flee_speed(mut self, speed: f32) -> Self {
        self.flee_speed = speed;
        self
    }

    /// Chase speed for the given carried count
    pub fn chase_speed(&self, collected: u32) -> f32 {
        self.base_speed * (1.0 + self.speed_per_pickup * collected as f32)
    }

    /// Speed for a mode
    pub fn speed(&self, mode: PursuitMode, collected: u32) -> f32 {
        match mode {
            PursuitMode::Chase => self.chase_speed(collected),
            PursuitMode::Scatter => self.flee_speed,
        }
    }

    /// Contact radius for the current immunity state
    pub fn contact_radius(&self, giant: bool) -> f32 {
        if giant {
            self.giant_contact_radius
        } else {
            self.contact_radius
        }
    }
}

/// Advance one hostile by one tick and return its new position
pub fn step_pursuer(position: Vec3, player: Vec3, mode: PursuitMode, speed: f32, dt: f32) -> Vec3 {
    let behavior = match mode {
        PursuitMode::Chase => SteeringBehavior::seek(),
        PursuitMode::Scatter => SteeringBehavior::flee(),
    };
    let mut step = behavior.calculate(position, player, speed);
    step.scale(dt);

    // Never overshoot the player while chasing
    if mode == PursuitMode::Chase {
        step.limit(planar_distance(position, player));
    }
    position + step.linear
}

/// Whether two ground positions are within `radius`
pub fn in_contact(a: Vec3, b: Vec3, radius: f32) -> bool {
    planar_distance(a, b) < radius
}
