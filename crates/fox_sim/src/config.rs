//! Game configuration

use crate::error::{Result, SimError};
use fox_ai::pursuit::PursuitConfig;
use fox_camera::rig::CameraConfig;
use fox_gamestate::state::CaughtEmptyHanded;
use fox_input::state::InputConfig;
use fox_player::locomotion::LocomotionConfig;
use serde::{Deserialize, Serialize};

/// Spawn placement and pickup tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Normal pickup ring around the player (inner, outer)
    pub normal_ring: (f32, f32),
    /// Ring multiplier once the pouch is full or the player is giant
    pub far_ring_scale: f32,
    /// Distance of the rare pickup from the player
    pub rare_radius: f32,
    /// Rare pickup spin in radians per second
    pub rare_spin_rate: f32,
    /// Remove the rare pickup if the pouch drops below full
    pub rare_despawn_on_loss: bool,
    /// Distance of a new hostile from the player
    pub hostile_radius: f32,
    /// Pickup distance
    pub collect_radius: f32,
    /// Pickup distance while giant
    pub giant_collect_radius: f32,
    /// Trophy spiral length
    pub trophy_cap: u32,
    /// Spiral angle per trophy in radians
    pub trophy_angle_step: f32,
    pub trophy_base_radius: f32,
    pub trophy_radius_step: f32,
    /// Every n-th trophy is gold
    pub trophy_gold_every: u32,
    pub trophy_bob_amplitude: f32,
    pub trophy_bob_rate: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            normal_ring: (60.0, 140.0),
            far_ring_scale: 10.0,
            rare_radius: 120.0,
            rare_spin_rate: 2.0,
            rare_despawn_on_loss: true,
            hostile_radius: 100.0,
            collect_radius: 4.5,
            giant_collect_radius: 45.0,
            trophy_cap: 80,
            trophy_angle_step: 0.45,
            trophy_base_radius: 20.0,
            trophy_radius_step: 5.5,
            trophy_gold_every: 3,
            trophy_bob_amplitude: 0.5,
            trophy_bob_rate: 2.0,
        }
    }
}

impl SpawnConfig {
    /// Pickup distance for the current immunity state
    pub fn collect_radius(&self, giant: bool) -> f32 {
        if giant {
            self.giant_collect_radius
        } else {
            self.collect_radius
        }
    }
}

/// Decorative forest scatter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub tree_count: u32,
    /// Trees land in `[-half_extent, half_extent]` on both axes
    pub half_extent: f32,
    /// Half-width of the treeless square around the origin
    pub clearing: f32,
    /// Trunk height range (min, max)
    pub trunk_height: (f32, f32),
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 400,
            half_extent: 1000.0,
            clearing: 50.0,
            trunk_height: (10.0, 20.0),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for all spawn randomness
    pub seed: u64,
    /// Pickups needed to reach the rare threshold
    pub max_pickups: u32,
    pub zero_count_policy: CaughtEmptyHanded,
    /// Longest tick accepted; larger deltas are clamped
    pub max_tick_delta: f32,
    pub spawn: SpawnConfig,
    pub pursuit: PursuitConfig,
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub input: InputConfig,
    pub forest: ForestConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_f0c5,
            max_pickups: 5,
            zero_count_policy: CaughtEmptyHanded::Reset,
            max_tick_delta: 0.25,
            spawn: SpawnConfig::default(),
            pursuit: PursuitConfig::default(),
            locomotion: LocomotionConfig::default(),
            camera: CameraConfig::default(),
            input: InputConfig::default(),
            forest: ForestConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the pouch size
    pub fn with_max_pickups(mut self, max: u32) -> Self {
        self.max_pickups = max;
        self
    }

    /// Set the empty-pouch policy
    pub fn with_zero_count_policy(mut self, policy: CaughtEmptyHanded) -> Self {
        self.zero_count_policy = policy;
        self
    }

    /// Set tree count
    pub fn with_tree_count(mut self, count: u32) -> Self {
        self.forest.tree_count = count;
        self
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        if self.max_pickups == 0 {
            return Err(SimError::InvalidConfig("max_pickups must be at least 1".into()));
        }
        if self.max_tick_delta.is_nan() || self.max_tick_delta <= 0.0 {
            return Err(SimError::InvalidConfig("max_tick_delta must be positive".into()));
        }

        let (inner, outer) = self.spawn.normal_ring;
        if !sampleable(inner, outer) || inner < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "normal ring ({}, {}) is not a valid annulus",
                inner, outer
            )));
        }
        if self.spawn.trophy_gold_every == 0 {
            return Err(SimError::InvalidConfig("trophy_gold_every must be at least 1".into()));
        }

        let forest = &self.forest;
        if !sampleable(-forest.half_extent, forest.half_extent) {
            return Err(SimError::InvalidConfig(format!(
                "forest half_extent {} must be finite and non-negative",
                forest.half_extent
            )));
        }
        if !(0.0..=forest.half_extent).contains(&forest.clearing) {
            return Err(SimError::InvalidConfig(format!(
                "forest clearing {} must be within [0, {}]",
                forest.clearing, forest.half_extent
            )));
        }
        let (low, high) = forest.trunk_height;
        if !sampleable(low, high) || low < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "trunk height ({}, {}) is not a valid range",
                low, high
            )));
        }

        self.locomotion.validate().map_err(SimError::InvalidConfig)?;
        self.camera.validate().map_err(SimError::InvalidConfig)?;
        Ok(())
    }
}

/// `low..high` is ordered and its width fits in an `f32`
fn sampleable(low: f32, high: f32) -> bool {
    low <= high && (high - low).is_finite()
}
