//! Third-person camera rig

use fox_core::math::{damp, rotate_y};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera rig tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining yaw/pitch error removed per tick
    pub orbit_damping: f32,
    /// Fraction of the remaining position error removed per tick
    pub follow_rate: f32,
    pub distance: f32,
    pub giant_distance: f32,
    pub height: f32,
    pub giant_height: f32,
    /// Look-at height above the player
    pub look_height: f32,
    pub giant_look_height: f32,
    /// Pitch limits in radians (min, max)
    pub pitch_limits: (f32, f32),
    /// Initial pitch in radians
    pub initial_pitch: f32,
    /// Target yaw change per second at full tilt steer
    pub steer_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_damping: 0.1,
            follow_rate: 0.1,
            distance: 35.0,
            giant_distance: 350.0,
            height: 18.0,
            giant_height: 180.0,
            look_height: 3.0,
            giant_look_height: 50.0,
            pitch_limits: (-0.4, 0.8),
            initial_pitch: 0.3,
            steer_rate: 1.5,
        }
    }
}

impl CameraConfig {
    /// Set follow rate
    pub fn with_follow_rate(mut self, rate: f32) -> Self {
        self.follow_rate = rate;
        self
    }

    /// Set pitch limits
    pub fn with_pitch_limits(mut self, min: f32, max: f32) -> Self {
        self.pitch_limits = (min, max);
        self
    }

    /// Check ranges
    pub fn validate(&self) -> Result<(), String> {
        let (min, max) = self.pitch_limits;
        if min > max {
            return Err(format!("pitch limits inverted: {} > {}", min, max));
        }
        if !(0.0..=1.0).contains(&self.orbit_damping) || !(0.0..=1.0).contains(&self.follow_rate) {
            return Err("orbit_damping and follow_rate must be within [0, 1]".to_string());
        }
        if self.distance <= 0.0 || self.giant_distance <= 0.0 {
            return Err("camera distance must be positive".to_string());
        }
        Ok(())
    }

    fn distance_height(&self, giant: bool) -> (f32, f32) {
        if giant {
            (self.giant_distance, self.giant_height)
        } else {
            (self.distance, self.height)
        }
    }

    fn look_offset(&self, giant: bool) -> f32 {
        if giant {
            self.giant_look_height
        } else {
            self.look_height
        }
    }
}

/// Orbit angles the user is steering toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitTarget {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitTarget {
    /// Apply a drag delta in radians, clamping pitch
    pub fn apply_orbit(&mut self, yaw: f32, pitch: f32, limits: (f32, f32)) {
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(limits.0, limits.1);
    }

    /// Apply a tilt steer value for `dt` seconds
    pub fn apply_steer(&mut self, steer: f32, rate: f32, dt: f32) {
        self.yaw += steer * dt * rate;
    }
}

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Damped third-person follow camera
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    target: OrbitTarget,
    yaw: f32,
    pitch: f32,
    position: Vec3,
    look_at: Vec3,
}

impl CameraRig {
    /// Create a rig behind the origin
    pub fn new(config: CameraConfig) -> Self {
        let target = OrbitTarget {
            yaw: 0.0,
            pitch: config.initial_pitch,
        };
        let mut rig = Self {
            config,
            target,
            yaw: target.yaw,
            pitch: target.pitch,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        };
        rig.snap_to(Vec3::ZERO, false);
        rig
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Smoothed yaw; locomotion steers relative to this
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn target(&self) -> OrbitTarget {
        self.target
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
        }
    }

    /// Apply a drag delta in radians
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        self.target.apply_orbit(yaw, pitch, self.config.pitch_limits);
    }

    /// Apply tilt steering for one tick
    pub fn steer(&mut self, steer: f32, dt: f32) {
        self.target.apply_steer(steer, self.config.steer_rate, dt);
    }

    /// Damp the orbit angles toward the target
    pub fn update_orbit(&mut self) {
        self.yaw = damp(self.yaw, self.target.yaw, self.config.orbit_damping);
        self.pitch = damp(self.pitch, self.target.pitch, self.config.orbit_damping);
    }

    /// Camera position the rig is easing toward
    pub fn desired_position(&self, player: Vec3, giant: bool) -> Vec3 {
        let (distance, height) = self.config.distance_height(giant);
        let offset = Vec3::new(
            0.0,
            height + self.pitch.sin() * distance * 0.5,
            -self.pitch.cos() * distance,
        );
        player + rotate_y(offset, self.yaw)
    }

    /// Ease toward the follow position and aim at the player
    pub fn follow(&mut self, player: Vec3, giant: bool) -> CameraPose {
        let desired = self.desired_position(player, giant);
        self.position = self.position.lerp(desired, self.config.follow_rate);
        self.look_at = player + Vec3::Y * self.config.look_offset(giant);
        self.pose()
    }

    /// Jump straight to the follow position
    pub fn snap_to(&mut self, player: Vec3, giant: bool) {
        self.position = self.desired_position(player, giant);
        self.look_at = player + Vec3::Y * self.config.look_offset(giant);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
