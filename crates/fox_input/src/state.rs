//! Input state tracking
//!
//! Tracks held movement keys, the active drag and the device tilt across
//! events, and folds them into a per-tick [`InputSnapshot`].

use crate::event::{InputEvent, MoveKey};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Normalizer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of orbit per pixel of drag
    pub drag_sensitivity: f32,
    /// Tilt in degrees that produces a full steer
    pub tilt_full_scale: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.008,
            tilt_full_scale: 45.0,
        }
    }
}

impl InputConfig {
    /// Set drag sensitivity
    pub fn with_drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }
}

/// Orbit change requested since the last snapshot, in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitDelta {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitDelta {
    pub fn is_zero(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0
    }
}

/// Everything the simulation reads from input in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// `x` strafes (positive = left), `y` moves forward; each in [-1, 1]
    pub move_intent: Vec2,
    pub orbit_delta: OrbitDelta,
    /// Tilt steer; turns the camera target by `steer * dt * rate`
    pub steer: f32,
}

impl InputSnapshot {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only a movement intent
    pub fn moving(intent: Vec2) -> Self {
        Self {
            move_intent: intent.clamp(Vec2::splat(-1.0), Vec2::ONE),
            ..Self::default()
        }
    }

    /// Set orbit delta
    pub fn with_orbit(mut self, yaw: f32, pitch: f32) -> Self {
        self.orbit_delta = OrbitDelta { yaw, pitch };
        self
    }

    /// Set steer
    pub fn with_steer(mut self, steer: f32) -> Self {
        self.steer = steer;
        self
    }

    /// Whether movement is requested
    pub fn is_moving(&self) -> bool {
        self.move_intent.length_squared() > 0.0
    }
}

/// Accumulates events between snapshots
#[derive(Debug, Clone, Default)]
pub struct InputState {
    config: InputConfig,
    held: HashSet<MoveKey>,
    drag_last: Option<Vec2>,
    orbit: OrbitDelta,
    tilt: Option<f32>,
}

impl InputState {
    /// Create an empty state
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Whether a key is held
    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }

    /// Whether tilt steering is active
    pub fn is_tilting(&self) -> bool {
        self.tilt.is_some()
    }

    /// Fold one event in
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
            InputEvent::DragStart { x, y } => {
                self.drag_last = Some(Vec2::new(x, y));
            }
            InputEvent::DragMove { x, y } => {
                let Some(last) = self.drag_last else {
                    return;
                };
                let delta = Vec2::new(x, y) - last;
                self.orbit.yaw -= delta.x * self.config.drag_sensitivity;
                self.orbit.pitch -= delta.y * self.config.drag_sensitivity;
                self.drag_last = Some(Vec2::new(x, y));
            }
            InputEvent::DragEnd => self.drag_last = None,
            InputEvent::Tilt { gamma } => {
                self.tilt = Some(-(gamma / self.config.tilt_full_scale));
            }
            InputEvent::TiltEnd => self.tilt = None,
            InputEvent::Blur => {
                self.held.clear();
                self.drag_last = None;
                self.tilt = None;
            }
        }
    }

    /// Current movement intent
    pub fn move_intent(&self) -> Vec2 {
        // Tilt steering walks forward and ignores the keyboard
        if self.tilt.is_some() {
            return Vec2::Y;
        }

        let axis = |pos: MoveKey, neg: MoveKey| {
            let mut v = 0.0;
            if self.is_held(pos) {
                v += 1.0;
            }
            if self.is_held(neg) {
                v -= 1.0;
            }
            v
        };
        Vec2::new(
            axis(MoveKey::Left, MoveKey::Right),
            axis(MoveKey::Forward, MoveKey::Back),
        )
    }

    /// Produce this tick's snapshot and reset the orbit accumulator
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            move_intent: self.move_intent(),
            orbit_delta: std::mem::take(&mut self.orbit),
            steer: self.tilt.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_keys_to_intent() {
        let mut state = InputState::default();
        state.apply(&InputEvent::KeyDown(MoveKey::Forward));
        state.apply(&InputEvent::KeyDown(MoveKey::Left));
        assert_eq!(state.move_intent(), Vec2::new(1.0, 1.0));

        state.apply(&InputEvent::KeyDown(MoveKey::Right));
        assert_eq!(state.move_intent(), Vec2::new(0.0, 1.0));

        state.apply(&InputEvent::KeyUp(MoveKey::Forward));
        state.apply(&InputEvent::KeyDown(MoveKey::Back));
        assert_eq!(state.move_intent(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_drag_accumulates_until_snapshot() {
        let mut state = InputState::new(InputConfig::default());
        state.apply(&InputEvent::DragStart { x: 100.0, y: 100.0 });
        state.apply(&InputEvent::DragMove { x: 110.0, y: 100.0 });
        state.apply(&InputEvent::DragMove { x: 120.0, y: 90.0 });

        let snapshot = state.snapshot();
        assert_relative_eq!(snapshot.orbit_delta.yaw, -20.0 * 0.008, epsilon = 1e-6);
        assert_relative_eq!(snapshot.orbit_delta.pitch, 10.0 * 0.008, epsilon = 1e-6);
        assert!(state.snapshot().orbit_delta.is_zero());
    }

    #[test]
    fn test_drag_move_without_start_ignored() {
        let mut state = InputState::default();
        state.apply(&InputEvent::DragMove { x: 50.0, y: 50.0 });
        assert!(state.snapshot().orbit_delta.is_zero());
    }

    #[test]
    fn test_tilt_forces_forward() {
        let mut state = InputState::new(InputConfig::default());
        state.apply(&InputEvent::KeyDown(MoveKey::Back));
        state.apply(&InputEvent::Tilt { gamma: 45.0 });

        let snapshot = state.snapshot();
        assert_eq!(snapshot.move_intent, Vec2::Y);
        assert_relative_eq!(snapshot.steer, -1.0);

        state.apply(&InputEvent::TiltEnd);
        assert_eq!(state.move_intent(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_blur_releases_everything() {
        let mut state = InputState::default();
        state.apply(&InputEvent::KeyDown(MoveKey::Forward));
        state.apply(&InputEvent::DragStart { x: 0.0, y: 0.0 });
        state.apply(&InputEvent::Blur);

        assert_eq!(state.move_intent(), Vec2::ZERO);
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_snapshot_builder_clamps() {
        let snapshot = InputSnapshot::moving(Vec2::new(3.0, -2.0));
        assert_eq!(snapshot.move_intent, Vec2::new(1.0, -1.0));
        assert!(snapshot.is_moving());
        assert!(!InputSnapshot::idle().is_moving());
    }
}
