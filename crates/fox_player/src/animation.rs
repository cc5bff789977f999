//! Animation cross-fading
//!
//! The mixer owns one weight per locomotion clip. Switching clips starts a
//! fade: the incoming clip ramps up from its current weight to 1 while every
//! other clip ramps down to 0 over the fade duration. Weights always sum to 1.

use crate::locomotion::LocomotionState;
use serde::{Deserialize, Serialize};

/// Blend weight of each locomotion clip
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipWeights {
    pub idle: f32,
    pub walk: f32,
    pub run: f32,
}

impl ClipWeights {
    /// All weight on one clip
    pub fn solo(state: LocomotionState) -> Self {
        let mut weights = Self::default();
        weights.set(state, 1.0);
        weights
    }

    /// Weight of a clip
    pub fn get(&self, state: LocomotionState) -> f32 {
        match state {
            LocomotionState::Idle => self.idle,
            LocomotionState::Walk => self.walk,
            LocomotionState::Run => self.run,
        }
    }

    /// Set weight of a clip
    pub fn set(&mut self, state: LocomotionState, weight: f32) {
        match state {
            LocomotionState::Idle => self.idle = weight,
            LocomotionState::Walk => self.walk = weight,
            LocomotionState::Run => self.run = weight,
        }
    }

    /// Total weight
    pub fn sum(&self) -> f32 {
        self.idle + self.walk + self.run
    }
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    start: ClipWeights,
    duration: f32,
    elapsed: f32,
}

/// Cross-fading clip mixer
#[derive(Debug, Clone)]
pub struct CrossFadeMixer {
    active: LocomotionState,
    weights: ClipWeights,
    fade: Option<Fade>,
}

impl CrossFadeMixer {
    /// Create a mixer fully on `initial`
    pub fn new(initial: LocomotionState) -> Self {
        Self {
            active: initial,
            weights: ClipWeights::solo(initial),
            fade: None,
        }
    }

    /// Clip being faded toward (or fully playing)
    pub fn active(&self) -> LocomotionState {
        self.active
    }

    /// Current weights
    pub fn weights(&self) -> ClipWeights {
        self.weights
    }

    /// Whether a fade is in progress
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Start fading to `target`. No-op if it is already the active clip.
    pub fn fade_to(&mut self, target: LocomotionState, duration: f32) {
        if target == self.active {
            return;
        }
        self.active = target;
        if duration <= 0.0 {
            self.snap_to(target);
            return;
        }
        self.fade = Some(Fade {
            start: self.weights,
            duration,
            elapsed: 0.0,
        });
    }

    /// Jump straight to `target` with no fade
    pub fn snap_to(&mut self, target: LocomotionState) {
        self.active = target;
        self.weights = ClipWeights::solo(target);
        self.fade = None;
    }

    /// Advance the fade
    pub fn update(&mut self, delta_time: f32) {
        let Some(mut fade) = self.fade else {
            return;
        };

        fade.elapsed += delta_time;
        let t = fade.elapsed / fade.duration;
        if t >= 1.0 {
            self.weights = ClipWeights::solo(self.active);
            self.fade = None;
            return;
        }

        let mut weights = ClipWeights::default();
        for state in LocomotionState::ALL {
            let from = fade.start.get(state);
            let to = if state == self.active { 1.0 } else { 0.0 };
            weights.set(state, from + (to - from) * t);
        }
        self.weights = weights;
        self.fade = Some(fade);
    }
}

impl Default for CrossFadeMixer {
    fn default() -> Self {
        Self::new(LocomotionState::Idle)
    }
}
