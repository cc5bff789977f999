//! Character assets and session lifecycle

use fox_player::locomotion::LocomotionState;
use serde::{Deserialize, Serialize};

/// Opaque handle to a loaded character model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(pub u64);

/// Opaque handle to a loaded animation clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipHandle(pub u64);

/// Locomotion clips of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSet {
    pub idle: ClipHandle,
    pub walk: ClipHandle,
    pub run: ClipHandle,
}

impl ClipSet {
    /// Clip played for a gait
    pub fn clip(&self, state: LocomotionState) -> ClipHandle {
        match state {
            LocomotionState::Idle => self.idle,
            LocomotionState::Walk => self.walk,
            LocomotionState::Run => self.run,
        }
    }
}

/// What the asset provider resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedCharacter {
    pub model: ModelHandle,
    pub clips: ClipSet,
}

impl LoadedCharacter {
    /// Character with sequential clip handles after the model
    pub fn with_model(model: u64) -> Self {
        Self {
            model: ModelHandle(model),
            clips: ClipSet {
                idle: ClipHandle(model + 1),
                walk: ClipHandle(model + 2),
                run: ClipHandle(model + 3),
            },
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for the character
    #[default]
    Loading,
    /// Player exists, ticks advance the world
    Running,
    /// Character failed to load; inert
    Failed,
}

impl SessionStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}
