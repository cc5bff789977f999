//! Fox Sim - Simulation Core
//!
//! The frame-driven core of Immortal Fox: a player roams a scattered forest
//! collecting pickups while hostiles chase it and steal them back. Filling the
//! pouch reveals a rare pickup that makes the player a permanent giant.
//!
//! # Features
//!
//! - Explicit `tick(dt, input, scene)` callable from any scheduler
//! - Render-agnostic: visuals are created and moved through [`RenderScene`]
//! - Seeded spawning for reproducible sessions
//! - Deferred reset through a thread-safe [`ControlSurface`]
//!
//! # Example
//!
//! ```ignore
//! use fox_sim::prelude::*;
//!
//! let mut sim = Simulation::new(GameConfig::default())?;
//! sim.on_assets_loaded(character, &mut scene)?;
//!
//! loop {
//!     let report = sim.tick(dt, &mailbox.poll(), &mut scene);
//!     for event in report.events {
//!         hud.show(event);
//!     }
//! }
//! ```

pub mod assets;
pub mod config;
pub mod control;
pub mod entity;
pub mod error;
pub mod forest;
pub mod scene;
pub mod simulation;
pub mod spawn;

pub mod prelude {
    pub use crate::assets::{ClipHandle, ClipSet, LoadedCharacter, ModelHandle, SessionStatus};
    pub use crate::config::{ForestConfig, GameConfig, SpawnConfig};
    pub use crate::control::ControlSurface;
    pub use crate::entity::{Hostile, HostileId, Pickup, PickupId, PickupKind, PlayerEntity, World};
    pub use crate::error::{Result, SimError};
    pub use crate::scene::{
        AnimationBlend, RecordingScene, RenderHandle, RenderScene, SceneNode, Visual,
    };
    pub use crate::simulation::{GameObserver, Simulation, TickReport};
    pub use crate::spawn::SpawnDirector;
    pub use fox_camera::rig::CameraPose;
    pub use fox_gamestate::state::{CaughtEmptyHanded, GameEvent, GamePhase};
    pub use fox_input::state::{InputSnapshot, OrbitDelta};
    pub use fox_player::animation::ClipWeights;
    pub use fox_player::locomotion::LocomotionState;
}

pub use prelude::*;
