//! Render scene boundary
//!
//! The simulation never owns visuals. It asks a [`RenderScene`] to create
//! one per entity and keeps only the returned [`RenderHandle`].

use crate::assets::{ClipHandle, ClipSet, ModelHandle};
use crate::entity::PickupKind;
use fox_camera::rig::CameraPose;
use fox_player::animation::ClipWeights;
use fox_player::locomotion::LocomotionState;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Terracotta pickup color
pub const THEME_COLOR: u32 = 0xE2725B;
/// Hostile color
pub const NEMESIS_COLOR: u32 = 0x6A0DAD;
/// Rare and gold trophy color
pub const GOLD_COLOR: u32 = 0xFFD700;

/// Opaque scene-side handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);

/// What to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Player { model: ModelHandle },
    Pickup { kind: PickupKind, color: u32 },
    Hostile { color: u32 },
    Tree { trunk_height: f32 },
}

impl Visual {
    /// Uniform scale the visual is created with
    pub fn base_scale(&self) -> f32 {
        match self {
            Visual::Player { .. } | Visual::Tree { .. } => 1.0,
            Visual::Pickup { kind, .. } => kind.scale(),
            Visual::Hostile { .. } => 2.5,
        }
    }
}

/// The character's locomotion clips and how strongly each one plays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationBlend {
    pub clips: ClipSet,
    pub weights: ClipWeights,
}

impl AnimationBlend {
    /// Each clip with its weight, idle first
    pub fn layers(&self) -> [(ClipHandle, f32); 3] {
        LocomotionState::ALL.map(|state| (self.clips.clip(state), self.weights.get(state)))
    }
}

/// Scene the simulation drives
pub trait RenderScene {
    /// Create a visual and return its handle
    fn add_entity(&mut self, visual: Visual) -> RenderHandle;

    /// Destroy a visual
    fn remove_entity(&mut self, handle: RenderHandle);

    fn set_position(&mut self, handle: RenderHandle, position: Vec3);

    /// Rotation about the up axis
    fn set_rotation(&mut self, handle: RenderHandle, yaw: f32);

    fn set_scale(&mut self, handle: RenderHandle, scale: f32);

    /// Locomotion clips to mix on a character
    fn set_animation(&mut self, _handle: RenderHandle, _blend: AnimationBlend) {}

    /// Camera placement for this frame
    fn set_camera(&mut self, _pose: CameraPose) {}
}

/// Last known state of one visual
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    pub visual: Visual,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub animation: Option<AnimationBlend>,
}

/// In-memory scene that records everything it is told
#[derive(Debug, Default)]
pub struct RecordingScene {
    next: u64,
    nodes: HashMap<RenderHandle, SceneNode>,
    camera: Option<CameraPose>,
    added: usize,
    removed: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node for a handle, if still alive
    pub fn node(&self, handle: RenderHandle) -> Option<&SceneNode> {
        self.nodes.get(&handle)
    }

    /// Live visuals
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live visuals matching a predicate
    pub fn count(&self, mut predicate: impl FnMut(&Visual) -> bool) -> usize {
        self.nodes.values().filter(|n| predicate(&n.visual)).count()
    }

    /// Live pickups of a kind
    pub fn pickups(&self, kind: PickupKind) -> usize {
        self.count(|v| matches!(v, Visual::Pickup { kind: k, .. } if *k == kind))
    }

    pub fn hostiles(&self) -> usize {
        self.count(|v| matches!(v, Visual::Hostile { .. }))
    }

    pub fn trees(&self) -> usize {
        self.count(|v| matches!(v, Visual::Tree { .. }))
    }

    /// Last camera pose set
    pub fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    /// Visuals created over the scene's lifetime
    pub fn total_added(&self) -> usize {
        self.added
    }

    /// Visuals destroyed over the scene's lifetime
    pub fn total_removed(&self) -> usize {
        self.removed
    }
}

impl RenderScene for RecordingScene {
    fn add_entity(&mut self, visual: Visual) -> RenderHandle {
        self.next += 1;
        let handle = RenderHandle(self.next);
        self.nodes.insert(
            handle,
            SceneNode {
                visual,
                position: Vec3::ZERO,
                yaw: 0.0,
                scale: visual.base_scale(),
                animation: None,
            },
        );
        self.added += 1;
        handle
    }

    fn remove_entity(&mut self, handle: RenderHandle) {
        if self.nodes.remove(&handle).is_some() {
            self.removed += 1;
        }
    }

    fn set_position(&mut self, handle: RenderHandle, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.position = position;
        }
    }

    fn set_rotation(&mut self, handle: RenderHandle, yaw: f32) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.yaw = yaw;
        }
    }

    fn set_scale(&mut self, handle: RenderHandle, scale: f32) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.scale = scale;
        }
    }

    fn set_animation(&mut self, handle: RenderHandle, blend: AnimationBlend) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.animation = Some(blend);
        }
    }

    fn set_camera(&mut self, pose: CameraPose) {
        self.camera = Some(pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_scene_tracks_nodes() {
        let mut scene = RecordingScene::new();
        let hostile = scene.add_entity(Visual::Hostile { color: NEMESIS_COLOR });
        let tree = scene.add_entity(Visual::Tree { trunk_height: 12.0 });

        scene.set_position(hostile, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(scene.node(hostile).map(|n| n.position), Some(Vec3::new(1.0, 0.0, 2.0)));
        assert_eq!(scene.node(hostile).map(|n| n.scale), Some(2.5));
        assert_eq!(scene.hostiles(), 1);
        assert_eq!(scene.trees(), 1);

        scene.remove_entity(tree);
        scene.remove_entity(tree);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.total_removed(), 1);
    }

    #[test]
    fn test_blend_pairs_clips_with_weights() {
        let character = crate::assets::LoadedCharacter::with_model(10);
        let blend = AnimationBlend {
            clips: character.clips,
            weights: ClipWeights {
                idle: 0.25,
                walk: 0.75,
                run: 0.0,
            },
        };

        assert_eq!(
            blend.layers(),
            [(ClipHandle(11), 0.25), (ClipHandle(12), 0.75), (ClipHandle(13), 0.0)]
        );

        let mut scene = RecordingScene::new();
        let player = scene.add_entity(Visual::Player { model: character.model });
        scene.set_animation(player, blend);
        assert_eq!(scene.node(player).and_then(|n| n.animation), Some(blend));
    }
}
