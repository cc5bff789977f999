//! Spatial entities
//!
//! Every entity is a positioned record plus the [`RenderHandle`] of its
//! visual. Pickups and hostiles live in generational arenas so a handle held
//! across a despawn can never reach a recycled slot.

use crate::assets::ClipSet;
use crate::scene::{RenderHandle, RenderScene, Visual, GOLD_COLOR, NEMESIS_COLOR, THEME_COLOR};
use fox_core::arena::{Arena, Handle};
use fox_player::locomotion::PlayerMotion;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kind of pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Counts toward the threshold
    Normal,
    /// Unlocks giant mode
    Rare,
    /// Decorative, after giant mode
    Trophy,
}

impl PickupKind {
    /// Color unless the spawner picks one
    pub fn default_color(&self) -> u32 {
        match self {
            PickupKind::Rare => GOLD_COLOR,
            PickupKind::Normal | PickupKind::Trophy => THEME_COLOR,
        }
    }

    /// Uniform visual scale
    pub fn scale(&self) -> f32 {
        match self {
            PickupKind::Normal => 1.0,
            PickupKind::Rare => 2.0,
            PickupKind::Trophy => 3.5,
        }
    }
}

/// A pickup in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec3,
    /// Order of creation within its kind; drives trophy bob phase
    pub ordinal: u32,
    /// Spin about the up axis
    pub yaw: f32,
    pub render: RenderHandle,
}

/// A hostile in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hostile {
    pub position: Vec3,
    pub render: RenderHandle,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerEntity {
    pub motion: PlayerMotion,
    pub render: RenderHandle,
    /// Locomotion clips of the loaded character
    pub clips: ClipSet,
}

pub type PickupId = Handle<Pickup>;
pub type HostileId = Handle<Hostile>;

/// All entities of a session
#[derive(Debug, Default)]
pub struct World {
    pub player: Option<PlayerEntity>,
    pickups: Arena<Pickup>,
    hostiles: Arena<Hostile>,
    trees: Vec<RenderHandle>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player position, or the origin before the player exists
    pub fn player_position(&self) -> Vec3 {
        self.player.map(|p| p.motion.position).unwrap_or(Vec3::ZERO)
    }

    pub fn pickups(&self) -> &Arena<Pickup> {
        &self.pickups
    }

    pub fn hostiles(&self) -> &Arena<Hostile> {
        &self.hostiles
    }

    pub fn hostile_count(&self) -> usize {
        self.hostiles.len()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Live pickups of a kind
    pub fn count(&self, kind: PickupKind) -> usize {
        self.pickups.iter().filter(|(_, p)| p.kind == kind).count()
    }

    /// Handles of live pickups of a kind
    pub fn pickups_of(&self, kind: PickupKind) -> Vec<PickupId> {
        self.pickups
            .iter()
            .filter(|(_, p)| p.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// The pending rare pickup
    pub fn rare(&self) -> Option<PickupId> {
        self.pickups_of(PickupKind::Rare).into_iter().next()
    }

    pub fn rare_pending(&self) -> bool {
        self.rare().is_some()
    }

    /// Create a pickup and its visual
    pub fn spawn_pickup(
        &mut self,
        scene: &mut dyn RenderScene,
        kind: PickupKind,
        color: u32,
        position: Vec3,
        ordinal: u32,
    ) -> PickupId {
        let render = scene.add_entity(Visual::Pickup { kind, color });
        scene.set_position(render, position);
        scene.set_scale(render, kind.scale());
        self.pickups.insert(Pickup {
            kind,
            position,
            ordinal,
            yaw: 0.0,
            render,
        })
    }

    /// Destroy a pickup and its visual
    pub fn despawn_pickup(&mut self, scene: &mut dyn RenderScene, id: PickupId) -> Option<Pickup> {
        let pickup = self.pickups.remove(id)?;
        scene.remove_entity(pickup.render);
        Some(pickup)
    }

    pub fn pickup_mut(&mut self, id: PickupId) -> Option<&mut Pickup> {
        self.pickups.get_mut(id)
    }

    /// Create a hostile and its visual
    pub fn spawn_hostile(&mut self, scene: &mut dyn RenderScene, position: Vec3) -> HostileId {
        let visual = Visual::Hostile {
            color: NEMESIS_COLOR,
        };
        let render = scene.add_entity(visual);
        scene.set_position(render, position);
        scene.set_scale(render, visual.base_scale());
        self.hostiles.insert(Hostile { position, render })
    }

    /// Destroy a hostile and its visual
    pub fn despawn_hostile(&mut self, scene: &mut dyn RenderScene, id: HostileId) -> Option<Hostile> {
        let hostile = self.hostiles.remove(id)?;
        scene.remove_entity(hostile.render);
        Some(hostile)
    }

    pub fn hostiles_mut(&mut self) -> impl Iterator<Item = (HostileId, &mut Hostile)> {
        self.hostiles.iter_mut()
    }

    /// Place a tree
    pub fn plant_tree(&mut self, scene: &mut dyn RenderScene, position: Vec3, trunk_height: f32) {
        let render = scene.add_entity(Visual::Tree { trunk_height });
        scene.set_position(render, position);
        self.trees.push(render);
    }

    /// Destroy every pickup and hostile. Trees and the player stay.
    pub fn clear(&mut self, scene: &mut dyn RenderScene) {
        for pickup in self.pickups.drain() {
            scene.remove_entity(pickup.render);
        }
        for hostile in self.hostiles.drain() {
            scene.remove_entity(hostile.render);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingScene;

    #[test]
    fn test_spawn_and_despawn_pickup() {
        let mut scene = RecordingScene::new();
        let mut world = World::new();

        let id = world.spawn_pickup(&mut scene, PickupKind::Normal, THEME_COLOR, Vec3::X, 0);
        assert_eq!(world.count(PickupKind::Normal), 1);
        assert_eq!(scene.pickups(PickupKind::Normal), 1);

        assert!(world.despawn_pickup(&mut scene, id).is_some());
        assert!(world.despawn_pickup(&mut scene, id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_rare_lookup() {
        let mut scene = RecordingScene::new();
        let mut world = World::new();
        world.spawn_pickup(&mut scene, PickupKind::Normal, THEME_COLOR, Vec3::X, 0);
        assert!(!world.rare_pending());

        let rare = world.spawn_pickup(&mut scene, PickupKind::Rare, GOLD_COLOR, Vec3::Z, 0);
        assert_eq!(world.rare(), Some(rare));
    }

    #[test]
    fn test_pickup_visual_and_scale() {
        let mut scene = RecordingScene::new();
        let mut world = World::new();
        let id = world.spawn_pickup(&mut scene, PickupKind::Trophy, GOLD_COLOR, Vec3::X, 3);

        let render = world.pickups().get(id).map(|p| p.render);
        let node = render.and_then(|r| scene.node(r)).copied();
        assert_eq!(
            node.map(|n| n.visual),
            Some(Visual::Pickup { kind: PickupKind::Trophy, color: GOLD_COLOR })
        );
        assert_eq!(node.map(|n| n.scale), Some(3.5));
        assert_eq!(node.map(|n| n.position), Some(Vec3::X));
    }

    #[test]
    fn test_clear_keeps_trees() {
        let mut scene = RecordingScene::new();
        let mut world = World::new();
        world.plant_tree(&mut scene, Vec3::new(500.0, 0.0, 500.0), 15.0);
        world.spawn_pickup(&mut scene, PickupKind::Normal, THEME_COLOR, Vec3::X, 0);
        world.spawn_hostile(&mut scene, Vec3::Z);

        world.clear(&mut scene);
        assert_eq!(world.hostile_count(), 0);
        assert_eq!(world.pickups().len(), 0);
        assert_eq!(scene.trees(), 1);
        assert_eq!(scene.len(), 1);
    }
}
