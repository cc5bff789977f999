//! Spawn director
//!
//! Keeps the pickup population consistent with progress:
//!
//! - Below the threshold, live normal pickups plus the carried count equals
//!   the pouch size.
//! - At the threshold, exactly one rare pickup waits somewhere around the
//!   player.
//! - In giant mode, trophies are laid out one per tick along a spiral.
//!
//! Hostiles are spawned on request, one per collection.

use crate::config::SpawnConfig;
use crate::entity::{HostileId, PickupId, PickupKind, World};
use crate::scene::{RenderScene, GOLD_COLOR};
use core::f32::consts::TAU;
use fox_core::math::on_ring;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Population keeper
pub struct SpawnDirector {
    config: SpawnConfig,
    rng: Pcg64Mcg,
}

impl SpawnDirector {
    /// Create a director with a seeded generator
    pub fn new(config: SpawnConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Ring normal pickups are placed on
    pub fn normal_ring(&self, collected: u32, max: u32, latched: bool) -> (f32, f32) {
        let (inner, outer) = self.config.normal_ring;
        if collected >= max || latched {
            (inner * self.config.far_ring_scale, outer * self.config.far_ring_scale)
        } else {
            (inner, outer)
        }
    }

    /// Top up normal pickups, or lay the next trophy once latched.
    /// Returns the number of pickups created.
    pub fn replenish_normal(
        &mut self,
        world: &mut World,
        scene: &mut dyn RenderScene,
        collected: u32,
        max: u32,
        latched: bool,
    ) -> usize {
        if latched {
            return usize::from(self.spawn_trophy(world, scene).is_some());
        }

        let live = world.count(PickupKind::Normal) as u32;
        let needed = max.saturating_sub(collected).saturating_sub(live);
        if needed == 0 {
            return 0;
        }

        let center = world.player_position();
        let (inner, outer) = self.normal_ring(collected, max, latched);
        for i in 0..needed {
            let angle = self.rng.gen_range(0.0..TAU);
            let distance = if outer > inner {
                self.rng.gen_range(inner..outer)
            } else {
                inner
            };
            let position = ground(on_ring(center, angle, distance));
            world.spawn_pickup(
                scene,
                PickupKind::Normal,
                PickupKind::Normal.default_color(),
                position,
                live + i,
            );
        }
        log::debug!("Spawned {} pickups around {:?}", needed, center);
        needed as usize
    }

    /// Place the rare pickup when the pouch is full and none is pending
    pub fn maybe_spawn_rare(
        &mut self,
        world: &mut World,
        scene: &mut dyn RenderScene,
        collected: u32,
        max: u32,
        latched: bool,
    ) -> Option<PickupId> {
        if collected < max || latched || world.rare_pending() {
            return None;
        }
        let angle = self.rng.gen_range(0.0..TAU);
        let position = ground(on_ring(world.player_position(), angle, self.config.rare_radius));
        log::debug!("Rare pickup at {:?}", position);
        Some(world.spawn_pickup(
            scene,
            PickupKind::Rare,
            PickupKind::Rare.default_color(),
            position,
            0,
        ))
    }

    /// Remove a pending rare pickup after the pouch drops below full
    pub fn despawn_rare_on_loss(
        &mut self,
        world: &mut World,
        scene: &mut dyn RenderScene,
        collected: u32,
        max: u32,
    ) -> bool {
        if !self.config.rare_despawn_on_loss || collected >= max {
            return false;
        }
        let Some(rare) = world.rare() else {
            return false;
        };
        log::debug!("Rare pickup withdrawn at {} pickups", collected);
        world.despawn_pickup(scene, rare).is_some()
    }

    /// One hostile on a ring around the player
    pub fn spawn_hostile(&mut self, world: &mut World, scene: &mut dyn RenderScene) -> HostileId {
        let angle = self.rng.gen_range(0.0..TAU);
        let position = ground(on_ring(
            world.player_position(),
            angle,
            self.config.hostile_radius,
        ));
        log::debug!("Hostile spawned at {:?}", position);
        world.spawn_hostile(scene, position)
    }

    /// Next trophy on the spiral, until the cap
    pub fn spawn_trophy(&mut self, world: &mut World, scene: &mut dyn RenderScene) -> Option<PickupId> {
        let n = world.count(PickupKind::Trophy) as u32;
        if n >= self.config.trophy_cap {
            return None;
        }
        let position = ground(on_ring(
            world.player_position(),
            n as f32 * self.config.trophy_angle_step,
            self.config.trophy_base_radius + n as f32 * self.config.trophy_radius_step,
        ));
        let color = if n % self.config.trophy_gold_every == 0 {
            GOLD_COLOR
        } else {
            PickupKind::Trophy.default_color()
        };
        Some(world.spawn_pickup(scene, PickupKind::Trophy, color, position, n))
    }

    /// Remove every normal pickup, e.g. when giant mode starts
    pub fn clear_normal(&mut self, world: &mut World, scene: &mut dyn RenderScene) -> usize {
        let ids = world.pickups_of(PickupKind::Normal);
        for id in &ids {
            world.despawn_pickup(scene, *id);
        }
        ids.len()
    }

    /// Vertical offset of a trophy at time `t`
    pub fn trophy_bob(&self, ordinal: u32, t: f32) -> f32 {
        (t * self.config.trophy_bob_rate + ordinal as f32).sin() * self.config.trophy_bob_amplitude
    }
}

fn ground(mut position: Vec3) -> Vec3 {
    position.y = 0.0;
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::LoadedCharacter;
    use crate::entity::PlayerEntity;
    use crate::scene::{RecordingScene, RenderHandle};
    use approx::assert_relative_eq;
    use fox_core::math::planar_distance;
    use fox_player::locomotion::PlayerMotion;

    fn setup() -> (SpawnDirector, World, RecordingScene) {
        (
            SpawnDirector::new(SpawnConfig::default(), 7),
            World::new(),
            RecordingScene::new(),
        )
    }

    #[test]
    fn test_replenish_fills_to_max() {
        let (mut director, mut world, mut scene) = setup();
        assert_eq!(director.replenish_normal(&mut world, &mut scene, 0, 5, false), 5);
        assert_eq!(director.replenish_normal(&mut world, &mut scene, 0, 5, false), 0);
        assert_eq!(world.count(PickupKind::Normal), 5);
    }

    #[test]
    fn test_replenish_accounts_for_carried() {
        let (mut director, mut world, mut scene) = setup();
        director.replenish_normal(&mut world, &mut scene, 3, 5, false);
        assert_eq!(world.count(PickupKind::Normal), 2);
    }

    #[test]
    fn test_normal_pickups_on_ring() {
        let (mut director, mut world, mut scene) = setup();
        let center = Vec3::new(40.0, 0.0, -25.0);
        world.player = Some(PlayerEntity {
            motion: PlayerMotion::at(center, 0.03),
            render: RenderHandle(0),
            clips: LoadedCharacter::with_model(1).clips,
        });

        director.replenish_normal(&mut world, &mut scene, 0, 5, false);
        for (_, pickup) in world.pickups().iter() {
            let d = planar_distance(pickup.position, center);
            assert!((60.0..=140.0).contains(&d), "distance {}", d);
            assert_eq!(pickup.position.y, 0.0);
        }
    }

    #[test]
    fn test_rare_only_when_full() {
        let (mut director, mut world, mut scene) = setup();
        assert!(director.maybe_spawn_rare(&mut world, &mut scene, 4, 5, false).is_none());
        assert!(director.maybe_spawn_rare(&mut world, &mut scene, 5, 5, true).is_none());

        let rare = director.maybe_spawn_rare(&mut world, &mut scene, 5, 5, false);
        assert!(rare.is_some());
        assert!(director.maybe_spawn_rare(&mut world, &mut scene, 5, 5, false).is_none());
        assert_eq!(world.count(PickupKind::Rare), 1);

        let position = rare.and_then(|id| world.pickups().get(id)).map(|p| p.position);
        assert_relative_eq!(position.map(|p| p.length()).unwrap_or(0.0), 120.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rare_withdrawn_on_loss() {
        let (mut director, mut world, mut scene) = setup();
        director.maybe_spawn_rare(&mut world, &mut scene, 5, 5, false);
        assert!(!director.despawn_rare_on_loss(&mut world, &mut scene, 5, 5));
        assert!(director.despawn_rare_on_loss(&mut world, &mut scene, 4, 5));
        assert!(!world.rare_pending());
        assert_eq!(scene.pickups(PickupKind::Rare), 0);
    }

    #[test]
    fn test_rare_kept_when_despawn_disabled() {
        let config = SpawnConfig {
            rare_despawn_on_loss: false,
            ..SpawnConfig::default()
        };
        let mut director = SpawnDirector::new(config, 1);
        let mut world = World::new();
        let mut scene = RecordingScene::new();
        director.maybe_spawn_rare(&mut world, &mut scene, 5, 5, false);
        assert!(!director.despawn_rare_on_loss(&mut world, &mut scene, 2, 5));
        assert!(world.rare_pending());
    }

    #[test]
    fn test_hostile_on_ring() {
        let (mut director, mut world, mut scene) = setup();
        let id = director.spawn_hostile(&mut world, &mut scene);
        let position = world.hostiles().get(id).map(|h| h.position).unwrap_or(Vec3::ZERO);
        assert_relative_eq!(position.length(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_trophy_spiral_one_per_call_until_cap() {
        let config = SpawnConfig {
            trophy_cap: 4,
            ..SpawnConfig::default()
        };
        let mut director = SpawnDirector::new(config, 3);
        let mut world = World::new();
        let mut scene = RecordingScene::new();

        for _ in 0..10 {
            director.replenish_normal(&mut world, &mut scene, 5, 5, true);
        }
        assert_eq!(world.count(PickupKind::Trophy), 4);
        assert_eq!(world.count(PickupKind::Normal), 0);

        let mut radii: Vec<(u32, f32)> = world
            .pickups()
            .iter()
            .map(|(_, p)| (p.ordinal, p.position.length()))
            .collect();
        radii.sort_by_key(|(ordinal, _)| *ordinal);
        assert_relative_eq!(radii[0].1, 20.0, epsilon = 1e-3);
        assert_relative_eq!(radii[3].1, 20.0 + 3.0 * 5.5, epsilon = 1e-3);
    }

    #[test]
    fn test_seed_determinism() {
        let positions = |seed| {
            let mut director = SpawnDirector::new(SpawnConfig::default(), seed);
            let mut world = World::new();
            let mut scene = RecordingScene::new();
            director.replenish_normal(&mut world, &mut scene, 0, 5, false);
            world.pickups().iter().map(|(_, p)| p.position).collect::<Vec<_>>()
        };
        assert_eq!(positions(42), positions(42));
        assert_ne!(positions(42), positions(43));
    }
}
