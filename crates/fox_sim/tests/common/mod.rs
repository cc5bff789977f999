//! Shared helpers for the simulation suites

#![allow(dead_code)]

use fox_sim::prelude::*;
use glam::Vec3;
use parking_lot::Mutex;
use std::sync::Arc;

pub const DT: f32 = 1.0 / 60.0;

/// Small, reproducible world with hostiles spawned far from the action
pub fn test_config() -> GameConfig {
    let mut config = GameConfig::default().with_seed(1234).with_tree_count(0);
    config.spawn.hostile_radius = 500.0;
    config
}

/// Loaded session
pub fn start(config: GameConfig) -> (Simulation, RecordingScene) {
    let mut sim = Simulation::new(config).expect("valid config");
    let mut scene = RecordingScene::new();
    sim.on_assets_loaded(LoadedCharacter::with_model(1), &mut scene)
        .expect("first load");
    (sim, scene)
}

/// Move the player without going through locomotion
pub fn teleport(sim: &mut Simulation, position: Vec3) {
    if let Some(player) = sim.world_mut().player.as_mut() {
        player.motion.position = position;
        player.motion.velocity = Vec3::ZERO;
    }
}

pub fn idle_tick(sim: &mut Simulation, scene: &mut RecordingScene) -> TickReport {
    sim.tick(DT, &InputSnapshot::idle(), scene)
}

fn first_of(sim: &Simulation, kind: PickupKind) -> Option<Vec3> {
    sim.world()
        .pickups()
        .iter()
        .find(|(_, p)| p.kind == kind)
        .map(|(_, p)| p.position)
}

/// Step onto the first normal pickup
pub fn collect_one(sim: &mut Simulation, scene: &mut RecordingScene) -> TickReport {
    let target = first_of(sim, PickupKind::Normal).expect("a normal pickup is live");
    teleport(sim, target);
    idle_tick(sim, scene)
}

/// Step onto the rare pickup
pub fn collect_rare(sim: &mut Simulation, scene: &mut RecordingScene) -> TickReport {
    let target = first_of(sim, PickupKind::Rare).expect("rare pickup is pending");
    teleport(sim, target);
    idle_tick(sim, scene)
}

/// Step onto the first hostile
pub fn touch_hostile(sim: &mut Simulation, scene: &mut RecordingScene) -> TickReport {
    let target = sim
        .world()
        .hostiles()
        .iter()
        .map(|(_, h)| h.position)
        .next()
        .expect("a hostile is live");
    teleport(sim, target);
    idle_tick(sim, scene)
}

/// Observer that records every callback
#[derive(Clone, Default)]
pub struct Recorder {
    pub counts: Arc<Mutex<Vec<u32>>>,
    pub immunity: Arc<Mutex<u32>>,
}

impl GameObserver for Recorder {
    fn on_pickup_count_changed(&mut self, count: u32) {
        self.counts.lock().push(count);
    }

    fn on_immunity_acquired(&mut self) {
        *self.immunity.lock() += 1;
    }
}

impl Recorder {
    pub fn attach(sim: &mut Simulation) -> Self {
        let recorder = Self::default();
        sim.add_observer(Box::new(recorder.clone()));
        recorder
    }

    pub fn counts(&self) -> Vec<u32> {
        self.counts.lock().clone()
    }

    pub fn immunity(&self) -> u32 {
        *self.immunity.lock()
    }
}
