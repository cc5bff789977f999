//! Scenario tests for fox_sim
//!
//! Each test plays a short, scripted session end to end.

mod common;

use approx::assert_relative_eq;
use common::*;
use fox_sim::prelude::*;
use glam::{Vec2, Vec3};

#[test]
fn test_collect_five_reveals_rare() {
    let (mut sim, mut scene) = start(test_config());
    let recorder = Recorder::attach(&mut sim);

    for expected in 1..=5 {
        let report = collect_one(&mut sim, &mut scene);
        assert_eq!(report.events, vec![GameEvent::PickupCountChanged(expected)]);
    }

    assert_eq!(sim.state().collected(), 5);
    assert_eq!(sim.state().phase(), GamePhase::Threshold);
    assert_eq!(scene.hostiles(), 5);
    assert_eq!(recorder.counts(), vec![1, 2, 3, 4, 5]);
    assert!(sim.world().rare_pending());
    assert_eq!(scene.pickups(PickupKind::Normal), 0);
}

#[test]
fn test_rare_pickup_latches_giant() {
    let (mut sim, mut scene) = start(test_config());
    let recorder = Recorder::attach(&mut sim);
    for _ in 0..5 {
        collect_one(&mut sim, &mut scene);
    }

    let report = collect_rare(&mut sim, &mut scene);
    assert_eq!(report.events, vec![GameEvent::ImmunityAcquired]);
    assert!(sim.state().is_giant());
    assert_eq!(recorder.immunity(), 1);
    assert_eq!(scene.pickups(PickupKind::Rare), 0);

    // Trophies are laid one per tick and the rare never returns
    let trophies = sim.world().count(PickupKind::Trophy);
    for i in 1..=10 {
        idle_tick(&mut sim, &mut scene);
        assert_eq!(sim.world().count(PickupKind::Trophy), trophies + i);
        assert!(!sim.world().rare_pending());
        assert_eq!(sim.world().count(PickupKind::Normal), 0);
    }
    assert_eq!(recorder.immunity(), 1);
}

#[test]
fn test_trophy_spiral_caps() {
    let mut config = test_config();
    config.spawn.trophy_cap = 12;
    let (mut sim, mut scene) = start(config);
    for _ in 0..5 {
        collect_one(&mut sim, &mut scene);
    }
    collect_rare(&mut sim, &mut scene);

    for _ in 0..40 {
        idle_tick(&mut sim, &mut scene);
    }
    assert_eq!(sim.world().count(PickupKind::Trophy), 12);
    assert_eq!(scene.pickups(PickupKind::Trophy), 12);
}

#[test]
fn test_giant_scatters_hostiles() {
    let mut config = test_config();
    config.pursuit.giant_contact_radius = 1.0;
    let (mut sim, mut scene) = start(config);
    for _ in 0..5 {
        collect_one(&mut sim, &mut scene);
    }
    collect_rare(&mut sim, &mut scene);

    let player = sim.player().map(|p| p.motion.position).unwrap_or_default();
    let distances = |sim: &Simulation| -> Vec<f32> {
        sim.world()
            .hostiles()
            .iter()
            .map(|(_, h)| fox_core::math::planar_distance(h.position, player))
            .collect()
    };
    let before = distances(&sim);
    idle_tick(&mut sim, &mut scene);
    let after = distances(&sim);

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_relative_eq!(a - b, 60.0 * DT, epsilon = 1e-3);
    }
}

#[test]
fn test_hostile_steals_one() {
    let (mut sim, mut scene) = start(test_config());
    let recorder = Recorder::attach(&mut sim);
    for _ in 0..3 {
        collect_one(&mut sim, &mut scene);
    }
    assert_eq!(scene.hostiles(), 3);

    let report = touch_hostile(&mut sim, &mut scene);
    assert_eq!(report.events, vec![GameEvent::PickupCountChanged(2)]);
    assert_eq!(sim.state().collected(), 2);
    assert_eq!(scene.hostiles(), 2);
    assert_eq!(recorder.counts().last(), Some(&2));
    assert_eq!(sim.world().count(PickupKind::Normal), 3);
}

#[test]
fn test_caught_empty_handed_resets() {
    let (mut sim, mut scene) = start(test_config());
    collect_one(&mut sim, &mut scene);
    touch_hostile(&mut sim, &mut scene);
    assert_eq!(sim.state().collected(), 0);

    let near = sim.world().player_position() + Vec3::new(1.0, 0.0, 0.0);
    sim.world_mut().spawn_hostile(&mut scene, near);
    let report = idle_tick(&mut sim, &mut scene);

    assert!(report.reset);
    assert_eq!(report.events, vec![GameEvent::PickupCountChanged(0)]);
    assert_eq!(sim.state().collected(), 0);
    assert_eq!(scene.hostiles(), 0);
    assert_eq!(sim.world().count(PickupKind::Normal), 5);
    assert_eq!(sim.player().map(|p| p.motion.position), Some(Vec3::ZERO));
}

#[test]
fn test_caught_empty_handed_forgiven() {
    let config = test_config().with_zero_count_policy(CaughtEmptyHanded::Forgive);
    let (mut sim, mut scene) = start(config);
    let start_position = Vec3::new(7.0, 0.0, 7.0);
    teleport(&mut sim, start_position);

    sim.world_mut()
        .spawn_hostile(&mut scene, start_position + Vec3::new(0.0, 0.0, 1.0));
    let report = idle_tick(&mut sim, &mut scene);

    assert!(!report.reset);
    assert!(report.events.is_empty());
    assert_eq!(sim.state().collected(), 0);
    assert_eq!(scene.hostiles(), 0);
    assert_eq!(sim.player().map(|p| p.motion.position), Some(start_position));
}

#[test]
fn test_rare_withdrawn_after_theft() {
    let (mut sim, mut scene) = start(test_config());
    for _ in 0..5 {
        collect_one(&mut sim, &mut scene);
    }
    assert!(sim.world().rare_pending());

    touch_hostile(&mut sim, &mut scene);
    assert_eq!(sim.state().collected(), 4);
    assert!(!sim.world().rare_pending());
    assert_eq!(sim.world().count(PickupKind::Normal), 1);
}

#[test]
fn test_gait_follows_hold_time() {
    let (mut sim, mut scene) = start(test_config());
    let forward = InputSnapshot::moving(Vec2::Y);

    // 0.2s held: walking, mid cross-fade from idle
    let mut report = TickReport::default();
    for _ in 0..12 {
        report = sim.tick(DT, &forward, &mut scene);
    }
    assert_eq!(report.locomotion, Some(LocomotionState::Walk));
    let weights = player_animation(&sim, &scene).weights;
    assert!(weights.idle > 0.0 && weights.walk > 0.0);
    assert_relative_eq!(weights.sum(), 1.0, epsilon = 1e-4);

    // Past the run threshold
    for _ in 0..18 {
        report = sim.tick(DT, &forward, &mut scene);
    }
    assert_eq!(report.locomotion, Some(LocomotionState::Run));

    let report = idle_tick(&mut sim, &mut scene);
    assert_eq!(report.locomotion, Some(LocomotionState::Idle));
}

fn player_animation(sim: &Simulation, scene: &RecordingScene) -> AnimationBlend {
    let render = sim.player().map(|p| p.render).expect("player");
    scene.node(render).and_then(|n| n.animation).expect("animation set")
}

#[test]
fn test_reset_cross_fades_out_of_run() {
    let (mut sim, mut scene) = start(test_config());
    let forward = InputSnapshot::moving(Vec2::Y);
    for _ in 0..60 {
        sim.tick(DT, &forward, &mut scene);
    }
    assert_eq!(player_animation(&sim, &scene).weights.run, 1.0);

    sim.reset(&mut scene);
    let report = idle_tick(&mut sim, &mut scene);
    assert_eq!(report.locomotion, Some(LocomotionState::Idle));

    let weights = player_animation(&sim, &scene).weights;
    assert!(weights.run > 0.0 && weights.idle > 0.0);
    assert_relative_eq!(weights.sum(), 1.0, epsilon = 1e-4);
}

#[test]
fn test_scene_receives_character_clips() {
    let (mut sim, mut scene) = start(test_config());
    let character = LoadedCharacter::with_model(1);
    assert_eq!(player_animation(&sim, &scene).clips, character.clips);

    idle_tick(&mut sim, &mut scene);
    let layers = player_animation(&sim, &scene).layers();
    assert_eq!(layers[0], (character.clips.idle, 1.0));
    assert_eq!(layers[2].0, character.clips.run);
}

#[test]
fn test_forward_follows_camera_yaw() {
    let (mut sim, mut scene) = start(test_config());

    // Swing the camera a quarter turn and let it settle
    sim.tick(DT, &InputSnapshot::idle().with_orbit(std::f32::consts::FRAC_PI_2, 0.0), &mut scene);
    for _ in 0..120 {
        idle_tick(&mut sim, &mut scene);
    }
    assert_relative_eq!(sim.camera().yaw(), std::f32::consts::FRAC_PI_2, epsilon = 1e-3);

    for _ in 0..10 {
        sim.tick(DT, &InputSnapshot::moving(Vec2::Y), &mut scene);
    }
    let position = sim.player().map(|p| p.motion.position).unwrap_or_default();
    assert!(position.x > 0.0);
    assert!(position.z.abs() < position.x * 1e-2);
}

#[test]
fn test_camera_trails_player() {
    let (mut sim, mut scene) = start(test_config());
    teleport(&mut sim, Vec3::new(30.0, 0.0, 30.0));

    let before = scene.camera().expect("camera placed on load");
    let report = idle_tick(&mut sim, &mut scene);
    let after = scene.camera().expect("camera placed on tick");

    assert!(report.advanced);
    assert_eq!(after.look_at, Vec3::new(30.0, 3.0, 30.0));
    assert!(after.position.distance(Vec3::new(30.0, 0.0, 30.0)) < before.position.distance(Vec3::new(30.0, 0.0, 30.0)));
}

#[test]
fn test_deferred_reset_from_another_thread() {
    let (mut sim, mut scene) = start(test_config());
    for _ in 0..2 {
        collect_one(&mut sim, &mut scene);
    }

    let control = sim.control();
    std::thread::spawn(move || control.request_reset())
        .join()
        .expect("control thread");

    // Nothing changes until the next tick
    assert_eq!(sim.state().collected(), 2);
    assert_eq!(sim.world().hostile_count(), 2);

    let report = idle_tick(&mut sim, &mut scene);
    assert!(report.reset);
    assert_eq!(report.events, vec![GameEvent::PickupCountChanged(0)]);
    assert_eq!(sim.state().collected(), 0);
    assert_eq!(sim.world().hostile_count(), 0);
}

#[test]
fn test_same_seed_same_session() {
    let run = || {
        let (mut sim, mut scene) = start(test_config().with_tree_count(30));
        for _ in 0..3 {
            collect_one(&mut sim, &mut scene);
        }
        let mut positions: Vec<Vec3> = sim.world().pickups().iter().map(|(_, p)| p.position).collect();
        positions.extend(sim.world().hostiles().iter().map(|(_, h)| h.position));
        (positions, scene.trees())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_giant_scale_eases_in() {
    let (mut sim, mut scene) = start(test_config());
    for _ in 0..5 {
        collect_one(&mut sim, &mut scene);
    }
    collect_rare(&mut sim, &mut scene);

    let mut last = sim.player().map(|p| p.motion.model_scale).unwrap_or_default();
    for _ in 0..30 {
        idle_tick(&mut sim, &mut scene);
        let scale = sim.player().map(|p| p.motion.model_scale).unwrap_or_default();
        assert!(scale > last);
        assert!(scale < 0.6);
        last = scale;
    }
}
