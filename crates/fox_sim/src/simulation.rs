//! Per-frame simulation
//!
//! [`Simulation::tick`] runs one frame in a fixed order:
//!
//! 1. apply a reset requested through the [`ControlSurface`]
//! 2. camera orbit damping, then player locomotion relative to the camera
//! 3. hostile pursuit
//! 4. collisions: normal pickups, hostiles, the rare pickup
//! 5. spawn replenishment
//! 6. camera follow
//!
//! Until the character has loaded the tick leaves the world untouched.

use crate::assets::{LoadedCharacter, SessionStatus};
use crate::config::GameConfig;
use crate::control::ControlSurface;
use crate::entity::{HostileId, PickupKind, PlayerEntity, World};
use crate::error::{Result, SimError};
use crate::forest;
use crate::scene::{AnimationBlend, RenderScene, Visual};
use crate::spawn::SpawnDirector;
use fox_ai::pursuit::{in_contact, step_pursuer, PursuitMode};
use fox_camera::rig::CameraRig;
use fox_core::math::{planar_distance, wrap_angle};
use fox_gamestate::state::{ContactOutcome, GameEvent, GameState};
use fox_input::state::InputSnapshot;
use fox_player::locomotion::{LocomotionController, LocomotionState, PlayerMotion};
use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Forest layout uses its own stream so spawn draws do not shift it
const FOREST_SEED_SALT: u64 = 0x0f0e_5717;

/// UI callbacks
pub trait GameObserver: Send {
    fn on_pickup_count_changed(&mut self, _count: u32) {}
    fn on_immunity_acquired(&mut self) {}
}

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Whether the world was stepped
    pub advanced: bool,
    /// Whether a reset ran during this tick
    pub reset: bool,
    /// Notifications raised during this tick, in order
    pub events: Vec<GameEvent>,
    /// Gait after the tick
    pub locomotion: Option<LocomotionState>,
}

/// Game simulation core
pub struct Simulation {
    config: GameConfig,
    status: SessionStatus,
    failure: Option<SimError>,
    character: Option<LoadedCharacter>,
    state: GameState,
    world: World,
    director: SpawnDirector,
    locomotion: LocomotionController,
    camera: CameraRig,
    control: ControlSurface,
    observers: Vec<Box<dyn GameObserver>>,
    elapsed: f32,
    ticks: u64,
}

impl Simulation {
    /// Create a session waiting for its character
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Simulation created (seed {:#x}, {} pickups, {:?} when caught empty-handed)",
            config.seed,
            config.max_pickups,
            config.zero_count_policy
        );

        Ok(Self {
            status: SessionStatus::Loading,
            failure: None,
            character: None,
            state: GameState::new(config.max_pickups, config.zero_count_policy),
            world: World::new(),
            director: SpawnDirector::new(config.spawn.clone(), config.seed),
            locomotion: LocomotionController::new(config.locomotion.clone()),
            camera: CameraRig::new(config.camera.clone()),
            control: ControlSurface::new(),
            observers: Vec::new(),
            elapsed: 0.0,
            ticks: 0,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Why the session failed, if it did
    pub fn failure(&self) -> Option<&SimError> {
        self.failure.as_ref()
    }

    pub fn character(&self) -> Option<&LoadedCharacter> {
        self.character.as_ref()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for hosts and tools that place entities
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> Option<&PlayerEntity> {
        self.world.player.as_ref()
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Seconds simulated since creation
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks that advanced the world
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Handle for deferred host requests
    pub fn control(&self) -> ControlSurface {
        self.control.clone()
    }

    /// Register a UI observer
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Character is ready: create the player, plant the forest, spawn pickups
    pub fn on_assets_loaded(
        &mut self,
        character: LoadedCharacter,
        scene: &mut dyn RenderScene,
    ) -> Result<()> {
        if self.status != SessionStatus::Loading {
            log::warn!("Ignoring character load while {:?}", self.status);
            return Err(SimError::InvalidStatus {
                expected: SessionStatus::Loading,
                actual: self.status,
            });
        }

        let motion = PlayerMotion::at(Vec3::ZERO, self.config.locomotion.normal_scale);
        let render = scene.add_entity(Visual::Player {
            model: character.model,
        });
        scene.set_position(render, motion.position);
        scene.set_rotation(render, motion.facing_yaw);
        scene.set_scale(render, motion.model_scale);
        let player = PlayerEntity {
            motion,
            render,
            clips: character.clips,
        };
        self.world.player = Some(player);
        self.push_animation(scene, &player);
        self.character = Some(character);

        let mut rng = Pcg64Mcg::seed_from_u64(self.config.seed ^ FOREST_SEED_SALT);
        for tree in forest::scatter(&self.config.forest, &mut rng) {
            self.world.plant_tree(scene, tree.position, tree.trunk_height);
        }

        self.status = SessionStatus::Running;
        self.maintain_population(scene);
        self.camera.snap_to(motion.position, false);
        scene.set_camera(self.camera.pose());

        log::info!(
            "Character loaded: {} trees, {} pickups",
            self.world.tree_count(),
            self.world.count(PickupKind::Normal)
        );
        Ok(())
    }

    /// Character could not be loaded; the session stays inert
    pub fn on_assets_failed(&mut self, reason: impl Into<String>) {
        let error = SimError::AssetLoad(reason.into());
        if self.status != SessionStatus::Loading {
            log::warn!("Ignoring late asset failure while {:?}: {}", self.status, error);
            return;
        }
        log::warn!("{}", error);
        self.status = SessionStatus::Failed;
        self.failure = Some(error);
    }

    /// Reset immediately and deliver the resulting notifications
    pub fn reset(&mut self, scene: &mut dyn RenderScene) -> Vec<GameEvent> {
        self.reset_world(scene);
        self.flush_events()
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot, scene: &mut dyn RenderScene) -> TickReport {
        let mut report = TickReport::default();

        if self.control.take_reset() {
            self.reset_world(scene);
            report.reset = true;
        }

        let Some(mut player) = self.world.player.filter(|_| self.status.is_running()) else {
            report.events = self.flush_events();
            return report;
        };

        let dt = self.clamp_delta(dt);
        self.elapsed += dt;
        self.ticks += 1;
        let giant = self.state.is_giant();

        self.camera.orbit(input.orbit_delta.yaw, input.orbit_delta.pitch);
        self.camera.steer(input.steer, dt);
        self.camera.update_orbit();

        let step = self.locomotion.step(
            &mut player.motion,
            input.move_intent,
            self.camera.yaw(),
            giant,
            dt,
        );
        self.world.player = Some(player);
        scene.set_position(player.render, player.motion.position);
        scene.set_rotation(player.render, player.motion.facing_yaw);
        scene.set_scale(player.render, player.motion.model_scale);
        self.push_animation(scene, &player);
        report.locomotion = Some(step.state);

        let position = player.motion.position;
        let contacts = self.pursue(scene, position, dt);
        self.collect_pickups(scene, position);
        if self.resolve_contacts(scene, contacts) {
            self.reset_world(scene);
            report.reset = true;
        } else {
            self.collect_rare(scene, position, dt);
        }
        self.maintain_population(scene);

        let pose = self
            .camera
            .follow(self.world.player_position(), self.state.is_giant());
        scene.set_camera(pose);

        report.advanced = true;
        report.events = self.flush_events();
        log::trace!(
            "tick {} dt {:.4}: {:?}, {} hostiles",
            self.ticks,
            dt,
            step.state,
            self.world.hostile_count()
        );
        report
    }

    fn clamp_delta(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.config.max_tick_delta)
        } else {
            0.0
        }
    }

    /// Move every hostile and return the ones touching the player
    fn pursue(
        &mut self,
        scene: &mut dyn RenderScene,
        player: Vec3,
        dt: f32,
    ) -> Vec<HostileId> {
        let giant = self.state.is_giant();
        let mode = PursuitMode::for_giant(giant);
        let speed = self.config.pursuit.speed(mode, self.state.collected());
        let radius = self.config.pursuit.contact_radius(giant);

        let mut contacts = Vec::new();
        for (id, hostile) in self.world.hostiles_mut() {
            hostile.position = step_pursuer(hostile.position, player, mode, speed, dt);
            scene.set_position(hostile.render, hostile.position);
            if in_contact(hostile.position, player, radius) {
                contacts.push(id);
            }
        }
        contacts
    }

    fn collect_pickups(&mut self, scene: &mut dyn RenderScene, player: Vec3) {
        if self.state.is_giant() {
            for id in self.world.pickups_of(PickupKind::Trophy) {
                let Some(trophy) = self.world.pickup_mut(id) else {
                    continue;
                };
                trophy.position.y = self.director.trophy_bob(trophy.ordinal, self.elapsed);
                scene.set_position(trophy.render, trophy.position);
            }
            return;
        }

        let radius = self.config.spawn.collect_radius(false);
        let reached: Vec<_> = self
            .world
            .pickups()
            .iter()
            .filter(|(_, p)| p.kind == PickupKind::Normal)
            .filter(|(_, p)| planar_distance(p.position, player) < radius)
            .map(|(id, _)| id)
            .collect();

        for id in reached {
            self.world.despawn_pickup(scene, id);
            if self.state.collect() {
                self.director.spawn_hostile(&mut self.world, scene);
            }
            log::debug!("Pickup collected ({}/{})", self.state.collected(), self.state.max());
        }
    }

    /// Apply hostile contacts. Returns true when the session must reset.
    fn resolve_contacts(
        &mut self,
        scene: &mut dyn RenderScene,
        contacts: Vec<HostileId>,
    ) -> bool {
        for id in contacts {
            self.world.despawn_hostile(scene, id);
            match self.state.hostile_contact() {
                ContactOutcome::Caught => {
                    log::info!("Caught with an empty pouch, resetting");
                    return true;
                }
                ContactOutcome::Stolen(left) => log::debug!("Pickup stolen, {} left", left),
                ContactOutcome::Forgiven => log::debug!("Caught with an empty pouch, forgiven"),
                ContactOutcome::Repelled => log::trace!("Hostile repelled"),
            }
        }
        false
    }

    fn collect_rare(&mut self, scene: &mut dyn RenderScene, player: Vec3, dt: f32) {
        let Some(id) = self.world.rare() else {
            return;
        };
        let radius = self.config.spawn.collect_radius(self.state.is_giant());
        let spin = self.config.spawn.rare_spin_rate * dt;
        let Some(rare) = self.world.pickup_mut(id) else {
            return;
        };
        rare.yaw = wrap_angle(rare.yaw + spin);
        scene.set_rotation(rare.render, rare.yaw);

        let reached = planar_distance(rare.position, player) < radius;
        if reached && self.state.collect_rare() {
            self.world.despawn_pickup(scene, id);
            let cleared = self.director.clear_normal(&mut self.world, scene);
            log::info!("Giant mode unlocked, {} pickups cleared", cleared);
        }
    }

    fn maintain_population(&mut self, scene: &mut dyn RenderScene) {
        let collected = self.state.collected();
        let max = self.state.max();
        let latched = self.state.is_giant();

        self.director
            .despawn_rare_on_loss(&mut self.world, scene, collected, max);
        self.director
            .replenish_normal(&mut self.world, scene, collected, max, latched);
        self.director
            .maybe_spawn_rare(&mut self.world, scene, collected, max, latched);
    }

    fn push_animation(&self, scene: &mut dyn RenderScene, player: &PlayerEntity) {
        let blend = AnimationBlend {
            clips: player.clips,
            weights: self.locomotion.weights(),
        };
        scene.set_animation(player.render, blend);
    }

    fn reset_world(&mut self, scene: &mut dyn RenderScene) {
        self.state.reset();
        self.world.clear(scene);
        if let Some(player) = self.world.player.as_mut() {
            player.motion.position = Vec3::ZERO;
            player.motion.velocity = Vec3::ZERO;
            scene.set_position(player.render, Vec3::ZERO);
        }
        self.locomotion.reset();
        if self.status.is_running() {
            self.maintain_population(scene);
        }
        log::info!("Session reset");
    }

    fn flush_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            for observer in &mut self.observers {
                match *event {
                    GameEvent::PickupCountChanged(count) => observer.on_pickup_count_changed(count),
                    GameEvent::ImmunityAcquired => observer.on_immunity_acquired(),
                }
            }
        }
        events
    }
}
