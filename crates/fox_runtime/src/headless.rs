//! Headless host
//!
//! A scene that keeps visuals in memory and traces what it is told, plus an
//! autopilot that plays the game by emitting the same key and drag events a
//! player would.

use fox_core::math::rotate_y;
use fox_input::prelude::{InputEvent, InputSender, MoveKey};
use fox_sim::prelude::*;
use fox_sim::scene::SceneNode;
use glam::Vec3;
use std::collections::HashSet;

/// Component above which the autopilot presses a key
const KEY_THRESHOLD: f32 = 0.38;

/// In-memory scene with trace logging
#[derive(Debug, Default)]
pub struct LoggingScene {
    inner: RecordingScene,
    updates: u64,
}

impl LoggingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording(&self) -> &RecordingScene {
        &self.inner
    }

    pub fn node(&self, handle: RenderHandle) -> Option<&SceneNode> {
        self.inner.node(handle)
    }

    /// Transform updates received so far
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl RenderScene for LoggingScene {
    fn add_entity(&mut self, visual: Visual) -> RenderHandle {
        let handle = self.inner.add_entity(visual);
        log::trace!("scene: add {:?} as {:?}", visual, handle);
        handle
    }

    fn remove_entity(&mut self, handle: RenderHandle) {
        log::trace!("scene: remove {:?}", handle);
        self.inner.remove_entity(handle);
    }

    fn set_position(&mut self, handle: RenderHandle, position: Vec3) {
        self.updates += 1;
        self.inner.set_position(handle, position);
    }

    fn set_rotation(&mut self, handle: RenderHandle, yaw: f32) {
        self.updates += 1;
        self.inner.set_rotation(handle, yaw);
    }

    fn set_scale(&mut self, handle: RenderHandle, scale: f32) {
        self.updates += 1;
        self.inner.set_scale(handle, scale);
    }

    fn set_animation(&mut self, handle: RenderHandle, blend: AnimationBlend) {
        log::trace!("scene: animate {:?} with {:?}", handle, blend.layers());
        self.inner.set_animation(handle, blend);
    }

    fn set_camera(&mut self, pose: CameraPose) {
        self.inner.set_camera(pose);
    }
}

/// Drives the player toward the nearest reachable pickup
pub struct Autopilot {
    sender: InputSender,
    held: HashSet<MoveKey>,
    /// Ticks between camera sweeps
    sweep_every: u64,
    drag_x: f32,
}

impl Autopilot {
    pub fn new(sender: InputSender) -> Self {
        Self {
            sender,
            held: HashSet::new(),
            sweep_every: 600,
            drag_x: 0.0,
        }
    }

    /// Set how often the camera is swept with a drag
    pub fn with_sweep_every(mut self, ticks: u64) -> Self {
        self.sweep_every = ticks.max(1);
        self
    }

    /// Keys currently held
    pub fn held(&self) -> &HashSet<MoveKey> {
        &self.held
    }

    /// Where the autopilot wants to go
    pub fn target(sim: &Simulation) -> Option<Vec3> {
        let player = sim.world().player_position();
        let wanted = if sim.state().is_giant() {
            PickupKind::Trophy
        } else if sim.world().rare_pending() {
            PickupKind::Rare
        } else {
            PickupKind::Normal
        };
        sim.world()
            .pickups()
            .iter()
            .filter(|(_, p)| p.kind == wanted)
            .map(|(_, p)| p.position)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
    }

    /// Keys that move toward `target` for a camera at `camera_yaw`
    pub fn keys_toward(player: Vec3, target: Vec3, camera_yaw: f32) -> HashSet<MoveKey> {
        let mut keys = HashSet::new();
        let world = Vec3::new(target.x - player.x, 0.0, target.z - player.z).normalize_or_zero();
        let local = rotate_y(world, -camera_yaw);

        if local.z > KEY_THRESHOLD {
            keys.insert(MoveKey::Forward);
        } else if local.z < -KEY_THRESHOLD {
            keys.insert(MoveKey::Back);
        }
        // Strafe intent is positive to the left
        if local.x > KEY_THRESHOLD {
            keys.insert(MoveKey::Left);
        } else if local.x < -KEY_THRESHOLD {
            keys.insert(MoveKey::Right);
        }
        keys
    }

    /// Emit this tick's events. Returns how many were sent.
    pub fn drive(&mut self, sim: &Simulation, tick: u64) -> usize {
        let wanted = match (sim.player(), Self::target(sim)) {
            (Some(player), Some(target)) => {
                Self::keys_toward(player.motion.position, target, sim.camera().yaw())
            }
            _ => HashSet::new(),
        };

        let mut events: Vec<InputEvent> = Vec::new();
        events.extend(self.held.difference(&wanted).map(|k| InputEvent::KeyUp(*k)));
        events.extend(wanted.difference(&self.held).map(|k| InputEvent::KeyDown(*k)));
        self.held = wanted;

        // Short drag to swing the camera now and then
        match tick % self.sweep_every {
            0 => {
                self.drag_x = 400.0;
                events.push(InputEvent::DragStart { x: self.drag_x, y: 300.0 });
            }
            1..=10 => {
                self.drag_x += 6.0;
                events.push(InputEvent::DragMove { x: self.drag_x, y: 300.0 });
            }
            11 => events.push(InputEvent::DragEnd),
            _ => {}
        }

        let sent = events.len();
        for event in events {
            if !self.sender.send(event) {
                log::warn!("Input mailbox closed");
                return 0;
            }
        }
        sent
    }
}
