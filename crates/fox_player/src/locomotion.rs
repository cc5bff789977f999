//! Player locomotion
//!
//! Intent is a 2D vector: `x` strafes (positive = left), `y` moves forward.
//! It is rotated by the camera yaw into world space and integrated with
//! per-tick damping, which gives the character a little inertia.

use crate::animation::{ClipWeights, CrossFadeMixer};
use fox_ai::state_machine::{StateMachine, TransitionRecord};
use fox_core::math::{damp, lerp_angle, rotate_y};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Gait of the player character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocomotionState {
    Idle,
    Walk,
    Run,
}

impl LocomotionState {
    pub const ALL: [LocomotionState; 3] = [Self::Idle, Self::Walk, Self::Run];
}

/// Locomotion tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Acceleration while walking (units per second squared)
    pub max_speed: f32,
    /// Acceleration while walking in giant mode
    pub giant_max_speed: f32,
    /// Acceleration multiplier while running
    pub run_multiplier: f32,
    /// Seconds of held movement before walking becomes running
    pub run_threshold: f32,
    /// Velocity multiplier applied every tick
    pub damping: f32,
    /// Fraction of the remaining turn applied every tick
    pub turn_rate: f32,
    /// Animation cross-fade duration in seconds
    pub crossfade: f32,
    /// Model scale in normal mode
    pub normal_scale: f32,
    /// Model scale in giant mode
    pub giant_scale: f32,
    /// Fraction of the remaining scale change applied every tick
    pub scale_rate: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_speed: 180.0,
            giant_max_speed: 600.0,
            run_multiplier: 1.8,
            run_threshold: 0.4,
            damping: 0.9,
            turn_rate: 0.15,
            crossfade: 0.4,
            normal_scale: 0.03,
            giant_scale: 0.6,
            scale_rate: 0.05,
        }
    }
}

impl LocomotionConfig {
    /// Set damping
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set run threshold
    pub fn with_run_threshold(mut self, seconds: f32) -> Self {
        self.run_threshold = seconds;
        self
    }

    /// Check ranges
    pub fn validate(&self) -> Result<(), String> {
        if !(0.9..=0.92).contains(&self.damping) {
            return Err(format!("damping {} outside [0.9, 0.92]", self.damping));
        }
        if self.run_threshold < 0.0 || self.crossfade < 0.0 {
            return Err("run_threshold and crossfade must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.turn_rate) || !(0.0..=1.0).contains(&self.scale_rate) {
            return Err("turn_rate and scale_rate must be within [0, 1]".to_string());
        }
        Ok(())
    }

    /// Acceleration for the current gait and immunity state
    pub fn acceleration(&self, state: LocomotionState, giant: bool) -> f32 {
        let base = if giant { self.giant_max_speed } else { self.max_speed };
        match state {
            LocomotionState::Run => base * self.run_multiplier,
            _ => base,
        }
    }

    /// Target model scale
    pub fn target_scale(&self, giant: bool) -> f32 {
        if giant {
            self.giant_scale
        } else {
            self.normal_scale
        }
    }
}

/// Physical state of the player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerMotion {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing_yaw: f32,
    pub model_scale: f32,
}

impl PlayerMotion {
    /// At rest at `position` with the given model scale
    pub fn at(position: Vec3, model_scale: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            facing_yaw: 0.0,
            model_scale,
        }
    }
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self::at(Vec3::ZERO, LocomotionConfig::default().normal_scale)
    }
}

/// Inputs the gait table reads
pub struct LocomotionContext {
    pub moving: bool,
    pub held: f32,
    pub run_threshold: f32,
}

/// Result of one locomotion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    pub state: LocomotionState,
    pub transition: Option<TransitionRecord<LocomotionState>>,
}

/// Drives [`PlayerMotion`] from intent
pub struct LocomotionController {
    config: LocomotionConfig,
    gait: StateMachine<LocomotionState, LocomotionContext>,
    hold_time: f32,
    mixer: CrossFadeMixer,
}

impl LocomotionController {
    /// Create a controller at rest
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            gait: gait_table(),
            hold_time: 0.0,
            mixer: CrossFadeMixer::new(LocomotionState::Idle),
        }
    }

    /// Config in use
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Current gait
    pub fn state(&self) -> LocomotionState {
        self.gait.current()
    }

    /// Seconds movement has been held
    pub fn hold_time(&self) -> f32 {
        self.hold_time
    }

    /// Current animation weights
    pub fn weights(&self) -> ClipWeights {
        self.mixer.weights()
    }

    /// Whether an animation cross-fade is running
    pub fn is_fading(&self) -> bool {
        self.mixer.is_fading()
    }

    /// Back to idle, e.g. on game reset. The clips still cross-fade.
    pub fn reset(&mut self) {
        self.hold_time = 0.0;
        self.gait.force_transition(LocomotionState::Idle);
        self.mixer.fade_to(LocomotionState::Idle, self.config.crossfade);
    }

    /// Advance one tick
    pub fn step(
        &mut self,
        motion: &mut PlayerMotion,
        intent: Vec2,
        camera_yaw: f32,
        giant: bool,
        delta_time: f32,
    ) -> LocomotionStep {
        let moving = intent.length_squared() > 1e-6;
        if moving {
            self.hold_time += delta_time;
        } else {
            self.hold_time = 0.0;
        }

        let context = LocomotionContext {
            moving,
            held: self.hold_time,
            run_threshold: self.config.run_threshold,
        };
        let transition = self.gait.update(&context);
        if let Some(record) = transition {
            log::trace!("gait {:?} -> {:?}", record.from, record.to);
            self.mixer.fade_to(record.to, self.config.crossfade);
        }
        self.mixer.update(delta_time);

        let state = self.gait.current();
        if moving {
            let local = Vec3::new(intent.x, 0.0, intent.y).normalize_or_zero();
            let direction = rotate_y(local, camera_yaw);
            motion.velocity += direction * self.config.acceleration(state, giant) * delta_time;

            let heading = intent.x.atan2(intent.y) + camera_yaw;
            motion.facing_yaw = lerp_angle(motion.facing_yaw, heading, self.config.turn_rate);
        }

        motion.velocity *= self.config.damping;
        motion.position += motion.velocity * delta_time;
        motion.model_scale = damp(
            motion.model_scale,
            self.config.target_scale(giant),
            self.config.scale_rate,
        );

        LocomotionStep { state, transition }
    }
}

fn gait_table() -> StateMachine<LocomotionState, LocomotionContext> {
    use LocomotionState::*;

    let mut fsm = StateMachine::new(Idle);
    fsm.add_transition_priority(
        Idle,
        Run,
        |c: &LocomotionContext| c.moving && c.held >= c.run_threshold,
        1,
    );
    fsm.add_transition(Idle, Walk, |c: &LocomotionContext| c.moving);
    fsm.add_transition(Walk, Run, |c: &LocomotionContext| {
        c.moving && c.held >= c.run_threshold
    });
    fsm.add_global_transition(Idle, |c: &LocomotionContext| !c.moving);
    fsm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn run_ticks(
        controller: &mut LocomotionController,
        motion: &mut PlayerMotion,
        intent: Vec2,
        ticks: usize,
    ) {
        for _ in 0..ticks {
            controller.step(motion, intent, 0.0, false, DT);
        }
    }

    #[test]
    fn test_short_hold_walks() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        run_ticks(&mut controller, &mut motion, Vec2::Y, 12); // 0.2s
        assert_eq!(controller.state(), LocomotionState::Walk);
    }

    #[test]
    fn test_long_hold_runs() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        run_ticks(&mut controller, &mut motion, Vec2::Y, 36); // 0.6s
        assert_eq!(controller.state(), LocomotionState::Run);
    }

    #[test]
    fn test_release_idles_and_resets_timer() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        run_ticks(&mut controller, &mut motion, Vec2::Y, 36);
        run_ticks(&mut controller, &mut motion, Vec2::ZERO, 1);
        assert_eq!(controller.state(), LocomotionState::Idle);
        assert_eq!(controller.hold_time(), 0.0);

        run_ticks(&mut controller, &mut motion, Vec2::Y, 6);
        assert_eq!(controller.state(), LocomotionState::Walk);
    }

    #[test]
    fn test_gait_change_cross_fades() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        let step = controller.step(&mut motion, Vec2::Y, 0.0, false, DT);
        assert_eq!(
            step.transition,
            Some(TransitionRecord { from: LocomotionState::Idle, to: LocomotionState::Walk })
        );

        run_ticks(&mut controller, &mut motion, Vec2::Y, 5);
        let w = controller.weights();
        assert!(controller.is_fading());
        assert!(w.idle > 0.0 && w.walk > 0.0);
    }

    #[test]
    fn test_forward_intent_moves_along_camera_yaw() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        controller.step(&mut motion, Vec2::Y, core::f32::consts::FRAC_PI_2, false, DT);
        assert!(motion.position.x > 0.0);
        assert_relative_eq!(motion.position.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_damping_brings_player_to_rest() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        run_ticks(&mut controller, &mut motion, Vec2::Y, 30);
        let moving_speed = motion.velocity.length();
        run_ticks(&mut controller, &mut motion, Vec2::ZERO, 120);
        assert!(moving_speed > 1.0);
        assert!(motion.velocity.length() < 1e-3);
    }

    #[test]
    fn test_giant_accelerates_harder() {
        let config = LocomotionConfig::default();
        let mut normal = LocomotionController::new(config.clone());
        let mut giant = LocomotionController::new(config);
        let mut a = PlayerMotion::default();
        let mut b = PlayerMotion::default();

        normal.step(&mut a, Vec2::Y, 0.0, false, DT);
        giant.step(&mut b, Vec2::Y, 0.0, true, DT);
        assert!(b.velocity.length() > 3.0 * a.velocity.length());
    }

    #[test]
    fn test_facing_turns_smoothly() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        // Strafe left: heading is +90 degrees
        controller.step(&mut motion, Vec2::X, 0.0, false, DT);
        assert!(motion.facing_yaw > 0.0);
        assert!(motion.facing_yaw < core::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_giant_scale_never_snaps() {
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::new(config.clone());
        let mut motion = PlayerMotion::default();

        controller.step(&mut motion, Vec2::ZERO, 0.0, true, DT);
        assert!(motion.model_scale > config.normal_scale);
        assert!(motion.model_scale < config.giant_scale);

        run_ticks_giant(&mut controller, &mut motion, 400);
        assert_relative_eq!(motion.model_scale, config.giant_scale, epsilon = 1e-3);
    }

    fn run_ticks_giant(controller: &mut LocomotionController, motion: &mut PlayerMotion, ticks: usize) {
        for _ in 0..ticks {
            controller.step(motion, Vec2::ZERO, 0.0, true, DT);
        }
    }

    #[test]
    fn test_reset_fades_out_of_run() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        let mut motion = PlayerMotion::default();

        run_ticks(&mut controller, &mut motion, Vec2::Y, 60);
        assert_eq!(controller.weights(), ClipWeights::solo(LocomotionState::Run));

        controller.reset();
        assert_eq!(controller.state(), LocomotionState::Idle);
        assert_eq!(controller.hold_time(), 0.0);
        assert!(controller.is_fading());

        run_ticks(&mut controller, &mut motion, Vec2::ZERO, 1);
        let w = controller.weights();
        assert!(w.run > 0.0 && w.idle > 0.0);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-5);

        run_ticks(&mut controller, &mut motion, Vec2::ZERO, 30);
        assert_eq!(controller.weights(), ClipWeights::solo(LocomotionState::Idle));
    }

    #[test]
    fn test_validate_damping_range() {
        assert!(LocomotionConfig::default().validate().is_ok());
        assert!(LocomotionConfig::default().with_damping(0.92).validate().is_ok());
        assert!(LocomotionConfig::default().with_damping(0.5).validate().is_err());
    }
}
