//! HUD bridge
//!
//! Forwards simulation notifications onto an [`EventBus`] so any number of
//! subscribers can react once per frame.

use fox_event::{EventBus, Priority};
use fox_sim::prelude::{GameEvent, GameObserver};
use parking_lot::Mutex;
use std::sync::Arc;

/// What the HUD currently shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    pub count: u32,
    pub immune: bool,
    /// Highest count reached this run
    pub best: u32,
    pub resets: u32,
}

/// Observer that publishes every notification on the bus
pub struct HudObserver {
    bus: Arc<Mutex<EventBus>>,
}

impl HudObserver {
    pub fn new(bus: Arc<Mutex<EventBus>>) -> Self {
        Self { bus }
    }
}

impl GameObserver for HudObserver {
    fn on_pickup_count_changed(&mut self, count: u32) {
        self.bus.lock().publish(GameEvent::PickupCountChanged(count));
    }

    fn on_immunity_acquired(&mut self) {
        self.bus
            .lock()
            .publish_with_priority(GameEvent::ImmunityAcquired, Priority::High);
    }
}

/// Subscribe the HUD state and the log line to `bus`
pub fn install(bus: &mut EventBus) -> Arc<Mutex<HudState>> {
    let state = Arc::new(Mutex::new(HudState::default()));

    // Runs before the log line
    let hud = state.clone();
    let track = move |event: &GameEvent| {
        let mut hud = hud.lock();
        match *event {
            GameEvent::PickupCountChanged(count) => {
                if count == 0 && hud.count > 0 {
                    hud.resets += 1;
                }
                if count == 0 {
                    hud.immune = false;
                }
                hud.count = count;
                hud.best = hud.best.max(count);
            }
            GameEvent::ImmunityAcquired => hud.immune = true,
        }
    };
    bus.subscribe_with_priority::<GameEvent, _>(track, Priority::High);

    bus.subscribe::<GameEvent, _>(|event| match event {
        GameEvent::PickupCountChanged(count) => log::info!("HUD: {} collected", count),
        GameEvent::ImmunityAcquired => log::info!("HUD: IMMORTAL"),
    });

    state
}
