//! Game state machine

use serde::{Deserialize, Serialize};

/// Progress phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Collecting, below the threshold
    Normal,
    /// Pouch full, rare pickup is reachable
    Threshold,
    /// Latched immunity, terminal until reset
    Giant,
}

impl GamePhase {
    /// Whether hostiles can steal and normal pickups can be collected
    pub fn is_vulnerable(&self) -> bool {
        !matches!(self, Self::Giant)
    }
}

/// What happens when a hostile reaches a player carrying nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaughtEmptyHanded {
    /// Full session reset
    #[default]
    Reset,
    /// Hostile is destroyed, nothing else changes
    Forgive,
}

/// Notification for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCountChanged(u32),
    ImmunityAcquired,
}

/// Result of a hostile reaching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Player is giant; hostile is destroyed harmlessly
    Repelled,
    /// One pickup stolen; remaining count
    Stolen(u32),
    /// Empty pouch, forgiven
    Forgiven,
    /// Empty pouch, caller must reset the session
    Caught,
}

/// Count and latch of one session
#[derive(Debug)]
pub struct GameState {
    max: u32,
    collected: u32,
    giant_latched: bool,
    policy: CaughtEmptyHanded,
    /// Notifications not yet delivered
    pending: Vec<GameEvent>,
}

impl GameState {
    /// Create an empty state
    pub fn new(max: u32, policy: CaughtEmptyHanded) -> Self {
        Self {
            max,
            collected: 0,
            giant_latched: false,
            policy,
            pending: Vec::new(),
        }
    }

    /// Pickups needed to reach the threshold
    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn is_giant(&self) -> bool {
        self.giant_latched
    }

    pub fn policy(&self) -> CaughtEmptyHanded {
        self.policy
    }

    /// Current phase
    pub fn phase(&self) -> GamePhase {
        if self.giant_latched {
            GamePhase::Giant
        } else if self.collected >= self.max {
            GamePhase::Threshold
        } else {
            GamePhase::Normal
        }
    }

    /// Normal pickup collected. Returns true when a hostile should spawn.
    pub fn collect(&mut self) -> bool {
        if !self.phase().is_vulnerable() {
            return false;
        }
        self.mutate(|s| s.collected = (s.collected + 1).min(s.max));
        true
    }

    /// Hostile reached the player
    pub fn hostile_contact(&mut self) -> ContactOutcome {
        if self.giant_latched {
            return ContactOutcome::Repelled;
        }
        if self.collected == 0 {
            return match self.policy {
                CaughtEmptyHanded::Reset => ContactOutcome::Caught,
                CaughtEmptyHanded::Forgive => ContactOutcome::Forgiven,
            };
        }
        self.mutate(|s| s.collected -= 1);
        ContactOutcome::Stolen(self.collected)
    }

    /// Rare pickup collected. Returns true only on the latching call.
    pub fn collect_rare(&mut self) -> bool {
        if self.phase() != GamePhase::Threshold {
            return false;
        }
        self.giant_latched = true;
        self.record(GamePhase::Threshold);
        self.pending.push(GameEvent::ImmunityAcquired);
        log::info!("Immunity acquired with {} pickups", self.collected);
        true
    }

    /// Back to an empty pouch, not latched
    pub fn reset(&mut self) {
        let from = self.phase();
        self.collected = 0;
        self.giant_latched = false;
        self.record(from);
        self.pending.push(GameEvent::PickupCountChanged(0));
    }

    /// Take notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Self)) {
        let from = self.phase();
        let before = self.collected;
        f(self);
        if self.collected != before {
            self.pending.push(GameEvent::PickupCountChanged(self.collected));
        }
        self.record(from);
    }

    fn record(&mut self, from: GamePhase) {
        let to = self.phase();
        if from != to {
            log::debug!("Phase {:?} -> {:?}", from, to);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(5, CaughtEmptyHanded::default())
    }
}
