//! Finite State Machine (FSM) implementation
//!
//! Transitions are declared up front as a table of `(from, to, condition)`
//! rows. `update` fires at most one transition per call, so a machine never
//! skips through several states inside a single tick.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A state in the state machine
pub trait State: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> State for T {}

/// Transition condition
pub type TransitionCondition<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A state transition
pub struct Transition<S, C> {
    /// Target state
    pub to: S,
    /// Condition function
    pub condition: TransitionCondition<C>,
    /// Priority (higher = checked first)
    pub priority: i32,
}

impl<S, C> Transition<S, C> {
    /// Create a new transition
    pub fn new<F>(to: S, condition: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            to,
            condition: Box::new(condition),
            priority: 0,
        }
    }

    /// Set priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Check if transition should occur
    pub fn should_transition(&self, context: &C) -> bool {
        (self.condition)(context)
    }
}

/// A transition that actually fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord<S> {
    pub from: S,
    pub to: S,
}

/// Finite State Machine
pub struct StateMachine<S, C>
where
    S: State,
{
    current: S,
    /// Transitions from each state, kept sorted by priority
    transitions: HashMap<S, Vec<Transition<S, C>>>,
    /// Global transitions (checked from any state)
    global_transitions: Vec<Transition<S, C>>,
}

impl<S, C> StateMachine<S, C>
where
    S: State,
{
    /// Create a new state machine
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: HashMap::new(),
            global_transitions: Vec::new(),
        }
    }

    /// Add a transition
    pub fn add_transition<F>(&mut self, from: S, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.add_transition_priority(from, to, condition, 0);
    }

    /// Add a transition with priority
    pub fn add_transition_priority<F>(&mut self, from: S, to: S, condition: F, priority: i32)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        let rows = self.transitions.entry(from).or_default();
        rows.push(Transition::new(to, condition).with_priority(priority));
        rows.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a global transition (can occur from any state)
    pub fn add_global_transition<F>(&mut self, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.global_transitions.push(Transition::new(to, condition));
    }

    /// Get current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Force transition to a state
    pub fn force_transition(&mut self, to: S) -> TransitionRecord<S> {
        let from = self.current;
        self.current = to;
        TransitionRecord { from, to }
    }

    /// Evaluate the table once, returning the transition that fired
    pub fn update(&mut self, context: &C) -> Option<TransitionRecord<S>> {
        let global = self
            .global_transitions
            .iter()
            .find(|t| self.current != t.to && t.should_transition(context))
            .map(|t| t.to);
        if let Some(to) = global {
            return Some(self.force_transition(to));
        }

        let next = self
            .transitions
            .get(&self.current)?
            .iter()
            .find(|t| t.should_transition(context))
            .map(|t| t.to)?;
        Some(self.force_transition(next))
    }
}
