//! # fox_event - Event System
//!
//! Typed, queued delivery of simulation notifications to host subscribers.
//! Events wait in the queue until the host calls [`EventBus::process`] once
//! per frame; higher priority events are dispatched first.
//!
//! Producers may publish through a shared reference, so an observer holding
//! the bus behind a mutex can forward notifications from the tick thread.

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::BTreeMap;

/// Event priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 0,
    #[default]
    Normal = 1,
    High = 2,
    Critical = 3,
}

/// Trait for events
pub trait Event: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Event for T {}

type Handler = Box<dyn Fn(&dyn Any) + Send + Sync>;

struct Queued {
    type_id: TypeId,
    payload: Box<dyn Any + Send + Sync>,
    priority: Priority,
}

/// Event bus for publishing and subscribing to events
pub struct EventBus {
    queue: Mutex<Vec<Queued>>,
    handlers: BTreeMap<TypeId, Vec<(Priority, Handler)>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            handlers: BTreeMap::new(),
        }
    }

    /// Queue an event at normal priority
    pub fn publish<E: Event>(&self, event: E) {
        self.publish_with_priority(event, Priority::Normal);
    }

    /// Queue an event
    pub fn publish_with_priority<E: Event>(&self, event: E, priority: Priority) {
        self.queue.lock().push(Queued {
            type_id: TypeId::of::<E>(),
            payload: Box::new(event),
            priority,
        });
    }

    /// Subscribe to an event type at normal priority
    pub fn subscribe<E: Event, F>(&mut self, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(handler, Priority::Normal);
    }

    /// Subscribe to an event type. Higher priority subscribers run first.
    pub fn subscribe_with_priority<E: Event, F>(&mut self, handler: F, priority: Priority)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        let handlers = self.handlers.entry(TypeId::of::<E>()).or_default();
        handlers.push((priority, handler));
        // Stable: subscription order survives within a priority band
        handlers.sort_by(|a, b| b.0.cmp(&a.0));
    }

    /// Dispatch everything queued so far, returning how many events ran
    pub fn process(&mut self) -> usize {
        let mut events = std::mem::take(&mut *self.queue.lock());
        events.sort_by(|a, b| b.priority.cmp(&a.priority));

        for event in &events {
            if let Some(handlers) = self.handlers.get(&event.type_id) {
                for (_, handler) in handlers {
                    handler(event.payload.as_ref());
                }
            }
        }
        events.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, Priority};
}
