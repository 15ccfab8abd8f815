//! Observer registration API for lifecycle events.
//!
//! # Multi-Schedule Registration
//!
//! ```ignore
//! hooks.register_observer::<(OnGateChange, OnDispose), _>("audit", |event| {
//!     audit_log.push(event.to_string());
//! })?;
//! ```

use std::sync::Arc;

use hashbrown::HashMap;
use modgate_system::api::API;
use modgate_system::plugin::{IntoScheduleIds, ScheduleId};
use parking_lot::RwLock;

use super::events::LifecycleEvent;

/// Type-erased observer shared across every schedule it was registered on.
pub type SharedObserver = Arc<dyn Fn(&LifecycleEvent) + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// HookRegistrationError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during observer registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookRegistrationError {
    /// An observer with this name already exists on the schedule.
    #[error("observer '{name}' already registered for schedule '{}'", .schedule.short_name())]
    DuplicateName {
        /// The schedule where the duplicate was found.
        schedule: ScheduleId,
        /// The duplicate observer name.
        name: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// LifecycleHooks
// ─────────────────────────────────────────────────────────────────────────────

struct ObserverEntry {
    name: String,
    observer: SharedObserver,
}

/// API for registering and invoking lifecycle observers.
///
/// Installed by [`LifecyclePlugin`](crate::plugin::LifecyclePlugin).
/// Observers run synchronously, in registration order, on the thread that
/// delivered the host callback.
#[derive(Default)]
pub struct LifecycleHooks {
    observers: RwLock<HashMap<ScheduleId, Vec<ObserverEntry>>>,
}

impl API for LifecycleHooks {}

impl LifecycleHooks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an observer for one or more schedules.
    ///
    /// When `S` is a tuple, the observer is stored once per schedule under
    /// the name `"{name}@{Schedule}"`.
    ///
    /// # Errors
    ///
    /// Returns [`HookRegistrationError::DuplicateName`] if the name is taken
    /// on any of the schedules. Schedules earlier in the tuple stay
    /// registered.
    pub fn register_observer<S, F>(
        &self,
        name: impl Into<String>,
        observer: F,
    ) -> Result<&Self, HookRegistrationError>
    where
        S: IntoScheduleIds,
        F: Fn(&LifecycleEvent) + Send + Sync + 'static,
    {
        let schedules = S::schedule_ids();
        let name = name.into();
        let observer: SharedObserver = Arc::new(observer);

        for schedule in &schedules {
            let entry_name = if schedules.len() > 1 {
                format!("{}@{}", name, schedule.short_name())
            } else {
                name.clone()
            };
            self.register_shared(*schedule, entry_name, Arc::clone(&observer))?;
        }
        Ok(self)
    }

    /// Registers an already shared observer on a single schedule.
    ///
    /// # Errors
    ///
    /// Returns [`HookRegistrationError::DuplicateName`] if the name is taken.
    pub fn register_shared(
        &self,
        schedule: ScheduleId,
        name: impl Into<String>,
        observer: SharedObserver,
    ) -> Result<(), HookRegistrationError> {
        let name = name.into();
        let mut observers = self.observers.write();
        let entries = observers.entry(schedule).or_default();

        if entries.iter().any(|entry| entry.name == name) {
            return Err(HookRegistrationError::DuplicateName { schedule, name });
        }

        entries.push(ObserverEntry { name, observer });
        Ok(())
    }

    /// Invokes every observer registered for `schedule`.
    ///
    /// The lock is released before observers run, so an observer may
    /// register further observers.
    pub fn invoke(&self, schedule: ScheduleId, event: &LifecycleEvent) {
        let observers: Vec<SharedObserver> = {
            let guard = self.observers.read();
            match guard.get(&schedule) {
                Some(entries) => entries.iter().map(|e| Arc::clone(&e.observer)).collect(),
                None => return,
            }
        };
        for observer in observers {
            observer(event);
        }
    }

    /// Invokes the observers of the event's own schedule.
    pub fn dispatch(&self, event: &LifecycleEvent) {
        self.invoke(event.schedule(), event);
    }

    /// Returns the number of observers registered for `schedule`.
    #[must_use]
    pub fn hook_count(&self, schedule: ScheduleId) -> usize {
        self.observers.read().get(&schedule).map_or(0, Vec::len)
    }

    /// Returns true if an observer named `name` exists on `schedule`.
    #[must_use]
    pub fn contains_hook(&self, schedule: ScheduleId, name: &str) -> bool {
        self.observers
            .read()
            .get(&schedule)
            .is_some_and(|entries| entries.iter().any(|entry| entry.name == name))
    }
}
