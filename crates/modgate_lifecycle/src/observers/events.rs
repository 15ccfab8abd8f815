//! Unified event enum for lifecycle observers.
//!
//! Every observer receives `&LifecycleEvent` and matches on the variants it
//! cares about.
//!
//! # Example
//!
//! ```ignore
//! fn handle(event: &LifecycleEvent) {
//!     match event {
//!         LifecycleEvent::GateChanged { system, state, mode, .. } => {
//!             println!("[{}] {} for mode={}", system, state, mode);
//!         }
//!         LifecycleEvent::Warning { message, .. } => eprintln!("{}", message),
//!         _ => {}
//!     }
//! }
//! ```

use core::fmt;

use modgate_system::mode::{ModeSet, Purpose};
use modgate_system::plugin::ScheduleId;

use super::schedule::{OnDispose, OnGateChange, OnOneShot, OnSubscription, OnWarning};
use crate::gate::GateState;

/// Category of a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A named resource was not found in the host registry.
    MissingResource,
    /// The host has no resource registry installed.
    MissingRegistry,
    /// Attaching a callback to a resource failed.
    AttachFailed,
    /// Detaching a callback from a resource failed.
    DetachFailed,
}

impl WarningKind {
    /// Returns a stable lowercase identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WarningKind::MissingResource => "missing_resource",
            WarningKind::MissingRegistry => "missing_registry",
            WarningKind::AttachFailed => "attach_failed",
            WarningKind::DetachFailed => "detach_failed",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events emitted by controllers and subscription managers.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// The gate of `system` changed state.
    GateChanged {
        /// The controller's name.
        system: String,
        /// The new state.
        state: GateState,
        /// The modes that triggered the change.
        mode: ModeSet,
        /// The load purpose, absent when the change came from dispose.
        purpose: Option<Purpose>,
    },

    /// The one-shot action of `system` ran for the current cycle.
    OneShotFired {
        /// The controller's name.
        system: String,
        /// The modes reported at load-complete.
        mode: ModeSet,
    },

    /// A callback was attached to `resource`.
    Subscribed {
        /// The owning controller's name.
        system: String,
        /// The resource name.
        resource: String,
    },

    /// The subscription to `resource` was released.
    Unsubscribed {
        /// The owning controller's name.
        system: String,
        /// The resource name.
        resource: String,
    },

    /// A recoverable failure was caught.
    Warning {
        /// The owning controller's name.
        system: String,
        /// What went wrong.
        kind: WarningKind,
        /// Human-readable detail.
        message: String,
    },

    /// `system` was disposed.
    Disposed {
        /// The controller's name.
        system: String,
        /// Number of subscriptions released.
        released: usize,
    },
}

impl LifecycleEvent {
    /// Returns the schedule observers of this event register against.
    #[must_use]
    pub fn schedule(&self) -> ScheduleId {
        match self {
            LifecycleEvent::GateChanged { .. } => ScheduleId::of::<OnGateChange>(),
            LifecycleEvent::OneShotFired { .. } => ScheduleId::of::<OnOneShot>(),
            LifecycleEvent::Subscribed { .. } | LifecycleEvent::Unsubscribed { .. } => {
                ScheduleId::of::<OnSubscription>()
            }
            LifecycleEvent::Warning { .. } => ScheduleId::of::<OnWarning>(),
            LifecycleEvent::Disposed { .. } => ScheduleId::of::<OnDispose>(),
        }
    }

    /// Returns the name of the system the event concerns.
    #[must_use]
    pub fn system(&self) -> &str {
        match self {
            LifecycleEvent::GateChanged { system, .. }
            | LifecycleEvent::OneShotFired { system, .. }
            | LifecycleEvent::Subscribed { system, .. }
            | LifecycleEvent::Unsubscribed { system, .. }
            | LifecycleEvent::Warning { system, .. }
            | LifecycleEvent::Disposed { system, .. } => system,
        }
    }

    /// Writes the event to `tracing`.
    ///
    /// Gate changes, one-shots and disposal log at `info`, subscriptions at
    /// `debug`, recoverable failures at `warn`.
    pub fn trace(&self) {
        match self {
            LifecycleEvent::GateChanged {
                system,
                state,
                mode,
                purpose,
            } => {
                tracing::info!(
                    system = %system,
                    mode = %mode,
                    purpose = ?purpose,
                    "[{}] {} for mode={}",
                    system,
                    state.label(),
                    mode
                );
            }
            LifecycleEvent::OneShotFired { system, mode } => {
                tracing::info!(system = %system, mode = %mode, "[{}] applied once after load", system);
            }
            LifecycleEvent::Subscribed { system, resource } => {
                tracing::debug!(system = %system, resource = %resource, "subscribed");
            }
            LifecycleEvent::Unsubscribed { system, resource } => {
                tracing::debug!(system = %system, resource = %resource, "unsubscribed");
            }
            LifecycleEvent::Warning {
                system,
                kind,
                message,
            } => {
                tracing::warn!(system = %system, kind = %kind, "[{}] {}", system, message);
            }
            LifecycleEvent::Disposed { system, released } => {
                tracing::info!(system = %system, released, "[{}] disposed", system);
            }
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::GateChanged {
                system,
                state,
                mode,
                ..
            } => write!(f, "[{}] {} for mode={}", system, state, mode),
            LifecycleEvent::OneShotFired { system, mode } => {
                write!(f, "[{}] OneShotFired(mode={})", system, mode)
            }
            LifecycleEvent::Subscribed { system, resource } => {
                write!(f, "[{}] Subscribed({})", system, resource)
            }
            LifecycleEvent::Unsubscribed { system, resource } => {
                write!(f, "[{}] Unsubscribed({})", system, resource)
            }
            LifecycleEvent::Warning {
                system,
                kind,
                message,
            } => write!(f, "[{}] Warning({}): {}", system, kind, message),
            LifecycleEvent::Disposed { system, released } => {
                write!(f, "[{}] Disposed(released={})", system, released)
            }
        }
    }
}
