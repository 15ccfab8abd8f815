//! Observability for gated controllers.
//!
//! Every state change a controller makes is reported as a
//! [`LifecycleEvent`]. Events are always written to `tracing`; if the host
//! has a [`LifecycleHooks`] API installed, registered observers receive
//! them too.
//!
//! # Architecture
//!
//! - **Schedule markers** ([`schedule`]): `OnGateChange`, `OnOneShot`,
//!   `OnSubscription`, `OnWarning`, `OnDispose`
//! - **Events** ([`events`]): the `LifecycleEvent` enum observers receive
//! - **API** ([`api`]): registration and invocation
//!
//! # Example
//!
//! ```ignore
//! let hooks = host.api::<LifecycleHooks>().expect("LifecyclePlugin added");
//! hooks.register_observer::<OnGateChange, _>("hud", |event| {
//!     if let LifecycleEvent::GateChanged { system, state, .. } = event {
//!         hud.set_indicator(system, state.is_enabled());
//!     }
//! })?;
//! ```

pub mod api;
pub mod events;
pub mod schedule;

pub use api::{HookRegistrationError, LifecycleHooks, SharedObserver};
pub use events::{LifecycleEvent, WarningKind};
pub use schedule::{OnDispose, OnGateChange, OnOneShot, OnSubscription, OnWarning};

use modgate_system::host::ModHost;

/// Writes `event` to `tracing` and hands it to any registered observers.
pub fn emit(host: &ModHost, event: &LifecycleEvent) {
    event.trace();
    if let Some(hooks) = host.api::<LifecycleHooks>() {
        hooks.dispatch(event);
    }
}

/// Emits a [`LifecycleEvent::Warning`].
pub(crate) fn warn(host: &ModHost, system: &str, kind: WarningKind, message: String) {
    emit(
        host,
        &LifecycleEvent::Warning {
            system: system.to_string(),
            kind,
            message,
        },
    );
}
