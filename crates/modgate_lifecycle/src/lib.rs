//! Gated lifecycle controllers for modgate (Layer 2).
//!
//! A mod system is only allowed to run in some operating modes. This crate
//! turns the host's load signals into a single enabled/disabled decision and
//! hangs everything a system does off that decision:
//!
//! - [`gate`] - the enable/disable state machine
//! - [`hook`] - work that runs once per completed load
//! - [`dispatcher`] - per-frame work, skipped while disabled
//! - [`subscription`] - input callbacks attached to named host resources
//! - [`controller`] - the four above, bundled per system
//! - [`observers`] - lifecycle events for logs and observers
//! - [`plugin`] - wiring into a [`ModHost`](modgate_system::host::ModHost)
//!
//! # Example
//!
//! ```
//! use modgate_lifecycle::prelude::*;
//! use modgate_system::prelude::*;
//!
//! let mut host = ModHost::new();
//! host.add_plugins(LifecyclePlugin);
//! host.add_plugins(ControllerPlugin::new(
//!     Controller::builder("ExampleSystem")
//!         .allowed_modes(ModeSet::GAME)
//!         .on_load(|_host| tracing::info!("[ExampleSystem] applied once after load"))
//!         .build(),
//! ));
//! host.finish();
//!
//! let game = PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME);
//! host.preload(&game);
//! host.load_complete(&game);
//! host.tick::<MainLoop>();
//! host.dispose();
//! ```

pub mod controller;
pub mod dispatcher;
pub mod gate;
pub mod hook;
pub mod observers;
pub mod plugin;
pub mod subscription;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::controller::{Controller, ControllerBuilder, ControllerConfig};
    pub use crate::dispatcher::TickDispatcher;
    pub use crate::gate::{GateState, LifecycleGate};
    pub use crate::hook::{HostAction, OneShotHook};
    pub use crate::observers::{
        HookRegistrationError, LifecycleEvent, LifecycleHooks, OnDispose, OnGateChange,
        OnOneShot, OnSubscription, OnWarning, WarningKind,
    };
    pub use crate::plugin::{ControllerPlugin, LifecyclePlugin};
    pub use crate::subscription::{
        HandleError, InputPhase, InputValue, InteractionCallback, RegistryAPI, ResourceHandle,
        ResourceRegistry, Subscription, SubscriptionManager, interaction,
    };
}
