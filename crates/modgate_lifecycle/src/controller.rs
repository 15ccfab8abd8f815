//! The gated lifecycle controller.
//!
//! A [`Controller`] is one unit of gated work: a [`LifecycleGate`], a
//! [`OneShotHook`], a [`TickDispatcher`] and a [`SubscriptionManager`]
//! driven by the same enable/disable signal. Systems differ only in their
//! configuration and two closures, never by subclassing.
//!
//! ```text
//!             ┌──────────── on_preload / on_load_complete ────────────┐
//!             ▼                                                       │
//!      LifecycleGate ──► GateChanged ──► (gated) SubscriptionManager  │
//!             │                                                       │
//!             ├──► OneShotHook (load-complete only)                   │
//!             └──► TickDispatcher (every frame)                       │
//!                                                                     │
//!      dispose ──► SubscriptionManager::dispose_all ──► gate reset ◄──┘
//! ```
//!
//! # Example
//!
//! ```
//! use modgate_lifecycle::controller::Controller;
//! use modgate_system::host::ModHost;
//! use modgate_system::mode::{ModeSet, PhaseSignal, Purpose};
//!
//! let host = ModHost::new();
//! let mut controller = Controller::builder("ExampleSystem")
//!     .allowed_modes(ModeSet::GAME)
//!     .on_load(|_host| tracing::info!("applied once after load"))
//!     .on_tick(|_host| { /* per-frame work */ })
//!     .build();
//!
//! let game = PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME);
//! controller.on_preload(&host, &game);
//! controller.on_load_complete(&host, &game);
//! assert!(controller.one_shot_fired());
//! assert!(controller.tick(&host));
//!
//! controller.dispose(&host);
//! assert!(!controller.is_enabled());
//! ```

use core::fmt;

use modgate_system::host::ModHost;
use modgate_system::mode::{ModeSet, PhaseSignal};

use crate::dispatcher::TickDispatcher;
use crate::gate::{GateState, LifecycleGate};
use crate::hook::OneShotHook;
use crate::observers::{self, LifecycleEvent};
use crate::subscription::{InputPhase, InteractionCallback, ResourceHandle, SubscriptionManager};

// ─────────────────────────────────────────────────────────────────────────────
// ControllerConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Static configuration of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    name: String,
    allowed_modes: ModeSet,
    gate_subscriptions: bool,
}

impl ControllerConfig {
    /// Creates a configuration allowed in [`ModeSet::GAME`], with
    /// subscribed handles following the gate.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed_modes: ModeSet::GAME,
            gate_subscriptions: true,
        }
    }

    /// Sets the modes the controller runs in.
    #[must_use]
    pub fn with_allowed_modes(mut self, modes: ModeSet) -> Self {
        self.allowed_modes = modes;
        self
    }

    /// Sets whether subscribed handles follow the gate: disabled while the
    /// gate is disabled, re-enabled when it opens. Pass `false` to keep them
    /// enabled in every mode.
    #[must_use]
    pub fn with_gated_subscriptions(mut self, gated: bool) -> Self {
        self.gate_subscriptions = gated;
        self
    }

    /// Returns the controller name used in logs and events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the allowed modes.
    #[must_use]
    pub fn allowed_modes(&self) -> ModeSet {
        self.allowed_modes
    }

    /// Returns whether subscriptions follow the gate.
    #[must_use]
    pub fn gates_subscriptions(&self) -> bool {
        self.gate_subscriptions
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ControllerBuilder
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for [`Controller`], see [`Controller::builder`].
#[derive(Debug)]
pub struct ControllerBuilder {
    config: ControllerConfig,
    one_shot: OneShotHook,
    dispatcher: TickDispatcher,
}

impl ControllerBuilder {
    /// Starts from an existing configuration.
    #[must_use]
    pub fn from_config(config: ControllerConfig) -> Self {
        Self {
            config,
            one_shot: OneShotHook::empty(),
            dispatcher: TickDispatcher::empty(),
        }
    }

    /// Sets the modes the controller runs in.
    #[must_use]
    pub fn allowed_modes(mut self, modes: ModeSet) -> Self {
        self.config = self.config.with_allowed_modes(modes);
        self
    }

    /// Sets whether subscribed handles follow the gate (the default).
    #[must_use]
    pub fn gate_subscriptions(mut self, gated: bool) -> Self {
        self.config = self.config.with_gated_subscriptions(gated);
        self
    }

    /// Sets the action run once per load cycle, at load-complete.
    #[must_use]
    pub fn on_load(mut self, action: impl FnMut(&ModHost) + Send + 'static) -> Self {
        self.one_shot = OneShotHook::new(action);
        self
    }

    /// Sets the action run on every enabled tick.
    #[must_use]
    pub fn on_tick(mut self, action: impl FnMut(&ModHost) + Send + 'static) -> Self {
        self.dispatcher = TickDispatcher::new(action);
        self
    }

    /// Builds a disabled controller.
    #[must_use]
    pub fn build(self) -> Controller {
        Controller {
            gate: LifecycleGate::new(self.config.allowed_modes),
            subscriptions: SubscriptionManager::new(self.config.name.clone()),
            config: self.config,
            one_shot: self.one_shot,
            dispatcher: self.dispatcher,
            disposed: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// One unit of gated work.
///
/// All entry points are meant to be called by the host's driving thread, one
/// at a time. None of them fails: recoverable problems are reported as
/// warnings through [`observers::emit`]. After [`dispose`](Self::dispose)
/// every entry point is ignored.
pub struct Controller {
    config: ControllerConfig,
    gate: LifecycleGate,
    one_shot: OneShotHook,
    dispatcher: TickDispatcher,
    subscriptions: SubscriptionManager,
    disposed: bool,
}

impl Controller {
    /// Starts building a controller named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ControllerBuilder {
        ControllerBuilder::from_config(ControllerConfig::new(name))
    }

    /// Creates a controller with no one-shot or per-frame action.
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        ControllerBuilder::from_config(config).build()
    }

    /// Returns the controller's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns the gate.
    #[must_use]
    pub fn gate(&self) -> &LifecycleGate {
        &self.gate
    }

    /// Returns the subscription table.
    #[must_use]
    pub fn subscriptions(&self) -> &SubscriptionManager {
        &self.subscriptions
    }

    /// Returns true while gated work may run.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Returns true if the one-shot ran in the current cycle.
    #[must_use]
    pub fn one_shot_fired(&self) -> bool {
        self.gate.one_shot_fired()
    }

    /// Returns true once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns how many ticks reached the per-frame action.
    #[must_use]
    pub fn ticks_dispatched(&self) -> u64 {
        self.dispatcher.dispatched()
    }

    /// Handles the start of a load cycle.
    pub fn on_preload(&mut self, host: &ModHost, signal: &PhaseSignal) {
        if self.disposed {
            return;
        }
        let change = self.gate.on_preload(signal.raw_mode());
        self.apply_change(host, change, signal);
    }

    /// Handles the end of a load cycle and fires the one-shot if allowed.
    pub fn on_load_complete(&mut self, host: &ModHost, signal: &PhaseSignal) {
        if self.disposed {
            return;
        }
        let change = self.gate.on_load_complete(signal.raw_mode());
        self.apply_change(host, change, signal);

        if self.one_shot.fire(&mut self.gate, host) {
            observers::emit(
                host,
                &LifecycleEvent::OneShotFired {
                    system: self.config.name.clone(),
                    mode: signal.mode(),
                },
            );
        }
    }

    /// Runs one frame. Returns false without side effects while disabled.
    pub fn tick(&mut self, host: &ModHost) -> bool {
        if self.disposed {
            return false;
        }
        self.dispatcher.tick(&self.gate, host)
    }

    /// Subscribes a closure to the resource `name`.
    ///
    /// See [`SubscriptionManager::subscribe`]. With gated subscriptions, a
    /// handle subscribed while the gate is disabled starts disabled.
    pub fn subscribe<F>(&mut self, host: &ModHost, name: &str, callback: F) -> bool
    where
        F: Fn(&dyn ResourceHandle, InputPhase) + Send + Sync + 'static,
    {
        self.subscribe_callback(host, name, std::sync::Arc::new(callback))
    }

    /// Subscribes a prebuilt callback to the resource `name`.
    pub fn subscribe_callback(
        &mut self,
        host: &ModHost,
        name: &str,
        callback: InteractionCallback,
    ) -> bool {
        if self.disposed {
            return false;
        }
        let subscribed = self.subscriptions.subscribe(host, name, callback);
        if subscribed && self.config.gate_subscriptions && !self.gate.is_enabled() {
            self.subscriptions.set_enabled(name, false);
        }
        subscribed
    }

    /// Releases the subscription to `name`. Returns false if there was none.
    pub fn unsubscribe(&mut self, host: &ModHost, name: &str) -> bool {
        if self.disposed {
            return false;
        }
        self.subscriptions.unsubscribe(host, name)
    }

    /// Releases every subscription and forces the gate disabled.
    ///
    /// Terminal: later calls to any entry point are ignored.
    pub fn dispose(&mut self, host: &ModHost) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let released = self.subscriptions.dispose_all(host);
        if let Some(state) = self.gate.reset() {
            self.emit_gate_change(host, state, ModeSet::EMPTY, None);
        }
        observers::emit(
            host,
            &LifecycleEvent::Disposed {
                system: self.config.name.clone(),
                released,
            },
        );
    }

    fn apply_change(&mut self, host: &ModHost, change: Option<GateState>, signal: &PhaseSignal) {
        let Some(state) = change else {
            return;
        };
        self.emit_gate_change(host, state, signal.mode(), Some(signal.purpose()));
        if self.config.gate_subscriptions {
            self.subscriptions.set_all_enabled(state.is_enabled());
        }
    }

    fn emit_gate_change(
        &self,
        host: &ModHost,
        state: GateState,
        mode: ModeSet,
        purpose: Option<modgate_system::mode::Purpose>,
    ) {
        observers::emit(
            host,
            &LifecycleEvent::GateChanged {
                system: self.config.name.clone(),
                state,
                mode,
                purpose,
            },
        );
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .field("subscriptions", &self.subscriptions)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgate_system::mode::Purpose;

    #[test]
    fn config_defaults() {
        let config = ControllerConfig::new("sys");
        assert_eq!(config.name(), "sys");
        assert_eq!(config.allowed_modes(), ModeSet::GAME);
        assert!(config.gates_subscriptions());
        assert!(!config.with_gated_subscriptions(false).gates_subscriptions());
    }

    #[test]
    fn disposed_controller_ignores_everything() {
        let host = ModHost::new();
        let mut controller = Controller::new(ControllerConfig::new("sys"));
        controller.dispose(&host);

        let game = PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME);
        controller.on_preload(&host, &game);
        controller.on_load_complete(&host, &game);

        assert!(controller.is_disposed());
        assert!(!controller.is_enabled());
        assert!(!controller.tick(&host));
        assert!(!controller.subscribe(&host, "Jump", |_, _| {}));
    }
}
