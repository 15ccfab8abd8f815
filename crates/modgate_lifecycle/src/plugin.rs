//! Plugins that wire controllers into a [`ModHost`].

use modgate_system::host::ModHost;
use modgate_system::mode::PhaseSignal;
use modgate_system::phase::MainLoop;
use modgate_system::plugin::{IntoScheduleIds, Plugin, ScheduleId};
use parking_lot::{Mutex, MutexGuard};

use crate::controller::Controller;
use crate::observers::LifecycleHooks;
use crate::subscription::{InputPhase, InteractionCallback, ResourceHandle, interaction};

// ─────────────────────────────────────────────────────────────────────────────
// LifecyclePlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Installs the [`LifecycleHooks`] API so observers can follow every
/// controller in the host.
///
/// Without it, lifecycle events are only written to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, host: &mut ModHost) {
        if !host.contains_api::<LifecycleHooks>() {
            host.insert_api(LifecycleHooks::new());
        }
    }

    fn name(&self) -> &str {
        "LifecyclePlugin"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ControllerPlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Drives a [`Controller`] from the host lifecycle.
///
/// - `ready` subscribes the inputs declared with [`with_input`](Self::with_input)
/// - `preload` and `load_complete` are forwarded to the gate
/// - each registered update phase ticks the controller
/// - `cleanup` disposes it
///
/// Several controller plugins can live in one host; each is named after its
/// controller.
///
/// ```
/// use modgate_lifecycle::controller::Controller;
/// use modgate_lifecycle::plugin::ControllerPlugin;
/// use modgate_system::host::ModHost;
/// use modgate_system::mode::{ModeSet, PhaseSignal, Purpose};
/// use modgate_system::phase::MainLoop;
///
/// let controller = Controller::builder("ExampleSystem")
///     .allowed_modes(ModeSet::GAME)
///     .build();
///
/// let mut host = ModHost::new();
/// host.add_plugins(ControllerPlugin::new(controller));
/// host.finish();
///
/// host.preload(&PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME));
/// host.tick::<MainLoop>();
/// host.dispose();
/// ```
pub struct ControllerPlugin {
    name: String,
    controller: Mutex<Controller>,
    phases: Vec<ScheduleId>,
    inputs: Vec<(String, InteractionCallback)>,
}

impl ControllerPlugin {
    /// Wraps `controller`, ticked on [`MainLoop`].
    #[must_use]
    pub fn new(controller: Controller) -> Self {
        Self {
            name: controller.name().to_string(),
            controller: Mutex::new(controller),
            phases: vec![ScheduleId::of::<MainLoop>()],
            inputs: Vec::new(),
        }
    }

    /// Replaces the update phases the controller is ticked on.
    #[must_use]
    pub fn at<S: IntoScheduleIds>(mut self) -> Self {
        self.phases = S::schedule_ids();
        self
    }

    /// Subscribes `callback` to the resource `name` once the host is ready.
    #[must_use]
    pub fn with_input<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&dyn ResourceHandle, InputPhase) + Send + Sync + 'static,
    {
        self.inputs.push((name.into(), interaction(callback)));
        self
    }

    /// Locks and returns the wrapped controller.
    pub fn controller(&self) -> MutexGuard<'_, Controller> {
        self.controller.lock()
    }
}

impl Plugin for ControllerPlugin {
    fn build(&self, _host: &mut ModHost) {}

    fn ready(&self, host: &mut ModHost) {
        let mut controller = self.controller.lock();
        for (name, callback) in &self.inputs {
            controller.subscribe_callback(host, name, callback.clone());
        }
    }

    fn preload(&self, host: &mut ModHost, signal: &PhaseSignal) {
        self.controller.lock().on_preload(host, signal);
    }

    fn load_complete(&self, host: &mut ModHost, signal: &PhaseSignal) {
        self.controller.lock().on_load_complete(host, signal);
    }

    fn update(&self, host: &mut ModHost, _phase: ScheduleId) {
        self.controller.lock().tick(host);
    }

    fn cleanup(&self, host: &mut ModHost) {
        self.controller.lock().dispose(host);
    }

    fn tick_schedules(&self) -> Vec<ScheduleId> {
        self.phases.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_unique(&self) -> bool {
        false
    }
}

impl core::fmt::Debug for ControllerPlugin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerPlugin")
            .field("name", &self.name)
            .field("phases", &self.phases)
            .field("inputs", &self.inputs.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
