//! The example mod's systems.
//!
//! - `ExampleSystem` runs once after each gameplay load and counts frames
//!   while the feature toggle is on. It only runs in [`ModeSet::GAME`].
//! - `InputLogger` logs every phase of the three example actions in every
//!   mode, including the main menu.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use modgate_core_plugins::settings::SettingsAPI;
use modgate_lifecycle::controller::Controller;
use modgate_lifecycle::plugin::ControllerPlugin;
use modgate_lifecycle::subscription::{InputPhase, ResourceHandle};
use modgate_system::api::API;
use modgate_system::host::ModHost;
use modgate_system::mode::ModeSet;
use modgate_system::phase::{MainLoop, UiUpdate};
use modgate_system::plugin::Plugin;

use crate::setting::ENABLE_FEATURE;
use crate::{AXIS_ACTION, BUTTON_ACTION, VECTOR_ACTION};

/// Name of the gated gameplay system.
pub const EXAMPLE_SYSTEM: &str = "ExampleSystem";
/// Name of the input logging system.
pub const INPUT_LOGGER: &str = "InputLogger";

// ─────────────────────────────────────────────────────────────────────────────
// ExampleStats
// ─────────────────────────────────────────────────────────────────────────────

/// Counters the example systems bump, for the session summary.
#[derive(Debug, Default)]
pub struct ExampleStats {
    frames: AtomicU64,
    loads: AtomicU64,
    inputs: Arc<AtomicU64>,
}

impl API for ExampleStats {}

impl ExampleStats {
    /// Frames on which the feature did its work.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Times the post-load action ran.
    #[must_use]
    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    /// Input phases delivered to the logger.
    #[must_use]
    pub fn inputs(&self) -> u64 {
        self.inputs.load(Ordering::Relaxed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExampleSystemPlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Adds [`ExampleStats`] plus the `ExampleSystem` and `InputLogger`
/// controllers.
///
/// # APIs Provided
///
/// | API | Description |
/// |-----|-------------|
/// | [`ExampleStats`] | Session counters |
#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleSystemPlugin;

impl Plugin for ExampleSystemPlugin {
    fn build(&self, host: &mut ModHost) {
        let stats = ExampleStats::default();
        let inputs = Arc::clone(&stats.inputs);
        host.insert_api(stats);
        host.add_plugins(ControllerPlugin::new(example_system()).at::<MainLoop>());
        host.add_plugins(input_logger(inputs));
    }

    fn name(&self) -> &str {
        "ExampleSystemPlugin"
    }
}

/// Builds the gameplay-only controller.
#[must_use]
pub fn example_system() -> Controller {
    Controller::builder(EXAMPLE_SYSTEM)
        .allowed_modes(ModeSet::GAME)
        .on_load(|host| {
            tracing::info!("[{}] ApplyOnceAfterLoad", EXAMPLE_SYSTEM);
            if let Some(stats) = host.api::<ExampleStats>() {
                stats.loads.fetch_add(1, Ordering::Relaxed);
            }
        })
        .on_tick(|host| {
            let enabled = host
                .api::<SettingsAPI>()
                .and_then(|settings| settings.get_bool(ENABLE_FEATURE))
                .unwrap_or(true);
            if !enabled {
                return;
            }
            if let Some(stats) = host.api::<ExampleStats>() {
                stats.frames.fetch_add(1, Ordering::Relaxed);
            }
        })
        .build()
}

/// Builds the logger for the example input actions, ticked on [`UiUpdate`].
///
/// Runs in every mode and keeps its inputs enabled, so presses in the main
/// menu are logged too. Each delivered phase bumps `inputs`.
#[must_use]
pub fn input_logger(inputs: Arc<AtomicU64>) -> ControllerPlugin {
    let controller = Controller::builder(INPUT_LOGGER)
        .allowed_modes(ModeSet::ALL)
        .gate_subscriptions(false)
        .build();
    [BUTTON_ACTION, AXIS_ACTION, VECTOR_ACTION]
        .into_iter()
        .fold(ControllerPlugin::new(controller), |plugin, action| {
            let inputs = Arc::clone(&inputs);
            plugin.with_input(action, move |handle: &dyn ResourceHandle, phase: InputPhase| {
                inputs.fetch_add(1, Ordering::Relaxed);
                tracing::info!("[{}] On{} {}", handle.name(), phase, handle.read_value());
            })
        })
        .at::<UiUpdate>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_system_is_game_only() {
        let controller = example_system();
        assert_eq!(controller.name(), EXAMPLE_SYSTEM);
        assert_eq!(controller.config().allowed_modes(), ModeSet::GAME);
        assert!(controller.config().gates_subscriptions());
    }

    #[test]
    fn input_logger_runs_everywhere() {
        let plugin = input_logger(Arc::default());
        assert_eq!(plugin.name(), INPUT_LOGGER);
        assert_eq!(plugin.controller().config().allowed_modes(), ModeSet::ALL);
        assert!(!plugin.controller().config().gates_subscriptions());
    }
}
