//! Example mod built with modgate.
//!
//! It shows the pieces a typical mod wires together:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ExampleMod                                                │
//! │                                                            │
//! │  ModInfo ─▶ Settings (options page, persisted)             │
//! │         └─▶ Locale (en-US)                                 │
//! │                                                            │
//! │  ExampleSystem   gated to GAME, one-shot after load,       │
//! │                  per-frame work on MainLoop                │
//! │  InputLogger     every mode, logs three input actions      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The game's services are simulated by [`sim::SimHost`].

pub mod locale;
pub mod setting;
pub mod sim;
pub mod systems;

use std::sync::Arc;

use modgate_core_plugins::locale::LocalePlugin;
use modgate_core_plugins::settings::{SettingsPlugin, SettingsStore};
use modgate_core_plugins::{ModInfoPlugin, TracingFormat, TracingPlugin};
use modgate_lifecycle::plugin::LifecyclePlugin;
use modgate_system::plugin::{PluginGroup, PluginGroupBuilder};

pub use systems::{ExampleStats, ExampleSystemPlugin};

/// Display name of the mod.
pub const NAME: &str = "Your Mod Name";
/// Mod version shown on the options page.
pub const VERSION: &str = "1.0.0";
/// Key the settings are saved under.
pub const SETTINGS_KEY: &str = "ModsSettings/YourMod/YourMod";
/// Prefix of every localization id.
pub const LOCALE_ID: &str = "YourMod";

/// Button action logged by the input logger.
pub const BUTTON_ACTION: &str = "ButtonBinding";
/// Single-axis action logged by the input logger.
pub const AXIS_ACTION: &str = "FloatBinding";
/// Two-axis action logged by the input logger.
pub const VECTOR_ACTION: &str = "Vector2Binding";

/// Every plugin of the example mod.
///
/// Without a store, settings last for the session only.
///
/// ```
/// use example::ExampleMod;
/// use modgate_core_plugins::TracingPlugin;
/// use modgate_system::host::ModHost;
/// use modgate_system::plugin::PluginGroup;
///
/// let mut host = ModHost::new();
/// host.add_plugins(ExampleMod::default().build().disable::<TracingPlugin>());
/// host.finish();
/// assert!(host.api::<example::ExampleStats>().is_some());
/// ```
#[derive(Default)]
pub struct ExampleMod {
    store: Option<Arc<dyn SettingsStore>>,
}

impl ExampleMod {
    /// Persists settings in `store`.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }
}

impl PluginGroup for ExampleMod {
    fn build(self) -> PluginGroupBuilder {
        let settings = match self.store {
            Some(store) => SettingsPlugin::new(setting::options()).with_store(store),
            None => SettingsPlugin::new(setting::options()),
        };
        PluginGroupBuilder::new()
            .add(ModInfoPlugin::new(NAME, VERSION).with_settings_key(SETTINGS_KEY))
            .add(TracingPlugin::default().with_format(TracingFormat::Compact))
            .add(LifecyclePlugin)
            .add(settings)
            .add(LocalePlugin::new().with_source("en-US", locale::locale_en()))
            .add(ExampleSystemPlugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_contents() {
        assert_eq!(ExampleMod::default().build().len(), 6);
    }
}
