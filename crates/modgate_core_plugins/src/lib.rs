//! Core infrastructure plugins for modgate.
//!
//! This crate provides the plugins most mods need besides their gated
//! systems:
//!
//! - [`ModInfoPlugin`] - Mod metadata
//! - [`TracingPlugin`] - Logging via the `tracing` crate
//! - [`SettingsPlugin`](settings::SettingsPlugin) - Declarative options and
//!   their persistence
//! - [`LocalePlugin`](locale::LocalePlugin) - Options page strings
//! - [`DefaultPlugins`] - Bundle of all of the above
//!
//! # Example
//!
//! ```
//! use modgate_core_plugins::{DefaultPlugins, ModInfoPlugin};
//! use modgate_system::host::ModHost;
//! use modgate_system::plugin::PluginGroup;
//!
//! let mut host = ModHost::new();
//! host.add_plugins(
//!     DefaultPlugins
//!         .build()
//!         .set(ModInfoPlugin::new("Your Mod Name", "1.0.0")),
//! );
//! host.finish();
//! ```
//!
//! # Architecture
//!
//! This crate is part of Layer 3:
//!
//! - **Layer 1** (`modgate_system`): host context, plugins, modes
//! - **Layer 2** (`modgate_lifecycle`): gated controllers and subscriptions
//! - **Layer 3** (`modgate_core_plugins`, mods): infrastructure and concrete systems

pub mod locale;
mod mod_info;
pub mod settings;
mod tracing_plugin;

pub use mod_info::{FRAMEWORK_VERSION, ModInfo, ModInfoPlugin};
pub use tracing_plugin::{TracingConfig, TracingFormat, TracingPlugin};

use locale::LocalePlugin;
use modgate_system::plugin::{PluginGroup, PluginGroupBuilder};
use settings::SettingsPlugin;

/// Default plugins for most mods.
///
/// Includes:
/// - [`ModInfoPlugin`] - Mod metadata
/// - [`TracingPlugin`] - Logging
/// - [`SettingsPlugin`] - No options until replaced with `set`
/// - [`LocalePlugin`] - No sources until replaced with `set`
pub struct DefaultPlugins;

impl PluginGroup for DefaultPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::new()
            .add(ModInfoPlugin::default())
            .add(TracingPlugin::default())
            .add(SettingsPlugin::default())
            .add(LocalePlugin::default())
    }
}

/// Minimal plugins for tests and headless hosts.
///
/// Includes only [`ModInfoPlugin`]; no subscriber is installed.
pub struct MinimalPlugins;

impl PluginGroup for MinimalPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::new().add(ModInfoPlugin::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgate_system::host::ModHost;

    #[test]
    fn default_plugins_builds() {
        assert_eq!(DefaultPlugins.build().len(), 4);
    }

    #[test]
    fn minimal_plugins_builds() {
        let mut host = ModHost::new();
        host.add_plugins(MinimalPlugins.build());
        host.finish();
        assert!(host.contains_global::<ModInfo>());
        assert!(!host.contains_global::<TracingConfig>());
    }
}
