//! Mod metadata plugin.

use modgate_system::host::ModHost;
use modgate_system::plugin::Plugin;
use modgate_system::resource::GlobalResource;

/// Version of the modgate framework the mod was built against.
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata describing the running mod.
///
/// Inserted as a global by [`ModInfoPlugin`]. Other plugins read it for log
/// lines, the settings persistence key and the options page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModInfo {
    /// Display name, e.g. `"Your Mod Name"`.
    pub name: String,
    /// Short version string, e.g. `"1.0.0"`.
    pub version: String,
    /// Key the settings are persisted under.
    pub settings_key: String,
    /// Version of modgate in use.
    pub framework_version: &'static str,
    /// Whether this is a debug build.
    pub debug: bool,
}

impl GlobalResource for ModInfo {}

/// Provides [`ModInfo`].
///
/// The settings key defaults to the mod name.
///
/// # Example
///
/// ```
/// use modgate_core_plugins::{ModInfo, ModInfoPlugin};
/// use modgate_system::host::ModHost;
///
/// let mut host = ModHost::new();
/// host.add_plugins(
///     ModInfoPlugin::new("Your Mod Name", "1.0.0")
///         .with_settings_key("ModsSettings/YourMod/YourMod"),
/// );
/// host.finish();
///
/// let info = host.get_global::<ModInfo>().unwrap();
/// assert_eq!(info.settings_key, "ModsSettings/YourMod/YourMod");
/// ```
#[derive(Debug, Clone)]
pub struct ModInfoPlugin {
    name: String,
    version: String,
    settings_key: Option<String>,
}

impl Default for ModInfoPlugin {
    fn default() -> Self {
        Self::new("modgate mod", "0.1.0")
    }
}

impl ModInfoPlugin {
    /// Creates metadata for a mod called `name` at `version`.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            settings_key: None,
        }
    }

    /// Overrides the settings persistence key.
    #[must_use]
    pub fn with_settings_key(mut self, key: impl Into<String>) -> Self {
        self.settings_key = Some(key.into());
        self
    }
}

impl Plugin for ModInfoPlugin {
    fn build(&self, host: &mut ModHost) {
        host.insert_global(ModInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            settings_key: self.settings_key.clone().unwrap_or_else(|| self.name.clone()),
            framework_version: FRAMEWORK_VERSION,
            debug: cfg!(debug_assertions),
        });
    }

    fn name(&self) -> &str {
        "ModInfoPlugin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_key_defaults_to_name() {
        let mut host = ModHost::new();
        host.add_plugins(ModInfoPlugin::new("Example", "1.2.3"));
        host.finish();

        let info = host.get_global::<ModInfo>().unwrap();
        assert_eq!(info.name, "Example");
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.settings_key, "Example");
        assert_eq!(info.framework_version, FRAMEWORK_VERSION);
        assert_eq!(info.debug, cfg!(debug_assertions));
    }
}
