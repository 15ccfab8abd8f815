//! Declarative mod settings.
//!
//! Options are an explicit list of [`OptionSpec`] records. The
//! [`SettingsPlugin`] turns that list into a [`SettingsAPI`], loads saved
//! values from a [`SettingsStore`] when the host is ready and saves them
//! again on dispose.
//!
//! # Example
//!
//! ```
//! use modgate_core_plugins::settings::{OptionSpec, SettingsAPI, SettingsPlugin};
//! use modgate_core_plugins::ModInfoPlugin;
//! use modgate_system::host::ModHost;
//!
//! let mut host = ModHost::new();
//! host.add_plugins(ModInfoPlugin::new("Your Mod Name", "1.0.0"));
//! host.add_plugins(SettingsPlugin::new(vec![
//!     OptionSpec::toggle("EnableFeature", true).in_section("Main", "Controls"),
//! ]));
//! host.finish();
//!
//! let settings = host.api::<SettingsAPI>().unwrap();
//! assert_eq!(settings.get_bool("EnableFeature"), Some(true));
//! assert!(settings.set("EnableFeature", false).unwrap());
//! ```

mod option;
mod store;
mod url;

pub use option::{Choice, Effect, OptionKind, OptionSpec, Section};
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use url::{UrlOpener, UrlOpenerAPI};

use std::sync::Arc;

use hashbrown::HashMap;
use modgate_system::api::API;
use modgate_system::host::ModHost;
use modgate_system::plugin::{Plugin, PluginId};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::mod_info::{ModInfo, ModInfoPlugin};

// ─────────────────────────────────────────────────────────────────────────────
// SettingsError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// No option is declared under this key.
    #[error("unknown option '{0}'")]
    UnknownKey(String),

    /// The value has the wrong type for the option.
    #[error("option '{key}' expects a {expected} value")]
    KindMismatch {
        /// The option key.
        key: String,
        /// The option kind.
        expected: &'static str,
    },

    /// The value is not one of the dropdown's choices.
    #[error("'{value}' is not a choice of option '{key}'")]
    InvalidChoice {
        /// The option key.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The option holds no user-settable value.
    #[error("option '{key}' is a {kind} and cannot be set")]
    ReadOnly {
        /// The option key.
        key: String,
        /// The option kind.
        kind: &'static str,
    },

    /// `press` was called on something other than a button.
    #[error("option '{0}' is not a button")]
    NotAButton(String),

    /// The persistence key would resolve outside the store.
    #[error("settings key '{0}' must be a relative path without '.' or '..' segments")]
    InvalidKey(String),

    /// Reading or writing the store failed.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized.
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// SettingsAPI
// ─────────────────────────────────────────────────────────────────────────────

/// Listener notified when an option with [`Effect::Apply`] changes.
pub type ApplyListener = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Current option values plus the apply listeners.
///
/// Installed by [`SettingsPlugin`]. Toggles and dropdowns hold values;
/// displays read back their fixed text; buttons only respond to
/// [`press`](Self::press).
pub struct SettingsAPI {
    settings_key: String,
    options: Vec<OptionSpec>,
    values: RwLock<HashMap<String, Value>>,
    listeners: RwLock<Vec<ApplyListener>>,
}

impl API for SettingsAPI {}

impl SettingsAPI {
    /// Creates the API with every option at its default.
    #[must_use]
    pub fn new(settings_key: impl Into<String>, options: Vec<OptionSpec>) -> Self {
        let values: HashMap<String, Value> = options
            .iter()
            .filter(|spec| spec.kind.is_stored())
            .map(|spec| (spec.key.clone(), spec.default.clone()))
            .collect();
        Self {
            settings_key: settings_key.into(),
            options,
            values: RwLock::new(values),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Returns the persistence key.
    #[must_use]
    pub fn settings_key(&self) -> &str {
        &self.settings_key
    }

    /// Returns the declared options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Returns the declaration of `key`.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.key == key)
    }

    /// Returns the current value of `key`.
    ///
    /// Display rows return their text; buttons and unknown keys return `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let spec = self.option(key)?;
        match spec.kind {
            OptionKind::Button => None,
            OptionKind::Display | OptionKind::Multiline => Some(spec.default.clone()),
            OptionKind::Toggle | OptionKind::Dropdown { .. } => self.values.read().get(key).cloned(),
        }
    }

    /// Returns the value of a toggle.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| value.as_bool())
    }

    /// Returns the value of a dropdown or display row.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|value| value.as_str().map(str::to_string))
    }

    /// Sets `key` to `value`.
    ///
    /// Returns `Ok(false)` if the value is unchanged; apply listeners only
    /// run when it actually changes. Nothing is saved until dispose.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for an unknown key, a read-only option, a
    /// value of the wrong type or a value that is not a dropdown choice.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<bool, SettingsError> {
        let value = value.into();
        let spec = self
            .option(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        Self::validate(spec, &value)?;

        {
            let mut values = self.values.write();
            if values.get(key) == Some(&value) {
                return Ok(false);
            }
            values.insert(key.to_string(), value.clone());
        }
        tracing::debug!(option = key, value = %value, "option changed");

        if spec.effect == Effect::Apply {
            self.notify(key, &value);
        }
        Ok(true)
    }

    /// Presses the button `key` and runs its effect.
    ///
    /// A URL that cannot be opened is logged and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if `key` is unknown or not a button.
    pub fn press(&self, host: &ModHost, key: &str) -> Result<(), SettingsError> {
        let spec = self
            .option(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        if spec.kind != OptionKind::Button {
            return Err(SettingsError::NotAButton(key.to_string()));
        }

        match &spec.effect {
            Effect::None => {}
            Effect::Apply => self.notify(key, &Value::Null),
            Effect::OpenUrl(url) => match host.api::<UrlOpenerAPI>() {
                Some(opener) => {
                    if let Err(reason) = opener.open(url) {
                        tracing::warn!(option = key, url = %url, "{} failed: {}", key, reason);
                    }
                }
                None => {
                    tracing::warn!(option = key, url = %url, "no URL opener; cannot open link");
                }
            },
        }
        Ok(())
    }

    /// Registers a listener for changes to options with [`Effect::Apply`].
    pub fn on_apply<F>(&self, listener: F)
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Puts every option back to its default without notifying listeners.
    pub fn reset_to_defaults(&self) {
        let mut values = self.values.write();
        for spec in self.options.iter().filter(|spec| spec.kind.is_stored()) {
            values.insert(spec.key.clone(), spec.default.clone());
        }
    }

    /// Returns the stored values as a JSON object, in declaration order.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let values = self.values.read();
        let map: Map<String, Value> = self
            .options
            .iter()
            .filter_map(|spec| {
                values
                    .get(&spec.key)
                    .map(|value| (spec.key.clone(), value.clone()))
            })
            .collect();
        Value::Object(map)
    }

    /// Deserializes the current values into a typed view.
    ///
    /// ```
    /// use modgate_core_plugins::settings::{OptionSpec, SettingsAPI};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "PascalCase")]
    /// struct Values {
    ///     enable_feature: bool,
    /// }
    ///
    /// let api = SettingsAPI::new("Mod", vec![OptionSpec::toggle("EnableFeature", true)]);
    /// let values: Values = api.typed().unwrap();
    /// assert!(values.enable_feature);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] if the values do not fit `T`.
    pub fn typed<T: DeserializeOwned>(&self) -> Result<T, SettingsError> {
        Ok(serde_json::from_value(self.snapshot())?)
    }

    /// Loads values from a snapshot without notifying listeners.
    ///
    /// Unknown keys are ignored; invalid values keep the current value and
    /// log a warning. Returns the number of values restored.
    pub fn restore(&self, snapshot: &Value) -> usize {
        let Some(entries) = snapshot.as_object() else {
            tracing::warn!(key = %self.settings_key, "saved settings are not an object; ignored");
            return 0;
        };

        let mut restored = 0;
        let mut values = self.values.write();
        for (key, value) in entries {
            let Some(spec) = self.option(key) else {
                tracing::debug!(option = %key, "ignoring unknown saved option");
                continue;
            };
            if !spec.kind.is_stored() {
                continue;
            }
            if let Err(err) = Self::validate(spec, value) {
                tracing::warn!(option = %key, "{}; keeping default", err);
                continue;
            }
            values.insert(key.clone(), value.clone());
            restored += 1;
        }
        restored
    }

    fn validate(spec: &OptionSpec, value: &Value) -> Result<(), SettingsError> {
        if spec.accepts(value) {
            return Ok(());
        }
        Err(match &spec.kind {
            OptionKind::Dropdown { .. } if value.is_string() => SettingsError::InvalidChoice {
                key: spec.key.clone(),
                value: value.as_str().unwrap_or_default().to_string(),
            },
            OptionKind::Toggle | OptionKind::Dropdown { .. } => SettingsError::KindMismatch {
                key: spec.key.clone(),
                expected: spec.kind.describe(),
            },
            OptionKind::Button | OptionKind::Display | OptionKind::Multiline => {
                SettingsError::ReadOnly {
                    key: spec.key.clone(),
                    kind: spec.kind.describe(),
                }
            }
        })
    }

    fn notify(&self, key: &str, value: &Value) {
        let listeners: Vec<ApplyListener> = self.listeners.read().clone();
        for listener in listeners {
            listener(key, value);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SettingsPlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Installs the [`SettingsAPI`] and persists it.
///
/// # Lifecycle
///
/// - **`build()`** inserts the API keyed by [`ModInfo::settings_key`]
/// - **`ready()`** loads saved values; a failed load keeps the defaults
/// - **`cleanup()`** saves the current values; a failed save is logged
///
/// Without a store, settings live for the session only.
///
/// # Dependencies
///
/// - [`ModInfoPlugin`]
#[derive(Default)]
pub struct SettingsPlugin {
    options: Vec<OptionSpec>,
    store: Option<Arc<dyn SettingsStore>>,
}

impl SettingsPlugin {
    /// Declares the mod's options.
    #[must_use]
    pub fn new(options: Vec<OptionSpec>) -> Self {
        Self {
            options,
            store: None,
        }
    }

    /// Persists settings in `store`.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, host: &mut ModHost) {
        let key = host
            .get_global::<ModInfo>()
            .map_or_else(|| "settings".to_string(), |info| info.settings_key.clone());
        host.insert_api(SettingsAPI::new(key, self.options.clone()));
    }

    fn ready(&self, host: &mut ModHost) {
        let (Some(store), Some(settings)) = (&self.store, host.api::<SettingsAPI>()) else {
            return;
        };
        let key = settings.settings_key();
        match store.load(key) {
            Ok(Some(snapshot)) => {
                let restored = settings.restore(&snapshot);
                tracing::info!(key, restored, "settings loaded");
            }
            Ok(None) => tracing::debug!(key, "no saved settings; using defaults"),
            Err(err) => tracing::warn!(key, "failed to load settings: {}; using defaults", err),
        }
    }

    fn cleanup(&self, host: &mut ModHost) {
        let (Some(store), Some(settings)) = (&self.store, host.api::<SettingsAPI>()) else {
            return;
        };
        let key = settings.settings_key();
        match store.save(key, &settings.snapshot()) {
            Ok(()) => tracing::debug!(key, "settings saved"),
            Err(err) => tracing::warn!(key, "failed to save settings: {}", err),
        }
    }

    fn name(&self) -> &str {
        "SettingsPlugin"
    }

    fn dependencies(&self) -> Vec<PluginId> {
        vec![PluginId::of::<ModInfoPlugin>()]
    }
}
