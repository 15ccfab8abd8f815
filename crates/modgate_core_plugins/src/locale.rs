//! Localized strings for the options page.
//!
//! A [`DictionarySource`] maps locale ids to text. [`LocalePlugin`] hands
//! each source to the host's [`LocalizationManager`] once the host is ready.
//! Sources are owned by the host afterwards and are never removed on
//! dispose.

use std::sync::Arc;

use modgate_system::api::API;
use modgate_system::host::ModHost;
use modgate_system::plugin::Plugin;

// ─────────────────────────────────────────────────────────────────────────────
// Sources
// ─────────────────────────────────────────────────────────────────────────────

/// A set of `(id, text)` entries for one locale.
pub trait DictionarySource: Send + Sync {
    /// Returns every entry.
    fn read_entries(&self) -> Vec<(String, String)>;
}

/// A [`DictionarySource`] built in code.
///
/// ```
/// use modgate_core_plugins::locale::{DictionarySource, LocaleIds, StaticDictionary};
///
/// let ids = LocaleIds::new("YourMod");
/// let en = StaticDictionary::new()
///     .entry(ids.settings(), "Your Mod Name")
///     .option(&ids, "EnableFeature", "Enable feature", "Turns the example feature on.");
/// assert_eq!(en.read_entries().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticDictionary {
    entries: Vec<(String, String)>,
}

impl StaticDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry. A repeated id replaces the earlier text.
    #[must_use]
    pub fn entry(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = text,
            None => self.entries.push((id, text)),
        }
        self
    }

    /// Adds the label and description of option `key`.
    #[must_use]
    pub fn option(self, ids: &LocaleIds, key: &str, label: &str, description: &str) -> Self {
        self.entry(ids.option_label(key), label)
            .entry(ids.option_description(key), description)
    }

    /// Returns the text for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, text)| text.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DictionarySource for StaticDictionary {
    fn read_entries(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }
}

/// Builds the locale ids the options page looks up for a mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleIds {
    id: String,
}

impl LocaleIds {
    /// Creates ids for the settings of mod `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Id of the mod's entry in the options list.
    #[must_use]
    pub fn settings(&self) -> String {
        format!("Options.SECTION[{}]", self.id)
    }

    /// Id of a tab title.
    #[must_use]
    pub fn tab(&self, tab: &str) -> String {
        format!("Options.TAB[{}.{}]", self.id, tab)
    }

    /// Id of a group title.
    #[must_use]
    pub fn group(&self, group: &str) -> String {
        format!("Options.GROUP[{}.{}]", self.id, group)
    }

    /// Id of an option's label.
    #[must_use]
    pub fn option_label(&self, key: &str) -> String {
        format!("Options.OPTION[{}.{}]", self.id, key)
    }

    /// Id of an option's description.
    #[must_use]
    pub fn option_description(&self, key: &str) -> String {
        format!("Options.OPTION_DESCRIPTION[{}.{}]", self.id, key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host side
// ─────────────────────────────────────────────────────────────────────────────

/// The host's localization manager.
pub trait LocalizationManager: Send + Sync {
    /// Registers `source` for `locale`.
    fn add_source(&self, locale: &str, source: Arc<dyn DictionarySource>);
}

/// The host's [`LocalizationManager`], installed as an API.
pub struct LocalizationAPI {
    manager: Arc<dyn LocalizationManager>,
}

impl API for LocalizationAPI {}

impl LocalizationAPI {
    /// Wraps a manager.
    #[must_use]
    pub fn new(manager: Arc<dyn LocalizationManager>) -> Self {
        Self { manager }
    }

    /// Registers `source` for `locale`.
    pub fn add_source(&self, locale: &str, source: Arc<dyn DictionarySource>) {
        self.manager.add_source(locale, source);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LocalePlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Registers the mod's dictionaries with the host.
///
/// Runs in `ready()` so the host's [`LocalizationAPI`], installed before
/// `finish()`, is visible. If it is missing, each locale is skipped with one
/// warning.
#[derive(Default)]
pub struct LocalePlugin {
    sources: Vec<(String, Arc<dyn DictionarySource>)>,
}

impl LocalePlugin {
    /// Creates a plugin with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `source` for `locale`, e.g. `"en-US"`.
    #[must_use]
    pub fn with_source(
        mut self,
        locale: impl Into<String>,
        source: impl DictionarySource + 'static,
    ) -> Self {
        self.sources.push((locale.into(), Arc::new(source)));
        self
    }

    /// Returns the locales this plugin registers, in order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|(locale, _)| locale.as_str())
    }
}

impl Plugin for LocalePlugin {
    fn build(&self, _host: &mut ModHost) {}

    fn ready(&self, host: &mut ModHost) {
        let Some(localization) = host.api::<LocalizationAPI>() else {
            for locale in self.locales() {
                tracing::warn!(
                    locale,
                    "LocalizationManager not available; cannot add locale '{}'",
                    locale
                );
            }
            return;
        };
        for (locale, source) in &self.sources {
            localization.add_source(locale, Arc::clone(source));
            tracing::debug!(locale = %locale, "locale source added");
        }
    }

    fn name(&self) -> &str {
        "LocalePlugin"
    }
}
