//! In-memory stand-ins for the game's services.
//!
//! The example binary and tests drive the mod through these instead of a
//! running game: [`SimInput`] owns input actions, [`SimLocalization`]
//! collects dictionaries and [`SimBrowser`] records opened links.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hashbrown::HashMap;
use modgate_core_plugins::locale::{DictionarySource, LocalizationAPI, LocalizationManager};
use modgate_core_plugins::settings::{UrlOpener, UrlOpenerAPI};
use modgate_lifecycle::subscription::{
    HandleError, InputPhase, InputValue, InteractionCallback, RegistryAPI, ResourceHandle,
    ResourceRegistry,
};
use modgate_system::host::ModHost;
use parking_lot::{Mutex, RwLock};

// ─────────────────────────────────────────────────────────────────────────────
// Input
// ─────────────────────────────────────────────────────────────────────────────

/// A live input action.
pub struct SimAction {
    name: String,
    enabled: AtomicBool,
    value: Mutex<InputValue>,
    callbacks: Mutex<Vec<InteractionCallback>>,
}

impl SimAction {
    /// Creates a disabled action holding `initial`.
    #[must_use]
    pub fn new(name: impl Into<String>, initial: InputValue) -> Self {
        Self {
            name: name.into(),
            enabled: AtomicBool::new(false),
            value: Mutex::new(initial),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of attached callbacks.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.callbacks.lock().len()
    }

    /// Sets the value and reports `phase` to every callback.
    ///
    /// Disabled actions ignore input. Returns whether it was delivered.
    pub fn trigger(&self, phase: InputPhase, value: InputValue) -> bool {
        if !self.is_enabled() {
            return false;
        }
        *self.value.lock() = value;
        let callbacks = self.callbacks.lock().clone();
        for callback in callbacks {
            callback(self, phase);
        }
        true
    }

    /// A full button press: started, performed, then released.
    pub fn press(&self) -> bool {
        self.trigger(InputPhase::Started, InputValue::Scalar(1.0))
            && self.trigger(InputPhase::Performed, InputValue::Scalar(1.0))
            && self.trigger(InputPhase::Canceled, InputValue::Scalar(0.0))
    }
}

impl ResourceHandle for SimAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn attach(&self, callback: InteractionCallback) -> Result<(), HandleError> {
        self.callbacks.lock().push(callback);
        Ok(())
    }

    fn detach(&self, callback: &InteractionCallback) -> Result<(), HandleError> {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|attached| !Arc::ptr_eq(attached, callback));
        if callbacks.len() == before {
            return Err(HandleError::NotAttached(self.name.clone()));
        }
        Ok(())
    }

    fn read_value(&self) -> InputValue {
        *self.value.lock()
    }
}

/// The game's input action table.
#[derive(Default)]
pub struct SimInput {
    actions: RwLock<HashMap<String, Arc<SimAction>>>,
}

impl SimInput {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an action and returns it.
    pub fn register(&self, name: &str, initial: InputValue) -> Arc<SimAction> {
        let action = Arc::new(SimAction::new(name, initial));
        self.actions
            .write()
            .insert(name.to_string(), Arc::clone(&action));
        action
    }

    /// Returns the action `name`.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<Arc<SimAction>> {
        self.actions.read().get(name).cloned()
    }

    /// Forgets the action `name`, as when a keybinding set is unloaded.
    pub fn remove(&self, name: &str) -> Option<Arc<SimAction>> {
        self.actions.write().remove(name)
    }
}

impl ResourceRegistry for SimInput {
    fn lookup(&self, name: &str) -> Option<Arc<dyn ResourceHandle>> {
        self.action(name)
            .map(|action| action as Arc<dyn ResourceHandle>)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Localization
// ─────────────────────────────────────────────────────────────────────────────

/// Collects dictionary sources per locale.
#[derive(Default)]
pub struct SimLocalization {
    sources: Mutex<Vec<(String, Arc<dyn DictionarySource>)>>,
}

impl SimLocalization {
    /// Returns the registered locales in registration order.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        self.sources
            .lock()
            .iter()
            .map(|(locale, _)| locale.clone())
            .collect()
    }

    /// Looks `id` up in the sources of `locale`, latest source first.
    #[must_use]
    pub fn lookup(&self, locale: &str, id: &str) -> Option<String> {
        self.sources
            .lock()
            .iter()
            .rev()
            .filter(|(registered, _)| registered == locale)
            .find_map(|(_, source)| {
                source
                    .read_entries()
                    .into_iter()
                    .find(|(entry, _)| entry == id)
                    .map(|(_, text)| text)
            })
    }
}

impl LocalizationManager for SimLocalization {
    fn add_source(&self, locale: &str, source: Arc<dyn DictionarySource>) {
        self.sources.lock().push((locale.to_string(), source));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Browser
// ─────────────────────────────────────────────────────────────────────────────

/// Records opened links; an offline browser refuses them.
#[derive(Default)]
pub struct SimBrowser {
    opened: Mutex<Vec<String>>,
    offline: AtomicBool,
}

impl SimBrowser {
    /// Returns every link opened so far.
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// Makes later opens fail.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl UrlOpener for SimBrowser {
    fn open(&self, url: &str) -> Result<(), String> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(format!("cannot reach {url}"));
        }
        self.opened.lock().push(url.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SimHost
// ─────────────────────────────────────────────────────────────────────────────

/// The services a running game would provide to the mod.
pub struct SimHost {
    /// Input actions.
    pub input: Arc<SimInput>,
    /// Localization sources.
    pub localization: Arc<SimLocalization>,
    /// Link opener.
    pub browser: Arc<SimBrowser>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    /// Creates services with the example mod's three input actions declared.
    #[must_use]
    pub fn new() -> Self {
        let input = Arc::new(SimInput::new());
        input.register(crate::BUTTON_ACTION, InputValue::Scalar(0.0));
        input.register(crate::AXIS_ACTION, InputValue::Scalar(0.0));
        input.register(crate::VECTOR_ACTION, InputValue::Vector { x: 0.0, y: 0.0 });
        Self {
            input,
            localization: Arc::new(SimLocalization::default()),
            browser: Arc::new(SimBrowser::default()),
        }
    }

    /// Installs the services as host APIs. Call before `finish()`.
    pub fn install(&self, host: &mut ModHost) {
        host.insert_api(RegistryAPI::new(
            Arc::clone(&self.input) as Arc<dyn ResourceRegistry>
        ));
        host.insert_api(LocalizationAPI::new(
            Arc::clone(&self.localization) as Arc<dyn LocalizationManager>
        ));
        host.insert_api(UrlOpenerAPI::new(
            Arc::clone(&self.browser) as Arc<dyn UrlOpener>
        ));
    }

    /// Returns the action `name`.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<Arc<SimAction>> {
        self.input.action(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_actions_ignore_input() {
        let action = SimAction::new("Jump", InputValue::Scalar(0.0));
        assert!(!action.press());
        action.set_enabled(true);
        assert!(action.press());
        assert_eq!(action.read_value(), InputValue::Scalar(0.0));
    }

    #[test]
    fn detach_of_unknown_callback_fails() {
        let action = SimAction::new("Jump", InputValue::Scalar(0.0));
        let callback: InteractionCallback = Arc::new(|_, _| {});
        assert_eq!(
            action.detach(&callback),
            Err(HandleError::NotAttached("Jump".into()))
        );
    }

    #[test]
    fn offline_browser_refuses() {
        let browser = SimBrowser::default();
        browser.set_offline(true);
        assert!(browser.open("https://example.com").is_err());
        assert!(browser.opened().is_empty());
    }
}
