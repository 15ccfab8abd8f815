//! Named resource subscriptions.
//!
//! The host owns input/event sources ([`ResourceHandle`]s) and exposes them
//! through a [`ResourceRegistry`] installed as the [`RegistryAPI`]. A
//! [`SubscriptionManager`] attaches callbacks to handles by name and keeps an
//! owned table of what it attached, so every attach has exactly one matching
//! detach and nothing stays attached after [`dispose_all`].
//!
//! Handles are held weakly. A callback never receives the manager or its
//! controller, only the handle that fired, so a lingering host registration
//! cannot keep a disposed controller alive.
//!
//! [`dispose_all`]: SubscriptionManager::dispose_all

use core::fmt;
use std::sync::{Arc, Weak};

use modgate_system::api::API;
use modgate_system::host::ModHost;

use crate::observers::{self, LifecycleEvent, WarningKind};

// ─────────────────────────────────────────────────────────────────────────────
// Host-side interface
// ─────────────────────────────────────────────────────────────────────────────

/// Interaction phase reported by an input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPhase {
    /// The action is armed but idle.
    Waiting,
    /// The interaction began.
    Started,
    /// The interaction completed.
    Performed,
    /// The interaction was cancelled.
    Canceled,
    /// The action is disabled.
    Disabled,
}

impl InputPhase {
    /// Returns the phase name, e.g. `"Performed"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            InputPhase::Waiting => "Waiting",
            InputPhase::Started => "Started",
            InputPhase::Performed => "Performed",
            InputPhase::Canceled => "Canceled",
            InputPhase::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for InputPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current value of an input action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    /// A button press strength or a single axis.
    Scalar(f32),
    /// A two-axis value such as a stick or WASD composite.
    Vector {
        /// Horizontal component.
        x: f32,
        /// Vertical component.
        y: f32,
    },
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Scalar(value) => write!(f, "{value}"),
            InputValue::Vector { x, y } => write!(f, "({x:.2}, {y:.2})"),
        }
    }
}

/// Error reported by the host when attaching or detaching fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// The underlying source no longer exists.
    #[error("resource '{0}' is unavailable")]
    Unavailable(String),
    /// The callback being detached is not attached to this handle.
    #[error("callback is not attached to '{0}'")]
    NotAttached(String),
    /// Any other host-side failure.
    #[error("host rejected the operation: {0}")]
    Host(String),
}

/// Callback attached to a handle.
///
/// Receives the handle that fired and the interaction phase. Identity is
/// pointer identity of the `Arc`, which is how handles match a detach to
/// its attach.
pub type InteractionCallback = Arc<dyn Fn(&dyn ResourceHandle, InputPhase) + Send + Sync>;

/// Wraps a closure as an [`InteractionCallback`].
///
/// # Example
///
/// ```
/// use modgate_lifecycle::subscription::interaction;
///
/// let _log_input = interaction(|handle, phase| {
///     tracing::info!("[{}] On{} {}", handle.name(), phase, handle.read_value());
/// });
/// ```
pub fn interaction<F>(callback: F) -> InteractionCallback
where
    F: Fn(&dyn ResourceHandle, InputPhase) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// An input or event source owned by the host.
pub trait ResourceHandle: Send + Sync {
    /// Returns the name the handle is registered under.
    fn name(&self) -> &str;

    /// Enables or disables the source.
    fn set_enabled(&self, enabled: bool);

    /// Returns whether the source is enabled.
    fn is_enabled(&self) -> bool;

    /// Attaches an interaction callback.
    ///
    /// # Errors
    ///
    /// Returns a [`HandleError`] if the host refuses the attachment.
    fn attach(&self, callback: InteractionCallback) -> Result<(), HandleError>;

    /// Detaches a previously attached callback (matched by `Arc` identity).
    ///
    /// # Errors
    ///
    /// Returns a [`HandleError`] if the callback is not attached or the host
    /// fails.
    fn detach(&self, callback: &InteractionCallback) -> Result<(), HandleError>;

    /// Reads the current value of the source.
    fn read_value(&self) -> InputValue;
}

/// The host's lookup of resource handles by name.
pub trait ResourceRegistry: Send + Sync {
    /// Returns the handle registered under `name`.
    fn lookup(&self, name: &str) -> Option<Arc<dyn ResourceHandle>>;
}

/// The host's [`ResourceRegistry`], installed as an API.
///
/// # Example
///
/// ```ignore
/// host.insert_api(RegistryAPI::new(Arc::new(game_input_registry)));
/// ```
pub struct RegistryAPI {
    registry: Arc<dyn ResourceRegistry>,
}

impl API for RegistryAPI {}

impl RegistryAPI {
    /// Wraps a registry.
    #[must_use]
    pub fn new(registry: Arc<dyn ResourceRegistry>) -> Self {
        Self { registry }
    }

    /// Looks up a handle by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ResourceHandle>> {
        self.registry.lookup(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscription
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of a [`SubscriptionManager`]'s table.
///
/// A record exists only while its callback is attached: it is pushed after a
/// successful attach and removed before the detach.
pub struct Subscription {
    name: String,
    handle: Weak<dyn ResourceHandle>,
    callback: InteractionCallback,
}

impl Subscription {
    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the handle if the host still holds it.
    #[must_use]
    pub fn handle(&self) -> Option<Arc<dyn ResourceHandle>> {
        self.handle.upgrade()
    }

    /// Returns true if `callback` is the one this subscription attached.
    #[must_use]
    pub fn owns(&self, callback: &InteractionCallback) -> bool {
        Arc::ptr_eq(&self.callback, callback)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("handle_alive", &(self.handle.strong_count() > 0))
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SubscriptionManager
// ─────────────────────────────────────────────────────────────────────────────

/// Owned table of resource subscriptions for one controller.
///
/// Every failure is caught at the call into the host and reported as a
/// [`LifecycleEvent::Warning`]; no method panics or returns an error.
///
/// # Example
///
/// ```ignore
/// let mut subs = SubscriptionManager::new("InputLogger");
/// subs.subscribe(&host, "ButtonBinding", interaction(|handle, phase| { /* ... */ }));
/// assert!(subs.is_subscribed("ButtonBinding"));
///
/// subs.dispose_all(&host);
/// assert!(subs.is_empty());
/// ```
#[derive(Debug)]
pub struct SubscriptionManager {
    owner: String,
    subscriptions: Vec<Subscription>,
}

impl SubscriptionManager {
    /// Creates an empty table owned by the controller `owner`.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            subscriptions: Vec::new(),
        }
    }

    /// Returns the owning controller's name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Returns true if `name` is subscribed.
    #[must_use]
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the subscription for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.name == name)
    }

    /// Iterates subscribed resource names in subscription order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subscriptions.iter().map(|s| s.name.as_str())
    }

    /// Subscribes `callback` to the resource `name`.
    ///
    /// Enables the handle and attaches the callback. An existing subscription
    /// for `name` is detached first, so exactly one callback stays attached.
    ///
    /// Returns false, with a warning and no recorded state, if the registry
    /// or the resource is missing or the host rejects the attachment.
    pub fn subscribe(&mut self, host: &ModHost, name: &str, callback: InteractionCallback) -> bool {
        let Some(registry) = host.api::<RegistryAPI>() else {
            self.warn(
                host,
                WarningKind::MissingRegistry,
                format!("no resource registry; cannot subscribe to '{name}'"),
            );
            return false;
        };
        let Some(handle) = registry.lookup(name) else {
            self.warn(
                host,
                WarningKind::MissingResource,
                format!("resource '{name}' not found; subscription skipped"),
            );
            return false;
        };

        if let Some(pos) = self.position(name) {
            let previous = self.subscriptions.remove(pos);
            if let Some(old_handle) = previous.handle.upgrade()
                && let Err(err) = old_handle.detach(&previous.callback)
            {
                self.warn(
                    host,
                    WarningKind::DetachFailed,
                    format!("replacing '{name}': {err}"),
                );
            }
        }

        handle.set_enabled(true);
        if let Err(err) = handle.attach(Arc::clone(&callback)) {
            handle.set_enabled(false);
            self.warn(
                host,
                WarningKind::AttachFailed,
                format!("subscribing to '{name}': {err}"),
            );
            return false;
        }

        self.subscriptions.push(Subscription {
            name: name.to_string(),
            handle: Arc::downgrade(&handle),
            callback,
        });
        observers::emit(
            host,
            &LifecycleEvent::Subscribed {
                system: self.owner.clone(),
                resource: name.to_string(),
            },
        );
        true
    }

    /// Releases the subscription to `name`.
    ///
    /// The record is removed before anything else, so a second call is a
    /// no-op. The handle is resolved from the weak reference first and from a
    /// fresh registry lookup second; it is then detached and disabled. An
    /// unresolvable handle or a failed detach is a warning.
    ///
    /// Returns false if `name` was not subscribed.
    pub fn unsubscribe(&mut self, host: &ModHost, name: &str) -> bool {
        let Some(pos) = self.position(name) else {
            return false;
        };
        let record = self.subscriptions.remove(pos);

        let handle = record.handle.upgrade().or_else(|| {
            host.api::<RegistryAPI>()
                .and_then(|registry| registry.lookup(name))
        });

        match handle {
            Some(handle) => {
                if let Err(err) = handle.detach(&record.callback) {
                    self.warn(
                        host,
                        WarningKind::DetachFailed,
                        format!("unsubscribing from '{name}': {err}"),
                    );
                }
                handle.set_enabled(false);
            }
            None => self.warn(
                host,
                WarningKind::MissingResource,
                format!("resource '{name}' no longer resolves; dropping its subscription"),
            ),
        }

        observers::emit(
            host,
            &LifecycleEvent::Unsubscribed {
                system: self.owner.clone(),
                resource: name.to_string(),
            },
        );
        true
    }

    /// Releases every subscription. A failure on one never stops the rest.
    ///
    /// Returns the number of subscriptions released.
    pub fn dispose_all(&mut self, host: &ModHost) -> usize {
        let names: Vec<String> = self.subscriptions.iter().map(|s| s.name.clone()).collect();
        let mut released = 0;
        for name in names {
            if self.unsubscribe(host, &name) {
                released += 1;
            }
        }
        released
    }

    /// Sets the enabled flag of every live handle without detaching.
    ///
    /// Returns the number of handles reached.
    pub fn set_all_enabled(&self, enabled: bool) -> usize {
        let mut reached = 0;
        for handle in self.subscriptions.iter().filter_map(Subscription::handle) {
            handle.set_enabled(enabled);
            reached += 1;
        }
        reached
    }

    /// Sets the enabled flag of one subscribed handle without detaching.
    ///
    /// Returns false if `name` is not subscribed or its handle is gone.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        match self.get(name).and_then(Subscription::handle) {
            Some(handle) => {
                handle.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.subscriptions.iter().position(|s| s.name == name)
    }

    fn warn(&self, host: &ModHost, kind: WarningKind, message: String) {
        observers::warn(host, &self.owner, kind, message);
    }
}
