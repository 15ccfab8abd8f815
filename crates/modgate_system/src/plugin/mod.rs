//! Plugin system for composing a mod.
//!
//! A mod is a set of plugins added to a [`ModHost`]. Metadata, logging,
//! settings, locales and every gated system are delivered as plugins, and
//! the host forwards its lifecycle to them in dependency order.
//!
//! # Example
//!
//! ```
//! use modgate_system::host::ModHost;
//! use modgate_system::plugin::{Plugin, PluginId};
//! use modgate_system::resource::GlobalResource;
//!
//! struct MetadataPlugin;
//! impl Plugin for MetadataPlugin {
//!     fn build(&self, _host: &mut ModHost) {}
//! }
//!
//! struct Greeting(String);
//! impl GlobalResource for Greeting {}
//!
//! struct GreetingPlugin {
//!     text: String,
//! }
//!
//! impl Plugin for GreetingPlugin {
//!     fn build(&self, host: &mut ModHost) {
//!         host.insert_global(Greeting(self.text.clone()));
//!     }
//!
//!     fn dependencies(&self) -> Vec<PluginId> {
//!         vec![PluginId::of::<MetadataPlugin>()]
//!     }
//! }
//!
//! let mut host = ModHost::new();
//! host.add_plugins(MetadataPlugin)
//!     .add_plugins(GreetingPlugin { text: "hello".into() });
//! host.finish();
//! assert!(host.contains_global::<Greeting>());
//! ```

mod schedule;

pub use schedule::{IntoScheduleIds, Schedule, ScheduleId};

use core::any::TypeId;

use crate::host::ModHost;
use crate::mode::PhaseSignal;

// ─────────────────────────────────────────────────────────────────────────────
// PluginId
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for a plugin type.
///
/// Used for dependency resolution and duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginId {
    type_id: TypeId,
    type_name: &'static str,
}

impl PluginId {
    /// Creates a `PluginId` for the given plugin type.
    #[must_use]
    pub fn of<P: Plugin>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            type_name: core::any::type_name::<P>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A unit of mod functionality driven by the host lifecycle.
///
/// The host calls into plugins in a fixed order:
///
/// 1. **Build** - `build()` in dependency order, during [`ModHost::finish`]
/// 2. **Ready** - `ready()` in dependency order, right after build
/// 3. **Load cycles** - `preload()` then `load_complete()` each time the host
///    loads a session; a second `preload()` without `load_complete()` means
///    the previous cycle was aborted
/// 4. **Ticks** - `update()` for each update phase the plugin registered in
///    [`tick_schedules()`](Self::tick_schedules)
/// 5. **Dispose** - `cleanup()` in reverse dependency order
///
/// # Example
///
/// ```ignore
/// impl Plugin for WeatherPlugin {
///     fn build(&self, host: &mut ModHost) {
///         host.insert_global(WeatherConfig::default());
///     }
///
///     fn load_complete(&self, host: &mut ModHost, signal: &PhaseSignal) {
///         tracing::info!(mode = %signal.mode(), "weather ready");
///     }
///
///     fn tick_schedules(&self) -> Vec<ScheduleId> {
///         vec![ScheduleId::of::<MainLoop>()]
///     }
///
///     fn update(&self, host: &mut ModHost, _phase: ScheduleId) {
///         // per-frame work
///     }
/// }
/// ```
pub trait Plugin: Send + Sync + 'static {
    /// Configures the host. Called once during [`ModHost::finish`].
    ///
    /// Register APIs and globals here. Plugins added from inside `build()`
    /// are built immediately.
    fn build(&self, host: &mut ModHost);

    /// Called after every plugin has been built.
    ///
    /// Use this for work that depends on other plugins' APIs.
    fn ready(&self, _host: &mut ModHost) {}

    /// Called when the host starts loading a session.
    fn preload(&self, _host: &mut ModHost, _signal: &PhaseSignal) {}

    /// Called when the host finished loading a session.
    fn load_complete(&self, _host: &mut ModHost, _signal: &PhaseSignal) {}

    /// Called when an update phase this plugin registered for is ticked.
    ///
    /// Only called for schedules returned by
    /// [`tick_schedules()`](Self::tick_schedules).
    fn update(&self, _host: &mut ModHost, _phase: ScheduleId) {}

    /// Called when the host disposes the mod, in **reverse** dependency order.
    fn cleanup(&self, _host: &mut ModHost) {}

    /// Declares which update phases this plugin wants to be ticked on.
    fn tick_schedules(&self) -> Vec<ScheduleId> {
        Vec::new()
    }

    /// Returns the plugin's name for logs and error messages.
    ///
    /// Defaults to the type name.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Declares plugins that must be added before this one.
    ///
    /// [`ModHost::finish`] panics if a dependency is missing.
    fn dependencies(&self) -> Vec<PluginId> {
        Vec::new()
    }

    /// Returns true if this plugin can only be added once.
    ///
    /// Defaults to `true`; adding a unique plugin twice panics.
    fn is_unique(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugins Trait (for add_plugins polymorphism)
// ─────────────────────────────────────────────────────────────────────────────

/// Types that can be passed to [`ModHost::add_plugins`].
///
/// Implemented for single plugins and for [`PluginGroupBuilder`].
pub trait Plugins {
    /// Adds these plugins to the host.
    fn add_to_host(self, host: &mut ModHost);
}

impl<P: Plugin> Plugins for P {
    fn add_to_host(self, host: &mut ModHost) {
        host.add_plugin_boxed(PluginId::of::<P>(), Box::new(self));
    }
}

impl Plugins for PluginGroupBuilder {
    fn add_to_host(self, host: &mut ModHost) {
        for boxed in self.plugins {
            host.add_plugin_boxed(boxed.id, boxed.plugin);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PluginGroup Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A bundle of plugins added together.
///
/// # Example
///
/// ```ignore
/// host.add_plugins(
///     DefaultPlugins
///         .build()
///         .disable::<LocalePlugin>()
///         .add(MySystemPlugin),
/// );
/// ```
pub trait PluginGroup {
    /// Returns the plugins in this group.
    fn build(self) -> PluginGroupBuilder;
}

// ─────────────────────────────────────────────────────────────────────────────
// PluginGroupBuilder
// ─────────────────────────────────────────────────────────────────────────────

/// A boxed plugin with the [`PluginId`] captured before boxing.
pub(crate) struct BoxedPlugin {
    pub(crate) id: PluginId,
    pub(crate) plugin: Box<dyn Plugin>,
}

/// Builder for customizing plugin groups.
#[derive(Default)]
pub struct PluginGroupBuilder {
    pub(crate) plugins: Vec<BoxedPlugin>,
}

impl PluginGroupBuilder {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Adds a plugin to the end of the group.
    #[must_use]
    #[expect(
        clippy::should_implement_trait,
        reason = "This is a builder method, not std::ops::Add"
    )]
    pub fn add<P: Plugin>(mut self, plugin: P) -> Self {
        self.plugins.push(BoxedPlugin {
            id: PluginId::of::<P>(),
            plugin: Box::new(plugin),
        });
        self
    }

    /// Adds a plugin before `Target`, or at the front if `Target` is absent.
    #[must_use]
    pub fn add_before<P: Plugin, Target: Plugin>(mut self, plugin: P) -> Self {
        let position = self.position_of::<Target>().unwrap_or(0);
        self.plugins.insert(
            position,
            BoxedPlugin {
                id: PluginId::of::<P>(),
                plugin: Box::new(plugin),
            },
        );
        self
    }

    /// Adds a plugin after `Target`, or at the end if `Target` is absent.
    #[must_use]
    pub fn add_after<P: Plugin, Target: Plugin>(mut self, plugin: P) -> Self {
        let position = self
            .position_of::<Target>()
            .map_or(self.plugins.len(), |i| i + 1);
        self.plugins.insert(
            position,
            BoxedPlugin {
                id: PluginId::of::<P>(),
                plugin: Box::new(plugin),
            },
        );
        self
    }

    /// Replaces the plugin of type `P` in place, or appends it if absent.
    ///
    /// Used to configure a plugin that a group adds with defaults.
    #[must_use]
    pub fn set<P: Plugin>(mut self, plugin: P) -> Self {
        let boxed = BoxedPlugin {
            id: PluginId::of::<P>(),
            plugin: Box::new(plugin),
        };
        match self.position_of::<P>() {
            Some(position) => self.plugins[position] = boxed,
            None => self.plugins.push(boxed),
        }
        self
    }

    /// Removes every plugin of type `P` from the group.
    #[must_use]
    pub fn disable<P: Plugin>(mut self) -> Self {
        let id = PluginId::of::<P>();
        self.plugins.retain(|p| p.id != id);
        self
    }

    /// Returns true if the group holds a plugin of type `P`.
    #[must_use]
    pub fn contains<P: Plugin>(&self) -> bool {
        self.position_of::<P>().is_some()
    }

    /// Returns the number of plugins in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if the group contains no plugins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn position_of<P: Plugin>(&self) -> Option<usize> {
        let id = PluginId::of::<P>();
        self.plugins.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PluginA;
    impl Plugin for PluginA {
        fn build(&self, _host: &mut ModHost) {}
    }

    struct PluginB;
    impl Plugin for PluginB {
        fn build(&self, _host: &mut ModHost) {}
        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<PluginA>()]
        }
    }

    struct PluginC;
    impl Plugin for PluginC {
        fn build(&self, _host: &mut ModHost) {}
    }

    fn names(builder: &PluginGroupBuilder) -> Vec<&'static str> {
        builder
            .plugins
            .iter()
            .map(|p| p.id.type_name().rsplit("::").next().unwrap_or_default())
            .collect()
    }

    #[test]
    fn plugin_id_equality() {
        assert_eq!(PluginId::of::<PluginA>(), PluginId::of::<PluginA>());
        assert_ne!(PluginId::of::<PluginA>(), PluginId::of::<PluginB>());
        assert_eq!(PluginId::of::<PluginA>().type_id(), TypeId::of::<PluginA>());
    }

    #[test]
    fn plugin_defaults() {
        let plugin = PluginA;
        assert!(plugin.name().contains("PluginA"));
        assert!(plugin.is_unique());
        assert!(plugin.dependencies().is_empty());
        assert!(plugin.tick_schedules().is_empty());
    }

    #[test]
    fn plugin_with_dependencies() {
        assert_eq!(PluginB.dependencies(), vec![PluginId::of::<PluginA>()]);
    }

    #[test]
    fn group_add_and_disable() {
        let builder = PluginGroupBuilder::new()
            .add(PluginA)
            .add(PluginB)
            .disable::<PluginA>();

        assert_eq!(names(&builder), vec!["PluginB"]);
        assert!(!builder.contains::<PluginA>());
    }

    #[test]
    fn group_add_before_and_after() {
        let before = PluginGroupBuilder::new()
            .add(PluginA)
            .add(PluginB)
            .add_before::<_, PluginB>(PluginC);
        assert_eq!(names(&before), vec!["PluginA", "PluginC", "PluginB"]);

        let after = PluginGroupBuilder::new()
            .add(PluginA)
            .add(PluginB)
            .add_after::<_, PluginA>(PluginC);
        assert_eq!(names(&after), vec!["PluginA", "PluginC", "PluginB"]);
    }

    #[test]
    fn group_missing_target_falls_back_to_ends() {
        let before = PluginGroupBuilder::new()
            .add(PluginA)
            .add_before::<_, PluginB>(PluginC);
        assert_eq!(names(&before), vec!["PluginC", "PluginA"]);

        let after = PluginGroupBuilder::new()
            .add(PluginA)
            .add_after::<_, PluginB>(PluginC);
        assert_eq!(names(&after), vec!["PluginA", "PluginC"]);
    }

    #[test]
    fn group_set_replaces_in_place() {
        let builder = PluginGroupBuilder::new()
            .add(PluginA)
            .add(PluginB)
            .set(PluginA)
            .set(PluginC);
        assert_eq!(names(&builder), vec!["PluginA", "PluginB", "PluginC"]);
    }

    #[test]
    fn group_len_and_is_empty() {
        let empty = PluginGroupBuilder::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let two = PluginGroupBuilder::new().add(PluginA).add(PluginB);
        assert!(!two.is_empty());
        assert_eq!(two.len(), 2);
    }

    struct TestGroup;
    impl PluginGroup for TestGroup {
        fn build(self) -> PluginGroupBuilder {
            PluginGroupBuilder::new().add(PluginA).add(PluginB)
        }
    }

    #[test]
    fn plugin_group_build() {
        assert_eq!(TestGroup.build().len(), 2);
    }

    struct Repeatable;
    impl Plugin for Repeatable {
        fn build(&self, _host: &mut ModHost) {}
        fn is_unique(&self) -> bool {
            false
        }
    }

    #[test]
    fn non_unique_plugin_can_be_added_multiple_times() {
        let mut host = ModHost::new();
        host.add_plugins(Repeatable)
            .add_plugins(Repeatable)
            .add_plugins(Repeatable);
        host.finish();
        assert_eq!(host.plugin_count(), 3);
    }
}
