//! The mod host context.
//!
//! [`ModHost`] is the explicitly constructed context a mod lives in. The
//! embedding application (the game, or a test driver) owns it and forwards
//! its own lifecycle into it:
//!
//! ```text
//! finish() ─► preload(signal) ─► load_complete(signal) ─► tick::<P>()* ─┐
//!               ▲                                                       │
//!               └───────────────── next load cycle ◄────────────────────┤
//!                                                          dispose() ◄──┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Dependency resolution** - plugins are validated and topologically
//!    sorted in [`finish()`](ModHost::finish)
//! 2. **Build / Ready** - `build()` then `ready()` in dependency order
//! 3. **Load cycles** - [`preload()`](ModHost::preload) and
//!    [`load_complete()`](ModHost::load_complete) reach every plugin in
//!    dependency order
//! 4. **Ticks** - [`tick::<P>()`](ModHost::tick) reaches only the plugins
//!    that registered for `P`
//! 5. **Dispose** - `cleanup()` in reverse order; the host is inert afterwards
//!
//! Lifecycle calls made before `finish()` or after `dispose()` are ignored
//! with a warning.

use crate::api::API;
use crate::mode::PhaseSignal;
use crate::plugin::{Plugin, PluginId, Plugins, ScheduleId};
use crate::resource::{GlobalResource, Globals};
use core::any::TypeId;
use hashbrown::{HashMap, HashSet};
use std::collections::VecDeque;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// ModHost
// ─────────────────────────────────────────────────────────────────────────────

/// Type-erased API for dynamic storage.
type BoxedAPI = Box<dyn core::any::Any + Send + Sync>;

/// Build state of the host.
///
/// Progresses linearly: `NotStarted` → `Building` → `Built`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BuildState {
    #[default]
    NotStarted,
    /// `finish()` is executing.
    Building,
    Built,
}

/// The context that orchestrates a mod's plugins.
///
/// # Example
///
/// ```
/// use modgate_system::host::ModHost;
/// use modgate_system::mode::{ModeSet, PhaseSignal, Purpose};
/// use modgate_system::phase::MainLoop;
///
/// let mut host = ModHost::new();
/// host.finish();
///
/// let signal = PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME);
/// host.preload(&signal);
/// host.load_complete(&signal);
/// host.tick::<MainLoop>();
/// host.dispose();
///
/// assert!(host.is_disposed());
/// assert_eq!(host.last_signal(), Some(signal));
/// ```
pub struct ModHost {
    /// Host-lifetime data, see [`insert_global()`](Self::insert_global).
    globals: Globals,

    /// Capability registries, see [`insert_api()`](Self::insert_api).
    apis: HashMap<TypeId, BoxedAPI>,

    /// Plugins added but not yet built.
    pending_plugins: Vec<PluginEntry>,

    /// Plugins that have been built, in dependency order.
    built_plugins: Vec<PluginEntry>,

    /// IDs of every plugin added so far (for duplicate detection).
    plugin_ids: HashSet<PluginId>,

    /// Maps each schedule to the indices of plugins that registered for it.
    ///
    /// Indices follow `built_plugins`, so ticks run in dependency order.
    schedule_registry: HashMap<ScheduleId, Vec<usize>>,

    build_state: BuildState,

    disposed: bool,

    /// The most recent signal delivered by `preload` or `load_complete`.
    last_signal: Option<PhaseSignal>,
}

/// Internal entry for a registered plugin.
struct PluginEntry {
    id: PluginId,
    plugin: Arc<dyn Plugin>,
    /// Cached for log and panic messages.
    name: String,
}

impl Default for ModHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ModHost {
    /// Creates an empty host with no plugins, APIs or globals.
    #[must_use]
    pub fn new() -> Self {
        Self {
            globals: Globals::new(),
            apis: HashMap::new(),
            pending_plugins: Vec::new(),
            built_plugins: Vec::new(),
            plugin_ids: HashSet::new(),
            schedule_registry: HashMap::new(),
            build_state: BuildState::NotStarted,
            disposed: false,
            last_signal: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Plugin Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a plugin or a plugin group.
    ///
    /// # Panics
    ///
    /// Panics if a unique plugin is added twice.
    pub fn add_plugins<P: Plugins>(&mut self, plugins: P) -> &mut Self {
        plugins.add_to_host(self);
        self
    }

    /// Adds a boxed plugin with its captured ID.
    pub(crate) fn add_plugin_boxed(&mut self, id: PluginId, plugin: Box<dyn Plugin>) {
        let name = plugin.name().to_string();

        if plugin.is_unique() && self.plugin_ids.contains(&id) {
            panic!(
                "Plugin '{}' is unique and was already added.\n\
                 If you intended to add this plugin multiple times, \
                 set `is_unique()` to return `false`.",
                name
            );
        }

        let entry = PluginEntry {
            id,
            plugin: Arc::from(plugin),
            name,
        };

        match self.build_state {
            BuildState::NotStarted => {
                self.plugin_ids.insert(id);
                self.pending_plugins.push(entry);
            }
            BuildState::Building => {
                self.plugin_ids.insert(id);
                let plugin = Arc::clone(&entry.plugin);
                plugin.build(self);
                self.built_plugins.push(entry);
            }
            BuildState::Built => {
                tracing::warn!(
                    plugin = %entry.name,
                    "plugin added after finish() is ignored"
                );
            }
        }
    }

    /// Returns true if a plugin of type `P` has been added.
    #[must_use]
    pub fn has_plugin<P: Plugin>(&self) -> bool {
        self.plugin_ids.contains(&PluginId::of::<P>())
    }

    /// Returns the number of built plugins.
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.built_plugins.len()
    }

    /// Returns the names of built plugins in dependency order.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.built_plugins.iter().map(|e| e.name.as_str()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Global Resources
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts a global resource, returning the value it replaced.
    ///
    /// # Example
    ///
    /// ```ignore
    /// host.insert_global(ModInfo::new("MyMod", "1.0.0"));
    /// ```
    pub fn insert_global<R: GlobalResource>(&mut self, resource: R) -> Option<R> {
        self.globals.insert(resource)
    }

    /// Returns true if a global resource of type `R` exists.
    #[must_use]
    pub fn contains_global<R: GlobalResource>(&self) -> bool {
        self.globals.contains::<R>()
    }

    /// Gets a global resource.
    #[must_use]
    pub fn get_global<R: GlobalResource>(&self) -> Option<&R> {
        self.globals.get::<R>()
    }

    /// Gets a global resource mutably.
    #[must_use]
    pub fn get_global_mut<R: GlobalResource>(&mut self) -> Option<&mut R> {
        self.globals.get_mut::<R>()
    }

    /// Removes a global resource and returns it.
    pub fn remove_global<R: GlobalResource>(&mut self) -> Option<R> {
        self.globals.remove::<R>()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API Access
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts an API, returning the one it replaced.
    ///
    /// The host application installs its collaborators this way before
    /// `finish()`; plugins install theirs in `build()`.
    pub fn insert_api<A: API>(&mut self, api: A) -> Option<A> {
        let boxed: BoxedAPI = Box::new(api);
        self.apis
            .insert(TypeId::of::<A>(), boxed)
            .and_then(|old| old.downcast::<A>().ok())
            .map(|b| *b)
    }

    /// Gets a reference to an API.
    #[must_use]
    pub fn api<A: API>(&self) -> Option<&A> {
        self.apis
            .get(&TypeId::of::<A>())
            .and_then(|boxed| boxed.downcast_ref::<A>())
    }

    /// Returns true if an API of type `A` exists.
    #[must_use]
    pub fn contains_api<A: API>(&self) -> bool {
        self.apis.contains_key(&TypeId::of::<A>())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns whether `finish()` has completed.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.build_state == BuildState::Built
    }

    /// Returns whether `dispose()` has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns the last signal delivered by `preload` or `load_complete`.
    #[must_use]
    pub fn last_signal(&self) -> Option<PhaseSignal> {
        self.last_signal
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Builds all plugins and readies the host. This is the mod's "create".
    ///
    /// # Panics
    ///
    /// - If a plugin's dependency was not added
    /// - If plugins depend on each other in a cycle
    /// - If called more than once
    pub fn finish(&mut self) {
        if self.build_state != BuildState::NotStarted {
            panic!("ModHost::finish() was already called. Cannot build twice.");
        }

        let sorted = self.sort_plugins_by_dependencies();

        self.build_state = BuildState::Building;
        for entry in sorted {
            tracing::debug!(plugin = %entry.name, "building plugin");
            let plugin = Arc::clone(&entry.plugin);
            plugin.build(self);
            self.built_plugins.push(entry);
        }

        for plugin in self.snapshot() {
            plugin.ready(self);
        }

        self.build_schedule_registry();
        self.build_state = BuildState::Built;
        tracing::debug!(plugins = self.built_plugins.len(), "mod host ready");
    }

    /// Forwards a preload signal to every plugin in dependency order.
    pub fn preload(&mut self, signal: &PhaseSignal) {
        if !self.accepts("preload") {
            return;
        }
        self.last_signal = Some(*signal);
        for plugin in self.snapshot() {
            plugin.preload(self, signal);
        }
    }

    /// Forwards a load-complete signal to every plugin in dependency order.
    pub fn load_complete(&mut self, signal: &PhaseSignal) {
        if !self.accepts("load_complete") {
            return;
        }
        self.last_signal = Some(*signal);
        for plugin in self.snapshot() {
            plugin.load_complete(self, signal);
        }
    }

    /// Ticks the update phase `P`.
    ///
    /// Only plugins that returned `P` from
    /// [`Plugin::tick_schedules()`] receive [`Plugin::update()`].
    pub fn tick<P: 'static>(&mut self) {
        self.tick_schedule(ScheduleId::of::<P>());
    }

    /// Ticks the given schedule. Non-generic form of [`tick()`](Self::tick).
    pub fn tick_schedule(&mut self, schedule: ScheduleId) {
        if !self.accepts("tick") {
            return;
        }
        let Some(indices) = self.schedule_registry.get(&schedule) else {
            return;
        };
        let plugins: Vec<Arc<dyn Plugin>> = indices
            .iter()
            .map(|&idx| Arc::clone(&self.built_plugins[idx].plugin))
            .collect();
        for plugin in plugins {
            plugin.update(self, schedule);
        }
    }

    /// Cleans up all plugins in reverse dependency order.
    ///
    /// Terminal: every later lifecycle call is ignored.
    pub fn dispose(&mut self) {
        if !self.accepts("dispose") {
            return;
        }
        self.disposed = true;
        for plugin in self.snapshot().into_iter().rev() {
            plugin.cleanup(self);
        }
        tracing::debug!("mod host disposed");
    }

    /// Returns false (and warns) if the host cannot take lifecycle calls.
    fn accepts(&self, call: &'static str) -> bool {
        if self.disposed {
            tracing::warn!(call, "mod host already disposed; call ignored");
            return false;
        }
        if self.build_state != BuildState::Built {
            tracing::warn!(call, "mod host not finished; call ignored");
            return false;
        }
        true
    }

    /// Clones the built plugin list so plugins can receive `&mut self`.
    fn snapshot(&self) -> Vec<Arc<dyn Plugin>> {
        self.built_plugins
            .iter()
            .map(|entry| Arc::clone(&entry.plugin))
            .collect()
    }

    fn build_schedule_registry(&mut self) {
        self.schedule_registry.clear();
        for (idx, entry) in self.built_plugins.iter().enumerate() {
            for schedule in entry.plugin.tick_schedules() {
                let indices = self.schedule_registry.entry(schedule).or_default();
                if !indices.contains(&idx) {
                    indices.push(idx);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal: Dependency Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Sorts pending plugins by dependencies (Kahn's algorithm).
    ///
    /// Plugins without ordering constraints keep the order they were added.
    ///
    /// # Panics
    ///
    /// - If a plugin's dependency is not found
    /// - If there is a circular dependency
    fn sort_plugins_by_dependencies(&mut self) -> Vec<PluginEntry> {
        let pending = core::mem::take(&mut self.pending_plugins);
        let n = pending.len();

        let mut by_id: HashMap<PluginId, Vec<usize>> = HashMap::new();
        for (i, entry) in pending.iter().enumerate() {
            by_id.entry(entry.id).or_default().push(i);
        }

        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, entry) in pending.iter().enumerate() {
            for dep in entry.plugin.dependencies() {
                let Some(dep_indices) = by_id.get(&dep) else {
                    panic!(
                        "Plugin '{}' requires '{}' which was not added.\n\
                         Add {} before {}, or use a plugin group that includes it.",
                        entry.name,
                        dep.type_name(),
                        dep.type_name(),
                        entry.name
                    );
                };
                for &dep_idx in dep_indices {
                    dependents[dep_idx].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order: Vec<usize> = Vec::with_capacity(n);

        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for &dependent in &dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != n {
            let in_cycle: Vec<&str> = in_degree
                .iter()
                .enumerate()
                .filter(|(_, deg)| **deg > 0)
                .map(|(i, _)| pending[i].name.as_str())
                .collect();
            panic!(
                "Circular dependency detected among plugins: {:?}\n\
                 Break the cycle by extracting shared functionality into a separate plugin.",
                in_cycle
            );
        }

        let mut slots: Vec<Option<PluginEntry>> = pending.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }
}
