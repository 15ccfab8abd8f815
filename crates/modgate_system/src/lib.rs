//! The host framework for modgate (Layer 1).
//!
//! `modgate_system` provides the primitives every mod is assembled from:
//!
//! - [`api`] - API trait for capability registration
//! - [`mode`] - Operating modes, load purposes and phase signals
//! - [`phase`] - Update phase markers the host ticks
//! - [`plugin`] - Plugin trait for extensible functionality
//! - [`resource`] - Global resource marker
//! - [`host`] - The mod host context driving the plugin lifecycle
//!
//! # Architecture
//!
//! This crate is Layer 1 of modgate:
//!
//! - **Layer 1** (`modgate_system`): host context, plugins, modes (this crate)
//! - **Layer 2** (`modgate_lifecycle`): gated controllers and subscriptions
//! - **Layer 3** (plugins): concrete mods, settings, locales
//!
//! # Example
//!
//! ```
//! use modgate_system::host::ModHost;
//! use modgate_system::mode::{ModeSet, PhaseSignal, Purpose};
//! use modgate_system::plugin::Plugin;
//! use modgate_system::resource::GlobalResource;
//!
//! #[derive(Default)]
//! struct MyConfig { frames: u32 }
//! impl GlobalResource for MyConfig {}
//!
//! struct MyPlugin;
//!
//! impl Plugin for MyPlugin {
//!     fn build(&self, host: &mut ModHost) {
//!         host.insert_global(MyConfig::default());
//!     }
//! }
//!
//! let mut host = ModHost::new();
//! host.add_plugins(MyPlugin);
//! host.finish();
//! host.preload(&PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME));
//! host.dispose();
//! ```

/// API trait for capability registration.
pub mod api;

/// The mod host context.
pub mod host;

/// Operating modes and phase signals.
pub mod mode;

/// Update phase markers.
pub mod phase;

/// Plugin trait for extensible functionality.
pub mod plugin;

/// Global resource marker.
pub mod resource;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::api::*;
    pub use crate::host::*;
    pub use crate::mode::*;
    pub use crate::phase::*;
    pub use crate::plugin::*;
    pub use crate::resource::*;
}
