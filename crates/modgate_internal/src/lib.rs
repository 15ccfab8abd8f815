//! # modgate Internal Library
//!
//! Re-exports the core modgate crates for convenience.

/// Layer 1: host framework (plugins, schedules, modes).
pub use modgate_system;

/// Layer 2: gated lifecycle controllers and subscriptions.
pub use modgate_lifecycle;

/// Infrastructure plugins (metadata, tracing, settings, locales).
pub use modgate_core_plugins;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use modgate_core_plugins::{DefaultPlugins, MinimalPlugins, ModInfo, ModInfoPlugin};
    pub use modgate_lifecycle::prelude::*;
    pub use modgate_system::prelude::*;
}
