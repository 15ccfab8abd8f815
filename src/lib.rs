//! Mode-gated lifecycle controllers for host-loaded game mods.
//!
//! A mod is a set of plugins on a [`ModHost`](modgate_system::host::ModHost).
//! Each gameplay system is a [`Controller`](modgate_lifecycle::controller::Controller)
//! whose gate opens only in the modes it allows, runs a one-shot action after
//! each load and releases its input subscriptions on dispose.
//!
//! See the `example` crate for a complete mod.

pub use modgate_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use modgate_internal::prelude::*;
}
