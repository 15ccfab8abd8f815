//! Global resources owned by the mod host.
//!
//! A global resource is plain data that lives as long as the [`ModHost`]:
//! mod metadata, tracing configuration, anything a plugin installs during
//! `build()` for other plugins to read later.
//!
//! Unlike [`API`](crate::api::API)s, globals carry no interior mutability.
//! They are replaced wholesale, or mutated through `&mut ModHost`.
//!
//! [`ModHost`]: crate::host::ModHost

use core::any::{Any, TypeId};
use hashbrown::HashMap;

/// Marker trait for host-lifetime data.
///
/// # Example
///
/// ```
/// use modgate_system::resource::GlobalResource;
///
/// struct Config { name: String }
/// impl GlobalResource for Config {}
/// ```
pub trait GlobalResource: Send + Sync + 'static {}

/// Type-erased storage for global resources, keyed by type.
#[derive(Default)]
pub struct Globals {
    storage: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Globals {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Inserts a resource, returning the value it replaced.
    pub fn insert<R: GlobalResource>(&mut self, resource: R) -> Option<R> {
        self.storage
            .insert(TypeId::of::<R>(), Box::new(resource))
            .and_then(|old| old.downcast::<R>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns true if a resource of type `R` is stored.
    #[must_use]
    pub fn contains<R: GlobalResource>(&self) -> bool {
        self.storage.contains_key(&TypeId::of::<R>())
    }

    /// Gets a shared reference to a resource.
    #[must_use]
    pub fn get<R: GlobalResource>(&self) -> Option<&R> {
        self.storage
            .get(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast_ref::<R>())
    }

    /// Gets a mutable reference to a resource.
    #[must_use]
    pub fn get_mut<R: GlobalResource>(&mut self) -> Option<&mut R> {
        self.storage
            .get_mut(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast_mut::<R>())
    }

    /// Removes a resource and returns it.
    pub fn remove<R: GlobalResource>(&mut self) -> Option<R> {
        self.storage
            .remove(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast::<R>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns the number of stored resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: i32,
    }
    impl GlobalResource for Counter {}

    #[derive(Debug, PartialEq)]
    struct Name(String);
    impl GlobalResource for Name {}

    #[test]
    fn insert_and_get() {
        let mut globals = Globals::new();
        globals.insert(Counter { value: 42 });

        assert_eq!(globals.get::<Counter>(), Some(&Counter { value: 42 }));
        assert!(globals.get::<Name>().is_none());
    }

    #[test]
    fn insert_replaces_existing() {
        let mut globals = Globals::new();
        assert!(globals.insert(Counter { value: 1 }).is_none());

        let old = globals.insert(Counter { value: 2 });
        assert_eq!(old, Some(Counter { value: 1 }));
        assert_eq!(globals.get::<Counter>().map(|c| c.value), Some(2));
        assert_eq!(globals.len(), 1);
    }

    #[test]
    fn get_mut_modifies() {
        let mut globals = Globals::new();
        globals.insert(Counter { value: 0 });

        if let Some(counter) = globals.get_mut::<Counter>() {
            counter.value += 10;
        }

        assert_eq!(globals.get::<Counter>().map(|c| c.value), Some(10));
    }

    #[test]
    fn remove_returns_value() {
        let mut globals = Globals::new();
        globals.insert(Name("mod".into()));

        assert_eq!(globals.remove::<Name>(), Some(Name("mod".into())));
        assert!(!globals.contains::<Name>());
        assert!(globals.is_empty());
        assert!(globals.remove::<Name>().is_none());
    }
}
