//! API trait for capability registration.
//!
//! APIs are host-lifetime registries that plugins and controllers use to
//! reach shared capabilities. The host installs its own collaborators
//! (resource registry, localization manager, URL opener) as APIs, and
//! plugins expose theirs (settings, lifecycle observers) the same way.
//!
//! # API vs Global Resource
//!
//! | Aspect | API | Global resource |
//! |--------|-----|-----------------|
//! | **Purpose** | Capability / collaborator | Plain data |
//! | **Access method** | `host.api::<A>()` | `host.get_global::<R>()` |
//! | **Mutation** | Interior (locks) | Replace only |
//!
//! # Interior Mutability Pattern
//!
//! APIs that need registration typically use interior mutability:
//!
//! ```ignore
//! use parking_lot::RwLock;
//! use hashbrown::HashMap;
//!
//! pub struct MyAPI {
//!     data: RwLock<HashMap<String, Value>>,
//! }
//!
//! impl API for MyAPI {}
//!
//! impl MyAPI {
//!     pub fn register(&self, key: &str, value: Value) {
//!         self.data.write().insert(key.into(), value);
//!     }
//! }
//! ```
//!
//! This allows `host.api::<MyAPI>()` to return `&MyAPI` and still accept
//! registrations without `&mut ModHost`.

/// Marker trait for capability APIs.
///
/// # Implementing API
///
/// ```
/// use modgate_system::api::API;
///
/// pub struct MyAPI;
///
/// impl API for MyAPI {}
/// ```
///
/// # Usage in Plugins
///
/// ```ignore
/// impl Plugin for MyAPIPlugin {
///     fn build(&self, host: &mut ModHost) {
///         host.insert_api(MyAPI::new());
///     }
/// }
///
/// impl Plugin for ConsumerPlugin {
///     fn ready(&self, host: &mut ModHost) {
///         if let Some(api) = host.api::<MyAPI>() {
///             api.register("key", value);
///         }
///     }
/// }
/// ```
pub trait API: Send + Sync + 'static {}
