//! Schedule markers for lifecycle events.
//!
//! Observers register against these markers through
//! [`LifecycleHooks::register_observer`](super::LifecycleHooks::register_observer);
//! event data arrives as a [`LifecycleEvent`](super::LifecycleEvent).

use modgate_system::plugin::Schedule;

/// A controller's gate changed state.
///
/// Event data: [`LifecycleEvent::GateChanged`](super::LifecycleEvent::GateChanged)
pub struct OnGateChange;
impl Schedule for OnGateChange {}

/// A controller's one-shot action ran.
///
/// Event data: [`LifecycleEvent::OneShotFired`](super::LifecycleEvent::OneShotFired)
pub struct OnOneShot;
impl Schedule for OnOneShot {}

/// A resource subscription was attached or released.
///
/// Event data: [`LifecycleEvent::Subscribed`](super::LifecycleEvent::Subscribed)
/// and [`LifecycleEvent::Unsubscribed`](super::LifecycleEvent::Unsubscribed)
pub struct OnSubscription;
impl Schedule for OnSubscription {}

/// A recoverable failure was caught and logged.
///
/// Event data: [`LifecycleEvent::Warning`](super::LifecycleEvent::Warning)
pub struct OnWarning;
impl Schedule for OnWarning {}

/// A controller was disposed.
///
/// Event data: [`LifecycleEvent::Disposed`](super::LifecycleEvent::Disposed)
pub struct OnDispose;
impl Schedule for OnDispose {}
