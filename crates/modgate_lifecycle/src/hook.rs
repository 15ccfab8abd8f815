//! Once-per-cycle initialization.

use core::fmt;

use modgate_system::host::ModHost;

use crate::gate::LifecycleGate;

/// A boxed action that receives the host context.
///
/// Used for both the one-shot and the per-frame action of a controller.
pub type HostAction = Box<dyn FnMut(&ModHost) + Send>;

/// Runs an action at most once per load cycle, and only while the gate is
/// enabled.
///
/// The gate owns the "already fired" flag, so the hook itself is stateless
/// apart from the action.
///
/// # Example
///
/// ```
/// use modgate_lifecycle::gate::LifecycleGate;
/// use modgate_lifecycle::hook::OneShotHook;
/// use modgate_system::host::ModHost;
/// use modgate_system::mode::ModeSet;
///
/// let host = ModHost::new();
/// let mut gate = LifecycleGate::new(ModeSet::GAME);
/// let mut hook = OneShotHook::new(|_host| { /* apply once after load */ });
///
/// assert!(!hook.fire(&mut gate, &host)); // disabled
///
/// gate.on_preload(Some(ModeSet::GAME));
/// assert!(hook.fire(&mut gate, &host));
/// assert!(!hook.fire(&mut gate, &host)); // already fired this cycle
/// ```
#[derive(Default)]
pub struct OneShotHook {
    action: Option<HostAction>,
}

impl OneShotHook {
    /// Creates a hook running `action`.
    pub fn new(action: impl FnMut(&ModHost) + Send + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
        }
    }

    /// Creates a hook with no action. Firing it still marks the cycle.
    #[must_use]
    pub fn empty() -> Self {
        Self { action: None }
    }

    /// Returns true if an action is configured.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Fires the hook if the gate allows it. Returns whether it fired.
    pub fn fire(&mut self, gate: &mut LifecycleGate, host: &ModHost) -> bool {
        if !gate.should_fire_one_shot() {
            return false;
        }
        if let Some(action) = self.action.as_mut() {
            action(host);
        }
        gate.mark_one_shot_fired();
        true
    }
}

impl fmt::Debug for OneShotHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneShotHook")
            .field("has_action", &self.has_action())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgate_system::mode::ModeSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_hook() -> (OneShotHook, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let hook = OneShotHook::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hook, count)
    }

    #[test]
    fn fires_once_per_cycle() {
        let host = ModHost::new();
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        let (mut hook, count) = counting_hook();

        gate.on_preload(Some(ModeSet::GAME));
        gate.on_load_complete(Some(ModeSet::GAME));
        assert!(hook.fire(&mut gate, &host));
        assert!(!hook.fire(&mut gate, &host));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        gate.on_preload(Some(ModeSet::GAME));
        gate.on_load_complete(Some(ModeSet::GAME));
        assert!(hook.fire(&mut gate, &host));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn never_fires_while_disabled() {
        let host = ModHost::new();
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        let (mut hook, count) = counting_hook();

        gate.on_preload(Some(ModeSet::MAIN_MENU));
        gate.on_load_complete(Some(ModeSet::MAIN_MENU));
        assert!(!hook.fire(&mut gate, &host));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_hook_still_marks_cycle() {
        let host = ModHost::new();
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        let mut hook = OneShotHook::empty();

        gate.on_preload(Some(ModeSet::GAME));
        assert!(!hook.has_action());
        assert!(hook.fire(&mut gate, &host));
        assert!(gate.one_shot_fired());
    }
}
