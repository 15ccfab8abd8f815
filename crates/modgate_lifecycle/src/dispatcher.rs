//! Per-frame entry point.

use core::fmt;

use modgate_system::host::ModHost;

use crate::gate::LifecycleGate;
use crate::hook::HostAction;

/// Invokes the per-frame action while the gate is enabled.
///
/// A tick while disabled is a strict no-op; nothing is buffered or replayed
/// when the gate opens again.
#[derive(Default)]
pub struct TickDispatcher {
    action: Option<HostAction>,
    dispatched: u64,
}

impl TickDispatcher {
    /// Creates a dispatcher running `action` on every enabled tick.
    pub fn new(action: impl FnMut(&ModHost) + Send + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
            dispatched: 0,
        }
    }

    /// Creates a dispatcher with no per-frame action.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns how many ticks were dispatched.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Runs one frame. Returns false without doing anything while disabled.
    pub fn tick(&mut self, gate: &LifecycleGate, host: &ModHost) -> bool {
        if !gate.is_enabled() {
            return false;
        }
        if let Some(action) = self.action.as_mut() {
            action(host);
        }
        self.dispatched += 1;
        true
    }
}

impl fmt::Debug for TickDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickDispatcher")
            .field("has_action", &self.action.is_some())
            .field("dispatched", &self.dispatched)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgate_system::mode::ModeSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn ticks_only_while_enabled() {
        let host = ModHost::new();
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut dispatcher = TickDispatcher::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!dispatcher.tick(&gate, &host));

        gate.on_preload(Some(ModeSet::GAME));
        for _ in 0..3 {
            assert!(dispatcher.tick(&gate, &host));
        }

        gate.on_preload(Some(ModeSet::MAIN_MENU));
        assert!(!dispatcher.tick(&gate, &host));

        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(dispatcher.dispatched(), 3);
    }
}
