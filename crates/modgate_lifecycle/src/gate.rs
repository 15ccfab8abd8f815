//! The allowed-mode gate.
//!
//! A [`LifecycleGate`] answers one question: given the modes the host last
//! reported, may this unit of work run? It is recomputed on every preload and
//! load-complete and reports a transition only when its state actually
//! changes, so the caller can emit exactly one notification per change.
//!
//! The gate also carries the per-cycle one-shot flag. The flag is cleared at
//! the start of every load cycle and whenever the gate disables, so it can
//! only be set while the gate is enabled.

use core::fmt;

use modgate_system::mode::ModeSet;

/// Whether gated work may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GateState {
    /// Work is suppressed.
    #[default]
    Disabled,
    /// Work runs.
    Enabled,
}

impl GateState {
    /// Returns true for [`GateState::Enabled`].
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, GateState::Enabled)
    }

    /// Returns the log label for this state, `"ENABLED"` or `"DISABLED"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            GateState::Enabled => "ENABLED",
            GateState::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Allowed-mode predicate plus enabled state.
///
/// # Example
///
/// ```
/// use modgate_lifecycle::gate::{GateState, LifecycleGate};
/// use modgate_system::mode::ModeSet;
///
/// let mut gate = LifecycleGate::new(ModeSet::GAME);
/// assert!(!gate.is_enabled());
///
/// // Menu: still disabled, no transition to report.
/// assert_eq!(gate.on_preload(Some(ModeSet::MAIN_MENU)), None);
///
/// // Game: one transition.
/// assert_eq!(gate.on_preload(Some(ModeSet::GAME)), Some(GateState::Enabled));
/// assert_eq!(gate.on_load_complete(Some(ModeSet::GAME)), None);
///
/// // A missing mode fails closed.
/// assert_eq!(gate.on_preload(None), Some(GateState::Disabled));
/// ```
#[derive(Debug, Clone)]
pub struct LifecycleGate {
    allowed: ModeSet,
    state: GateState,
    one_shot_fired: bool,
    last_mode: ModeSet,
}

impl LifecycleGate {
    /// Creates a disabled gate for the given allowed modes.
    #[must_use]
    pub fn new(allowed: ModeSet) -> Self {
        Self {
            allowed,
            state: GateState::Disabled,
            one_shot_fired: false,
            last_mode: ModeSet::EMPTY,
        }
    }

    /// Returns the modes this gate opens for.
    #[must_use]
    pub fn allowed(&self) -> ModeSet {
        self.allowed
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Returns true if gated work may run.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Returns the modes observed at the last recompute (empty if missing).
    #[must_use]
    pub fn last_mode(&self) -> ModeSet {
        self.last_mode
    }

    /// Returns true if the one-shot already ran in the current cycle.
    #[must_use]
    pub fn one_shot_fired(&self) -> bool {
        self.one_shot_fired
    }

    /// Starts a new load cycle and recomputes the state.
    ///
    /// Returns the new state only if it changed.
    pub fn on_preload(&mut self, mode: Option<ModeSet>) -> Option<GateState> {
        self.one_shot_fired = false;
        self.recompute(mode)
    }

    /// Recomputes the state once loading completes.
    ///
    /// Returns the new state only if it changed.
    pub fn on_load_complete(&mut self, mode: Option<ModeSet>) -> Option<GateState> {
        self.recompute(mode)
    }

    /// Returns true if the gate is enabled and the one-shot has not run yet.
    #[must_use]
    pub fn should_fire_one_shot(&self) -> bool {
        self.is_enabled() && !self.one_shot_fired
    }

    /// Records that the one-shot ran. Ignored while disabled.
    pub fn mark_one_shot_fired(&mut self) {
        if self.is_enabled() {
            self.one_shot_fired = true;
        }
    }

    /// Forces the gate disabled. Returns `Some` if it was enabled.
    pub fn reset(&mut self) -> Option<GateState> {
        self.one_shot_fired = false;
        self.last_mode = ModeSet::EMPTY;
        self.transition(GateState::Disabled)
    }

    fn recompute(&mut self, mode: Option<ModeSet>) -> Option<GateState> {
        let observed = mode.unwrap_or_default();
        self.last_mode = observed;
        let next = if self.allowed.intersects(observed) {
            GateState::Enabled
        } else {
            GateState::Disabled
        };
        self.transition(next)
    }

    fn transition(&mut self, next: GateState) -> Option<GateState> {
        if !next.is_enabled() {
            self.one_shot_fired = false;
        }
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled() {
        let gate = LifecycleGate::new(ModeSet::ALL);
        assert_eq!(gate.state(), GateState::Disabled);
        assert!(!gate.one_shot_fired());
        assert!(!gate.should_fire_one_shot());
    }

    #[test]
    fn reports_only_changes() {
        let mut gate = LifecycleGate::new(ModeSet::GAME | ModeSet::MAP_EDITOR);

        assert_eq!(gate.on_preload(Some(ModeSet::GAME)), Some(GateState::Enabled));
        assert_eq!(gate.on_load_complete(Some(ModeSet::GAME)), None);
        assert_eq!(gate.on_preload(Some(ModeSet::MAP_EDITOR)), None);
        assert_eq!(gate.on_preload(Some(ModeSet::ASSET_EDITOR)), Some(GateState::Disabled));
        assert_eq!(gate.on_load_complete(Some(ModeSet::MAIN_MENU)), None);
    }

    #[test]
    fn any_shared_mode_enables() {
        let mut gate = LifecycleGate::new(ModeSet::EDITOR);
        assert_eq!(
            gate.on_preload(Some(ModeSet::GAME | ModeSet::ASSET_EDITOR)),
            Some(GateState::Enabled)
        );
    }

    #[test]
    fn missing_mode_fails_closed() {
        let mut gate = LifecycleGate::new(ModeSet::ALL);
        gate.on_preload(Some(ModeSet::GAME));

        assert_eq!(gate.on_load_complete(None), Some(GateState::Disabled));
        assert!(gate.last_mode().is_empty());
    }

    #[test]
    fn empty_allowed_set_never_enables() {
        let mut gate = LifecycleGate::new(ModeSet::EMPTY);
        assert_eq!(gate.on_preload(Some(ModeSet::ALL)), None);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn preload_resets_one_shot() {
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        gate.on_preload(Some(ModeSet::GAME));
        gate.on_load_complete(Some(ModeSet::GAME));
        gate.mark_one_shot_fired();
        assert!(gate.one_shot_fired());
        assert!(!gate.should_fire_one_shot());

        // Same mode again: no transition, but a new cycle.
        assert_eq!(gate.on_preload(Some(ModeSet::GAME)), None);
        assert!(!gate.one_shot_fired());
        assert!(gate.should_fire_one_shot());
    }

    #[test]
    fn disabling_clears_one_shot() {
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        gate.on_preload(Some(ModeSet::GAME));
        gate.mark_one_shot_fired();

        gate.on_load_complete(Some(ModeSet::MAIN_MENU));
        assert!(!gate.one_shot_fired());
    }

    #[test]
    fn mark_is_ignored_while_disabled() {
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        gate.mark_one_shot_fired();
        assert!(!gate.one_shot_fired());
    }

    #[test]
    fn reset_forces_disabled() {
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        gate.on_preload(Some(ModeSet::GAME));
        gate.mark_one_shot_fired();

        assert_eq!(gate.reset(), Some(GateState::Disabled));
        assert!(!gate.is_enabled());
        assert!(!gate.one_shot_fired());
        assert_eq!(gate.reset(), None);
    }

    #[test]
    fn labels() {
        assert_eq!(GateState::Enabled.to_string(), "ENABLED");
        assert_eq!(GateState::Disabled.label(), "DISABLED");
    }
}
