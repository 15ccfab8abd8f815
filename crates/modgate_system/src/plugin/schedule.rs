//! Schedule identifiers for tick-based plugin updates.
//!
//! A schedule is identified by a marker type wrapped in a [`ScheduleId`].
//! The host's update phases ([`MainLoop`](crate::phase::MainLoop),
//! [`UiUpdate`](crate::phase::UiUpdate)) are schedules, and so are the
//! lifecycle event markers observers register against in Layer 2.

use core::any::TypeId;
use variadics_please::all_tuples;

/// Identifier for a tick schedule, derived from a marker type.
///
/// The tick system is split across layers:
///
/// - **Layer 1** (`modgate_system`) provides `ScheduleId`,
///   [`ModHost::tick()`](crate::host::ModHost::tick) and the update phases.
/// - **Layer 2** (`modgate_lifecycle`) defines event markers such as
///   `OnGateChange` and invokes observers registered for them.
/// - **Layer 3** (plugins) declares interest via
///   [`Plugin::tick_schedules()`](super::Plugin::tick_schedules) and responds
///   in [`Plugin::update()`](super::Plugin::update).
///
/// # Example
///
/// ```
/// # use modgate_system::plugin::{Plugin, ScheduleId};
/// # use modgate_system::host::ModHost;
/// use modgate_system::phase::MainLoop;
///
/// struct FrameCounter;
///
/// impl Plugin for FrameCounter {
///     fn build(&self, _host: &mut ModHost) {}
///
///     fn tick_schedules(&self) -> Vec<ScheduleId> {
///         vec![ScheduleId::of::<MainLoop>()]
///     }
///
///     fn update(&self, _host: &mut ModHost, _schedule: ScheduleId) {
///         // called when the driver runs host.tick::<MainLoop>()
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ScheduleId {
    /// Creates a `ScheduleId` for the given marker type.
    #[must_use]
    pub fn of<S: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            type_name: core::any::type_name::<S>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the full type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the type name without its module path.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Schedule Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Marker trait for schedule types.
///
/// Carries no methods; it lets [`IntoScheduleIds`] accept schedules by
/// trait bound. [`ScheduleId::of`] itself accepts any `'static` type.
pub trait Schedule: 'static {}

// ─────────────────────────────────────────────────────────────────────────────
// IntoScheduleIds Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Types that can be converted into a list of schedule IDs.
///
/// Implemented for single schedules and tuples of 2 to 16 schedules.
pub trait IntoScheduleIds {
    /// Returns the schedule IDs for this type.
    fn schedule_ids() -> Vec<ScheduleId>;
}

impl<S: Schedule> IntoScheduleIds for S {
    fn schedule_ids() -> Vec<ScheduleId> {
        vec![ScheduleId::of::<S>()]
    }
}

macro_rules! impl_into_schedule_ids_for_tuple {
    ($($S:ident),*) => {
        impl<$($S: Schedule),*> IntoScheduleIds for ($($S,)*) {
            fn schedule_ids() -> Vec<ScheduleId> {
                vec![$(ScheduleId::of::<$S>()),*]
            }
        }
    };
}

all_tuples!(impl_into_schedule_ids_for_tuple, 2, 16, S);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{MainLoop, UiUpdate};

    struct OnSave;
    impl Schedule for OnSave {}

    #[test]
    fn schedule_id_equality() {
        assert_eq!(ScheduleId::of::<MainLoop>(), ScheduleId::of::<MainLoop>());
        assert_ne!(ScheduleId::of::<MainLoop>(), ScheduleId::of::<UiUpdate>());
    }

    #[test]
    fn schedule_id_names() {
        let id = ScheduleId::of::<OnSave>();
        assert!(id.type_name().ends_with("::OnSave"));
        assert_eq!(id.short_name(), "OnSave");
        assert_eq!(id.type_id(), TypeId::of::<OnSave>());
    }

    #[test]
    fn into_schedule_ids_single() {
        assert_eq!(MainLoop::schedule_ids(), vec![ScheduleId::of::<MainLoop>()]);
    }

    #[test]
    fn into_schedule_ids_tuple_keeps_order() {
        let ids = <(UiUpdate, OnSave, MainLoop)>::schedule_ids();
        assert_eq!(
            ids,
            vec![
                ScheduleId::of::<UiUpdate>(),
                ScheduleId::of::<OnSave>(),
                ScheduleId::of::<MainLoop>(),
            ]
        );
    }
}
