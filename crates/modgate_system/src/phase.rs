//! Update phases the host ticks every frame.
//!
//! A plugin declares the phases it wants through
//! [`Plugin::tick_schedules()`](crate::plugin::Plugin::tick_schedules); the
//! host driver calls [`ModHost::tick::<P>()`](crate::host::ModHost::tick)
//! once per frame for each phase it runs.

use crate::plugin::Schedule;

/// The main simulation loop. Gameplay systems run here.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainLoop;

impl Schedule for MainLoop {}

/// The UI update pass, ticked after [`MainLoop`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UiUpdate;

impl Schedule for UiUpdate {}
