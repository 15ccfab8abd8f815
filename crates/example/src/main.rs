//! Runs the example mod through a scripted session against simulated game
//! services.
//!
//! # Usage
//!
//! ```bash
//! example-mod [settings_dir]
//! ```
//!
//! With `settings_dir`, settings are loaded from and saved to
//! `<settings_dir>/ModsSettings/YourMod/YourMod.json`, so a second run picks
//! up the first run's choices. Without it they live in memory.

use std::path::PathBuf;
use std::sync::Arc;

use example::setting::{ENABLE_FEATURE, OPEN_GITHUB};
use example::sim::SimHost;
use example::{AXIS_ACTION, BUTTON_ACTION, ExampleMod, ExampleStats, VECTOR_ACTION};
use modgate_core_plugins::settings::{
    FileSettingsStore, MemorySettingsStore, SettingsAPI, SettingsStore,
};
use modgate_lifecycle::subscription::{InputPhase, InputValue};
use modgate_system::host::ModHost;
use modgate_system::mode::{ModeSet, PhaseSignal, Purpose};
use modgate_system::phase::{MainLoop, UiUpdate};
use modgate_system::plugin::PluginGroup;

fn main() {
    let store: Arc<dyn SettingsStore> = match std::env::args().nth(1).map(PathBuf::from) {
        Some(dir) => Arc::new(FileSettingsStore::new(dir)),
        None => Arc::new(MemorySettingsStore::new()),
    };

    let sim = SimHost::new();
    let mut host = ModHost::new();
    sim.install(&mut host);
    host.add_plugins(ExampleMod::default().with_store(store).build());
    host.finish();

    // The game boots into the main menu.
    let menu = PhaseSignal::new(Purpose::Cleanup, ModeSet::MAIN_MENU);
    host.preload(&menu);
    host.load_complete(&menu);
    press(&sim, BUTTON_ACTION);

    let game = PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME);
    host.preload(&game);
    host.load_complete(&game);

    for frame in 0..5 {
        host.tick::<MainLoop>();
        host.tick::<UiUpdate>();
        if frame == 2 {
            trigger(&sim, AXIS_ACTION, InputValue::Scalar(0.5));
            trigger(&sim, VECTOR_ACTION, InputValue::Vector { x: 0.0, y: 1.0 });
        }
    }

    if let Some(settings) = host.api::<SettingsAPI>() {
        if let Err(err) = settings.press(&host, OPEN_GITHUB) {
            tracing::warn!("{}", err);
        }
        if let Err(err) = settings.set(ENABLE_FEATURE, false) {
            tracing::warn!("{}", err);
        }
    }
    for _ in 0..3 {
        host.tick::<MainLoop>();
    }

    host.preload(&menu);
    host.load_complete(&menu);
    host.tick::<MainLoop>();

    let (frames, loads, inputs) = host
        .api::<ExampleStats>()
        .map_or((0, 0, 0), |stats| (stats.frames(), stats.loads(), stats.inputs()));
    host.dispose();

    tracing::info!(
        frames,
        loads,
        inputs,
        links = ?sim.browser.opened(),
        "session finished"
    );
}

fn press(sim: &SimHost, action: &str) {
    match sim.action(action) {
        Some(action) if action.press() => {}
        Some(_) => tracing::debug!(action, "action disabled; press dropped"),
        None => tracing::warn!(action, "no such action"),
    }
}

fn trigger(sim: &SimHost, action: &str, value: InputValue) {
    match sim.action(action) {
        Some(action) if action.trigger(InputPhase::Performed, value) => {}
        Some(_) => tracing::debug!(action, "action disabled; input dropped"),
        None => tracing::warn!(action, "no such action"),
    }
}
