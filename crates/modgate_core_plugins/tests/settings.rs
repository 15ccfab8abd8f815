//! Integration tests for settings persistence and URL buttons.

use std::sync::{Arc, Mutex};

use modgate_core_plugins::settings::{
    Choice, FileSettingsStore, MemorySettingsStore, OptionSpec, SettingsAPI, SettingsPlugin,
    SettingsStore, UrlOpener, UrlOpenerAPI,
};
use modgate_core_plugins::{ModInfoPlugin, MinimalPlugins};
use modgate_system::host::ModHost;
use modgate_system::plugin::PluginGroup;
use serde_json::json;

const KEY: &str = "ModsSettings/YourMod/YourMod";

fn options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::toggle("EnableFeature", true).in_section("Main", "Controls"),
        OptionSpec::dropdown(
            "SelectedOption",
            vec![
                Choice::new("OptionA", "Option A"),
                Choice::new("OptionB", "Option B"),
                Choice::new("OptionC", "Option C"),
            ],
            "OptionA",
        )
        .in_section("Main", "Controls"),
        OptionSpec::button("OpenGitHub", "https://example.com/your-repo")
            .in_section("About", "Links"),
    ]
}

fn host_with(store: Arc<dyn SettingsStore>) -> ModHost {
    let mut host = ModHost::new();
    host.add_plugins(ModInfoPlugin::new("Your Mod Name", "1.0.0").with_settings_key(KEY));
    host.add_plugins(SettingsPlugin::new(options()).with_store(store));
    host.finish();
    host
}

#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        if self.fail {
            return Err("no browser".into());
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[test]
fn values_survive_a_session_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn SettingsStore> = Arc::new(FileSettingsStore::new(dir.path()));

    let mut first = host_with(Arc::clone(&store));
    let settings = first.api::<SettingsAPI>().unwrap();
    assert_eq!(settings.settings_key(), KEY);
    settings.set("EnableFeature", false).unwrap();
    settings.set("SelectedOption", "OptionC").unwrap();
    first.dispose();

    let second = host_with(store);
    let settings = second.api::<SettingsAPI>().unwrap();
    assert_eq!(settings.get_bool("EnableFeature"), Some(false));
    assert_eq!(settings.get_str("SelectedOption").as_deref(), Some("OptionC"));
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSettingsStore::new(dir.path());
    let path = store.path_for(KEY).unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let host = host_with(Arc::new(store));
    let settings = host.api::<SettingsAPI>().unwrap();
    assert_eq!(settings.get_bool("EnableFeature"), Some(true));
}

#[test]
fn saved_values_load_without_applying() {
    let store = Arc::new(
        MemorySettingsStore::new().with_entry(KEY, json!({ "EnableFeature": false })),
    );
    let host = host_with(Arc::clone(&store) as Arc<dyn SettingsStore>);
    let settings = host.api::<SettingsAPI>().unwrap();

    let applied = Arc::new(Mutex::new(0));
    let count = Arc::clone(&applied);
    settings.on_apply(move |_, _| *count.lock().unwrap() += 1);

    assert_eq!(settings.get_bool("EnableFeature"), Some(false));
    assert_eq!(*applied.lock().unwrap(), 0);

    settings.set("EnableFeature", true).unwrap();
    assert_eq!(*applied.lock().unwrap(), 1);
}

#[test]
fn dispose_writes_snapshot_to_store() {
    let store = Arc::new(MemorySettingsStore::new());
    let mut host = host_with(Arc::clone(&store) as Arc<dyn SettingsStore>);
    host.api::<SettingsAPI>()
        .unwrap()
        .set("SelectedOption", "OptionB")
        .unwrap();
    host.dispose();

    assert_eq!(
        store.get(KEY),
        Some(json!({ "EnableFeature": true, "SelectedOption": "OptionB" }))
    );
}

#[test]
fn url_buttons_open_through_the_host() {
    let opener = Arc::new(RecordingOpener::default());
    let mut host = ModHost::new();
    host.insert_api(UrlOpenerAPI::new(Arc::clone(&opener) as Arc<dyn UrlOpener>));
    host.add_plugins(MinimalPlugins.build());
    host.add_plugins(SettingsPlugin::new(options()));
    host.finish();

    host.api::<SettingsAPI>()
        .unwrap()
        .press(&host, "OpenGitHub")
        .unwrap();
    assert_eq!(
        *opener.opened.lock().unwrap(),
        vec!["https://example.com/your-repo"]
    );
}

#[test]
fn failed_url_open_changes_nothing() {
    let opener = Arc::new(RecordingOpener {
        fail: true,
        ..RecordingOpener::default()
    });
    let mut host = ModHost::new();
    host.insert_api(UrlOpenerAPI::new(opener as Arc<dyn UrlOpener>));
    host.add_plugins(MinimalPlugins.build());
    host.add_plugins(SettingsPlugin::new(options()));
    host.finish();

    let settings = host.api::<SettingsAPI>().unwrap();
    let before = settings.snapshot();
    assert!(settings.press(&host, "OpenGitHub").is_ok());
    assert_eq!(settings.snapshot(), before);
}
