//! The options page of the example mod.

use modgate_core_plugins::settings::{Choice, OptionSpec};
use serde::Deserialize;

use crate::{NAME, VERSION};

/// Tab holding the info and control rows.
pub const MAIN_TAB: &str = "Main";
/// Tab holding links and notes.
pub const ABOUT_TAB: &str = "About";

/// Group with the name and version rows.
pub const MAIN_INFO_GROUP: &str = "Info";
/// Group with the toggle and dropdown.
pub const MAIN_CONTROLS_GROUP: &str = "Controls";
/// Group with the link buttons.
pub const ABOUT_LINKS_GROUP: &str = "Links";
/// Group with the notes block.
pub const ABOUT_NOTES_GROUP: &str = "Notes";

/// Read-only mod name row.
pub const NAME_DISPLAY: &str = "NameDisplay";
/// Read-only version row.
pub const VERSION_DISPLAY: &str = "VersionDisplay";
/// Checkbox turning the example feature on.
pub const ENABLE_FEATURE: &str = "EnableFeature";
/// Dropdown picking an [`ExampleOption`].
pub const SELECTED_OPTION: &str = "SelectedOption";
/// Button opening the repository.
pub const OPEN_GITHUB: &str = "OpenGitHub";
/// Button opening the community server.
pub const OPEN_DISCORD: &str = "OpenDiscord";
/// Multiline notes block.
pub const ABOUT_NOTES: &str = "AboutNotes";

/// Repository link.
pub const GITHUB_URL: &str = "https://example.com/your-repo";
/// Community server link.
pub const DISCORD_URL: &str = "https://discord.gg/your-server";

/// Choices of the example dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ExampleOption {
    /// The default.
    #[default]
    OptionA,
    /// Second choice.
    OptionB,
    /// Third choice.
    OptionC,
}

impl ExampleOption {
    /// Every choice in display order.
    pub const ALL: [ExampleOption; 3] = [
        ExampleOption::OptionA,
        ExampleOption::OptionB,
        ExampleOption::OptionC,
    ];

    fn choice(self) -> Choice {
        match self {
            ExampleOption::OptionA => Choice::new("OptionA", "Option A"),
            ExampleOption::OptionB => Choice::new("OptionB", "Option B"),
            ExampleOption::OptionC => Choice::new("OptionC", "Option C"),
        }
    }
}

/// Typed view of the stored values, read with
/// [`SettingsAPI::typed`](modgate_core_plugins::settings::SettingsAPI::typed).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExampleSettings {
    /// Whether the example system does its per-frame work.
    pub enable_feature: bool,
    /// The selected dropdown entry.
    pub selected_option: ExampleOption,
}

/// Declares every option, in page order.
#[must_use]
pub fn options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::display(NAME_DISPLAY, NAME).in_section(MAIN_TAB, MAIN_INFO_GROUP),
        OptionSpec::display(VERSION_DISPLAY, VERSION).in_section(MAIN_TAB, MAIN_INFO_GROUP),
        OptionSpec::toggle(ENABLE_FEATURE, true).in_section(MAIN_TAB, MAIN_CONTROLS_GROUP),
        OptionSpec::dropdown(
            SELECTED_OPTION,
            ExampleOption::ALL.into_iter().map(ExampleOption::choice).collect(),
            "OptionA",
        )
        .in_section(MAIN_TAB, MAIN_CONTROLS_GROUP),
        OptionSpec::button(OPEN_GITHUB, GITHUB_URL).in_section(ABOUT_TAB, ABOUT_LINKS_GROUP),
        OptionSpec::button(OPEN_DISCORD, DISCORD_URL).in_section(ABOUT_TAB, ABOUT_LINKS_GROUP),
        OptionSpec::multiline(ABOUT_NOTES).in_section(ABOUT_TAB, ABOUT_NOTES_GROUP),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgate_core_plugins::settings::SettingsAPI;

    #[test]
    fn defaults_read_as_typed_settings() {
        let api = SettingsAPI::new("test", options());
        let settings: ExampleSettings = api.typed().unwrap();
        assert_eq!(
            settings,
            ExampleSettings {
                enable_feature: true,
                selected_option: ExampleOption::OptionA,
            }
        );

        api.set(SELECTED_OPTION, "OptionC").unwrap();
        let settings: ExampleSettings = api.typed().unwrap();
        assert_eq!(settings.selected_option, ExampleOption::OptionC);
    }
}
