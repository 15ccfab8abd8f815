//! English strings for the options page.

use modgate_core_plugins::locale::{LocaleIds, StaticDictionary};

use crate::setting::*;
use crate::{LOCALE_ID, NAME};

/// Builds the `en-US` dictionary.
#[must_use]
pub fn locale_en() -> StaticDictionary {
    let ids = LocaleIds::new(LOCALE_ID);
    StaticDictionary::new()
        .entry(ids.settings(), NAME)
        .entry(ids.tab(MAIN_TAB), "Main")
        .entry(ids.tab(ABOUT_TAB), "About")
        .entry(ids.group(MAIN_INFO_GROUP), "Info")
        .entry(ids.group(MAIN_CONTROLS_GROUP), "Controls")
        .entry(ids.group(ABOUT_LINKS_GROUP), "Links")
        .entry(ids.group(ABOUT_NOTES_GROUP), "Notes")
        .option(&ids, NAME_DISPLAY, "Mod Name", "Display name of this mod.")
        .option(&ids, VERSION_DISPLAY, "Version", "Current mod version.")
        .option(
            &ids,
            ENABLE_FEATURE,
            "Enable feature",
            "Turns the example feature on. Uncheck to disable.",
        )
        .option(
            &ids,
            SELECTED_OPTION,
            "Example option",
            "Choose one of the example options to change behavior.",
        )
        .option(
            &ids,
            OPEN_GITHUB,
            "GitHub",
            "Open the project repository in your browser.",
        )
        .option(&ids, OPEN_DISCORD, "Discord", "Join the community Discord server.")
        .option(
            &ids,
            ABOUT_NOTES,
            "Notes",
            "Tips, usage notes, or disclaimers can go here.",
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_option_has_a_label_and_description() {
        let ids = LocaleIds::new(LOCALE_ID);
        let en = locale_en();
        for spec in options() {
            assert!(en.get(&ids.option_label(&spec.key)).is_some(), "{}", spec.key);
            assert!(en.get(&ids.option_description(&spec.key)).is_some(), "{}", spec.key);
        }
        assert_eq!(en.get(&ids.settings()), Some(NAME));
    }
}
