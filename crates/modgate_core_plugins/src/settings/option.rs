//! Declarative option records.

use serde_json::Value;

/// Where an option appears on the options page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    /// Tab id, e.g. `"Main"`.
    pub tab: String,
    /// Group id within the tab, e.g. `"Controls"`.
    pub group: String,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(tab: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            group: group.into(),
        }
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl Choice {
    /// Creates a choice.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The widget an option is shown as, and the values it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// A checkbox holding a boolean.
    Toggle,
    /// A dropdown holding one of `choices` by value.
    Dropdown {
        /// Accepted values, in display order.
        choices: Vec<Choice>,
    },
    /// A push button. Holds no value.
    Button,
    /// A read-only text row.
    Display,
    /// A read-only multiline text block.
    Multiline,
}

impl OptionKind {
    /// Returns a short name for error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            OptionKind::Toggle => "toggle",
            OptionKind::Dropdown { .. } => "dropdown",
            OptionKind::Button => "button",
            OptionKind::Display => "display",
            OptionKind::Multiline => "multiline",
        }
    }

    /// Returns true for kinds whose value the user can change and that are
    /// persisted.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        matches!(self, OptionKind::Toggle | OptionKind::Dropdown { .. })
    }
}

/// What happens when an option changes or a button is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Effect {
    /// Nothing beyond storing the value.
    #[default]
    None,
    /// Notify apply listeners.
    Apply,
    /// Open a URL through the host. Only meaningful on buttons.
    OpenUrl(String),
}

/// A declared option.
///
/// # Example
///
/// ```
/// use modgate_core_plugins::settings::{Choice, Effect, OptionSpec};
///
/// let options = vec![
///     OptionSpec::toggle("EnableFeature", true).in_section("Main", "Controls"),
///     OptionSpec::dropdown(
///         "SelectedOption",
///         vec![Choice::new("OptionA", "Option A"), Choice::new("OptionB", "Option B")],
///         "OptionA",
///     ),
///     OptionSpec::button("OpenGitHub", "https://example.com/your-repo")
///         .in_section("About", "Links"),
/// ];
/// assert_eq!(options[0].effect, Effect::Apply);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Unique key, also used in locale ids.
    pub key: String,
    /// Placement on the options page.
    pub section: Section,
    /// Widget and accepted values.
    pub kind: OptionKind,
    /// Initial and reset value. `Null` for buttons.
    pub default: Value,
    /// Change or press effect.
    pub effect: Effect,
}

impl OptionSpec {
    /// A checkbox that notifies apply listeners on change.
    #[must_use]
    pub fn toggle(key: impl Into<String>, default: bool) -> Self {
        Self::with_kind(key, OptionKind::Toggle, Value::Bool(default), Effect::Apply)
    }

    /// A dropdown that notifies apply listeners on change.
    #[must_use]
    pub fn dropdown(key: impl Into<String>, choices: Vec<Choice>, default: impl Into<String>) -> Self {
        Self::with_kind(
            key,
            OptionKind::Dropdown { choices },
            Value::String(default.into()),
            Effect::Apply,
        )
    }

    /// A button that opens `url` when pressed.
    #[must_use]
    pub fn button(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_kind(key, OptionKind::Button, Value::Null, Effect::OpenUrl(url.into()))
    }

    /// A read-only text row.
    #[must_use]
    pub fn display(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_kind(key, OptionKind::Display, Value::String(text.into()), Effect::None)
    }

    /// A read-only multiline block; its text comes from the locale.
    #[must_use]
    pub fn multiline(key: impl Into<String>) -> Self {
        Self::with_kind(key, OptionKind::Multiline, Value::String(String::new()), Effect::None)
    }

    /// Places the option on `tab`, in `group`.
    #[must_use]
    pub fn in_section(mut self, tab: impl Into<String>, group: impl Into<String>) -> Self {
        self.section = Section::new(tab, group);
        self
    }

    /// Replaces the effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    fn with_kind(key: impl Into<String>, kind: OptionKind, default: Value, effect: Effect) -> Self {
        Self {
            key: key.into(),
            section: Section::default(),
            kind,
            default,
            effect,
        }
    }

    /// Returns true if `value` is acceptable for this option.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            OptionKind::Toggle => value.is_boolean(),
            OptionKind::Dropdown { choices } => value
                .as_str()
                .is_some_and(|v| choices.iter().any(|c| c.value == v)),
            OptionKind::Button | OptionKind::Display | OptionKind::Multiline => false,
        }
    }
}
