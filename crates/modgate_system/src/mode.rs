//! Operating modes, load purposes and the phase signal the host delivers.
//!
//! The host reports which mode(s) it is entering twice per load cycle: once
//! at preload and once when loading completes. Modes compose as a set, so a
//! system allowed in `Game | MapEditor` runs in either.
//!
//! # Example
//!
//! ```
//! use modgate_system::mode::{Mode, ModeSet, PhaseSignal, Purpose};
//!
//! let allowed: ModeSet = "Game|MapEditor".parse().unwrap();
//! assert!(allowed.contains(Mode::MapEditor));
//!
//! let signal = PhaseSignal::new(Purpose::LoadGame, ModeSet::GAME);
//! assert!(allowed.intersects(signal.mode()));
//!
//! // Unknown bits from the host fail closed.
//! let garbled = PhaseSignal::from_raw(Purpose::LoadGame, 0b1000_0000);
//! assert!(garbled.mode().is_empty());
//! ```

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};
use core::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Mode
// ─────────────────────────────────────────────────────────────────────────────

/// A single operating context the host may be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// An interactive gameplay session.
    Game,
    /// The map editor.
    MapEditor,
    /// The asset editor.
    AssetEditor,
    /// The main menu (no session loaded).
    MainMenu,
}

impl Mode {
    /// Every mode, in bit order.
    pub const ALL: [Mode; 4] = [Mode::Game, Mode::MapEditor, Mode::AssetEditor, Mode::MainMenu];

    const fn bit(self) -> u8 {
        match self {
            Mode::Game => 1 << 0,
            Mode::MapEditor => 1 << 1,
            Mode::AssetEditor => 1 << 2,
            Mode::MainMenu => 1 << 3,
        }
    }

    /// Returns the display name of the mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Game => "Game",
            Mode::MapEditor => "MapEditor",
            Mode::AssetEditor => "AssetEditor",
            Mode::MainMenu => "MainMenu",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a mode name in configuration is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeParseError {
    /// The name does not match any mode or mode group.
    #[error("unknown mode '{0}'")]
    UnknownMode(String),
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModeParseError::UnknownMode(trimmed.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ModeSet
// ─────────────────────────────────────────────────────────────────────────────

/// A set of [`Mode`]s.
///
/// Used both for the modes a system is allowed to run in and for the modes
/// the host reports. The gate question is always
/// [`allowed.intersects(observed)`](Self::intersects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeSet(u8);

impl ModeSet {
    /// No modes.
    pub const EMPTY: ModeSet = ModeSet(0);
    /// Gameplay only.
    pub const GAME: ModeSet = ModeSet(Mode::Game.bit());
    /// Map editor only.
    pub const MAP_EDITOR: ModeSet = ModeSet(Mode::MapEditor.bit());
    /// Asset editor only.
    pub const ASSET_EDITOR: ModeSet = ModeSet(Mode::AssetEditor.bit());
    /// Main menu only.
    pub const MAIN_MENU: ModeSet = ModeSet(Mode::MainMenu.bit());
    /// Both editors.
    pub const EDITOR: ModeSet = ModeSet(Mode::MapEditor.bit() | Mode::AssetEditor.bit());
    /// Gameplay or either editor.
    pub const GAME_OR_EDITOR: ModeSet = ModeSet(Self::GAME.0 | Self::EDITOR.0);
    /// Every mode.
    pub const ALL: ModeSet = ModeSet(Self::GAME_OR_EDITOR.0 | Self::MAIN_MENU.0);

    /// Decodes a raw bit pattern delivered by the host.
    ///
    /// Returns `None` if any bit does not correspond to a known mode.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<ModeSet> {
        if bits & !Self::ALL.0 == 0 {
            Some(ModeSet(bits))
        } else {
            None
        }
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if the set holds no modes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `mode` is in the set.
    #[must_use]
    pub const fn contains(self, mode: Mode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Returns true if the two sets share at least one mode.
    #[must_use]
    pub const fn intersects(self, other: ModeSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns a copy of the set with `mode` added.
    #[must_use]
    pub const fn with(self, mode: Mode) -> ModeSet {
        ModeSet(self.0 | mode.bit())
    }

    /// Iterates the modes in the set in bit order.
    pub fn iter(self) -> impl Iterator<Item = Mode> {
        Mode::ALL.into_iter().filter(move |mode| self.contains(*mode))
    }
}

impl From<Mode> for ModeSet {
    fn from(mode: Mode) -> Self {
        ModeSet(mode.bit())
    }
}

impl FromIterator<Mode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        iter.into_iter().fold(ModeSet::EMPTY, ModeSet::with)
    }
}

impl BitOr for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        ModeSet(self.0 | rhs.0)
    }
}

impl BitOr<Mode> for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: Mode) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOrAssign for ModeSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModeSet {
    type Output = ModeSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        ModeSet(self.0 & rhs.0)
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let mut first = true;
        for mode in self.iter() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(mode.name())?;
            first = false;
        }
        Ok(())
    }
}

/// Parses `"Game|MapEditor"`, `"Game, MainMenu"`, `"Editor"`, `"All"` or
/// `"None"`.
impl FromStr for ModeSet {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = ModeSet::EMPTY;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            set |= match part.to_ascii_lowercase().as_str() {
                "none" => ModeSet::EMPTY,
                "all" => ModeSet::ALL,
                "editor" => ModeSet::EDITOR,
                _ => part.parse::<Mode>()?.into(),
            };
        }
        Ok(set)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Purpose
// ─────────────────────────────────────────────────────────────────────────────

/// Why the host is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Starting a new gameplay session.
    NewGame,
    /// Loading a saved gameplay session.
    LoadGame,
    /// Creating a new map in the editor.
    NewMap,
    /// Loading a map in the editor.
    LoadMap,
    /// Tearing a session down (e.g. returning to the menu).
    Cleanup,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PhaseSignal
// ─────────────────────────────────────────────────────────────────────────────

/// What the host reports at preload and load-complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSignal {
    purpose: Purpose,
    mode: Option<ModeSet>,
}

impl PhaseSignal {
    /// Creates a signal carrying a known mode set.
    #[must_use]
    pub const fn new(purpose: Purpose, mode: ModeSet) -> Self {
        Self {
            purpose,
            mode: Some(mode),
        }
    }

    /// Creates a signal whose mode is missing.
    #[must_use]
    pub const fn unknown(purpose: Purpose) -> Self {
        Self {
            purpose,
            mode: None,
        }
    }

    /// Creates a signal from the host's raw mode bits.
    ///
    /// Bits that do not decode to known modes make the mode missing.
    #[must_use]
    pub const fn from_raw(purpose: Purpose, bits: u8) -> Self {
        Self {
            purpose,
            mode: ModeSet::from_bits(bits),
        }
    }

    /// Returns the load purpose.
    #[must_use]
    pub const fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Returns the observed modes; a missing mode reads as the empty set.
    #[must_use]
    pub fn mode(&self) -> ModeSet {
        self.mode.unwrap_or_default()
    }

    /// Returns the mode as delivered, `None` if it was missing or unknown.
    #[must_use]
    pub const fn raw_mode(&self) -> Option<ModeSet> {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_set_intersects() {
        assert!(ModeSet::GAME.intersects(ModeSet::GAME_OR_EDITOR));
        assert!(!ModeSet::GAME.intersects(ModeSet::MAIN_MENU));
        assert!(!ModeSet::EMPTY.intersects(ModeSet::ALL));
    }

    #[test]
    fn from_bits_rejects_unknown_bits() {
        assert_eq!(ModeSet::from_bits(0b0101), Some(ModeSet::GAME | Mode::AssetEditor));
        assert_eq!(ModeSet::from_bits(0b1_0000), None);
    }

    #[test]
    fn display_joins_names() {
        assert_eq!(ModeSet::EMPTY.to_string(), "None");
        assert_eq!(ModeSet::GAME.to_string(), "Game");
        assert_eq!((ModeSet::GAME | ModeSet::MAIN_MENU).to_string(), "Game|MainMenu");
    }

    #[test]
    fn parse_accepts_groups_and_separators() {
        assert_eq!("Game|MapEditor".parse::<ModeSet>(), Ok(ModeSet::GAME | ModeSet::MAP_EDITOR));
        assert_eq!("game, mainmenu".parse::<ModeSet>(), Ok(ModeSet::GAME | ModeSet::MAIN_MENU));
        assert_eq!("Editor".parse::<ModeSet>(), Ok(ModeSet::EDITOR));
        assert_eq!("None".parse::<ModeSet>(), Ok(ModeSet::EMPTY));
        assert_eq!("".parse::<ModeSet>(), Ok(ModeSet::EMPTY));
        assert_eq!("All".parse::<ModeSet>(), Ok(ModeSet::ALL));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(
            "Game|Sandbox".parse::<ModeSet>(),
            Err(ModeParseError::UnknownMode("Sandbox".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let set = ModeSet::ALL;
        assert_eq!(set.to_string().parse::<ModeSet>(), Ok(set));
    }

    #[test]
    fn from_iterator_collects_modes() {
        let set: ModeSet = [Mode::Game, Mode::MainMenu].into_iter().collect();
        assert!(set.contains(Mode::Game));
        assert!(set.contains(Mode::MainMenu));
        assert!(!set.contains(Mode::MapEditor));
    }

    #[test]
    fn missing_mode_reads_as_empty() {
        let signal = PhaseSignal::unknown(Purpose::LoadGame);
        assert_eq!(signal.raw_mode(), None);
        assert!(signal.mode().is_empty());

        let raw = PhaseSignal::from_raw(Purpose::NewGame, 0xFF);
        assert_eq!(raw.raw_mode(), None);
    }
}
