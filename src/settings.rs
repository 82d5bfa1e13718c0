//! # Practice Settings
//!
//! The knobs the host UI toggles: practice mode, active screen, ping-pong,
//! hard mode and shuffle. Every combination is legal.
//!
//! Changing *any* setting re-anchors the session at the scale root; see
//! `session::traversal::on_dependency_changed`.

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;

/// What the keyboard highlights for each target note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PracticeMode {
    /// The target note alone
    #[default]
    Scales,
    /// Diatonic triad on the target
    Chords,
    /// Diatonic seventh chord on the target
    SeventhChords,
    /// Target plus its perfect fifth
    Fifths,
}

impl PracticeMode {
    /// Parse the camelCase names used by the UI ("seventhChords").
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "scales" => Some(PracticeMode::Scales),
            "chords" => Some(PracticeMode::Chords),
            "seventhChords" => Some(PracticeMode::SeventhChords),
            "fifths" => Some(PracticeMode::Fifths),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PracticeMode::Scales => "scales",
            PracticeMode::Chords => "chords",
            PracticeMode::SeventhChords => "seventhChords",
            PracticeMode::Fifths => "fifths",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Practice,
    Quiz,
}

impl Screen {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "practice" => Some(Screen::Practice),
            "quiz" => Some(Screen::Quiz),
            _ => None,
        }
    }
}

/// Session settings. Field names follow the YAML config (`ping-pong: true`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub practice_mode: PracticeMode,
    pub current_screen: Screen,
    /// Reverse at the scale ends instead of wrapping to the root
    pub ping_pong: bool,
    /// Reveal the previous note instead of the target
    pub hard_mode: bool,
    /// Swap in a random scale at each scale boundary
    pub shuffle: bool,
}

/// A single setting write from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingChange {
    PracticeMode(PracticeMode),
    Screen(Screen),
    PingPong(bool),
    HardMode(bool),
    Shuffle(bool),
}

impl SettingChange {
    /// Parse a `(name, value)` pair as sent by UI layers.
    ///
    /// Names are the UI's state names (`practiceMode`, `currentScreen`,
    /// `isScalePingPong`, `isHardModeEnabled`, `isShuffleModeEnabled`) or their
    /// kebab-case config spellings.
    ///
    /// # Examples
    /// ```
    /// use scale_trainer::{PracticeMode, SettingChange};
    ///
    /// assert_eq!(
    ///     SettingChange::parse("practiceMode", "fifths").unwrap(),
    ///     SettingChange::PracticeMode(PracticeMode::Fifths)
    /// );
    /// assert_eq!(
    ///     SettingChange::parse("isScalePingPong", "true").unwrap(),
    ///     SettingChange::PingPong(true)
    /// );
    /// assert!(SettingChange::parse("volume", "11").is_err());
    /// ```
    pub fn parse(name: &str, value: &str) -> Result<Self, TrainerError> {
        let invalid = || TrainerError::UnknownSetting {
            name: name.to_string(),
            value: value.to_string(),
        };
        let flag = || parse_flag(value).ok_or_else(invalid);

        match name.trim() {
            "practiceMode" | "practice-mode" => PracticeMode::from_str(value)
                .map(SettingChange::PracticeMode)
                .ok_or_else(invalid),
            "currentScreen" | "current-screen" => {
                Screen::from_str(value).map(SettingChange::Screen).ok_or_else(invalid)
            }
            "isScalePingPong" | "ping-pong" => flag().map(SettingChange::PingPong),
            "isHardModeEnabled" | "hard-mode" => flag().map(SettingChange::HardMode),
            "isShuffleModeEnabled" | "shuffle" => flag().map(SettingChange::Shuffle),
            _ => Err(invalid()),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Copy of these settings with `change` applied.
    pub fn with(mut self, change: SettingChange) -> Self {
        match change {
            SettingChange::PracticeMode(mode) => self.practice_mode = mode,
            SettingChange::Screen(screen) => self.current_screen = screen,
            SettingChange::PingPong(on) => self.ping_pong = on,
            SettingChange::HardMode(on) => self.hard_mode = on,
            SettingChange::Shuffle(on) => self.shuffle = on,
        }
        self
    }
}
