//! Session state type definitions
//!
//! Everything the host reads to render the practice screen. All of it
//! serializes, so a session can be snapshotted and restored without a UI.

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;
use crate::scale::Scale;
use crate::settings::Settings;
use crate::theory::MidiNumber;

/// Position of the player within the active scale.
///
/// # Fields
/// - `current_midi_number`: last note actually played
/// - `next_target_midi_number`: note the player must play next; always a key of
///   the active scale
/// - `prev_note`: note shown as the hint under hard mode, one step behind the
///   target
/// - `note_counter`: notes played since the last reset, only meaningful modulo
///   `SCALE_LENGTH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteTracker {
    pub current_midi_number: MidiNumber,
    pub next_target_midi_number: MidiNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_note: Option<MidiNumber>,
    pub note_counter: u32,
}

impl NoteTracker {
    /// Fresh tracker with every note on `root`.
    pub fn anchored(root: MidiNumber) -> Self {
        Self {
            current_midi_number: root,
            next_target_midi_number: root,
            prev_note: Some(root),
            note_counter: 0,
        }
    }

    /// The note a renderer should reveal as the hint.
    pub fn hint(&self, hard_mode: bool) -> MidiNumber {
        if hard_mode {
            self.prev_note.unwrap_or(self.next_target_midi_number)
        } else {
            self.next_target_midi_number
        }
    }
}

/// Traversal direction. Only read while ping-pong is on; with ping-pong off it
/// is still recorded so snapshots show which way the last boundary turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Which end of the scale a step landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Highest key reached while ascending
    Top,
    /// Root reached while descending (ping-pong)
    Bottom,
}

/// The complete state of one practice session.
///
/// `chord_stack` holds the notes of the target chord already pressed in the
/// chord-based practice modes. It is empty whenever the target changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedSessionState")]
pub struct SessionState {
    pub scale: Scale,
    pub settings: Settings,
    pub tracker: NoteTracker,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chord_stack: Vec<MidiNumber>,
}

/// Deserialization shadow of [`SessionState`]; a snapshot must target a key
/// of its own scale.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedSessionState {
    scale: Scale,
    settings: Settings,
    tracker: NoteTracker,
    direction: Direction,
    #[serde(default)]
    chord_stack: Vec<MidiNumber>,
}

impl TryFrom<UncheckedSessionState> for SessionState {
    type Error = TrainerError;

    fn try_from(raw: UncheckedSessionState) -> Result<Self, Self::Error> {
        let state = SessionState {
            scale: raw.scale,
            settings: raw.settings,
            tracker: raw.tracker,
            direction: raw.direction,
            chord_stack: raw.chord_stack,
        };
        state.validate()?;
        Ok(state)
    }
}

impl SessionState {
    /// State anchored at the root of `scale`, ascending.
    pub fn new(scale: Scale, settings: Settings) -> Self {
        let tracker = NoteTracker::anchored(scale.start());
        Self {
            scale,
            settings,
            tracker,
            direction: Direction::Ascending,
            chord_stack: Vec::new(),
        }
    }

    /// Check that the target is a key of the active scale.
    ///
    /// The played and previous notes are not checked: an ungated
    /// [`crate::Session::record_note`] may leave them anywhere.
    pub fn validate(&self) -> Result<(), TrainerError> {
        let target = self.tracker.next_target_midi_number;
        if !self.scale.contains(target) {
            return Err(TrainerError::TargetOutsideScale {
                scale: self.scale.value().to_string(),
                midi: target,
            });
        }
        Ok(())
    }
}
