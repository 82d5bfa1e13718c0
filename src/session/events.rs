//! Events the host dispatches into a session, and what each one did.

use serde::{Deserialize, Serialize};

use super::state::Boundary;
use crate::scale::Scale;
use crate::settings::{Screen, SettingChange};
use crate::theory::MidiNumber;

/// Input from the note-input and settings collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A key was pressed
    NoteOn(MidiNumber),
    /// A toggle or dropdown changed
    SettingChanged(SettingChange),
    /// The user picked another scale
    ScaleChanged(Scale),
    /// Practice and quiz screens switched
    ScreenChanged(Screen),
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The played note moved the tracker to a new target
    Advanced {
        target: MidiNumber,
        boundary: Option<Boundary>,
    },
    /// A note of the target chord was pressed; `remaining` chord notes are
    /// still missing
    Held { played: MidiNumber, remaining: usize },
    /// A note outside the target chord was played; only the partly played
    /// chord was dropped
    Missed {
        expected: MidiNumber,
        played: MidiNumber,
    },
    /// Scale or settings changed; the tracker is back at the root
    Reset,
    /// Shuffle mode replaced the scale at a boundary; the tracker is at the
    /// new root
    Shuffled { from: String, to: String },
    /// The event carried the value already in effect
    Unchanged,
}
