//! # Hint Read Model
//!
//! What the keyboard renderer should highlight and label for a session state.
//! The renderer only reads; nothing here mutates the session.
//!
//! ## Highlighted Notes
//! The hint is built on the target note normally and on `prev_note` under hard
//! mode, then expanded per practice mode:
//! - `scales` - the note alone
//! - `chords` - diatonic triad on the note
//! - `seventhChords` - diatonic seventh chord on the note
//! - `fifths` - the note and its perfect fifth
//!
//! The fifth is always perfect (seven semitones), even where the scale's own
//! fifth degree above the note is diminished (B to F in C major). The fifths
//! drill and the quiz both ask for perfect fifths, so the fifth does not
//! depend on the scale.
//!
//! ## Target Chord
//! [`target_notes`] expands the *target* the same way. In the chord-based
//! modes the session only advances once every one of these notes was pressed.
//!
//! ## Key Labels
//! Every key whose pitch class is in the scale gets its degree numeral, in any
//! octave. Hard mode only labels the root.

use crate::scale::Scale;
use crate::session::SessionState;
use crate::settings::PracticeMode;
use crate::theory::{ignore_octave, perfect_fifth, pitch_class, seventh_chord, triad, MidiNumber};

/// The note the hint is built on.
pub fn hint_note(state: &SessionState) -> MidiNumber {
    state.tracker.hint(state.settings.hard_mode)
}

/// `note` expanded per practice mode.
pub fn chord_notes(mode: PracticeMode, note: MidiNumber, scale: &Scale) -> Vec<MidiNumber> {
    match mode {
        PracticeMode::Scales => vec![note],
        PracticeMode::Chords => triad(note, scale),
        PracticeMode::SeventhChords => seventh_chord(note, scale),
        PracticeMode::Fifths => vec![note, perfect_fifth(note)],
    }
}

/// Notes to highlight on the keyboard.
///
/// # Examples
/// ```
/// use scale_trainer::{hint, ScaleTable, Session, SettingChange, PracticeMode};
///
/// let mut session = Session::new(ScaleTable::builtin());
/// session.change_setting(SettingChange::PracticeMode(PracticeMode::Chords));
/// // C E G completes the first chord
/// for midi in [60, 64, 67] {
///     session.note_on(midi);
/// }
/// // Target is D: D F A
/// assert_eq!(hint::active_notes(session.state()), vec![62, 65, 69]);
/// ```
pub fn active_notes(state: &SessionState) -> Vec<MidiNumber> {
    chord_notes(state.settings.practice_mode, hint_note(state), &state.scale)
}

/// Notes that must be pressed to complete the current target.
pub fn target_notes(state: &SessionState) -> Vec<MidiNumber> {
    chord_notes(
        state.settings.practice_mode,
        state.tracker.next_target_midi_number,
        &state.scale,
    )
}

/// Degree label to draw on keyboard key `midi`, if any.
pub fn key_label(state: &SessionState, midi: MidiNumber) -> Option<&str> {
    let folded = ignore_octave(&state.scale);
    let pc = pitch_class(midi);

    if state.settings.hard_mode {
        return folded
            .first()
            .filter(|(root, _)| *root == pc)
            .map(|(_, label)| *label);
    }

    folded
        .into_iter()
        .find(|(degree, _)| *degree == pc)
        .map(|(_, label)| label)
}
