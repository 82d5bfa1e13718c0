//! # Music Theory Helpers
//!
//! Pure pitch arithmetic used by the scale table, the hint read model and the
//! quiz engine. Nothing here knows about practice sessions.
//!
//! ## MIDI Note Reference
//! - C4 = 60, D4 = 62, E4 = 64, F4 = 65, G4 = 67, A4 = 69, B4 = 71, C5 = 72
//! - Intervals: minor 3rd = +3, major 3rd = +4, perfect 5th = +7, octave = +12
//!
//! ## Chords
//! Triads and seventh chords are *diatonic*: thirds are stacked from the
//! scale's own degrees, so the quality of the chord follows the scale
//! (`triad(62, c_major)` is D minor, not D major).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scale::Scale;

/// Absolute pitch as a MIDI note number (C4 = 60).
pub type MidiNumber = u8;

/// Semitones per octave.
pub const OCTAVE_LENGTH: u8 = 12;

/// Keys per scale: seven diatonic degrees plus the octave above the root.
pub const SCALE_LENGTH: usize = 8;

/// Distinct pitch classes in a diatonic scale.
pub const DIATONIC_DEGREES: usize = SCALE_LENGTH - 1;

const PERFECT_FIFTH: u8 = 7;

const MAJOR_STEPS: [u8; SCALE_LENGTH] = [0, 2, 4, 5, 7, 9, 11, 12];
const MINOR_STEPS: [u8; SCALE_LENGTH] = [0, 2, 3, 5, 7, 8, 10, 12];

const MAJOR_NUMERALS: [&str; SCALE_LENGTH] = ["I", "ii", "iii", "IV", "V", "vi", "vii°", "I"];
const MINOR_NUMERALS: [&str; SCALE_LENGTH] = ["i", "ii°", "III", "iv", "v", "VI", "VII", "i"];

/// Major or (natural) minor.
///
/// Displays as `Major` / `Minor`, the spelling the quiz templates bind to
/// `{{majMin}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Major,
    Minor,
}

impl Quality {
    /// Parse "major"/"minor" in any letter case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" => Some(Quality::Major),
            "minor" | "min" => Some(Quality::Minor),
            _ => None,
        }
    }

    /// Semitone offsets of every scale key from the root.
    pub fn steps(self) -> &'static [u8; SCALE_LENGTH] {
        match self {
            Quality::Major => &MAJOR_STEPS,
            Quality::Minor => &MINOR_STEPS,
        }
    }

    /// Roman numeral for every scale key, root first.
    pub fn numerals(self) -> &'static [&'static str; SCALE_LENGTH] {
        match self {
            Quality::Major => &MAJOR_NUMERALS,
            Quality::Minor => &MINOR_NUMERALS,
        }
    }

    /// Lowercase identifier used in scale values ("c-major").
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Major => "major",
            Quality::Minor => "minor",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Major => f.write_str("Major"),
            Quality::Minor => f.write_str("Minor"),
        }
    }
}

/// Pitch class of a MIDI number (C = 0 ... B = 11).
pub fn pitch_class(midi: MidiNumber) -> u8 {
    midi % OCTAVE_LENGTH
}

/// The note a perfect fifth above `midi`.
///
/// Takes no scale: the fifth stays perfect even where the diatonic fifth
/// above `midi` is diminished.
pub fn perfect_fifth(midi: MidiNumber) -> MidiNumber {
    midi.saturating_add(PERFECT_FIFTH)
}

/// Parse a tonic spelling ("C", "F#", "Bb") into a pitch class.
///
/// # Examples
/// ```
/// use scale_trainer::theory::parse_tonic;
///
/// assert_eq!(parse_tonic("C"), Some(0));
/// assert_eq!(parse_tonic("F#"), Some(6));
/// assert_eq!(parse_tonic("Bb"), Some(10));
/// assert_eq!(parse_tonic("Cb"), Some(11));
/// assert_eq!(parse_tonic("H"), None);
/// ```
pub fn parse_tonic(name: &str) -> Option<u8> {
    let mut chars = name.trim().chars();
    let base: i8 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let accidental: i8 = match chars.next() {
        None => 0,
        Some('#') | Some('♯') => 1,
        Some('b') | Some('♭') => -1,
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some((base + accidental).rem_euclid(OCTAVE_LENGTH as i8) as u8)
}

/// Identifier fragment for a tonic spelling: "F#" → "f-sharp", "Bb" → "b-flat".
pub fn tonic_slug(name: &str) -> String {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    let letter = chars
        .next()
        .map(|c| c.to_ascii_lowercase().to_string())
        .unwrap_or_default();
    match chars.next() {
        Some('#') | Some('♯') => format!("{}-sharp", letter),
        Some('b') | Some('♭') => format!("{}-flat", letter),
        _ => letter,
    }
}

/// Scale keys folded into one octave: `(pitch class, degree label)` for each
/// distinct degree, root first.
pub fn ignore_octave(scale: &Scale) -> Vec<(u8, &str)> {
    let mut folded: Vec<(u8, &str)> = Vec::with_capacity(DIATONIC_DEGREES);
    for degree in scale.keys() {
        let pc = pitch_class(degree.midi);
        if !folded.iter().any(|(seen, _)| *seen == pc) {
            folded.push((pc, degree.label.as_str()));
        }
    }
    folded
}

/// Diatonic triad built on `midi`: root, third and fifth from the scale.
///
/// Notes outside the scale have no diatonic chord and come back alone.
///
/// # Examples
/// ```
/// use scale_trainer::ScaleTable;
/// use scale_trainer::theory::triad;
///
/// let table = ScaleTable::builtin();
/// let c_major = table.get("c-major").unwrap();
/// assert_eq!(triad(60, c_major), vec![60, 64, 67]); // C E G
/// assert_eq!(triad(62, c_major), vec![62, 65, 69]); // D F A
/// assert_eq!(triad(71, c_major), vec![71, 74, 77]); // B D F
/// ```
pub fn triad(midi: MidiNumber, scale: &Scale) -> Vec<MidiNumber> {
    stack_thirds(midi, scale, 3)
}

/// Diatonic seventh chord built on `midi`.
pub fn seventh_chord(midi: MidiNumber, scale: &Scale) -> Vec<MidiNumber> {
    stack_thirds(midi, scale, 4)
}

fn stack_thirds(midi: MidiNumber, scale: &Scale, size: usize) -> Vec<MidiNumber> {
    let degrees: Vec<MidiNumber> = scale
        .keys()
        .iter()
        .take(DIATONIC_DEGREES)
        .map(|d| d.midi)
        .collect();

    let Some(position) = degrees
        .iter()
        .position(|&d| pitch_class(d) == pitch_class(midi))
    else {
        return vec![midi];
    };

    // Octave distance between the played note and the degree it matched
    let offset = midi as i16 - degrees[position] as i16;

    (0..size)
        .filter_map(|k| {
            let step = position + 2 * k;
            let octaves = (step / degrees.len()) as i16;
            let note = degrees[step % degrees.len()] as i16 + OCTAVE_LENGTH as i16 * octaves + offset;
            u8::try_from(note).ok()
        })
        .collect()
}
