//! # Scales and the Scale Table
//!
//! A [`Scale`] is an ordered list of `SCALE_LENGTH` keys, each an absolute MIDI
//! number paired with its degree label. Walking the keys front to back plays the
//! scale ascending from its root; walking them back to front plays it
//! descending. Scales are immutable: a session swaps the whole value when the
//! user (or shuffle mode) picks another one.
//!
//! ## Invariants
//! - Exactly `SCALE_LENGTH` keys
//! - Keys strictly ascending, so every key is distinct
//!
//! Both are checked once, when the scale is built. The traversal code relies on
//! them and never re-checks.
//!
//! ## Built-in Table
//! [`ScaleTable::builtin()`] holds the 12 major and 12 natural minor scales,
//! rooted between C4 (60) and B4 (71), with `c-major` first.

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;
use crate::random::RandomSource;
use crate::theory::{parse_tonic, tonic_slug, MidiNumber, Quality, SCALE_LENGTH};

const MIDDLE_C: MidiNumber = 60;

const MAJOR_TONICS: [&str; 12] = ["C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F"];
const MINOR_TONICS: [&str; 12] = ["A", "E", "B", "F#", "C#", "G#", "Eb", "Bb", "F", "C", "G", "D"];

/// One key of a scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDegree {
    pub midi: MidiNumber,
    pub label: String,
}

/// A validated scale. See the module docs for the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedScale")]
pub struct Scale {
    value: String,
    tonic: String,
    quality: Quality,
    keys: Vec<ScaleDegree>,
}

/// Deserialization shadow of [`Scale`]; goes through [`Scale::new`] so a
/// serialized session can't smuggle in a malformed scale.
#[derive(Deserialize)]
struct UncheckedScale {
    value: String,
    tonic: String,
    quality: Quality,
    keys: Vec<ScaleDegree>,
}

impl TryFrom<UncheckedScale> for Scale {
    type Error = TrainerError;

    fn try_from(raw: UncheckedScale) -> Result<Self, Self::Error> {
        Scale::new(raw.value, raw.tonic, raw.quality, raw.keys)
    }
}

impl Scale {
    /// Build a scale from explicit keys.
    ///
    /// Fails with `ScaleLength` unless there are exactly `SCALE_LENGTH` keys,
    /// and with `UnorderedScale` unless they are strictly ascending.
    pub fn new(
        value: impl Into<String>,
        tonic: impl Into<String>,
        quality: Quality,
        keys: Vec<ScaleDegree>,
    ) -> Result<Self, TrainerError> {
        let value = value.into();

        if keys.len() != SCALE_LENGTH {
            return Err(TrainerError::ScaleLength {
                scale: value,
                expected: SCALE_LENGTH,
                found: keys.len(),
            });
        }

        if let Some(position) = (1..keys.len()).find(|&i| keys[i].midi <= keys[i - 1].midi) {
            return Err(TrainerError::UnorderedScale {
                scale: value,
                position,
                midi: keys[position].midi,
            });
        }

        Ok(Self {
            value,
            tonic: tonic.into(),
            quality,
            keys,
        })
    }

    /// Generate a major or natural minor scale from its tonic.
    ///
    /// `root` pins the starting octave; without it the root lands between C4
    /// and B4. Degrees are labelled with roman numerals.
    ///
    /// # Examples
    /// ```
    /// use scale_trainer::{Quality, Scale};
    ///
    /// let scale = Scale::generate("F#", Quality::Minor, None).unwrap();
    /// assert_eq!(scale.value(), "f-sharp-minor");
    /// assert_eq!(scale.start(), 66);
    /// assert_eq!(scale.end(), 78);
    /// ```
    pub fn generate(
        tonic: &str,
        quality: Quality,
        root: Option<MidiNumber>,
    ) -> Result<Self, TrainerError> {
        let pitch_class =
            parse_tonic(tonic).ok_or_else(|| TrainerError::UnknownTonic(tonic.to_string()))?;
        let root = root.unwrap_or(MIDDLE_C + pitch_class);
        let value = format!("{}-{}", tonic_slug(tonic), quality.as_str());

        let mut keys = Vec::with_capacity(SCALE_LENGTH);
        for (step, label) in quality.steps().iter().zip(quality.numerals()) {
            let midi = root.checked_add(*step).ok_or_else(|| {
                TrainerError::ConfigError(format!("Scale '{}' runs past MIDI 255", value))
            })?;
            keys.push(ScaleDegree {
                midi,
                label: label.to_string(),
            });
        }

        Self::new(value, tonic.trim(), quality, keys)
    }

    /// Identifier such as `"c-major"`.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Tonic spelling bound to `{{key}}` in quiz questions.
    pub fn tonic(&self) -> &str {
        &self.tonic
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> &[ScaleDegree] {
        &self.keys
    }

    /// First ascending key: the scale root.
    pub fn start(&self) -> MidiNumber {
        self.keys[0].midi
    }

    /// Last ascending key: the first key going down.
    pub fn end(&self) -> MidiNumber {
        self.keys[SCALE_LENGTH - 1].midi
    }

    /// Key at `position` counting up from the root (wraps every `SCALE_LENGTH`).
    pub fn ascending(&self, position: u32) -> MidiNumber {
        self.keys[position as usize % SCALE_LENGTH].midi
    }

    /// Key at `position` counting down from the top (wraps every `SCALE_LENGTH`).
    pub fn descending(&self, position: u32) -> MidiNumber {
        self.keys[SCALE_LENGTH - 1 - position as usize % SCALE_LENGTH].midi
    }

    pub fn contains(&self, midi: MidiNumber) -> bool {
        self.keys.iter().any(|d| d.midi == midi)
    }

    /// Degree label of an exact key of this scale.
    pub fn label(&self, midi: MidiNumber) -> Option<&str> {
        self.keys
            .iter()
            .find(|d| d.midi == midi)
            .map(|d| d.label.as_str())
    }
}

/// The scales a session can choose from, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleTable {
    scales: Vec<Scale>,
}

impl ScaleTable {
    /// Build a table; values must be unique and the table non-empty.
    pub fn new(scales: Vec<Scale>) -> Result<Self, TrainerError> {
        if scales.is_empty() {
            return Err(TrainerError::EmptyScaleTable);
        }
        for (i, scale) in scales.iter().enumerate() {
            if scales[..i].iter().any(|s| s.value == scale.value) {
                return Err(TrainerError::ConfigError(format!(
                    "Duplicate scale value: {}",
                    scale.value
                )));
            }
        }
        Ok(Self { scales })
    }

    /// 12 major scales then 12 natural minor scales, around the circle of fifths.
    pub fn builtin() -> Self {
        let majors = MAJOR_TONICS.iter().map(|t| (*t, Quality::Major));
        let minors = MINOR_TONICS.iter().map(|t| (*t, Quality::Minor));
        let scales = majors
            .chain(minors)
            .filter_map(|(tonic, quality)| Scale::generate(tonic, quality, None).ok())
            .collect();
        Self { scales }
    }

    /// Look a scale up by value.
    pub fn get(&self, value: &str) -> Result<&Scale, TrainerError> {
        self.scales
            .iter()
            .find(|s| s.value == value)
            .ok_or_else(|| TrainerError::UnknownScale(value.to_string()))
    }

    /// First scale in display order.
    pub fn first(&self) -> &Scale {
        &self.scales[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scale> {
        self.scales.iter()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn of_quality(&self, quality: Quality) -> Vec<&Scale> {
        self.scales.iter().filter(|s| s.quality == quality).collect()
    }

    /// Uniform pick over the whole table. The caller's current scale is a
    /// valid outcome.
    pub fn random<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &Scale {
        &self.scales[rng.next_index(self.scales.len())]
    }
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
