//! # Trainer Configuration
//!
//! Optional YAML document that replaces the built-in scale table and sets the
//! starting scale and settings. Every key is optional.
//!
//! ## Format
//! ```yaml
//! default-scale: d-minor
//! settings:
//!   practice-mode: chords
//!   ping-pong: true
//! scales:
//!   # generated: major or natural minor with roman numeral labels
//!   - tonic: D
//!     quality: minor
//!   - tonic: Bb
//!     quality: major
//!     root: 58            # pin the octave (Bb3)
//!   # explicit keys, ascending
//!   - value: c-blues-ish
//!     tonic: C
//!     quality: minor
//!     keys:
//!       - { midi: 60, label: "1" }
//!       # ... exactly 8 entries
//! ```
//!
//! Without `scales` the built-in table is used; without `default-scale` the
//! first table entry is the starting scale.
//!
//! ## Validation
//! The YAML is read into `Raw*` structs, then each scale goes through
//! [`Scale::new`] / [`Scale::generate`], so malformed tables fail here, before
//! a session exists.

use serde::Deserialize;

use crate::error::TrainerError;
use crate::scale::{Scale, ScaleDegree, ScaleTable};
use crate::settings::Settings;
use crate::theory::{MidiNumber, Quality};

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub default_scale: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub scales: Vec<RawScale>,
}

/// One `scales` entry before validation
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawScale {
    pub value: Option<String>,
    pub tonic: String,
    pub quality: String,
    pub root: Option<MidiNumber>,
    pub keys: Option<Vec<ScaleDegree>>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    pub table: ScaleTable,
    pub default_scale: Option<String>,
    pub settings: Settings,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            table: ScaleTable::builtin(),
            default_scale: None,
            settings: Settings::default(),
        }
    }
}

impl TrainerConfig {
    /// Parse and validate a YAML configuration document.
    ///
    /// # Examples
    /// ```
    /// use scale_trainer::{PracticeMode, TrainerConfig};
    ///
    /// let config = TrainerConfig::from_yaml(
    ///     "default-scale: g-major\nsettings:\n  practice-mode: fifths\n",
    /// )?;
    /// assert_eq!(config.initial_scale()?.start(), 67);
    /// assert_eq!(config.settings.practice_mode, PracticeMode::Fifths);
    /// # Ok::<(), scale_trainer::TrainerError>(())
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, TrainerError> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| TrainerError::ConfigError(e.to_string()))?
        };

        let table = if raw.scales.is_empty() {
            ScaleTable::builtin()
        } else {
            let scales = raw
                .scales
                .into_iter()
                .map(build_scale)
                .collect::<Result<Vec<_>, _>>()?;
            ScaleTable::new(scales)?
        };

        let config = Self {
            table,
            default_scale: raw.default_scale,
            settings: raw.settings,
        };
        // Surface a bad default now rather than at session start
        config.initial_scale()?;
        Ok(config)
    }

    /// The scale a new session starts on.
    pub fn initial_scale(&self) -> Result<&Scale, TrainerError> {
        match &self.default_scale {
            Some(value) => self.table.get(value),
            None => Ok(self.table.first()),
        }
    }
}

fn build_scale(raw: RawScale) -> Result<Scale, TrainerError> {
    let quality = Quality::from_str(&raw.quality).ok_or_else(|| {
        TrainerError::ConfigError(format!(
            "quality must be major or minor, got '{}'",
            raw.quality
        ))
    })?;

    match raw.keys {
        Some(keys) => {
            if raw.root.is_some() {
                return Err(TrainerError::ConfigError(format!(
                    "scale '{}' sets both root and keys",
                    raw.tonic
                )));
            }
            let value = raw.value.ok_or_else(|| {
                TrainerError::ConfigError(format!(
                    "scale '{}' with explicit keys needs a value",
                    raw.tonic
                ))
            })?;
            Scale::new(value, raw.tonic, quality, keys)
        }
        None => {
            let generated = Scale::generate(&raw.tonic, quality, raw.root)?;
            match raw.value {
                Some(value) => Scale::new(
                    value,
                    generated.tonic(),
                    quality,
                    generated.keys().to_vec(),
                ),
                None => Ok(generated),
            }
        }
    }
}
