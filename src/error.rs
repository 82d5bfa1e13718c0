//! # Error Types
//!
//! This module defines all error types for the scale trainer.
//!
//! Errors only come from building the scale table, loading configuration or
//! restoring a session snapshot.
//! Traversal and quiz formatting are total functions and never fail: a missing
//! quiz binding leaves its placeholder in the output instead of erroring.
//!
//! ## Error Types
//! - `ScaleLength` - A scale does not have exactly `SCALE_LENGTH` keys
//! - `UnorderedScale` - Scale keys are not strictly ascending
//! - `UnknownScale` - A scale value was requested that the table doesn't hold
//! - `UnknownTonic` - A tonic spelling could not be parsed
//! - `UnknownSetting` - A setting name/value pair from the UI could not be parsed
//! - `EmptyScaleTable` - A table without any scales
//! - `TargetOutsideScale` - A restored session targets a note off its scale
//! - `ConfigError` - Invalid YAML configuration
//!
//! ## Usage
//! ```rust
//! use scale_trainer::{ScaleTable, TrainerError};
//!
//! match ScaleTable::builtin().get("h-major") {
//!     Ok(scale) => println!("root: {}", scale.start()),
//!     Err(TrainerError::UnknownScale(value)) => eprintln!("no scale called {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainerError {
    /// Scale has the wrong number of keys.
    ///
    /// # Example
    /// ```
    /// # use scale_trainer::TrainerError;
    /// let err = TrainerError::ScaleLength {
    ///     scale: "c-major".to_string(),
    ///     expected: 8,
    ///     found: 7,
    /// };
    /// assert_eq!(err.to_string(), "Scale 'c-major' has 7 keys, expected 8");
    /// ```
    #[error("Scale '{scale}' has {found} keys, expected {expected}")]
    ScaleLength {
        scale: String,
        expected: usize,
        found: usize,
    },

    /// Scale keys are not strictly ascending.
    ///
    /// `position` is the 0-based index of the first key that is not higher
    /// than the key before it.
    #[error("Scale '{scale}' is not strictly ascending at key {position} (midi {midi})")]
    UnorderedScale {
        scale: String,
        position: usize,
        midi: u8,
    },

    /// Requested scale value is not in the table.
    #[error("Unknown scale: {0}")]
    UnknownScale(String),

    /// Tonic spelling that is not a note name (e.g. "H", "C##").
    #[error("Unknown tonic: {0}")]
    UnknownTonic(String),

    /// Setting name or value the session doesn't understand.
    #[error("Unknown setting {name} = {value}")]
    UnknownSetting { name: String, value: String },

    /// Scale table without any entries.
    #[error("Scale table is empty")]
    EmptyScaleTable,

    /// Session snapshot whose target note is not a key of its scale.
    #[error("Snapshot target {midi} is not a key of scale '{scale}'")]
    TargetOutsideScale { scale: String, midi: u8 },

    /// Invalid configuration document.
    ///
    /// # Example
    /// ```
    /// # use scale_trainer::TrainerError;
    /// let err = TrainerError::ConfigError("quality must be major or minor".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: quality must be major or minor");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
