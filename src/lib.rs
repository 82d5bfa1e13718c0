//! Practice-session state machine and quiz engine for a piano scale trainer.
//!
//! The host (a keyboard UI, a MIDI input loop, a test) feeds events into a
//! [`Session`] and renders whatever it reads back: the target note, the hint
//! notes for the current practice mode, and the key labels.
//!
//! ```
//! use scale_trainer::{hint, ScaleTable, Session, SettingChange};
//!
//! let mut session = Session::new(ScaleTable::builtin());
//! session.change_setting(SettingChange::parse("isHardModeEnabled", "true")?);
//!
//! session.note_on(60);
//! session.note_on(62);
//! // Hard mode reveals the note just played, not the target
//! assert_eq!(session.tracker().next_target_midi_number, 64);
//! assert_eq!(hint::active_notes(session.state()), vec![62]);
//! # Ok::<(), scale_trainer::TrainerError>(())
//! ```

pub mod config;
pub mod error;
pub mod hint;
pub mod quiz;
pub mod random;
pub mod scale;
pub mod session;
pub mod settings;
pub mod theory;

pub use config::TrainerConfig;
pub use error::*;
pub use quiz::{format_question, get_random_question, QuizPrompt, QuizQuestion};
pub use random::{RandomSource, SequenceSource};
pub use scale::{Scale, ScaleDegree, ScaleTable};
pub use session::{
    Boundary, Direction, NoteTracker, Session, SessionEvent, SessionState, Transition,
};
pub use settings::{PracticeMode, Screen, SettingChange, Settings};
pub use theory::{MidiNumber, Quality, SCALE_LENGTH};
