//! # Session Module
//!
//! The practice-session state machine: where the player is in the active
//! scale, and which note comes next.
//!
//! ## Sub-modules
//! - `state` - NoteTracker, Direction and SessionState definitions
//! - `traversal` - Pure traversal and reset rules
//! - `events` - Host events and the transitions they produce
//! - `machine` - The `Session` that applies events to its state
//!
//! ## Event Flow
//! ```text
//! host ──SessionEvent──▶ Session::handle
//!                           │  note_on: collect chord notes, wait until
//!                           │  the target chord is complete
//!                           │  builds the proposed SessionState
//!                           ▼
//!                 on_dependency_changed(prev, next)
//!                           │  reset (scale/settings changed)
//!                           │  or advance (note played)
//!                           ▼
//!                   shuffle requested? ──▶ swap scale + reset
//!                           │
//!                           ▼
//!                 settled SessionState ──▶ host re-renders
//! ```
//!
//! ## Example: ping-pong through C major
//! ```rust
//! use scale_trainer::{ScaleTable, Session, SettingChange};
//!
//! let mut session = Session::new(ScaleTable::builtin());
//! session.change_setting(SettingChange::PingPong(true));
//!
//! // Up: C D E F G A B C
//! for midi in [60, 62, 64, 65, 67, 69, 71, 72] {
//!     session.note_on(midi);
//! }
//! // The top note is played once more to start the descent
//! assert_eq!(session.tracker().next_target_midi_number, 72);
//! session.note_on(72);
//! assert_eq!(session.tracker().next_target_midi_number, 71);
//! ```

mod events;
mod machine;
mod state;
pub mod traversal;

#[cfg(test)]
mod tests;

pub use events::{SessionEvent, Transition};
pub use machine::Session;
pub use state::{Boundary, Direction, NoteTracker, SessionState};
pub use traversal::{advance, on_dependency_changed, reset, Step};
