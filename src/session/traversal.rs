//! Scale traversal rules
//!
//! Pure functions from `(scale, settings, tracker, direction)` to the next
//! tracker and direction. [`crate::Session`] is the only caller that mutates
//! state with the results.
//!
//! ## Rules
//! With `position = note_counter` (wrapping every `SCALE_LENGTH`):
//!
//! - **Ping-pong, descending**
//!   - at the root: turn around (ascending) and request a shuffle if enabled
//!   - otherwise: hint the played note, target the key `position` steps down
//!     from the top
//! - **Everything else**
//!   - at the top key: turn around (descending). Without ping-pong the target
//!     jumps back to the root; the hint becomes the root under hard mode and the
//!     played note otherwise. Request a shuffle if enabled.
//!   - otherwise: hint the played note, target the key `position` steps up from
//!     the root
//!
//! Positions keep counting across a turn-around, so with ping-pong the key at
//! the turning point is the target twice: once to arrive and once to leave.

use super::state::{Boundary, Direction, NoteTracker, SessionState};
use crate::scale::Scale;
use crate::settings::Settings;

/// Outcome of one traversal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub tracker: NoteTracker,
    pub direction: Direction,
    /// Set when the played note was a turn-around point
    pub boundary: Option<Boundary>,
    /// The host must swap in a random scale (shuffle mode hit a boundary)
    pub shuffle: bool,
}

impl Step {
    fn settled(tracker: NoteTracker, direction: Direction) -> Self {
        Self {
            tracker,
            direction,
            boundary: None,
            shuffle: false,
        }
    }
}

/// Fresh tracker anchored at the scale root.
///
/// Settings never influence where a reset lands, only *whether* one happens.
pub fn reset(scale: &Scale) -> NoteTracker {
    NoteTracker::anchored(scale.start())
}

/// Recompute the hint and target after `tracker.current_midi_number` or
/// `tracker.note_counter` changed.
pub fn advance(
    scale: &Scale,
    settings: &Settings,
    tracker: &NoteTracker,
    direction: Direction,
) -> Step {
    let current = tracker.current_midi_number;
    let position = tracker.note_counter;
    let mut next = *tracker;

    if settings.ping_pong && direction == Direction::Descending {
        if current == scale.start() {
            step_up(&mut next, scale, position);
            return Step {
                tracker: next,
                direction: Direction::Ascending,
                boundary: Some(Boundary::Bottom),
                shuffle: settings.shuffle,
            };
        }
        step_down(&mut next, scale, position);
        return Step::settled(next, Direction::Descending);
    }

    if current == scale.end() {
        if settings.ping_pong {
            step_down(&mut next, scale, position);
        } else {
            next.next_target_midi_number = scale.start();
            next.prev_note = Some(if settings.hard_mode {
                scale.start()
            } else {
                current
            });
        }
        return Step {
            tracker: next,
            direction: Direction::Descending,
            boundary: Some(Boundary::Top),
            shuffle: settings.shuffle,
        };
    }

    step_up(&mut next, scale, position);
    Step::settled(next, direction)
}

/// Resolve the tracker after the host moved from `prev` to `next`.
///
/// - scale or any setting differs: full reset at the new root, ascending
/// - played note or counter differs: one [`advance`]
/// - otherwise: `next` as is
///
/// Scale and settings win over a simultaneous note change, so a traversal step
/// is never computed against a scale the tracker wasn't anchored in.
pub fn on_dependency_changed(prev: &SessionState, next: &SessionState) -> Step {
    if prev.scale != next.scale || prev.settings != next.settings {
        return Step::settled(reset(&next.scale), Direction::Ascending);
    }

    let played = &next.tracker;
    if prev.tracker.current_midi_number != played.current_midi_number
        || prev.tracker.note_counter != played.note_counter
    {
        return advance(&next.scale, &next.settings, played, next.direction);
    }

    Step::settled(next.tracker, next.direction)
}

fn step_up(tracker: &mut NoteTracker, scale: &Scale, position: u32) {
    tracker.prev_note = Some(tracker.current_midi_number);
    tracker.next_target_midi_number = scale.ascending(position);
}

fn step_down(tracker: &mut NoteTracker, scale: &Scale, position: u32) {
    tracker.prev_note = Some(tracker.current_midi_number);
    tracker.next_target_midi_number = scale.descending(position);
}
