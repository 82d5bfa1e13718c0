//! The practice session
//!
//! [`Session`] owns the scale table, the random source and the
//! [`SessionState`]. Every write goes through `Session::commit`, which
//! resolves the new state with `on_dependency_changed` before storing it, so
//! readers only ever observe settled states.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::events::{SessionEvent, Transition};
use super::state::{Direction, NoteTracker, SessionState};
use super::traversal::on_dependency_changed;
use crate::config::TrainerConfig;
use crate::error::TrainerError;
use crate::hint::target_notes;
use crate::random::RandomSource;
use crate::scale::{Scale, ScaleTable};
use crate::settings::{Screen, SettingChange, Settings};
use crate::theory::MidiNumber;

/// A single practice session.
///
/// # Example
/// ```
/// use scale_trainer::{ScaleTable, Session, Transition};
///
/// let mut session = Session::new(ScaleTable::builtin());
/// assert_eq!(session.scale().value(), "c-major");
/// assert_eq!(session.tracker().next_target_midi_number, 60);
///
/// session.note_on(60);
/// assert_eq!(session.tracker().next_target_midi_number, 62);
///
/// // Wrong notes are ignored
/// assert!(matches!(session.note_on(61), Transition::Missed { expected: 62, .. }));
/// ```
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    table: ScaleTable,
    rng: R,
    state: SessionState,
}

impl Session<StdRng> {
    /// Session on the first scale of `table` with default settings, shuffling
    /// from an OS-seeded generator.
    pub fn new(table: ScaleTable) -> Self {
        Self::with_rng(table, StdRng::from_os_rng())
    }

    pub fn from_config(config: TrainerConfig) -> Result<Self, TrainerError> {
        Self::from_config_with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_rng(table: ScaleTable, rng: R) -> Self {
        let state = SessionState::new(table.first().clone(), Settings::default());
        Self { table, rng, state }
    }

    /// Session on the configured default scale and settings.
    pub fn from_config_with_rng(config: TrainerConfig, rng: R) -> Result<Self, TrainerError> {
        let scale = config.initial_scale()?.clone();
        let state = SessionState::new(scale, config.settings);
        Ok(Self {
            table: config.table,
            rng,
            state,
        })
    }

    /// Resume from a snapshot taken with [`Session::state`].
    ///
    /// Fails with `TargetOutsideScale` if the snapshot's target is not a key
    /// of its scale.
    pub fn restore(table: ScaleTable, rng: R, state: SessionState) -> Result<Self, TrainerError> {
        state.validate()?;
        Ok(Self { table, rng, state })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn scale(&self) -> &Scale {
        &self.state.scale
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn tracker(&self) -> &NoteTracker {
        &self.state.tracker
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn table(&self) -> &ScaleTable {
        &self.table
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::NoteOn(midi) => self.note_on(midi),
            SessionEvent::SettingChanged(change) => self.change_setting(change),
            SessionEvent::ScaleChanged(scale) => self.change_scale(scale),
            SessionEvent::ScreenChanged(screen) => self.change_screen(screen),
        }
    }

    /// A key was pressed. Only notes of the target chord count (just the
    /// target in `scales` mode); anything else is a miss that drops the
    /// partly played chord. The session advances once the whole chord is held.
    pub fn note_on(&mut self, midi: MidiNumber) -> Transition {
        let expected = self.state.tracker.next_target_midi_number;
        let required = target_notes(&self.state);

        if !required.contains(&midi) {
            debug!(expected, played = midi, "missed note");
            self.state.chord_stack.clear();
            return Transition::Missed {
                expected,
                played: midi,
            };
        }

        if !self.state.chord_stack.contains(&midi) {
            self.state.chord_stack.push(midi);
        }
        let remaining = required
            .iter()
            .filter(|note| !self.state.chord_stack.contains(*note))
            .count();
        if remaining > 0 {
            debug!(played = midi, remaining, "chord note held");
            return Transition::Held {
                played: midi,
                remaining,
            };
        }

        self.record_note(expected)
    }

    /// Record `midi` as played and advance, without checking it against the
    /// target. For hosts that judge notes themselves.
    pub fn record_note(&mut self, midi: MidiNumber) -> Transition {
        let mut next = self.state.clone();
        next.tracker.current_midi_number = midi;
        next.tracker.note_counter = next.tracker.note_counter.wrapping_add(1);
        self.commit(next)
    }

    pub fn change_setting(&mut self, change: SettingChange) -> Transition {
        let mut next = self.state.clone();
        next.settings = next.settings.with(change);
        self.commit(next)
    }

    pub fn change_screen(&mut self, screen: Screen) -> Transition {
        self.change_setting(SettingChange::Screen(screen))
    }

    pub fn change_scale(&mut self, scale: Scale) -> Transition {
        let mut next = self.state.clone();
        next.scale = scale;
        self.commit(next)
    }

    /// Switch to the table scale called `value`.
    pub fn select_scale(&mut self, value: &str) -> Result<Transition, TrainerError> {
        let scale = self.table.get(value)?.clone();
        Ok(self.change_scale(scale))
    }

    /// Make a uniformly drawn table scale active and return it. Drawing the
    /// active scale is allowed and changes nothing.
    pub fn randomize_scale(&mut self) -> Scale {
        let drawn = self.table.random(&mut self.rng).clone();
        self.change_scale(drawn.clone());
        drawn
    }

    /// Resolve `next` against the current state and store it.
    fn commit(&mut self, next: SessionState) -> Transition {
        if next == self.state {
            return Transition::Unchanged;
        }

        let rescaled = next.scale != self.state.scale || next.settings != self.state.settings;
        let step = on_dependency_changed(&self.state, &next);
        let resolved = SessionState {
            tracker: step.tracker,
            direction: step.direction,
            chord_stack: Vec::new(),
            ..next
        };

        if step.shuffle {
            let drawn = self.table.random(&mut self.rng).clone();
            if drawn != resolved.scale {
                let shuffled = SessionState {
                    scale: drawn,
                    ..resolved.clone()
                };
                let anchored = on_dependency_changed(&resolved, &shuffled);
                let from = resolved.scale.value().to_string();
                let to = shuffled.scale.value().to_string();
                info!(%from, %to, "shuffled scale at boundary");
                self.state = SessionState {
                    tracker: anchored.tracker,
                    direction: anchored.direction,
                    ..shuffled
                };
                return Transition::Shuffled { from, to };
            }
            debug!(scale = resolved.scale.value(), "shuffle drew the active scale");
        }

        self.state = resolved;

        if rescaled {
            debug!(
                scale = self.state.scale.value(),
                root = self.state.tracker.next_target_midi_number,
                "session reset"
            );
            return Transition::Reset;
        }

        let tracker = &self.state.tracker;
        debug!(
            current = tracker.current_midi_number,
            target = tracker.next_target_midi_number,
            counter = tracker.note_counter,
            direction = ?self.state.direction,
            "advanced"
        );
        Transition::Advanced {
            target: tracker.next_target_midi_number,
            boundary: step.boundary,
        }
    }
}
