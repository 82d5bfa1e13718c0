use super::*;
use crate::random::{RandomSource, SequenceSource};
use crate::scale::ScaleTable;
use crate::settings::{PracticeMode, Screen, SettingChange, Settings};
use crate::TrainerError;
use rand::rngs::StdRng;
use rand::SeedableRng;

const C_MAJOR: [u8; 8] = [60, 62, 64, 65, 67, 69, 71, 72];
const C_MAJOR_DOWN: [u8; 8] = [72, 71, 69, 67, 65, 64, 62, 60];

fn session(indices: Vec<usize>) -> Session<SequenceSource> {
    Session::with_rng(ScaleTable::builtin(), SequenceSource::new(indices))
}

/// Play `notes` and collect the target after each one.
fn targets_after<R: RandomSource>(session: &mut Session<R>, notes: &[u8]) -> Vec<u8> {
    notes
        .iter()
        .map(|&midi| {
            session.note_on(midi);
            session.tracker().next_target_midi_number
        })
        .collect()
}

#[test]
fn test_reset_anchors_every_scale_at_its_root() {
    let table = ScaleTable::builtin();
    for scale in table.iter() {
        let tracker = reset(scale);
        assert_eq!(tracker.current_midi_number, scale.start());
        assert_eq!(tracker.next_target_midi_number, scale.start());
        assert_eq!(tracker.prev_note, Some(scale.start()));
        assert_eq!(tracker.note_counter, 0);
    }
}

#[test]
fn test_new_session_starts_on_first_scale() {
    let session = session(vec![]);
    assert_eq!(session.scale().value(), "c-major");
    assert_eq!(*session.tracker(), NoteTracker::anchored(60));
    assert_eq!(session.direction(), Direction::Ascending);
    assert_eq!(*session.settings(), Settings::default());
}

#[test]
fn test_ascending_pass_wraps_to_root_once() {
    let mut session = session(vec![]);

    let first = targets_after(&mut session, &C_MAJOR);
    assert_eq!(first, vec![62, 64, 65, 67, 69, 71, 72, 60]);
    assert_eq!(first.iter().filter(|&&t| t == 60).count(), 1);

    // The second pass lines up with the counter again
    let second = targets_after(&mut session, &C_MAJOR);
    assert_eq!(second, first);
    assert_eq!(session.tracker().note_counter, 16);
}

#[test]
fn test_top_boundary_without_ping_pong() {
    let mut session = session(vec![]);
    targets_after(&mut session, &C_MAJOR[..7]);

    let transition = session.note_on(72);
    assert_eq!(
        transition,
        Transition::Advanced {
            target: 60,
            boundary: Some(Boundary::Top),
        }
    );
    assert_eq!(session.tracker().prev_note, Some(72));
    // Direction flips even though ping-pong is off, and the snapshot keeps it
    assert_eq!(session.direction(), Direction::Descending);
    let yaml = serde_yaml::to_string(session.state()).unwrap();
    assert!(yaml.contains("direction: descending"));

    // ...but without ping-pong the next pass still goes up
    session.note_on(60);
    assert_eq!(session.tracker().next_target_midi_number, 62);
}

#[test]
fn test_hard_mode_hint_lags_target() {
    let mut session = session(vec![]);
    session.change_setting(SettingChange::HardMode(true));

    session.note_on(60);
    session.note_on(62);
    let tracker = session.tracker();
    assert_eq!(tracker.next_target_midi_number, 64);
    assert_eq!(tracker.prev_note, Some(62));
    assert_eq!(tracker.hint(true), 62);
    assert_eq!(tracker.hint(false), 64);

    // At the top the hint jumps to the root along with the target
    targets_after(&mut session, &C_MAJOR[2..]);
    assert_eq!(session.tracker().next_target_midi_number, 60);
    assert_eq!(session.tracker().prev_note, Some(60));
}

#[test]
fn test_ping_pong_descends_in_strict_reverse() {
    let mut session = session(vec![]);
    session.change_setting(SettingChange::PingPong(true));

    let up = targets_after(&mut session, &C_MAJOR);
    assert_eq!(up, vec![62, 64, 65, 67, 69, 71, 72, 72]);
    assert_eq!(session.direction(), Direction::Descending);

    // From the flip on, targets walk the keys top to bottom
    let down = targets_after(&mut session, &C_MAJOR_DOWN[..7]);
    let mut sequence = vec![72];
    sequence.extend(down);
    assert_eq!(sequence, C_MAJOR_DOWN.to_vec());

    // Reaching the root turns around again
    let transition = session.note_on(60);
    assert_eq!(
        transition,
        Transition::Advanced {
            target: 60,
            boundary: Some(Boundary::Bottom),
        }
    );
    assert_eq!(session.direction(), Direction::Ascending);
    assert_eq!(targets_after(&mut session, &[60, 62]), vec![62, 64]);
}

#[test]
fn test_missed_note_changes_nothing() {
    let mut session = session(vec![]);
    session.note_on(60);
    let before = session.state().clone();

    let transition = session.note_on(63);
    assert_eq!(
        transition,
        Transition::Missed {
            expected: 62,
            played: 63,
        }
    );
    assert_eq!(*session.state(), before);
}

#[test]
fn test_record_note_is_ungated() {
    let mut session = session(vec![]);
    session.record_note(61);
    let tracker = session.tracker();
    assert_eq!(tracker.current_midi_number, 61);
    assert_eq!(tracker.prev_note, Some(61));
    assert_eq!(tracker.note_counter, 1);
    assert_eq!(tracker.next_target_midi_number, 62);
}

#[test]
fn test_shuffle_only_at_top_without_ping_pong() {
    // Index 12 is a-minor in the built-in table
    let mut session = session(vec![12]);
    session.change_setting(SettingChange::Shuffle(true));

    for &midi in &C_MAJOR[..7] {
        let transition = session.note_on(midi);
        assert!(matches!(transition, Transition::Advanced { boundary: None, .. }));
        assert_eq!(session.scale().value(), "c-major");
    }

    let transition = session.note_on(72);
    assert_eq!(
        transition,
        Transition::Shuffled {
            from: "c-major".to_string(),
            to: "a-minor".to_string(),
        }
    );
    assert_eq!(*session.tracker(), NoteTracker::anchored(69));
    assert_eq!(session.direction(), Direction::Ascending);
}

#[test]
fn test_shuffle_drawing_active_scale_keeps_position() {
    let mut session = session(vec![0]);
    session.change_setting(SettingChange::Shuffle(true));

    targets_after(&mut session, &C_MAJOR[..7]);
    let transition = session.note_on(72);
    assert_eq!(
        transition,
        Transition::Advanced {
            target: 60,
            boundary: Some(Boundary::Top),
        }
    );
    assert_eq!(session.scale().value(), "c-major");
    assert_eq!(session.tracker().note_counter, 8);
}

#[test]
fn test_ping_pong_shuffle_at_both_ends() {
    // Top draws c-major (no change), bottom draws g-major
    let mut session = session(vec![0, 1]);
    session.change_setting(SettingChange::PingPong(true));
    session.change_setting(SettingChange::Shuffle(true));

    targets_after(&mut session, &C_MAJOR);
    assert_eq!(session.scale().value(), "c-major");
    assert_eq!(session.direction(), Direction::Descending);

    targets_after(&mut session, &C_MAJOR_DOWN[..7]);
    assert_eq!(session.scale().value(), "c-major");

    let transition = session.note_on(60);
    assert_eq!(
        transition,
        Transition::Shuffled {
            from: "c-major".to_string(),
            to: "g-major".to_string(),
        }
    );
    assert_eq!(*session.tracker(), NoteTracker::anchored(67));
}

#[test]
fn test_ping_pong_shuffle_at_top_abandons_descent() {
    let mut session = session(vec![1]);
    session.change_setting(SettingChange::PingPong(true));
    session.change_setting(SettingChange::Shuffle(true));

    targets_after(&mut session, &C_MAJOR[..7]);
    assert!(matches!(session.note_on(72), Transition::Shuffled { .. }));
    assert_eq!(session.scale().value(), "g-major");
    assert_eq!(session.direction(), Direction::Ascending);
}

#[test]
fn test_any_setting_change_resets_mid_scale() {
    let changes = [
        SettingChange::HardMode(true),
        SettingChange::PingPong(true),
        SettingChange::Shuffle(true),
        SettingChange::PracticeMode(PracticeMode::Chords),
        SettingChange::Screen(Screen::Quiz),
    ];

    for change in changes {
        let mut session = session(vec![]);
        targets_after(&mut session, &[60, 62, 64]);
        assert_eq!(session.change_setting(change), Transition::Reset, "{:?}", change);
        assert_eq!(*session.tracker(), NoteTracker::anchored(60));
        assert_eq!(session.direction(), Direction::Ascending);
    }
}

#[test]
fn test_setting_same_value_is_a_no_op() {
    let mut session = session(vec![]);
    targets_after(&mut session, &[60, 62]);
    let before = session.state().clone();

    assert_eq!(session.change_setting(SettingChange::HardMode(false)), Transition::Unchanged);
    assert_eq!(session.change_screen(Screen::Practice), Transition::Unchanged);
    assert_eq!(*session.state(), before);
}

#[test]
fn test_enabling_ping_pong_after_a_pass_starts_ascending() {
    let mut session = session(vec![]);
    targets_after(&mut session, &C_MAJOR);
    assert_eq!(session.direction(), Direction::Descending);

    session.change_setting(SettingChange::PingPong(true));
    assert_eq!(session.direction(), Direction::Ascending);

    let up = targets_after(&mut session, &C_MAJOR);
    assert_eq!(up.last(), Some(&72));
}

#[test]
fn test_scale_change_reanchors() {
    let mut session = session(vec![]);
    targets_after(&mut session, &[60, 62]);

    assert_eq!(session.select_scale("d-major"), Ok(Transition::Reset));
    assert_eq!(*session.tracker(), NoteTracker::anchored(62));
    assert_eq!(
        session.select_scale("h-major"),
        Err(TrainerError::UnknownScale("h-major".to_string()))
    );
    assert_eq!(session.scale().value(), "d-major");

    assert_eq!(targets_after(&mut session, &[62, 64, 66]), vec![64, 66, 67]);
}

#[test]
fn test_randomize_scale_uses_injected_source() {
    let mut session = session(vec![5, 5]);
    let drawn = session.randomize_scale();
    assert_eq!(drawn.value(), "b-major");
    assert_eq!(session.scale(), &drawn);
    assert_eq!(*session.tracker(), NoteTracker::anchored(71));

    // Same scale again: position is kept
    session.note_on(71);
    let before = session.state().clone();
    session.randomize_scale();
    assert_eq!(*session.state(), before);
}

#[test]
fn test_handle_dispatches_events() {
    let mut session = session(vec![]);
    let table = ScaleTable::builtin();

    assert!(matches!(
        session.handle(SessionEvent::NoteOn(60)),
        Transition::Advanced { target: 62, .. }
    ));
    assert_eq!(
        session.handle(SessionEvent::ScreenChanged(Screen::Quiz)),
        Transition::Reset
    );
    assert_eq!(
        session.handle(SessionEvent::SettingChanged(SettingChange::Shuffle(true))),
        Transition::Reset
    );
    let e_minor = table.get("e-minor").unwrap().clone();
    assert_eq!(
        session.handle(SessionEvent::ScaleChanged(e_minor)),
        Transition::Reset
    );
    assert_eq!(session.tracker().next_target_midi_number, 64);
}

#[test]
fn test_reset_wins_over_simultaneous_note() {
    let table = ScaleTable::builtin();
    let prev = SessionState::new(table.get("c-major").unwrap().clone(), Settings::default());

    let mut next = prev.clone();
    next.scale = table.get("f-major").unwrap().clone();
    next.tracker.current_midi_number = 60;
    next.tracker.note_counter = 1;

    let step = on_dependency_changed(&prev, &next);
    assert_eq!(step.tracker, NoteTracker::anchored(65));
    assert_eq!(step.direction, Direction::Ascending);
    assert!(!step.shuffle);
}

#[test]
fn test_unchanged_dependencies_keep_tracker() {
    let table = ScaleTable::builtin();
    let state = SessionState::new(table.first().clone(), Settings::default());
    let step = on_dependency_changed(&state, &state);
    assert_eq!(step.tracker, state.tracker);
    assert_eq!(step.boundary, None);
}

#[test]
fn test_snapshot_resumes_identically() {
    let mut original = session(vec![]);
    original.change_setting(SettingChange::PingPong(true));
    targets_after(&mut original, &C_MAJOR);

    let yaml = serde_yaml::to_string(original.state()).unwrap();
    let state: SessionState = serde_yaml::from_str(&yaml).unwrap();
    let mut resumed =
        Session::restore(ScaleTable::builtin(), SequenceSource::new(vec![]), state).unwrap();

    assert_eq!(
        targets_after(&mut resumed, &C_MAJOR_DOWN),
        targets_after(&mut original, &C_MAJOR_DOWN)
    );
}

#[test]
fn test_snapshot_with_foreign_target_rejected() {
    let mut session = session(vec![]);
    session.note_on(60);
    let mut tampered = session.state().clone();
    tampered.tracker.next_target_midi_number = 61;

    assert_eq!(
        Session::restore(ScaleTable::builtin(), SequenceSource::new(vec![]), tampered.clone())
            .unwrap_err(),
        TrainerError::TargetOutsideScale {
            scale: "c-major".to_string(),
            midi: 61,
        }
    );

    let yaml = serde_yaml::to_string(&tampered).unwrap();
    let parsed: Result<SessionState, _> = serde_yaml::from_str(&yaml);
    assert!(parsed.is_err());
}

fn chord_session(mode: PracticeMode) -> Session<SequenceSource> {
    let mut session = session(vec![]);
    session.change_setting(SettingChange::PracticeMode(mode));
    session
}

#[test]
fn test_chords_advance_on_full_triad() {
    let mut session = chord_session(PracticeMode::Chords);
    for midi in [60, 64, 67] {
        session.note_on(midi);
    }
    assert_eq!(session.tracker().next_target_midi_number, 62);

    // D F A, in any order
    assert_eq!(
        session.note_on(65),
        Transition::Held {
            played: 65,
            remaining: 2,
        }
    );
    assert_eq!(
        session.note_on(69),
        Transition::Held {
            played: 69,
            remaining: 1,
        }
    );
    assert_eq!(session.state().chord_stack, vec![65, 69]);
    assert_eq!(
        session.note_on(62),
        Transition::Advanced {
            target: 64,
            boundary: None,
        }
    );
    assert!(session.state().chord_stack.is_empty());
    assert_eq!(session.tracker().current_midi_number, 62);
}

#[test]
fn test_repeated_chord_note_counts_once() {
    let mut session = chord_session(PracticeMode::Chords);
    session.note_on(60);
    assert_eq!(
        session.note_on(60),
        Transition::Held {
            played: 60,
            remaining: 2,
        }
    );
    assert_eq!(session.state().chord_stack, vec![60]);
}

#[test]
fn test_seventh_chords_need_four_notes() {
    let mut session = chord_session(PracticeMode::SeventhChords);
    // C E G B
    for midi in [60, 64, 67] {
        assert!(matches!(session.note_on(midi), Transition::Held { .. }));
    }
    assert_eq!(session.tracker().next_target_midi_number, 60);
    assert!(matches!(session.note_on(71), Transition::Advanced { target: 62, .. }));
}

#[test]
fn test_fifths_need_root_and_fifth() {
    let mut session = chord_session(PracticeMode::Fifths);
    assert!(matches!(session.note_on(67), Transition::Held { remaining: 1, .. }));
    assert!(matches!(session.note_on(60), Transition::Advanced { target: 62, .. }));
    assert!(matches!(session.note_on(62), Transition::Held { .. }));
    assert!(matches!(session.note_on(69), Transition::Advanced { target: 64, .. }));
}

#[test]
fn test_miss_drops_partial_chord() {
    let mut session = chord_session(PracticeMode::Chords);
    session.note_on(60);
    session.note_on(64);

    assert_eq!(
        session.note_on(65),
        Transition::Missed {
            expected: 60,
            played: 65,
        }
    );
    assert!(session.state().chord_stack.is_empty());
    assert!(matches!(session.note_on(67), Transition::Held { remaining: 2, .. }));
}

#[test]
fn test_reset_drops_partial_chord() {
    let mut session = chord_session(PracticeMode::Chords);
    session.note_on(64);
    assert_eq!(session.state().chord_stack, vec![64]);

    assert_eq!(session.change_setting(SettingChange::HardMode(true)), Transition::Reset);
    assert!(session.state().chord_stack.is_empty());
    assert_eq!(session.select_scale("g-major"), Ok(Transition::Reset));
    assert!(session.state().chord_stack.is_empty());
}

#[test]
fn test_target_always_in_scale() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = Session::with_rng(ScaleTable::builtin(), StdRng::seed_from_u64(7));

    for _ in 0..2_000 {
        match rng.next_index(10) {
            0 => {
                let on = rng.next_index(2) == 1;
                let change = match rng.next_index(3) {
                    0 => SettingChange::PingPong(on),
                    1 => SettingChange::HardMode(on),
                    _ => SettingChange::Shuffle(on),
                };
                session.change_setting(change);
            }
            1 => {
                // Any key on a two-octave keyboard
                session.record_note(48 + rng.next_index(25) as u8);
            }
            _ => {
                let target = session.tracker().next_target_midi_number;
                session.note_on(target);
            }
        }
        let tracker = session.tracker();
        assert!(session.scale().contains(tracker.next_target_midi_number));
        assert!(tracker.prev_note.is_some());
        assert!(session.state().validate().is_ok());
    }
}
