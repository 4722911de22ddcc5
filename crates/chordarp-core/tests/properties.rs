//! Property tests for the block processor.

use chordarp_core::{
    compute_duration, BlockContext, ChordArpProcessor, EngineConfig, ParamHandle, ShapeBinding,
};
use chordarp_midi::MidiEvent;
use proptest::prelude::*;

const SR: f64 = 48000.0;

#[derive(Debug, Clone)]
enum Action {
    NoteOn(u8),
    NoteOff(u8),
    AllNotesOff,
    Speed(f32),
    ToggleTurbo,
    ToggleQuality,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (36u8..96).prop_map(Action::NoteOn),
        4 => (36u8..96).prop_map(Action::NoteOff),
        1 => Just(Action::AllNotesOff),
        1 => (0.0f32..=1.0).prop_map(Action::Speed),
        1 => Just(Action::ToggleTurbo),
        1 => Just(Action::ToggleQuality),
    ]
}

fn binding() -> impl Strategy<Value = ShapeBinding> {
    prop_oneof![
        Just(ShapeBinding::BindAtNoteOn),
        Just(ShapeBinding::ReleaseWithCurrent)
    ]
}

/// One block: a few actions followed by a block of `samples`.
fn block() -> impl Strategy<Value = (Vec<Action>, usize)> {
    (prop::collection::vec(action(), 0..6), 1usize..4096)
}

fn setup(binding: ShapeBinding) -> (ParamHandle, ChordArpProcessor) {
    let params = ParamHandle::default();
    let config = EngineConfig {
        sample_rate: SR,
        shape_binding: binding,
        ..Default::default()
    };
    let processor = ChordArpProcessor::new(config, &params).unwrap();
    (params, processor)
}

/// Apply parameter actions and collect the MIDI input for the block.
fn prepare_input(params: &ParamHandle, actions: &[Action]) -> Vec<MidiEvent> {
    let mut input = Vec::new();
    for action in actions {
        match *action {
            Action::NoteOn(note) => input.push(MidiEvent::note_on(0, 0, note, 100)),
            Action::NoteOff(note) => input.push(MidiEvent::note_off(0, 0, note, 0)),
            Action::AllNotesOff => input.push(MidiEvent::all_notes_off(0, 0)),
            Action::Speed(speed) => params.set_speed(speed),
            Action::ToggleTurbo => {
                params.toggle_turbo();
            }
            Action::ToggleQuality => {
                params.toggle_chord_quality();
            }
        }
    }
    input
}

proptest! {
    /// Every emitted note-on is matched by a note-off or is still sounding, and
    /// an empty registry drains to silence at the next boundary.
    #[test]
    fn prop_no_note_leak(binding in binding(), blocks in prop::collection::vec(block(), 1..40)) {
        let (params, mut processor) = setup(binding);
        let mut balance: i64 = 0;

        for (actions, samples) in &blocks {
            let input = prepare_input(&params, actions);
            let out = processor.process_block(BlockContext::new(*samples, SR), &input);
            for event in out {
                prop_assert!(event.frame_offset < *samples);
                if event.is_note_on() {
                    balance += 1;
                } else if event.is_note_off() {
                    balance -= 1;
                }
            }
            prop_assert_eq!(balance, processor.mode().sounding().len() as i64);
        }

        let input = [MidiEvent::all_notes_off(0, 0)];
        // Longer than the slowest step, so a boundary always lands in it.
        let drain = compute_duration(0.0, SR) + 1;
        let out = processor.process_block(BlockContext::new(drain, SR), &input);
        prop_assert!(out.iter().all(|e| e.is_note_off()));
        balance -= out.len() as i64;
        prop_assert_eq!(balance, 0);
        prop_assert!(processor.mode().sounding().is_empty());
    }

    /// Output events in a block share one offset, offs before ons.
    #[test]
    fn prop_output_is_ordered(blocks in prop::collection::vec(block(), 1..40)) {
        let (params, mut processor) = setup(ShapeBinding::BindAtNoteOn);
        for (actions, samples) in &blocks {
            let input = prepare_input(&params, actions);
            let out = processor.process_block(BlockContext::new(*samples, SR), &input);
            if let Some(first) = out.first() {
                prop_assert!(out.iter().all(|e| e.frame_offset == first.frame_offset));
                let first_on = out.iter().position(|e| e.is_note_on()).unwrap_or(out.len());
                prop_assert!(out[first_on..].iter().all(|e| e.is_note_on()));
            }
        }
    }

    /// No input and no boundary crossed: nothing is emitted and the registry is
    /// unchanged.
    #[test]
    fn prop_idle_block_is_silent(blocks in prop::collection::vec(block(), 0..20)) {
        let (params, mut processor) = setup(ShapeBinding::BindAtNoteOn);
        for (actions, samples) in &blocks {
            let input = prepare_input(&params, actions);
            processor.process_block(BlockContext::new(*samples, SR), &input);
        }

        let snapshot = processor.registry().snapshot();
        let duration = compute_duration(params.speed(), SR);
        prop_assume!(processor.gate().elapsed() < duration);
        let remaining = duration - processor.gate().elapsed();
        let out = processor.process_block(BlockContext::new(remaining, SR), &[]);
        prop_assert!(out.is_empty());
        prop_assert_eq!(processor.registry().snapshot(), snapshot);
    }

    /// Faster speed never lengthens the step.
    #[test]
    fn prop_duration_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0, rate in 8000.0f64..=384000.0) {
        let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_duration(slow, rate) >= compute_duration(fast, rate));
        prop_assert!(compute_duration(fast, rate) >= 1);
    }
}
