//! Integration tests for the chordarp umbrella crate.
//!
//! These exercise the engine the way a host would: build, split across threads,
//! feed blocks and read back generated notes.

use std::sync::Arc;
use std::sync::Barrier;

use approx::assert_relative_eq;
use chordarp::prelude::*;
use chordarp::{parse_event, EngineConfig, Error, MidiEventVec, ModeState, ParamId};

const SR: f64 = 48000.0;

fn engine() -> ChordArpEngine {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    ChordArpEngine::builder().sample_rate(SR).build().unwrap()
}

fn note_ons(events: &[MidiEvent]) -> Vec<u8> {
    events
        .iter()
        .filter(|e| e.is_note_on())
        .filter_map(|e| e.note())
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Builder and configuration
// ---------------------------------------------------------------------------

#[test]
fn test_builder_sets_initial_params() {
    let engine = ChordArpEngine::builder()
        .sample_rate(SR)
        .speed(0.2)
        .turbo(true)
        .chord_quality(ChordQuality::Minor)
        .shape_binding(ShapeBinding::ReleaseWithCurrent)
        .build()
        .unwrap();

    let snapshot = engine.snapshot();
    assert_relative_eq!(snapshot.speed, 0.2);
    assert!(snapshot.turbo_enabled);
    assert!(!snapshot.chord_is_major);
    assert_eq!(engine.config().shape_binding, ShapeBinding::ReleaseWithCurrent);
    assert_eq!(engine.sample_rate(), SR);
}

#[test]
fn test_builder_rejects_invalid_settings() {
    let err = ChordArpEngine::builder().sample_rate(100.0).build();
    assert!(matches!(
        err,
        Err(Error::Core(chordarp::core::Error::InvalidSampleRate(_)))
    ));

    let err = ChordArpEngine::builder().output_channel(16).build();
    assert!(matches!(
        err,
        Err(Error::Core(chordarp::core::Error::InvalidConfig(_)))
    ));
}

#[test]
fn test_builder_accepts_full_config() {
    let config = EngineConfig {
        sample_rate: 96000.0,
        output_channel: 9,
        velocity: 80,
        ..Default::default()
    };
    let mut engine = ChordArpEngine::builder().config(config).build().unwrap();

    // 96 kHz at speed 0.5 is 14400 samples.
    let out = engine.process(14401, &[MidiEvent::note_on(0, 0, 48, 100)]);
    assert_eq!(out.len(), 5);
    for event in out {
        assert_eq!(event.channel_num(), 9);
        assert_eq!(event.velocity(), Some(80));
        assert_eq!(event.frame_offset, 14400);
    }
}

// ---------------------------------------------------------------------------
// 2. Block processing
// ---------------------------------------------------------------------------

#[test]
fn test_chord_then_arpeggio() {
    let mut engine = engine();
    engine.process(64, &[MidiEvent::note_on(0, 0, 60, 100)]);

    let mut blocks = 0;
    let first = loop {
        blocks += 1;
        let out = engine.process(512, &[]);
        if !out.is_empty() {
            break out.to_vec();
        }
    };
    assert_eq!(blocks, 14);
    assert_eq!(note_ons(&first), vec![60, 64, 67, 71, 74]);
    assert_eq!(engine.mode_state(), ModeState::ChordSustaining);

    engine.set_turbo_enabled(true);
    let switched = loop {
        let out = engine.process(512, &[]);
        if !out.is_empty() {
            break out.to_vec();
        }
    };
    assert_eq!(switched.iter().filter(|e| e.is_note_off()).count(), 5);
    assert_eq!(note_ons(&switched), vec![60]);
    assert_eq!(engine.mode_state(), ModeState::ArpeggioStepping);
}

#[test]
fn test_raw_and_in_place_processing() {
    let mut engine = engine();
    let raw = [
        RawMidiEvent::new(0, [0x90, 62, 100], 3),
        RawMidiEvent::new(3, [0xE0, 0, 64], 3),
    ];
    assert!(engine.process_raw(7000, &raw).is_empty());
    assert!(engine.processor().registry().is_held(62));

    let mut events = MidiEventVec::new();
    engine.process_in_place(400, &mut events);
    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.frame_offset == 200));
}

#[test]
fn test_in_place_full_keyboard_does_not_spill() {
    let mut engine = engine();
    let mut events: MidiEventVec = (0..=127).map(|n| MidiEvent::note_on(0, 0, n, 100)).collect();
    engine.process_in_place(7201, &mut events);
    assert_eq!(events.len(), 128);

    events.clear();
    engine.process_in_place(7200, &mut events);
    assert_eq!(events.len(), 256);
    assert!(!events.spilled());
}

#[test]
fn test_parse_event() {
    let on = parse_event(&[0x91, 60, 100], 12).unwrap();
    assert!(on.is_note_on());
    assert_eq!(on.channel_num(), 1);
    assert_eq!(on.frame_offset, 12);

    let all_off = parse_event(&[0xB0, 123, 0], 0).unwrap();
    assert!(all_off.is_all_notes_off());

    assert!(matches!(parse_event(&[0xF8], 0), Err(Error::MidiParse(_))));
}

#[test]
fn test_reset_keeps_params() {
    let mut engine = engine();
    engine.set_speed(0.9);
    engine.set_chord_quality(ChordQuality::Minor);
    engine.process(64, &[MidiEvent::note_on(0, 0, 60, 100)]);

    engine.reset();
    assert!(engine.processor().registry().is_empty());
    assert_eq!(engine.mode_state(), ModeState::Idle);
    assert_relative_eq!(engine.params().speed(), 0.9);
    assert_eq!(engine.params().chord_quality(), ChordQuality::Minor);
}

// ---------------------------------------------------------------------------
// 3. Threads
// ---------------------------------------------------------------------------

/// Control thread writes parameters while the audio thread processes blocks.
#[test]
fn test_split_across_threads() {
    let (params, mut processor) = engine().split();
    let barrier = Arc::new(Barrier::new(2));

    let audio_barrier = Arc::clone(&barrier);
    let audio = std::thread::spawn(move || {
        let ctx = BlockContext::new(256, SR);
        processor.process_block(ctx, &[MidiEvent::note_on(0, 0, 60, 100)]);
        audio_barrier.wait();
        let mut generated = 0;
        for _ in 0..2000 {
            generated += processor
                .process_block(ctx, &[])
                .iter()
                .filter(|e| e.is_note_on())
                .count();
        }
        generated
    });

    barrier.wait();
    for i in 0..500 {
        params.set_normalized(ParamId::Speed, (i % 10) as f32 / 10.0);
        if i % 50 == 0 {
            params.toggle_turbo();
        }
    }

    let generated = audio.join().unwrap();
    assert!(generated > 0);
}
