//! ChordArpEngine that pairs the parameter handle with the block processor.

use chordarp_core::{
    BlockContext, ChordArpProcessor, ChordQuality, EngineConfig, MidiEffect, ModeState,
    ParamHandle, ParamSnapshot,
};
use chordarp_midi::{MidiEvent, MidiEventVec, RawMidiEvent};

use crate::Result;

/// Chord/arpeggio note generator.
///
/// Single-threaded use goes through the engine directly. For a real host, call
/// [`split`](ChordArpEngine::split): the [`ParamHandle`] stays on the control
/// thread and the [`ChordArpProcessor`] moves to the audio thread.
///
/// # Example
///
/// ```
/// use chordarp::prelude::*;
///
/// let mut engine = ChordArpEngine::builder().sample_rate(48000.0).build()?;
/// engine.prepare(48000.0)?;
///
/// let out = engine.process(7201, &[MidiEvent::note_on(0, 0, 60, 100)]);
/// assert_eq!(out.len(), 5);
///
/// let (params, processor) = engine.split();
/// std::thread::spawn(move || drop(processor));
/// params.toggle_turbo();
/// # Ok::<(), chordarp::Error>(())
/// ```
pub struct ChordArpEngine {
    params: ParamHandle,
    processor: ChordArpProcessor,
}

impl ChordArpEngine {
    pub fn builder() -> crate::ChordArpEngineBuilder {
        crate::ChordArpEngineBuilder::default()
    }

    pub(crate) fn from_parts(params: ParamHandle, processor: ChordArpProcessor) -> Self {
        Self { params, processor }
    }

    /// Engine with default configuration and parameters.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Separate the control-thread and audio-thread halves.
    pub fn split(self) -> (ParamHandle, ChordArpProcessor) {
        (self.params, self.processor)
    }

    pub fn params(&self) -> &ParamHandle {
        &self.params
    }

    pub fn processor(&self) -> &ChordArpProcessor {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut ChordArpProcessor {
        &mut self.processor
    }

    pub fn config(&self) -> &EngineConfig {
        self.processor.config()
    }

    pub fn sample_rate(&self) -> f64 {
        self.processor.sample_rate()
    }

    pub fn prepare(&mut self, sample_rate: f64) -> Result<()> {
        self.processor.prepare(sample_rate)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.processor.reset();
    }

    /// One block at the prepared sample rate.
    pub fn process(&mut self, num_samples: usize, input: &[MidiEvent]) -> &[MidiEvent] {
        MidiEffect::process(&mut self.processor, num_samples, input)
    }

    /// One block with an explicit sample rate.
    pub fn process_block(&mut self, ctx: BlockContext, input: &[MidiEvent]) -> &[MidiEvent] {
        self.processor.process_block(ctx, input)
    }

    pub fn process_raw(&mut self, num_samples: usize, input: &[RawMidiEvent]) -> &[MidiEvent] {
        let ctx = BlockContext::new(num_samples, self.processor.sample_rate());
        self.processor.process_raw(ctx, input)
    }

    pub fn process_in_place(&mut self, num_samples: usize, events: &mut MidiEventVec) {
        MidiEffect::process_in_place(&mut self.processor, num_samples, events);
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        self.params.snapshot()
    }

    pub fn set_speed(&self, speed: f32) {
        self.params.set_speed(speed);
    }

    pub fn set_turbo_enabled(&self, enabled: bool) {
        self.params.set_turbo_enabled(enabled);
    }

    pub fn set_chord_quality(&self, quality: ChordQuality) {
        self.params.set_chord_is_major(quality.is_major());
    }

    pub fn mode_state(&self) -> ModeState {
        self.processor.mode_state()
    }
}

/// Decode one host MIDI message at `frame_offset`.
///
/// Only channel messages are accepted; all-notes-off and all-sound-off channel
/// mode messages come back as their controller events.
pub fn parse_event(bytes: &[u8], frame_offset: usize) -> Result<MidiEvent> {
    Ok(MidiEvent::from_bytes_with_offset(bytes, frame_offset)?)
}
