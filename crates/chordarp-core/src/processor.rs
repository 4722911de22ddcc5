//! Block driver.
//!
//! [`ChordArpProcessor`] owns everything the audio thread touches: the held-note
//! registry, the timing gate, the live output mode and a pre-allocated output
//! buffer. Each block applies the input events, evaluates the gate and drives the
//! mode at most once.

use std::sync::Arc;

use chordarp_midi::{MidiEvent, MidiEventVec, RawMidiEvent, MIDI_STACK_CAPACITY, NOTE_COUNT};
use tracing::{debug, trace};

use crate::config::{validate_sample_rate, EngineConfig};
use crate::interval::ChordQuality;
use crate::mode::{Emitter, ModeState, OutputMode};
use crate::params::{ParamHandle, ParamSnapshot, SharedParams};
use crate::registry::HeldNoteRegistry;
use crate::timing::TimingGate;
use crate::traits::MidiEffect;
use crate::Result;

/// Worst case for one boundary: a full chord released and a full chord started,
/// with headroom for a mode switch.
pub const OUTPUT_CAPACITY: usize = NOTE_COUNT * 3;

// In-place processing copies a whole block's output into the host batch.
const _: () = assert!(OUTPUT_CAPACITY <= MIDI_STACK_CAPACITY);

/// Per-block host information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockContext {
    pub num_samples: usize,
    pub sample_rate: f64,
}

impl BlockContext {
    #[inline]
    pub fn new(num_samples: usize, sample_rate: f64) -> Self {
        Self {
            num_samples,
            sample_rate,
        }
    }
}

/// Audio-thread half of the engine.
pub struct ChordArpProcessor {
    params: Arc<SharedParams>,
    config: EngineConfig,
    sample_rate: f64,
    registry: HeldNoteRegistry,
    gate: TimingGate,
    mode: OutputMode,
    output: Vec<MidiEvent>,
}

impl ChordArpProcessor {
    /// Create a processor reading its parameters from `params`.
    pub fn new(config: EngineConfig, params: &ParamHandle) -> Result<Self> {
        if let Err(e) = config.validate() {
            debug!(error = %e, "rejected engine config");
            return Err(e);
        }
        let turbo = params.turbo_enabled();
        debug!(
            sample_rate = config.sample_rate,
            channel = config.output_channel,
            binding = ?config.shape_binding,
            "processor created"
        );
        Ok(Self {
            params: params.shared(),
            sample_rate: config.sample_rate,
            registry: HeldNoteRegistry::new(config.shape_binding),
            gate: TimingGate::new(),
            mode: OutputMode::for_turbo(turbo),
            output: Vec::with_capacity(OUTPUT_CAPACITY),
            config,
        })
    }

    /// Process one block of input events. Output offsets lie in
    /// `[0, ctx.num_samples)` and never decrease.
    pub fn process_block(&mut self, ctx: BlockContext, input: &[MidiEvent]) -> &[MidiEvent] {
        let params = self.params.load();
        let quality = params.chord_quality();
        for event in input {
            self.apply_input(event, quality);
        }
        self.finish_block(ctx, params)
    }

    /// Like [`process_block`](Self::process_block) for undecoded host events.
    /// Events that do not parse as channel messages are skipped.
    pub fn process_raw(&mut self, ctx: BlockContext, input: &[RawMidiEvent]) -> &[MidiEvent] {
        let params = self.params.load();
        let quality = params.chord_quality();
        for raw in input {
            match raw.to_midi_event() {
                Ok(event) => self.apply_input(&event, quality),
                Err(_) => trace!(status = raw.data[0], "skipping undecodable event"),
            }
        }
        self.finish_block(ctx, params)
    }

    /// Replace the contents of a host buffer with this block's output. The
    /// output always fits inline, so the buffer never spills to the heap.
    pub fn process_in_place(&mut self, ctx: BlockContext, events: &mut MidiEventVec) {
        let output = self.process_block(ctx, events.as_slice());
        events.clear();
        events.extend_from_slice(output);
    }

    fn apply_input(&mut self, event: &MidiEvent, quality: ChordQuality) {
        if event.is_note_on() {
            if let Some(note) = event.note() {
                self.registry.note_on(note, quality);
            }
        } else if event.is_note_off() {
            if let Some(note) = event.note() {
                self.registry.note_off(note, quality);
            }
        } else if event.is_all_notes_off() {
            self.registry.clear();
        }
    }

    fn finish_block(&mut self, ctx: BlockContext, params: ParamSnapshot) -> &[MidiEvent] {
        self.output.clear();
        let boundary = self
            .gate
            .advance(params.speed, ctx.sample_rate, ctx.num_samples);
        if let Some(offset) = boundary {
            let mut emit = Emitter::new(
                &mut self.output,
                offset,
                self.config.output_channel,
                self.config.velocity,
            );
            self.mode
                .step(params.turbo_enabled, self.registry.snapshot(), &mut emit);
        }
        &self.output
    }

    /// Host prepare-to-play: validate and record the sample rate, then reset.
    pub fn prepare(&mut self, sample_rate: f64) -> Result<()> {
        validate_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;
        self.reset();
        debug!(sample_rate, "processor prepared");
        Ok(())
    }

    /// Clear held notes, timing and mode state. Parameters are left untouched.
    ///
    /// Nothing is emitted for notes that were sounding; hosts send their own
    /// all-notes-off around a reset.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.gate.reset();
        self.mode = OutputMode::for_turbo(self.params.load().turbo_enabled);
        self.output.clear();
        debug!("processor reset");
    }

    /// Sample rate recorded by the last [`prepare`](Self::prepare).
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parameters as the next block will see them.
    pub fn params(&self) -> ParamSnapshot {
        self.params.load()
    }

    #[inline]
    pub fn registry(&self) -> &HeldNoteRegistry {
        &self.registry
    }

    #[inline]
    pub fn mode(&self) -> &OutputMode {
        &self.mode
    }

    #[inline]
    pub fn mode_state(&self) -> ModeState {
        self.mode.state()
    }

    #[inline]
    pub fn gate(&self) -> &TimingGate {
        &self.gate
    }

    /// Output of the last processed block.
    #[inline]
    pub fn output(&self) -> &[MidiEvent] {
        &self.output
    }
}

impl MidiEffect for ChordArpProcessor {
    fn prepare(&mut self, sample_rate: f64) -> Result<()> {
        ChordArpProcessor::prepare(self, sample_rate)
    }

    fn process(&mut self, num_samples: usize, input: &[MidiEvent]) -> &[MidiEvent] {
        let ctx = BlockContext::new(num_samples, self.sample_rate);
        self.process_block(ctx, input)
    }

    fn reset(&mut self) {
        ChordArpProcessor::reset(self);
    }
}
