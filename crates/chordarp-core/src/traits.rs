//! Host-facing trait for MIDI-in, MIDI-out effects.

use chordarp_midi::{MidiEvent, MidiEventVec};

use crate::Result;

/// A block-based MIDI effect.
///
/// The host calls [`prepare`](MidiEffect::prepare) before playback, then
/// [`process`](MidiEffect::process) once per audio block with that block's input
/// events. Input events are consumed; only generated events are returned.
///
/// # RT-Safety
///
/// `process` and `process_in_place` must not allocate or block.
pub trait MidiEffect: Send {
    /// Prepare for playback at `sample_rate`. Clears all playback state.
    fn prepare(&mut self, sample_rate: f64) -> Result<()>;

    /// Process `num_samples` samples. Returned offsets are relative to the block.
    fn process(&mut self, num_samples: usize, input: &[MidiEvent]) -> &[MidiEvent];

    /// Replace a host event buffer with the block's output. Implementations
    /// must not produce more than `MIDI_STACK_CAPACITY` events per block, or the
    /// buffer spills to the heap.
    fn process_in_place(&mut self, num_samples: usize, events: &mut MidiEventVec) {
        let output = self.process(num_samples, events.as_slice());
        events.clear();
        events.extend_from_slice(output);
    }

    /// Drop held notes and timing state, e.g. on transport stop.
    fn reset(&mut self);

    fn accepts_midi(&self) -> bool {
        true
    }

    fn produces_midi(&self) -> bool {
        true
    }

    /// Samples of output after input stops. Generated notes stop at the next
    /// boundary once input is released, so there is no tail.
    fn tail_samples(&self) -> usize {
        0
    }
}
