//! Real-time chord and arpeggio note generator.
//!
//! # Primary API
//!
//! - [`ChordArpProcessor`]: audio-thread block driver
//! - [`ParamHandle`]: lock-free speed / turbo / chord-quality control
//! - [`EngineConfig`]: output channel, velocity, sample rate, shape binding
//! - [`MidiEffect`]: host seam implemented by the processor
//!
//! Held input notes are expanded into a five-note chord shape and
//! reference-counted in a [`HeldNoteRegistry`]. A [`TimingGate`] turns the speed
//! into a step length in samples; at each step boundary the [`OutputMode`] either
//! retriggers the whole chord or plays the next arpeggio note.
//!
//! # Example
//!
//! ```
//! use chordarp_core::{BlockContext, ChordArpProcessor, EngineConfig, ParamHandle};
//! use chordarp_midi::MidiEvent;
//!
//! let params = ParamHandle::default();
//! let config = EngineConfig { sample_rate: 48000.0, ..Default::default() };
//! let mut processor = ChordArpProcessor::new(config, &params)?;
//!
//! // Speed 0.5 at 48 kHz is a 7200-sample step.
//! let ctx = BlockContext::new(7201, 48000.0);
//! let out = processor.process_block(ctx, &[MidiEvent::note_on(0, 0, 60, 100)]);
//! assert_eq!(out.len(), 5);
//! assert!(out.iter().all(|e| e.frame_offset == 7200));
//! # Ok::<(), chordarp_core::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{EngineConfig, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};

pub(crate) mod interval;
pub use interval::{shape_for, ChordQuality, ChordShape, MAJOR_SHAPE, MINOR_SHAPE, SHAPE_LEN};

pub(crate) mod pitch_set;
pub use pitch_set::{PitchIter, PitchSet};

pub(crate) mod registry;
pub use registry::{HeldNoteRegistry, ShapeBinding};

pub mod timing;
pub use timing::{compute_duration, GateStep, TimingGate, MIN_DURATION_SAMPLES};

pub(crate) mod mode;
pub use mode::{ArpeggioState, ChordState, Emitter, ModeState, OutputMode};

pub(crate) mod lockfree;
pub use lockfree::AtomicWord;

pub(crate) mod parameter;
pub use parameter::{ParamId, ParameterRange, ParameterScale, DEFAULT_SPEED};

mod params;
pub use params::{ParamHandle, ParamSnapshot, SharedParams};

mod processor;
pub use processor::{BlockContext, ChordArpProcessor, OUTPUT_CAPACITY};

mod traits;
pub use traits::MidiEffect;
