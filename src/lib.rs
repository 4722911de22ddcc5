//! # chordarp - Real-time Chord and Arpeggio Generator
//!
//! Turns held MIDI notes into retriggered chords or a cycling arpeggio, timed to
//! exact sample offsets inside each audio block.
//!
//! ## Architecture
//!
//! chordarp is an umbrella crate that coordinates:
//! - **chordarp-core** - Note engine (held-note registry, timing gate, output modes,
//!   lock-free parameters, block processor)
//! - **chordarp-midi** - RT-safe MIDI event types on top of `midi-msg`
//!
//! ## Quick Start
//!
//! ```
//! use chordarp::prelude::*;
//!
//! let engine = ChordArpEngine::builder()
//!     .sample_rate(48000.0)
//!     .turbo(true)
//!     .build()?;
//!
//! // Control thread keeps the handle, audio thread takes the processor.
//! let (params, mut processor) = engine.split();
//! params.set_speed(1.0);
//!
//! let ctx = BlockContext::new(512, 48000.0);
//! let out = processor.process_block(ctx, &[MidiEvent::note_on(0, 0, 60, 100)]);
//! assert!(out.is_empty());
//! # Ok::<(), chordarp::Error>(())
//! ```

/// Re-export of chordarp-core for direct access
pub use chordarp_core as core;

/// Re-export of chordarp-midi for direct access
pub use chordarp_midi as midi;

// Core types
pub use chordarp_core::{
    // Block processing
    BlockContext,
    ChordArpProcessor,
    // Chord shapes
    ChordQuality,
    EngineConfig,
    MidiEffect,
    ModeState,
    // Parameters
    ParamHandle,
    ParamId,
    ParamSnapshot,
    ParameterRange,
    ShapeBinding,
};

// MIDI types
pub use chordarp_midi::{MidiEvent, MidiEventVec, RawMidiEvent};

mod error;
pub use error::{Error, Result};

mod builder;
mod engine;

pub use builder::ChordArpEngineBuilder;
pub use engine::{parse_event, ChordArpEngine};

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{ChordArpEngine, ChordArpEngineBuilder};

    // Essential types
    pub use crate::{BlockContext, ChordArpProcessor, MidiEffect, ParamHandle};
    pub use crate::{ChordQuality, ShapeBinding};

    // MIDI
    pub use crate::{MidiEvent, RawMidiEvent};
}
