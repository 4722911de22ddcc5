//! MIDI types for the chordarp note generator.
//!
//! Provides sample-accurate [`MidiEvent`]s, raw 3-byte host events, serde support
//! and small pitch helpers. Everything here is RT-safe.
//!
//! # Example
//!
//! ```
//! use chordarp_midi::MidiEvent;
//!
//! let on = MidiEvent::note_on(32, 0, 60, 127);
//! assert!(on.is_note_on());
//! assert_eq!(on.frame_offset, 32);
//! ```

pub(crate) mod event;
pub(crate) mod serde_support;
pub(crate) mod utils;

pub use event::{
    MidiEvent, MidiEventVec, RawMidiEvent, CC_ALL_NOTES_OFF, CC_ALL_SOUND_OFF, MIDI_STACK_CAPACITY,
};

pub use utils::{transpose, MAX_NOTE, NOTE_COUNT};

// Re-export essential upstream types (users shouldn't need to import midi-msg directly)
pub use midi_msg::{Channel, ChannelVoiceMsg, ControlChange, MidiMsg, ParseError};
