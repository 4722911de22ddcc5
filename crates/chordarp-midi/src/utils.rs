//! MIDI utility functions

/// Highest valid MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// Number of addressable MIDI notes.
pub const NOTE_COUNT: usize = 128;

/// Shift `note` by `semitones`, or `None` if the result leaves 0-127.
#[inline]
pub fn transpose(note: u8, semitones: i8) -> Option<u8> {
    let shifted = note as i16 + semitones as i16;
    if (0..=MAX_NOTE as i16).contains(&shifted) {
        Some(shifted as u8)
    } else {
        None
    }
}
