//! Centralized error type for the chordarp umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] chordarp_core::Error),

    #[error("MIDI parse: {0}")]
    MidiParse(String),
}

impl From<chordarp_midi::ParseError> for Error {
    fn from(e: chordarp_midi::ParseError) -> Self {
        Error::MidiParse(format!("{e:?}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
