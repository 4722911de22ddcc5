//! Error types for chordarp-core.
//!
//! Only setup and checked parameter writes can fail. Block processing never
//! returns an error.

use thiserror::Error;

/// Error type for chordarp-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0}. Must be between 8000 and 384000 Hz")]
    InvalidSampleRate(f64),

    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
