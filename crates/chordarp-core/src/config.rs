//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::registry::ShapeBinding;
use crate::{Error, Result};

/// Lowest supported processing sample rate.
pub const MIN_SAMPLE_RATE: f64 = 8000.0;

/// Highest supported processing sample rate.
pub const MAX_SAMPLE_RATE: f64 = 384000.0;

/// Configuration for the note generator.
///
/// Fixed for the lifetime of a processor; the user parameters live in
/// [`SharedParams`](crate::SharedParams) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sample rate used until the host calls `prepare`.
    pub sample_rate: f64,
    /// 0-based output channel (0 = MIDI channel 1).
    pub output_channel: u8,
    /// Velocity of every generated note-on.
    pub velocity: u8,
    pub shape_binding: ShapeBinding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            output_channel: 0,
            velocity: 127,
            shape_binding: ShapeBinding::BindAtNoteOn,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        validate_sample_rate(self.sample_rate)?;
        if self.output_channel > 15 {
            return Err(Error::InvalidConfig(format!(
                "output_channel {} out of range (0-15)",
                self.output_channel
            )));
        }
        if self.velocity == 0 || self.velocity > 127 {
            return Err(Error::InvalidConfig(format!(
                "velocity {} out of range (1-127)",
                self.velocity
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    Ok(())
}
