//! Builder for configuring and constructing a `ChordArpEngine`.

use chordarp_core::{
    ChordArpProcessor, ChordQuality, EngineConfig, ParamHandle, ParamSnapshot, ShapeBinding,
};
use tracing::debug;

use crate::{ChordArpEngine, Result};

/// Fixed settings go into [`EngineConfig`]; speed, turbo and chord quality set
/// here are only the initial parameter values and stay adjustable through
/// [`ParamHandle`] afterwards.
///
/// # Example
///
/// ```
/// use chordarp::prelude::*;
///
/// let engine = ChordArpEngine::builder()
///     .sample_rate(48000.0)
///     .speed(0.75)
///     .chord_quality(ChordQuality::Minor)
///     .build()?;
///
/// assert_eq!(engine.params().speed(), 0.75);
/// assert!(!engine.params().chord_is_major());
/// # Ok::<(), chordarp::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChordArpEngineBuilder {
    config: EngineConfig,
    params: ParamSnapshot,
}

impl ChordArpEngineBuilder {
    /// Default: 44100
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// 0-based channel for generated notes. Default: 0 (MIDI channel 1)
    pub fn output_channel(mut self, channel: u8) -> Self {
        self.config.output_channel = channel;
        self
    }

    /// Default: 127
    pub fn velocity(mut self, velocity: u8) -> Self {
        self.config.velocity = velocity;
        self
    }

    /// Default: [`ShapeBinding::BindAtNoteOn`]
    pub fn shape_binding(mut self, binding: ShapeBinding) -> Self {
        self.config.shape_binding = binding;
        self
    }

    /// Replace the whole configuration, e.g. one loaded with serde.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial speed in [0, 1]. Default: 0.5
    pub fn speed(mut self, speed: f32) -> Self {
        self.params.speed = speed;
        self
    }

    /// Start in arpeggio mode. Default: false
    pub fn turbo(mut self, enabled: bool) -> Self {
        self.params.turbo_enabled = enabled;
        self
    }

    /// Default: [`ChordQuality::Major`]
    pub fn chord_quality(mut self, quality: ChordQuality) -> Self {
        self.params.chord_is_major = quality.is_major();
        self
    }

    pub fn build(self) -> Result<ChordArpEngine> {
        let params = ParamHandle::new(self.params);
        let processor = ChordArpProcessor::new(self.config, &params)?;
        debug!(initial = ?params.snapshot(), "chordarp engine built");
        Ok(ChordArpEngine::from_parts(params, processor))
    }
}
