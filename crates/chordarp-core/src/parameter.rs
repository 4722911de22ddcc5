//! Parameter ranges and host-facing parameter identifiers.
//!
//! Hosts exchange parameters as normalized (0.0-1.0) values; [`ParameterRange`]
//! converts between that and the engine's real values.
//!
//! # Example
//!
//! ```
//! use chordarp_core::{ParamId, ParameterRange};
//!
//! let speed = ParamId::Speed.range();
//! assert_eq!(speed.denormalize(0.25), 0.25);
//!
//! let turbo = ParameterRange::toggle(false);
//! assert_eq!(turbo.denormalize(0.7), 1.0);
//! ```

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterScale {
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// On/off toggle (normalized < 0.5 = off, >= 0.5 = on)
    ///
    /// Denormalizes to `min` (off) or `max` (on).
    Toggle,
}

/// Parameter range with scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// `default` is clamped into `[min, max]`.
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            scale,
        }
    }

    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    /// 0.0 is off, 1.0 is on.
    pub fn toggle(default_on: bool) -> Self {
        Self::new(
            0.0,
            1.0,
            if default_on { 1.0 } else { 0.0 },
            ParameterScale::Toggle,
        )
    }

    /// Convert a real value to normalized (0.0-1.0).
    pub fn normalize(&self, value: f32) -> f32 {
        let clamped = self.clamp(value);
        match self.scale {
            ParameterScale::Linear => (clamped - self.min) / self.span(),
            ParameterScale::Toggle => {
                if clamped >= self.min + self.span() * 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        match self.scale {
            ParameterScale::Linear => self.min + normalized * self.span(),
            ParameterScale::Toggle => {
                if normalized >= 0.5 {
                    self.max
                } else {
                    self.min
                }
            }
        }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn default_normalized(&self) -> f32 {
        self.normalize(self.default)
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::linear(0.0, 1.0, 0.5)
    }
}

/// Default arpeggiator speed.
pub const DEFAULT_SPEED: f32 = 0.5;

/// Parameters exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Speed,
    Turbo,
    ChordMajor,
}

impl ParamId {
    pub const ALL: [ParamId; 3] = [ParamId::Speed, ParamId::Turbo, ParamId::ChordMajor];

    /// Stable identifier for host automation.
    pub fn id(self) -> &'static str {
        match self {
            ParamId::Speed => "speed",
            ParamId::Turbo => "turbo",
            ParamId::ChordMajor => "chord_major",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamId::Speed => "Arpeggiator Speed",
            ParamId::Turbo => "Turbo",
            ParamId::ChordMajor => "Major Chord",
        }
    }

    pub fn range(self) -> ParameterRange {
        match self {
            ParamId::Speed => ParameterRange::linear(0.0, 1.0, DEFAULT_SPEED),
            ParamId::Turbo => ParameterRange::toggle(false),
            ParamId::ChordMajor => ParameterRange::toggle(true),
        }
    }

    pub fn from_id(id: &str) -> Option<ParamId> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}
