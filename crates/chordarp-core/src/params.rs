//! User parameters shared between the control thread and the audio thread.
//!
//! Speed, turbo and chord quality are packed into a single atomic word. The
//! processor loads it once per block, so a block never mixes values from two
//! different writes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::interval::ChordQuality;
use crate::lockfree::AtomicWord;
use crate::parameter::{ParamId, DEFAULT_SPEED};
use crate::{Error, Result};

const SPEED_MASK: u64 = 0xFFFF_FFFF;
const TURBO_BIT: u64 = 1 << 32;
const MAJOR_BIT: u64 = 1 << 33;

/// One consistent reading of all user parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamSnapshot {
    /// Arpeggiator speed in [0, 1]; higher is faster.
    pub speed: f32,
    /// Cycle one note at a time instead of sustaining the chord.
    pub turbo_enabled: bool,
    pub chord_is_major: bool,
}

impl ParamSnapshot {
    #[inline]
    pub fn chord_quality(&self) -> ChordQuality {
        ChordQuality::from_major(self.chord_is_major)
    }

    fn pack(self) -> u64 {
        let mut word = self.speed.to_bits() as u64;
        if self.turbo_enabled {
            word |= TURBO_BIT;
        }
        if self.chord_is_major {
            word |= MAJOR_BIT;
        }
        word
    }

    fn unpack(word: u64) -> Self {
        Self {
            speed: f32::from_bits((word & SPEED_MASK) as u32),
            turbo_enabled: word & TURBO_BIT != 0,
            chord_is_major: word & MAJOR_BIT != 0,
        }
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            turbo_enabled: false,
            chord_is_major: true,
        }
    }
}

/// Lock-free parameter store.
#[derive(Debug)]
pub struct SharedParams {
    word: AtomicWord,
}

impl SharedParams {
    pub fn new(initial: ParamSnapshot) -> Self {
        Self {
            word: AtomicWord::new(sanitize(initial).pack()),
        }
    }

    /// Single atomic read of every parameter.
    #[inline]
    pub fn load(&self) -> ParamSnapshot {
        ParamSnapshot::unpack(self.word.get())
    }

    fn modify<F>(&self, mut f: F) -> ParamSnapshot
    where
        F: FnMut(&mut ParamSnapshot),
    {
        let word = self.word.update(|word| {
            let mut snapshot = ParamSnapshot::unpack(word);
            f(&mut snapshot);
            sanitize(snapshot).pack()
        });
        ParamSnapshot::unpack(word)
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(ParamSnapshot::default())
    }
}

fn sanitize(mut snapshot: ParamSnapshot) -> ParamSnapshot {
    snapshot.speed = if snapshot.speed.is_finite() {
        snapshot.speed.clamp(0.0, 1.0)
    } else {
        DEFAULT_SPEED
    };
    snapshot
}

/// Control-side handle to the parameters.
///
/// Cheap to clone; every clone talks to the same processor.
#[derive(Debug, Clone, Default)]
pub struct ParamHandle {
    shared: Arc<SharedParams>,
}

impl ParamHandle {
    pub fn new(initial: ParamSnapshot) -> Self {
        Self {
            shared: Arc::new(SharedParams::new(initial)),
        }
    }

    pub(crate) fn shared(&self) -> Arc<SharedParams> {
        Arc::clone(&self.shared)
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        self.shared.load()
    }

    pub fn speed(&self) -> f32 {
        self.shared.load().speed
    }

    /// Values outside [0, 1] are clamped; non-finite values reset to the default.
    pub fn set_speed(&self, speed: f32) {
        let applied = self.shared.modify(|p| p.speed = speed).speed;
        trace!(requested = speed, applied, "speed changed");
    }

    /// Like [`set_speed`](Self::set_speed) but rejects out-of-range values.
    pub fn try_set_speed(&self, speed: f32) -> Result<()> {
        if !speed.is_finite() || !ParamId::Speed.range().contains(speed) {
            return Err(Error::InvalidParameter {
                name: ParamId::Speed.id(),
                value: speed,
            });
        }
        self.set_speed(speed);
        Ok(())
    }

    pub fn turbo_enabled(&self) -> bool {
        self.shared.load().turbo_enabled
    }

    pub fn set_turbo_enabled(&self, enabled: bool) {
        self.shared.modify(|p| p.turbo_enabled = enabled);
        trace!(enabled, "turbo changed");
    }

    /// Flip turbo and return the new state.
    pub fn toggle_turbo(&self) -> bool {
        let enabled = self
            .shared
            .modify(|p| p.turbo_enabled = !p.turbo_enabled)
            .turbo_enabled;
        trace!(enabled, "turbo toggled");
        enabled
    }

    pub fn chord_is_major(&self) -> bool {
        self.shared.load().chord_is_major
    }

    pub fn set_chord_is_major(&self, is_major: bool) {
        self.shared.modify(|p| p.chord_is_major = is_major);
        trace!(is_major, "chord quality changed");
    }

    pub fn chord_quality(&self) -> ChordQuality {
        self.shared.load().chord_quality()
    }

    /// Flip between major and minor and return the new quality.
    pub fn toggle_chord_quality(&self) -> ChordQuality {
        let quality = self
            .shared
            .modify(|p| p.chord_is_major = !p.chord_is_major)
            .chord_quality();
        trace!(quality = quality.name(), "chord quality toggled");
        quality
    }

    /// Host automation: normalized value (0.0-1.0) of a parameter.
    pub fn get_normalized(&self, param: ParamId) -> f32 {
        let snapshot = self.shared.load();
        let range = param.range();
        match param {
            ParamId::Speed => range.normalize(snapshot.speed),
            ParamId::Turbo => range.normalize(snapshot.turbo_enabled as u8 as f32),
            ParamId::ChordMajor => range.normalize(snapshot.chord_is_major as u8 as f32),
        }
    }

    /// Host automation: set a parameter from a normalized value (0.0-1.0).
    pub fn set_normalized(&self, param: ParamId, normalized: f32) {
        let value = param.range().denormalize(normalized);
        match param {
            ParamId::Speed => self.set_speed(value),
            ParamId::Turbo => self.set_turbo_enabled(value >= 0.5),
            ParamId::ChordMajor => self.set_chord_is_major(value >= 0.5),
        }
    }
}
