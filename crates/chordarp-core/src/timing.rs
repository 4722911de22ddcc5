//! Timing gate: step duration and retrigger boundaries across blocks.

/// Shortest possible step.
pub const MIN_DURATION_SAMPLES: usize = 1;

/// Seconds of the slowest step at speed 0 are `BASE_SECONDS * (MIN_FACTOR + 1)`.
const BASE_SECONDS: f64 = 0.25;
const MIN_FACTOR: f64 = 0.1;

/// Step length in samples for `speed` in [0, 1].
///
/// `ceil(sample_rate * 0.25 * (0.1 + (1 - speed)))`, never below one sample.
/// Out-of-range speeds are clamped; a NaN speed is treated as 0.5.
pub fn compute_duration(speed: f32, sample_rate: f64) -> usize {
    let speed = if speed.is_nan() {
        0.5
    } else {
        speed.clamp(0.0, 1.0) as f64
    };
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return MIN_DURATION_SAMPLES;
    }
    let samples = (sample_rate * BASE_SECONDS * (MIN_FACTOR + (1.0 - speed))).ceil();
    (samples as usize).max(MIN_DURATION_SAMPLES)
}

/// Result of evaluating one block against the current step duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStep {
    /// Sample offset of the retrigger inside the block, if one falls in it.
    pub trigger_offset: Option<usize>,
    /// Elapsed samples carried into the next block.
    pub elapsed: usize,
}

/// Evaluate one block of `block_samples` starting `elapsed` samples into the step.
///
/// A boundary lands in this block iff `elapsed + block_samples > duration`; the
/// offset is clamped into the block. At most one boundary is reported per block.
pub fn advance(elapsed: usize, block_samples: usize, duration: usize) -> GateStep {
    let duration = duration.max(MIN_DURATION_SAMPLES);
    if block_samples == 0 {
        return GateStep {
            trigger_offset: None,
            elapsed,
        };
    }

    let end = elapsed + block_samples;
    let trigger_offset = if end > duration {
        Some(duration.saturating_sub(elapsed).min(block_samples - 1))
    } else {
        None
    };

    GateStep {
        trigger_offset,
        elapsed: end % duration,
    }
}

/// Per-engine timing state.
#[derive(Debug, Clone, Default)]
pub struct TimingGate {
    elapsed: usize,
    duration: usize,
}

impl TimingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the duration and evaluate the block. Returns the retrigger offset.
    pub fn advance(&mut self, speed: f32, sample_rate: f64, block_samples: usize) -> Option<usize> {
        self.duration = compute_duration(speed, sample_rate);
        let step = advance(self.elapsed, block_samples, self.duration);
        self.elapsed = step.elapsed;
        step.trigger_offset
    }

    #[inline]
    pub fn elapsed(&self) -> usize {
        self.elapsed
    }

    /// Duration used by the last evaluation, or 0 before the first block.
    #[inline]
    pub fn duration(&self) -> usize {
        self.duration
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.duration = 0;
    }
}
