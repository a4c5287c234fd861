use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{NarrativeError, NarrativeResult};

/// Tick count the nice-rounding ladder aims for when none is configured.
pub const DEFAULT_TICK_COUNT: usize = 10;
/// Largest accepted tick target.
pub const MAX_TICK_COUNT: usize = 1_000;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Vertical value range of the case axis.
///
/// Always anchored at zero; the upper bound is the nice-rounded maximum of
/// whichever subset the domain was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YDomain {
    min: f64,
    max: f64,
}

impl YDomain {
    pub fn new(min: f64, max: f64) -> NarrativeResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(NarrativeError::InvalidData(
                "value domain must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    /// `[0, nice(max_cases)]`.
    ///
    /// A zero maximum collapses to `[0, 1]` so the axis keeps a usable span.
    #[must_use]
    pub fn from_max(max_cases: u64, tick_count: usize) -> Self {
        if max_cases == 0 {
            return Self { min: 0.0, max: 1.0 };
        }
        let (min, max) = nice_bounds(0.0, max_cases as f64, tick_count);
        Self { min, max }
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Linear interpolation toward `target`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        Self {
            min: self.min + (target.min - self.min) * t,
            max: self.max + (target.max - self.max) * t,
        }
    }

    /// Scale mapping the domain onto `[height_px, 0]`.
    pub fn scale(self, height_px: f64) -> NarrativeResult<LinearScale> {
        if !height_px.is_finite() || height_px <= 0.0 {
            return Err(NarrativeError::InvalidData(
                "value axis height must be finite and > 0".to_owned(),
            ));
        }
        LinearScale::new(self.min, self.max, height_px, 0.0)
    }

    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        ticks(self.min, self.max, tick_count)
    }
}

/// Step between ticks on the 1/2/5 × 10^k ladder.
///
/// Negative results encode the reciprocal of a fractional step (`-4` means
/// a step of `0.25`), which keeps tick values free of float drift.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let step = (stop - start) / count as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Expands `[start, stop]` outward to multiples of the tick step.
///
/// Iterates until the step is stable, since widening the bounds can move the
/// range onto the next rung of the ladder.
#[must_use]
pub fn nice_bounds(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let (mut start, mut stop) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let mut previous_step = None;

    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    (start, stop)
}

/// Tick values inside `[start, stop]` on the nice ladder.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (low, high) = (start.min(stop), start.max(stop));
    let increment = tick_increment(low, high, count);

    let mut values = Vec::new();
    if increment > 0.0 {
        let first = (low / increment).ceil() as i64;
        let last = (high / increment).floor() as i64;
        values.extend((first..=last).map(|i| i as f64 * increment));
    } else if increment < 0.0 {
        let divisor = -increment;
        let first = (low * divisor).ceil() as i64;
        let last = (high * divisor).floor() as i64;
        values.extend((first..=last).map(|i| i as f64 / divisor));
    }
    values
}
