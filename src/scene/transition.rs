use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::YDomain;

/// Animated rescale of the value axis between two domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransition {
    pub from: YDomain,
    pub to: YDomain,
    pub duration: Duration,
}

impl AxisTransition {
    #[must_use]
    pub fn new(from: YDomain, to: YDomain, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Domain at `progress` in `[0, 1]`, eased with cubic in-out.
    #[must_use]
    pub fn domain_at(self, progress: f64) -> YDomain {
        self.from.lerp(self.to, ease_cubic_in_out(progress))
    }

    #[must_use]
    pub fn domain_after(self, elapsed: Duration) -> YDomain {
        if self.duration.is_zero() {
            return self.to;
        }
        self.domain_at(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// `steps + 1` evenly timed domains, both endpoints included.
    #[must_use]
    pub fn keyframes(self, steps: usize) -> Vec<YDomain> {
        if steps == 0 {
            return vec![self.to];
        }
        (0..=steps)
            .map(|step| self.domain_at(step as f64 / steps as f64))
            .collect()
    }
}

#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
