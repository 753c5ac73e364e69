use crate::foundation::{
    config::TimingConfig,
    error::{ScrolltideError, ScrolltideResult},
};

/// Converts between narrative milliseconds and normalized scroll position.
///
/// One clock spans the whole presentation: `0 ms` is scroll position `0.0`, the total duration is
/// `1.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollClock {
    total_ms: f64,
}

impl ScrollClock {
    /// Build a clock over `total_ms`. Zero or non-finite totals are rejected.
    pub fn new(total_ms: f64) -> ScrolltideResult<Self> {
        if !(total_ms.is_finite() && total_ms > 0.0) {
            return Err(ScrolltideError::configuration(format!(
                "total duration must be finite and > 0 (got {total_ms} ms)"
            )));
        }
        Ok(Self { total_ms })
    }

    /// Total narrative duration in milliseconds.
    pub fn total_ms(self) -> f64 {
        self.total_ms
    }

    /// Total narrative duration in seconds.
    pub fn total_seconds(self) -> f64 {
        self.total_ms / 1000.0
    }

    /// Milliseconds to a scroll distance. Also used for durations, since the mapping is linear.
    pub fn time_to_scroll(self, ms: f64) -> f64 {
        ms / 1000.0 / self.total_seconds()
    }

    /// Scroll distance back to milliseconds.
    pub fn scroll_to_time(self, progress: f64) -> f64 {
        progress * self.total_seconds() * 1000.0
    }

    /// Virtual scroll length in viewport heights.
    pub fn scroll_distance_vh(self, timing: &TimingConfig) -> u64 {
        (self.total_seconds() * timing.base_vh_per_second * timing.scroll_multiplier).round() as u64
    }

    /// Scroll length in pixels at a comfortable reading speed.
    pub fn target_scroll_distance_px(self, timing: &TimingConfig) -> f64 {
        self.total_seconds() * timing.comfortable_scroll_px_per_s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
