use std::fmt;

use crate::foundation::error::{ScrolltideError, ScrolltideResult};

pub use kurbo::Vec2;

/// 1-based chapter identifier. Chapters form a dense sequence `1..=N`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ChapterId(pub u32);

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text block number, unique within its owning chapter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TextNum(pub u32);

impl fmt::Display for TextNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open interval `[start, end)` of the normalized scroll range `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRegion {
    /// Inclusive region start.
    pub start: f64,
    /// Exclusive region end.
    pub end: f64,
}

impl ScrollRegion {
    /// Create a validated region with `0 <= start <= end <= 1`.
    pub fn new(start: f64, end: f64) -> ScrolltideResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ScrolltideError::validation(
                "ScrollRegion bounds must be finite",
            ));
        }
        if start > end {
            return Err(ScrolltideError::validation(
                "ScrollRegion start must be <= end",
            ));
        }
        if start < 0.0 || end > 1.0 {
            return Err(ScrolltideError::validation(
                "ScrollRegion must lie inside [0, 1]",
            ));
        }
        Ok(Self { start, end })
    }

    /// Width of the region as a proportion of the whole scroll range.
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when `p` is inside `[start, end)`.
    pub fn contains(self, p: f64) -> bool {
        self.start <= p && p < self.end
    }

    /// Map a global scroll position to region-local progress, clamped to `[0, 1]`.
    ///
    /// Empty regions report `1.0` once the position reaches `start`.
    pub fn local_progress(self, p: f64) -> f64 {
        let w = self.width();
        if w <= 0.0 {
            return if p >= self.start { 1.0 } else { 0.0 };
        }
        ((p - self.start) / w).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
