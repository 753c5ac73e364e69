use std::collections::BTreeMap;

use crate::foundation::{
    core::{ChapterId, ScrollRegion},
    error::{ScrolltideError, ScrolltideResult},
};

/// Partition of the scroll range `[0, 1]` into one region per chapter, in chapter order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ScrollRegions {
    regions: BTreeMap<ChapterId, ScrollRegion>,
}

/// Allocate each chapter a share of the scroll range proportional to its duration.
///
/// Boundaries come from integer cumulative sums, so neighbouring regions share the exact same
/// boundary value. The last region always ends at `1.0`.
#[tracing::instrument(skip_all, fields(chapters = durations.len()))]
pub fn derive_scroll_regions(
    durations: &BTreeMap<ChapterId, u64>,
) -> ScrolltideResult<ScrollRegions> {
    let total = durations
        .values()
        .try_fold(0u64, |acc, &ms| acc.checked_add(ms))
        .ok_or_else(|| ScrolltideError::configuration("chapter durations overflow u64 ms"))?;
    if durations.is_empty() || total == 0 {
        return Err(ScrolltideError::configuration(
            "cannot derive scroll regions from a zero total duration",
        ));
    }

    let mut regions = BTreeMap::new();
    let mut cum = 0u64;
    let last = durations.len() - 1;
    for (i, (&id, &ms)) in durations.iter().enumerate() {
        let start = cum as f64 / total as f64;
        cum += ms;
        let end = if i == last {
            1.0
        } else {
            cum as f64 / total as f64
        };
        let region = ScrollRegion::new(start, end)?;
        tracing::debug!(chapter = %id, start, end, "scroll region");
        regions.insert(id, region);
    }
    Ok(ScrollRegions { regions })
}

impl ScrollRegions {
    /// Region of one chapter.
    pub fn get(&self, chapter: ChapterId) -> Option<ScrollRegion> {
        self.regions.get(&chapter).copied()
    }

    /// Regions in chapter order.
    pub fn iter(&self) -> impl Iterator<Item = (ChapterId, ScrollRegion)> + '_ {
        self.regions.iter().map(|(&id, &r)| (id, r))
    }

    /// Number of chapters.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// `true` when no chapter has a region.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Chapter under a global scroll position. Positions at or past `1.0` map to the last chapter,
    /// positions below `0.0` to the first; `NaN` maps to nothing.
    pub fn chapter_at(&self, progress: f64) -> Option<ChapterId> {
        if progress.is_nan() {
            return None;
        }
        let p = progress.clamp(0.0, 1.0);
        self.regions
            .iter()
            .find(|(_, r)| r.contains(p))
            .map(|(&id, _)| id)
            .or_else(|| self.regions.keys().next_back().copied())
    }

    /// Progress through one chapter's region, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: f64, chapter: ChapterId) -> Option<f64> {
        self.get(chapter).map(|r| r.local_progress(progress))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/regions.rs"]
mod tests;
