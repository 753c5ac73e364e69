use std::collections::BTreeMap;

use crate::{
    content::{
        bridges::{self, BridgeError},
        model::Content,
    },
    duration::model::chapter_duration_ms,
    foundation::{
        config::TimingConfig,
        core::ChapterId,
        error::{ScrolltideError, ScrolltideResult},
    },
    timeline::{
        builder::{self, ChapterSchedule},
        clock::ScrollClock,
        master::{self, MasterTimeline},
        regions::{ScrollRegions, derive_scroll_regions},
        scene::{SceneHandle, StageHandle},
    },
};

/// Validated content plus everything derived from it: chapter durations, scroll regions and the
/// scroll clock.
///
/// Derivation happens once, in [`Engine::initialize`]. The engine is immutable afterwards, so every
/// builder sees the same durations the regions were cut from.
#[derive(Clone, Debug)]
pub struct Engine {
    content: Content,
    timing: TimingConfig,
    durations: BTreeMap<ChapterId, u64>,
    regions: ScrollRegions,
    clock: ScrollClock,
}

impl Engine {
    /// Validate `content` and `timing`, then derive durations, regions and clock.
    #[tracing::instrument(skip_all, fields(chapters = content.chapters.len()))]
    pub fn initialize(content: Content, timing: TimingConfig) -> ScrolltideResult<Self> {
        if content.chapters.is_empty() {
            return Err(ScrolltideError::configuration(
                "content must contain at least one chapter",
            ));
        }
        timing.validate()?;
        content.validate()?;

        let durations: BTreeMap<ChapterId, u64> = content
            .chapters
            .iter()
            .map(|c| (c.id, chapter_duration_ms(c, &timing)))
            .collect();
        let total = durations
            .values()
            .try_fold(0u64, |acc, &ms| acc.checked_add(ms))
            .ok_or_else(|| {
                ScrolltideError::configuration("total presentation duration overflows u64 ms")
            })?;
        let clock = ScrollClock::new(total as f64)?;
        let regions = derive_scroll_regions(&durations)?;
        tracing::info!(
            total_ms = total,
            scroll_vh = clock.scroll_distance_vh(&timing),
            "engine initialized"
        );

        Ok(Self {
            content,
            timing,
            durations,
            regions,
            clock,
        })
    }

    /// Loaded content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Timing constants in effect.
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Duration of every chapter (ms), in chapter order.
    pub fn durations(&self) -> &BTreeMap<ChapterId, u64> {
        &self.durations
    }

    /// Duration of one chapter (ms).
    pub fn chapter_duration_ms(&self, chapter: ChapterId) -> Option<u64> {
        self.durations.get(&chapter).copied()
    }

    /// Sum of all chapter durations (ms).
    pub fn total_duration_ms(&self) -> u64 {
        self.durations.values().sum()
    }

    /// Scroll region per chapter.
    pub fn regions(&self) -> &ScrollRegions {
        &self.regions
    }

    /// Millisecond/scroll converter over the whole presentation.
    pub fn clock(&self) -> ScrollClock {
        self.clock
    }

    /// Virtual scroll length in viewport heights.
    pub fn scroll_distance_vh(&self) -> u64 {
        self.clock.scroll_distance_vh(&self.timing)
    }

    /// Scroll length in pixels at a comfortable reading speed.
    pub fn target_scroll_distance_px(&self) -> f64 {
        self.clock.target_scroll_distance_px(&self.timing)
    }

    /// Build one chapter's schedule against its scene.
    pub fn build_chapter_timeline(
        &self,
        chapter: ChapterId,
        scene: &dyn SceneHandle,
    ) -> ScrolltideResult<ChapterSchedule> {
        builder::build_chapter(self, chapter, scene)
    }

    /// Compose every mounted chapter into one scrubbable timeline.
    pub fn build_master_timeline(
        &self,
        stage: &dyn StageHandle,
    ) -> ScrolltideResult<MasterTimeline> {
        master::build_master(self, stage)
    }

    /// Every broken bridge in the loaded content.
    pub fn validate_bridges(&self) -> Vec<BridgeError> {
        bridges::validate_bridges(&self.content)
    }

    /// Fail with an integrity error when any bridge is broken.
    pub fn assert_bridges_valid(&self) -> ScrolltideResult<()> {
        bridges::assert_bridges_valid(&self.content)
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
