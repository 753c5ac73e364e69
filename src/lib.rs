//! Scrolltide derives and schedules the timeline of a scroll-scrubbed, chaptered narrative.
//!
//! A presentation is a fixed sequence of chapters, each made of layered images and timed text
//! fragments, choreographed against one scroll position in `[0, 1]`. The public API is
//! engine-oriented:
//!
//! - Load and validate [`Content`] (JSON or the builder DSL) and a [`TimingConfig`]
//! - Create an [`Engine`], which derives chapter durations, [`ScrollRegions`] and a [`ScrollClock`]
//! - Build per-chapter [`ChapterSchedule`]s or a [`MasterTimeline`], then scrub it with a
//!   [`Playhead`]
//!
//! Text blocks that persist across a chapter cut ("bridges") are checked with
//! [`validate_bridges`] / [`assert_bridges_valid`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod foundation;

pub(crate) mod animation;
pub(crate) mod content;
pub(crate) mod duration;
pub(crate) mod timeline;

pub use crate::foundation::config::{DurationToken, MAX_SPAN_MS, TimingConfig};
pub use crate::foundation::core::{ChapterId, ScrollRegion, TextNum, Vec2};
pub use crate::foundation::error::{ScrolltideError, ScrolltideResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::segment::{Property, Segment, SegmentKind, Target};
pub use crate::animation::track::Track;

pub use crate::content::bridges::{
    BridgeError, BridgeErrorKind, BridgeErrors, assert_bridges_valid, validate_bridges,
};
pub use crate::content::dsl::{
    ChapterBuilder, ContentBuilder, FrameBuilder, anchor, beat, consent, crossfade, fragment,
    impact_swap,
};
pub use crate::content::model::{
    Anchor, BridgeRef, Chapter, Content, EffectCue, Frame, LayerCue, TextBlock, TextKind,
    TextStyle,
};

pub use crate::duration::model::{
    chapter_duration_ms, fragment_lifecycle_ms, frame_duration_ms, frame_text_ms,
    reading_time_ms, signature_reveal_ms, signature_slot_ms, visible_ms, word_count,
};

pub use crate::engine::Engine;
pub use crate::timeline::builder::{ChapterSchedule, EffectMark, MissingTarget, exit_offset_px};
pub use crate::timeline::clock::ScrollClock;
pub use crate::timeline::master::{
    EffectWindow, MasterTimeline, Playhead, Sample, SceneState, effect_windows,
};
pub use crate::timeline::regions::{ScrollRegions, derive_scroll_regions};
pub use crate::timeline::scene::{SceneHandle, StageHandle, StaticScene, StaticStage};
