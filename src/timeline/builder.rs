//! Per-chapter frame player.
//!
//! One generic player walks a chapter's declarative descriptor (frames, text blocks, layer cues)
//! with a millisecond cursor and emits [`Segment`]s placed in global scroll coordinates. The final
//! cursor must land on the chapter duration computed by the duration model.

use std::fmt;

use crate::{
    animation::{
        ease::Ease,
        segment::{Property, Segment, SegmentKind, Target},
    },
    content::model::{Chapter, Content, LayerCue, TextBlock},
    duration::model::{fragment_lifecycle_ms, fragment_start_ms, signature_reveal_ms, visible_ms},
    engine::Engine,
    foundation::{
        config::TimingConfig,
        core::{ChapterId, ScrollRegion, TextNum},
        error::{ScrolltideError, ScrolltideResult},
    },
    timeline::{clock::ScrollClock, scene::SceneHandle},
};

/// A target the scene could not resolve. Its segments were skipped; timing was not affected.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MissingTarget {
    /// Frame being played, or `None` for the chapter opening.
    pub frame: Option<String>,
    /// Unresolved target.
    pub target: Target,
}

impl fmt::Display for MissingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.frame {
            Some(frame) => write!(f, "{} (frame {frame})", self.target),
            None => write!(f, "{} (opening)", self.target),
        }
    }
}

/// Activation or deactivation of a global effect at a scroll position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EffectMark {
    /// Effect name.
    pub name: String,
    /// `true` switches the effect on.
    pub active: bool,
    /// Global scroll position of the mark.
    pub at: f64,
}

/// Everything one chapter contributes to the master timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSchedule {
    /// Chapter id.
    pub chapter: ChapterId,
    /// Scroll region the schedule lives in.
    pub region: ScrollRegion,
    /// Chapter duration in milliseconds.
    pub duration_ms: u64,
    /// Segments in schedule order.
    pub segments: Vec<Segment>,
    /// Targets skipped because the scene lacked them.
    pub missing: Vec<MissingTarget>,
    /// Effect toggles, in schedule order.
    pub effects: Vec<EffectMark>,
}

/// Play one chapter against its scene.
#[tracing::instrument(skip(engine, scene))]
pub fn build_chapter(
    engine: &Engine,
    chapter: ChapterId,
    scene: &dyn SceneHandle,
) -> ScrolltideResult<ChapterSchedule> {
    let (Some(ch), Some(region), Some(expected)) = (
        engine.content().chapter(chapter),
        engine.regions().get(chapter),
        engine.chapter_duration_ms(chapter),
    ) else {
        return Err(ScrolltideError::schedule(format!(
            "unknown chapter {chapter}"
        )));
    };

    let mut player = FramePlayer {
        timing: engine.timing(),
        content: engine.content(),
        chapter: ch,
        scene,
        region,
        clock: engine.clock(),
        frame: None,
        segments: Vec::new(),
        missing: Vec::new(),
        effects: Vec::new(),
    };
    let end = player.play();

    if end != expected {
        return Err(ScrolltideError::schedule(format!(
            "chapter {chapter}: timeline ends at {end} ms but its duration is {expected} ms"
        )));
    }
    for seg in &player.segments {
        seg.validate()?;
    }
    if !player.missing.is_empty() {
        tracing::warn!(missing = player.missing.len(), "chapter has unresolved targets");
    }

    Ok(ChapterSchedule {
        chapter,
        region,
        duration_ms: expected,
        segments: player.segments,
        missing: player.missing,
        effects: player.effects,
    })
}

/// Effect toggles of one chapter. They come from the content, so they are placed even when the
/// chapter scene is not mounted.
pub(crate) fn effect_marks(
    engine: &Engine,
    chapter: ChapterId,
) -> ScrolltideResult<Vec<EffectMark>> {
    Ok(build_chapter(engine, chapter, &EveryTarget)?.effects)
}

struct EveryTarget;

impl SceneHandle for EveryTarget {
    fn has_layer(&self, _layer: &str) -> bool {
        true
    }

    fn has_text(&self, _text: TextNum) -> bool {
        true
    }
}

/// Vertical offset (px) a block holds when it leaves the screen, following inbound bridges back
/// to where the chain started.
pub fn exit_offset_px(content: &Content, timing: &TimingConfig, block: &TextBlock) -> f64 {
    exit_offset_at_depth(content, timing, block, content.chapters.len())
}

fn exit_offset_at_depth(
    content: &Content,
    timing: &TimingConfig,
    block: &TextBlock,
    depth: usize,
) -> f64 {
    let start = entry_offset_at_depth(content, timing, block, depth);
    if block.kind.is_signature() {
        start - timing.beat_drift_px
    } else if visible_ms(block, timing) > 0 {
        start - drift_px(block, timing)
    } else {
        start
    }
}

fn entry_offset_at_depth(
    content: &Content,
    timing: &TimingConfig,
    block: &TextBlock,
    depth: usize,
) -> f64 {
    match block.bridges_from.and_then(|r| content.text(r)) {
        Some(source) if depth > 0 => exit_offset_at_depth(content, timing, source, depth - 1),
        _ => 0.0,
    }
}

fn drift_px(block: &TextBlock, timing: &TimingConfig) -> f64 {
    block.drift_px.unwrap_or(timing.drift_px)
}

struct FramePlayer<'a> {
    timing: &'a TimingConfig,
    content: &'a Content,
    chapter: &'a Chapter,
    scene: &'a dyn SceneHandle,
    region: ScrollRegion,
    clock: ScrollClock,
    frame: Option<String>,
    segments: Vec<Segment>,
    missing: Vec<MissingTarget>,
    effects: Vec<EffectMark>,
}

impl FramePlayer<'_> {
    /// Walk the chapter and return the final cursor (ms).
    fn play(&mut self) -> u64 {
        let timing = self.timing;
        let chapter = self.chapter;

        let transition_in = timing.token_ms(chapter.transition_in);
        for cue in &chapter.opening {
            self.cue(cue, 0, transition_in);
        }
        let mut cursor = transition_in + timing.breath_ms();

        for (i, frame) in chapter.frames.iter().enumerate() {
            if i > 0 {
                cursor += timing.inter_frame_pause_ms();
            }
            self.frame = Some(frame.id.clone());

            let frame_start = cursor;
            let mut local = 0u64;
            let mut first = true;
            for block in frame.texts.iter().filter_map(|&n| chapter.text(n)) {
                if block.kind.is_signature() {
                    local += self.signature(block, frame_start + local);
                } else {
                    let len = fragment_lifecycle_ms(block, timing);
                    let start = fragment_start_ms(local, len, first, timing);
                    self.fragment(block, frame_start + start);
                    local = start + len;
                    first = false;
                }
            }

            let text_end = frame_start + local;
            let transition = frame.layer_transition.map_or(0, |t| timing.token_ms(t));
            for cue in &frame.cues {
                self.cue(cue, text_end, transition);
            }
            cursor = text_end + transition + frame.hold_after.unwrap_or(0);
        }
        self.frame = None;

        cursor + timing.breath_ms() + timing.token_ms(chapter.transition_out)
    }

    /// Appear, drift, fade. Inbound bridges skip the appear and start where the source left off.
    fn fragment(&mut self, block: &TextBlock, start: u64) {
        let timing = self.timing;
        self.mark_effect(block, start);
        let Some(target) = self.text_target(block) else {
            return;
        };

        let offset = if block.bridges_from.is_some() {
            self.snap_inbound(&target, block)
        } else {
            let appear = timing.appear_ms();
            self.push(
                &target,
                Property::Opacity,
                SegmentKind::Appear,
                (0.0, 1.0),
                start,
                appear,
                Ease::ENTER,
            );
            self.push(
                &target,
                Property::OffsetY,
                SegmentKind::Appear,
                (timing.entry_offset_px, 0.0),
                start,
                appear,
                Ease::ENTER,
            );
            0.0
        };

        let visible_start = start + timing.appear_ms();
        let visible = visible_ms(block, timing);
        if visible > 0 {
            let to = offset - drift_px(block, timing);
            self.push(
                &target,
                Property::OffsetY,
                SegmentKind::Drift,
                (offset, to),
                visible_start,
                visible,
                Ease::Linear,
            );
        }
        if block.bridges_to.is_none() {
            self.push(
                &target,
                Property::Opacity,
                SegmentKind::Fade,
                (1.0, 0.0),
                visible_start + visible,
                timing.fade_ms(),
                Ease::EXIT,
            );
        }
    }

    /// Held breath, glyph-staggered reveal, settle, fade. Returns the cursor advance.
    fn signature(&mut self, block: &TextBlock, start: u64) -> u64 {
        let timing = self.timing;
        let held = timing.held_breath_ms();
        let reveal = signature_reveal_ms(&block.content, timing);
        let slot = 2 * held + reveal;
        let r = start + held;
        self.mark_effect(block, r);
        let Some(target) = self.text_target(block) else {
            return slot;
        };

        let offset = if block.bridges_from.is_some() {
            self.snap_inbound(&target, block)
        } else {
            self.push(
                &target,
                Property::Opacity,
                SegmentKind::Snap,
                (0.0, 1.0),
                r,
                0,
                Ease::Linear,
            );
            for (i, _) in block.content.chars().enumerate() {
                let glyph = Target::Glyph {
                    chapter: self.chapter.id,
                    text: block.num,
                    index: i as u32,
                };
                let at = r + i as u64 * timing.per_char_stagger_ms;
                let dur = timing.signature_ms;
                self.push(
                    &glyph,
                    Property::Opacity,
                    SegmentKind::Reveal,
                    (0.0, 1.0),
                    at,
                    dur,
                    Ease::ENTER,
                );
                self.push(
                    &glyph,
                    Property::OffsetY,
                    SegmentKind::Reveal,
                    (timing.entry_offset_px, 0.0),
                    at,
                    dur,
                    Ease::ENTER,
                );
            }
            0.0
        };

        let settle_start = r + reveal;
        let to = offset - timing.beat_drift_px;
        self.push(
            &target,
            Property::OffsetY,
            SegmentKind::Settle,
            (offset, to),
            settle_start,
            held,
            Ease::TRANSFORM,
        );
        if block.bridges_to.is_none() {
            // Fade tail runs past the slot; the next block does not wait for it.
            self.push(
                &target,
                Property::Opacity,
                SegmentKind::Fade,
                (1.0, 0.0),
                settle_start + held,
                timing.fade_ms(),
                Ease::EXIT,
            );
        }
        slot
    }

    /// Snap an inbound block visible at chapter start, at the offset its source exited with.
    fn snap_inbound(&mut self, target: &Target, block: &TextBlock) -> f64 {
        let depth = self.content.chapters.len();
        let offset = entry_offset_at_depth(self.content, self.timing, block, depth);
        self.push(target, Property::Opacity, SegmentKind::Snap, (1.0, 1.0), 0, 0, Ease::Linear);
        self.push(
            target,
            Property::OffsetY,
            SegmentKind::Snap,
            (offset, offset),
            0,
            0,
            Ease::Linear,
        );
        offset
    }

    fn cue(&mut self, cue: &LayerCue, start: u64, dur: u64) {
        match cue {
            LayerCue::Crossfade { from, to, jitter } => {
                if let Some(out) = self.layer_target(from) {
                    self.push(
                        &out,
                        Property::Opacity,
                        SegmentKind::Crossfade,
                        (1.0, 0.0),
                        start,
                        dur,
                        Ease::TRANSFORM,
                    );
                    if *jitter {
                        let half = self.timing.jitter_half_ms;
                        let px = self.timing.jitter_px;
                        self.push(
                            &out,
                            Property::OffsetX,
                            SegmentKind::Jitter,
                            (0.0, px),
                            start,
                            half,
                            Ease::Linear,
                        );
                        self.push(
                            &out,
                            Property::OffsetX,
                            SegmentKind::Jitter,
                            (px, 0.0),
                            start + half,
                            half,
                            Ease::Linear,
                        );
                    }
                }
                if let Some(inc) = self.layer_target(to) {
                    self.push(
                        &inc,
                        Property::Opacity,
                        SegmentKind::Crossfade,
                        (0.0, 1.0),
                        start,
                        dur,
                        Ease::TRANSFORM,
                    );
                }
            }
            LayerCue::Reveal { layer } => {
                if let Some(t) = self.layer_target(layer) {
                    self.push(
                        &t,
                        Property::Opacity,
                        SegmentKind::LayerReveal,
                        (0.0, 1.0),
                        start,
                        dur,
                        Ease::ENTER,
                    );
                }
            }
            LayerCue::Dismiss { layer } => {
                if let Some(t) = self.layer_target(layer) {
                    self.push(
                        &t,
                        Property::Opacity,
                        SegmentKind::LayerDismiss,
                        (1.0, 0.0),
                        start,
                        dur,
                        Ease::EXIT,
                    );
                }
            }
            LayerCue::Zoom { layer, scale } => {
                if let Some(t) = self.layer_target(layer) {
                    self.push(
                        &t,
                        Property::Scale,
                        SegmentKind::Zoom,
                        (1.0, *scale),
                        start,
                        dur,
                        Ease::TRANSFORM,
                    );
                }
            }
        }
    }

    fn mark_effect(&mut self, block: &TextBlock, at: u64) {
        if let Some(effect) = &block.effect {
            self.effects.push(EffectMark {
                name: effect.name.clone(),
                active: effect.active,
                at: self.position(at),
            });
        }
    }

    fn text_target(&mut self, block: &TextBlock) -> Option<Target> {
        let target = Target::Text {
            chapter: self.chapter.id,
            text: block.num,
        };
        self.resolve(target, self.scene.has_text(block.num))
    }

    fn layer_target(&mut self, layer: &str) -> Option<Target> {
        let target = Target::Layer {
            chapter: self.chapter.id,
            layer: layer.to_owned(),
        };
        self.resolve(target, self.scene.has_layer(layer))
    }

    fn resolve(&mut self, target: Target, present: bool) -> Option<Target> {
        if present {
            return Some(target);
        }
        tracing::warn!(%target, frame = ?self.frame, "target missing from scene; skipping");
        self.missing.push(MissingTarget {
            frame: self.frame.clone(),
            target,
        });
        None
    }

    fn position(&self, local_ms: u64) -> f64 {
        self.region.start + self.clock.time_to_scroll(local_ms as f64)
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        target: &Target,
        property: Property,
        kind: SegmentKind,
        (from, to): (f64, f64),
        start: u64,
        dur: u64,
        ease: Ease,
    ) {
        self.segments.push(Segment {
            target: target.clone(),
            property,
            kind,
            from,
            to,
            start: self.position(start),
            duration: self.clock.time_to_scroll(dur as f64),
            ease,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
