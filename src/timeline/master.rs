//! Global composition of chapter schedules and the scrub controller.
//!
//! The master timeline owns one [`Track`] per animated (target, property) pair. Seeking samples
//! every track at an absolute scroll position, so the result never depends on where the playhead
//! came from.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{
        ease::Ease,
        segment::{Property, Segment, SegmentKind, Target},
        track::Track,
    },
    engine::Engine,
    foundation::{
        core::{ChapterId, Vec2},
        error::{ScrolltideError, ScrolltideResult},
    },
    timeline::{
        builder::{ChapterSchedule, EffectMark, build_chapter, effect_marks},
        regions::ScrollRegions,
        scene::StageHandle,
    },
};

/// Interval of scroll positions during which a global effect is on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EffectWindow {
    /// Effect name.
    pub name: String,
    /// Activation position.
    pub on: f64,
    /// Deactivation position; `None` keeps the effect on until the end.
    pub off: Option<f64>,
}

impl EffectWindow {
    /// `true` when `progress` lies in `[on, off)`, or `[on, 1]` for an open window.
    pub fn contains(&self, progress: f64) -> bool {
        self.on <= progress
            && match self.off {
                Some(off) => progress < off,
                None => progress <= 1.0,
            }
    }
}

/// Pair every activation with the next deactivation of the same effect.
pub fn effect_windows(marks: &[EffectMark]) -> Vec<EffectWindow> {
    let mut sorted: Vec<&EffectMark> = marks.iter().collect();
    sorted.sort_by(|a, b| a.at.total_cmp(&b.at));

    let mut windows: Vec<EffectWindow> = Vec::new();
    let mut open: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for mark in sorted {
        if mark.active {
            open.entry(mark.name.as_str()).or_default().push(windows.len());
            windows.push(EffectWindow {
                name: mark.name.clone(),
                on: mark.at,
                off: None,
            });
            continue;
        }
        match open.get_mut(mark.name.as_str()) {
            Some(idx) if !idx.is_empty() => {
                for i in idx.drain(..) {
                    windows[i].off = Some(mark.at);
                }
            }
            _ => {
                tracing::warn!(effect = %mark.name, at = mark.at, "deactivation without activation")
            }
        }
    }
    windows
}

/// One sampled property.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Sample {
    /// Animated target.
    pub target: Target,
    /// Animated property.
    pub property: Property,
    /// Value at the sampled position.
    pub value: f64,
}

/// Every animated property at one scroll position.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneState {
    progress: f64,
    chapter: Option<ChapterId>,
    samples: Vec<Sample>,
    active_effects: Vec<String>,
}

impl SceneState {
    /// Sampled (clamped) scroll position.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Chapter whose region holds the position.
    pub fn chapter(&self) -> Option<ChapterId> {
        self.chapter
    }

    /// Value of one property, if anything animates it.
    pub fn get(&self, target: &Target, property: Property) -> Option<f64> {
        self.samples
            .binary_search_by(|s| (&s.target, s.property).cmp(&(target, property)))
            .ok()
            .map(|i| self.samples[i].value)
    }

    /// Opacity of a target.
    pub fn opacity(&self, target: &Target) -> Option<f64> {
        self.get(target, Property::Opacity)
    }

    /// Combined positional offset; unanimated axes are zero.
    pub fn translate(&self, target: &Target) -> Vec2 {
        Vec2::new(
            self.get(target, Property::OffsetX).unwrap_or(0.0),
            self.get(target, Property::OffsetY).unwrap_or(0.0),
        )
    }

    /// All samples, ordered by target then property.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Names of the effects on at this position.
    pub fn active_effects(&self) -> &[String] {
        &self.active_effects
    }
}

/// All chapters composed on one scroll axis.
#[derive(Clone, Debug)]
pub struct MasterTimeline {
    regions: ScrollRegions,
    tracks: BTreeMap<(Target, Property), Track>,
    schedules: Vec<ChapterSchedule>,
    effects: Vec<EffectWindow>,
    skipped: Vec<ChapterId>,
}

/// Compose every mounted chapter, with container fades at chapter boundaries.
#[tracing::instrument(skip_all)]
pub fn build_master(engine: &Engine, stage: &dyn StageHandle) -> ScrolltideResult<MasterTimeline> {
    let chapters = &engine.content().chapters;
    let clock = engine.clock();
    let timing = engine.timing();

    let mut tracks: BTreeMap<(Target, Property), Track> = BTreeMap::new();
    let mut schedules = Vec::new();
    let mut skipped = Vec::new();
    let mut marks: Vec<EffectMark> = Vec::new();

    for (i, chapter) in chapters.iter().enumerate() {
        let Some(scene) = stage.scene(chapter.id) else {
            tracing::warn!(chapter = %chapter.id, "chapter scene not mounted; skipping");
            skipped.push(chapter.id);
            marks.extend(effect_marks(engine, chapter.id)?);
            continue;
        };
        let schedule = build_chapter(engine, chapter.id, scene)?;
        let region = schedule.region;
        let container = Target::Container {
            chapter: chapter.id,
        };
        let fade = |kind, (from, to): (f64, f64), start: f64, duration: f64, ease| Segment {
            target: container.clone(),
            property: Property::Opacity,
            kind,
            from,
            to,
            start: start.max(0.0),
            duration,
            ease,
        };

        let mut container_segments = Vec::new();
        if i == 0 {
            container_segments.push(fade(SegmentKind::Snap, (1.0, 1.0), 0.0, 0.0, Ease::Linear));
        } else {
            let dur = clock.time_to_scroll(timing.token_ms(chapter.transition_in) as f64);
            container_segments.push(fade(
                SegmentKind::ContainerIn,
                (0.0, 1.0),
                region.start,
                dur,
                Ease::ENTER,
            ));
        }
        if let Some(next) = chapters.get(i + 1) {
            let (start, dur) = if chapter.bridges_into(next.id) {
                // Both containers fade over the same span so the bridged text never blinks.
                let dur = clock.time_to_scroll(timing.token_ms(next.transition_in) as f64);
                (region.end, dur)
            } else {
                let dur = clock.time_to_scroll(timing.token_ms(chapter.transition_out) as f64);
                (region.end - dur, dur)
            };
            container_segments.push(fade(
                SegmentKind::ContainerOut,
                (1.0, 0.0),
                start,
                dur,
                Ease::EXIT,
            ));
        }

        for seg in container_segments.into_iter().chain(schedule.segments.iter().cloned()) {
            seg.validate()?;
            tracks
                .entry((seg.target.clone(), seg.property))
                .or_insert_with(|| Track::new(seg.target.clone(), seg.property))
                .push(seg);
        }
        marks.extend(schedule.effects.iter().cloned());
        schedules.push(schedule);
    }

    let effects = effect_windows(&marks);
    tracing::debug!(
        tracks = tracks.len(),
        chapters = schedules.len(),
        effect_windows = effects.len(),
        "master timeline built"
    );

    Ok(MasterTimeline {
        regions: engine.regions().clone(),
        tracks,
        schedules,
        effects,
        skipped,
    })
}

impl MasterTimeline {
    /// One property track.
    pub fn track(&self, target: &Target, property: Property) -> Option<&Track> {
        self.tracks.get(&(target.clone(), property))
    }

    /// All tracks, ordered by target then property.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tracks.values()
    }

    /// Per-chapter schedules, in chapter order.
    pub fn schedules(&self) -> &[ChapterSchedule] {
        &self.schedules
    }

    /// Chapters left out because their scene was not mounted.
    pub fn skipped(&self) -> &[ChapterId] {
        &self.skipped
    }

    /// Effect windows, in activation order.
    pub fn effect_windows(&self) -> &[EffectWindow] {
        &self.effects
    }

    /// `true` when the named effect is on at `progress`.
    pub fn is_effect_active(&self, name: &str, progress: f64) -> bool {
        self.effects
            .iter()
            .any(|w| w.name == name && w.contains(progress))
    }

    /// Evaluate every track at an absolute position (clamped to `[0, 1]`).
    pub fn sample(&self, progress: f64) -> ScrolltideResult<SceneState> {
        if !progress.is_finite() {
            return Err(ScrolltideError::schedule(format!(
                "seek position must be finite (got {progress})"
            )));
        }
        let p = progress.clamp(0.0, 1.0);

        let samples = self
            .tracks
            .iter()
            .filter_map(|((target, property), track)| {
                track.sample(p).map(|value| Sample {
                    target: target.clone(),
                    property: *property,
                    value,
                })
            })
            .collect();
        let active_effects: BTreeSet<&str> = self
            .effects
            .iter()
            .filter(|w| w.contains(p))
            .map(|w| w.name.as_str())
            .collect();

        Ok(SceneState {
            progress: p,
            chapter: self.regions.chapter_at(p),
            samples,
            active_effects: active_effects.into_iter().map(str::to_owned).collect(),
        })
    }

    /// Scrub controller over this timeline.
    pub fn controller(&self) -> Playhead<'_> {
        Playhead {
            timeline: self,
            state: SceneState::default(),
            disposed: false,
        }
    }
}

/// Seekable view of a [`MasterTimeline`].
#[derive(Debug)]
pub struct Playhead<'a> {
    timeline: &'a MasterTimeline,
    state: SceneState,
    disposed: bool,
}

impl Playhead<'_> {
    /// Move to `progress` and return the resulting scene state.
    pub fn seek(&mut self, progress: f64) -> ScrolltideResult<&SceneState> {
        if self.disposed {
            return Err(ScrolltideError::schedule("playhead has been disposed"));
        }
        self.state = self.timeline.sample(progress)?;
        Ok(&self.state)
    }

    /// State at the last successful seek.
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Release the playhead; later seeks fail.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.state = SceneState::default();
    }

    /// `true` after [`Playhead::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/master.rs"]
mod tests;
