use std::fmt;

use crate::{
    animation::ease::Ease,
    foundation::core::{ChapterId, TextNum},
    foundation::error::{ScrolltideError, ScrolltideResult},
};

/// Something a schedule animates. Resolved by the presentation layer.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Target {
    /// A whole chapter container.
    Container {
        /// Owning chapter.
        chapter: ChapterId,
    },
    /// A named image layer inside a chapter scene.
    Layer {
        /// Owning chapter.
        chapter: ChapterId,
        /// Layer name as declared by the chapter.
        layer: String,
    },
    /// A text block inside a chapter scene.
    Text {
        /// Owning chapter.
        chapter: ChapterId,
        /// Text block number.
        text: TextNum,
    },
    /// One character of a signature text block (split reveal).
    Glyph {
        /// Owning chapter.
        chapter: ChapterId,
        /// Text block number.
        text: TextNum,
        /// 0-based character index.
        index: u32,
    },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container { chapter } => write!(f, "ch{chapter}"),
            Self::Layer { chapter, layer } => write!(f, "ch{chapter}/layer:{layer}"),
            Self::Text { chapter, text } => write!(f, "ch{chapter}/text:{text}"),
            Self::Glyph {
                chapter,
                text,
                index,
            } => write!(f, "ch{chapter}/text:{text}/char:{index}"),
        }
    }
}

/// Animatable scalar property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal offset (px).
    OffsetX,
    /// Vertical offset (px).
    OffsetY,
    /// Uniform scale factor.
    Scale,
}

/// What a segment means in the choreography. Labels only; sampling ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// Instantaneous set (bridged text made visible at chapter start, beat block shown).
    Snap,
    /// Text fade-in + rise.
    Appear,
    /// Linear drift while a text is visible.
    Drift,
    /// Text fade-out.
    Fade,
    /// Per-character signature reveal.
    Reveal,
    /// Drift-up hold after a signature reveal.
    Settle,
    /// One half of a layer crossfade.
    Crossfade,
    /// Positional impact jitter.
    Jitter,
    /// Layer fade-in.
    LayerReveal,
    /// Layer fade-out.
    LayerDismiss,
    /// Slow layer zoom.
    Zoom,
    /// Chapter container fade-in (or initial set for the first chapter).
    ContainerIn,
    /// Chapter container fade-out.
    ContainerOut,
}

/// One property interpolation over `[start, start + duration]` in global scroll coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Animated element.
    pub target: Target,
    /// Animated property.
    pub property: Property,
    /// Choreographic label.
    pub kind: SegmentKind,
    /// Value at (and before) `start`.
    pub from: f64,
    /// Value at (and after) `start + duration`.
    pub to: f64,
    /// Global scroll position where the interpolation begins.
    pub start: f64,
    /// Scroll distance the interpolation spans (0 = instantaneous set).
    pub duration: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Segment {
    /// Global scroll position where the interpolation ends.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Value of this segment at global scroll position `p`.
    pub fn value_at(&self, p: f64) -> f64 {
        if p < self.start {
            return self.from;
        }
        if self.duration <= 0.0 || p >= self.end() {
            return self.to;
        }
        let t = (p - self.start) / self.duration;
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    pub(crate) fn validate(&self) -> ScrolltideResult<()> {
        let finite = self.from.is_finite()
            && self.to.is_finite()
            && self.start.is_finite()
            && self.duration.is_finite();
        if !finite {
            return Err(ScrolltideError::schedule(format!(
                "segment {:?} on {} has non-finite values",
                self.kind, self.target
            )));
        }
        if self.duration < 0.0 {
            return Err(ScrolltideError::schedule(format!(
                "segment {:?} on {} has negative duration",
                self.kind, self.target
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/segment.rs"]
mod tests;
