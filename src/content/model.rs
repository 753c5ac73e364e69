use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::config::DurationToken,
    foundation::core::{ChapterId, TextNum},
    foundation::error::{ScrolltideError, ScrolltideResult},
};

/// Semantic kind of a text block; decides which lifecycle it gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextKind {
    /// Ordinary narrative fragment: appear, drift, fade.
    Fragment,
    /// Short emphasized line with a character-staggered signature reveal.
    Beat,
    /// Consent moment; timed like a beat.
    Consent,
}

impl TextKind {
    /// `true` for kinds that use the signature reveal instead of the fragment lifecycle.
    pub fn is_signature(self) -> bool {
        matches!(self, Self::Beat | Self::Consent)
    }
}

/// Presentation style tag carried through to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    /// Parchment card.
    Parchment,
    /// No background.
    Transparent,
    /// Centered beat typography.
    Beat,
}

/// Anchor position of a text block, as CSS-like offsets. Compared for exact equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Offset from the top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    /// Offset from the right edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    /// Offset from the bottom edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    /// Offset from the left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}

/// Reference to a text block in some chapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRef {
    /// Chapter holding the referenced block.
    pub chapter: ChapterId,
    /// Referenced block number.
    pub text_num: TextNum,
}

/// Activation or deactivation of a named global effect (e.g. a lighting overlay).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EffectCue {
    /// Effect name.
    pub name: String,
    /// `true` switches the effect on, `false` switches it off.
    pub active: bool,
}

/// One unit of narrative text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Block number, unique within the chapter.
    pub num: TextNum,
    /// Displayed text.
    pub content: String,
    /// Semantic kind.
    #[serde(rename = "type")]
    pub kind: TextKind,
    /// Presentation style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
    /// Bold styling.
    #[serde(default)]
    pub emphasis: bool,
    /// Explicit visible duration (ms), replacing the reading-time estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_duration_ms: Option<u64>,
    /// Anchor position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Anchor>,
    /// Outbound bridge: the exit is suppressed and the block continues as another block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridges_to: Option<BridgeRef>,
    /// Inbound bridge: the block starts visible, matching the source's exit state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridges_from: Option<BridgeRef>,
    /// Drift distance override (px, upward).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_px: Option<f64>,
    /// Global effect toggled when this block appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<EffectCue>,
}

/// Layer choreography run during a transition window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "cue", rename_all = "camelCase")]
pub enum LayerCue {
    /// Outgoing layer fades out while incoming layer fades in.
    Crossfade {
        /// Outgoing layer.
        from: String,
        /// Incoming layer.
        to: String,
        /// Add a small positional jitter to the outgoing layer (impact moments).
        #[serde(default)]
        jitter: bool,
    },
    /// Layer fades in.
    Reveal {
        /// Layer name.
        layer: String,
    },
    /// Layer fades out.
    Dismiss {
        /// Layer name.
        layer: String,
    },
    /// Layer scales from 1 to `scale`.
    Zoom {
        /// Layer name.
        layer: String,
        /// Final scale factor.
        scale: f64,
    },
}

impl LayerCue {
    /// Layers this cue animates.
    pub fn layers(&self) -> Vec<&str> {
        match self {
            Self::Crossfade { from, to, .. } => vec![from.as_str(), to.as_str()],
            Self::Reveal { layer } | Self::Dismiss { layer } | Self::Zoom { layer, .. } => {
                vec![layer.as_str()]
            }
        }
    }
}

/// Ordered sub-beat of a chapter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Frame label, e.g. `"1A"`.
    pub id: String,
    /// Text blocks sequenced in this frame, in order.
    #[serde(default)]
    pub texts: Vec<TextNum>,
    /// Closing layer transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_transition: Option<DurationToken>,
    /// Extra hold after the frame content (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_after: Option<u64>,
    /// Layer cues run during the closing transition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cues: Vec<LayerCue>,
}

/// Top-level narrative unit with its own scroll region.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter id (dense, from 1).
    pub id: ChapterId,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Frames in playback order.
    pub frames: Vec<Frame>,
    /// Transition from the previous chapter.
    pub transition_in: DurationToken,
    /// Transition to the next chapter.
    pub transition_out: DurationToken,
    /// Layers the chapter scene is expected to expose.
    #[serde(default)]
    pub layers: Vec<String>,
    /// Layer cues run during the transition-in window.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opening: Vec<LayerCue>,
    /// Text block table.
    pub text_blocks: Vec<TextBlock>,
}

impl Chapter {
    /// Look up a text block by number.
    pub fn text(&self, num: TextNum) -> Option<&TextBlock> {
        self.text_blocks.iter().find(|t| t.num == num)
    }

    /// `true` when some block of this chapter bridges into `next`.
    pub fn bridges_into(&self, next: ChapterId) -> bool {
        self.text_blocks
            .iter()
            .any(|t| t.bridges_to.is_some_and(|b| b.chapter == next))
    }
}

/// The whole narrative: chapters in id order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Content {
    /// Chapters, ids `1..=N` in order.
    pub chapters: Vec<Chapter>,
}

impl Content {
    /// Parse content from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrolltideResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrolltideError::serde(format!("parse content JSON: {e}")))
    }

    /// Parse content from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrolltideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrolltideError::validation(format!("open content JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Look up a chapter by id.
    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.chapters.get(idx).filter(|c| c.id == id)
    }

    /// Look up a text block through a bridge reference.
    pub fn text(&self, r: BridgeRef) -> Option<&TextBlock> {
        self.chapter(r.chapter)?.text(r.text_num)
    }

    /// Validate structural invariants (ids, references, cues). Bridges are checked separately
    /// by [`crate::validate_bridges`].
    pub fn validate(&self) -> ScrolltideResult<()> {
        crate::content::validate::validate_content(self).map_err(|e| {
            ScrolltideError::validation(format!("content validation failed: {e}"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/model.rs"]
mod tests;
