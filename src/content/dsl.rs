use crate::{
    content::model::{
        Anchor, BridgeRef, Chapter, Content, EffectCue, Frame, LayerCue, TextBlock, TextKind,
    },
    foundation::config::DurationToken,
    foundation::core::{ChapterId, TextNum},
    foundation::error::{ScrolltideError, ScrolltideResult},
};

/// Builder for [`Content`](crate::Content).
#[derive(Default)]
pub struct ContentBuilder {
    chapters: Vec<Chapter>,
}

impl ContentBuilder {
    /// Create an empty content builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chapter. Chapters must be appended in id order.
    pub fn chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    /// Build and validate final [`Content`](crate::Content).
    pub fn build(self) -> ScrolltideResult<Content> {
        let content = Content {
            chapters: self.chapters,
        };
        content.validate()?;
        Ok(content)
    }
}

/// Builder for [`Chapter`](crate::Chapter).
pub struct ChapterBuilder {
    chapter: Chapter,
}

impl ChapterBuilder {
    /// Create a chapter with `section` transitions on both sides.
    pub fn new(id: u32) -> Self {
        Self {
            chapter: Chapter {
                id: ChapterId(id),
                title: String::new(),
                frames: Vec::new(),
                transition_in: DurationToken::Section,
                transition_out: DurationToken::Section,
                layers: Vec::new(),
                opening: Vec::new(),
                text_blocks: Vec::new(),
            },
        }
    }

    /// Set the chapter title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.chapter.title = title.into();
        self
    }

    /// Set the transition tokens into and out of the chapter.
    pub fn transitions(
        mut self,
        transition_in: DurationToken,
        transition_out: DurationToken,
    ) -> Self {
        self.chapter.transition_in = transition_in;
        self.chapter.transition_out = transition_out;
        self
    }

    /// Declare a scene layer.
    pub fn layer(mut self, name: impl Into<String>) -> Self {
        self.chapter.layers.push(name.into());
        self
    }

    /// Add a cue to the transition-in window.
    pub fn opening(mut self, cue: LayerCue) -> Self {
        self.chapter.opening.push(cue);
        self
    }

    /// Append a frame.
    pub fn frame(mut self, frame: Frame) -> Self {
        self.chapter.frames.push(frame);
        self
    }

    /// Add a text block; numbers must be unique within the chapter.
    pub fn text(mut self, block: TextBlock) -> ScrolltideResult<Self> {
        if self.chapter.text(block.num).is_some() {
            return Err(ScrolltideError::validation(format!(
                "duplicate text block {} in chapter {}",
                block.num, self.chapter.id
            )));
        }
        self.chapter.text_blocks.push(block);
        Ok(self)
    }

    /// Finish the chapter. Cross-reference checks run in [`ContentBuilder::build`].
    pub fn build(self) -> Chapter {
        self.chapter
    }
}

/// Builder for [`Frame`](crate::Frame).
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    /// Create an empty frame.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            frame: Frame {
                id: id.into(),
                texts: Vec::new(),
                layer_transition: None,
                hold_after: None,
                cues: Vec::new(),
            },
        }
    }

    /// Set the text blocks sequenced in this frame.
    pub fn texts(mut self, nums: impl IntoIterator<Item = u32>) -> Self {
        self.frame.texts = nums.into_iter().map(TextNum).collect();
        self
    }

    /// Set the closing layer transition.
    pub fn transition(mut self, token: DurationToken) -> Self {
        self.frame.layer_transition = Some(token);
        self
    }

    /// Set the extra hold after the frame content.
    pub fn hold(mut self, ms: u64) -> Self {
        self.frame.hold_after = Some(ms);
        self
    }

    /// Add a cue to the closing transition.
    pub fn cue(mut self, cue: LayerCue) -> Self {
        self.frame.cues.push(cue);
        self
    }

    /// Finish the frame.
    pub fn build(self) -> Frame {
        self.frame
    }
}

fn block(num: u32, content: impl Into<String>, kind: TextKind) -> TextBlock {
    TextBlock {
        num: TextNum(num),
        content: content.into(),
        kind,
        style: None,
        emphasis: false,
        visible_duration_ms: None,
        position: None,
        bridges_to: None,
        bridges_from: None,
        drift_px: None,
        effect: None,
    }
}

/// A plain narrative fragment.
pub fn fragment(num: u32, content: impl Into<String>) -> TextBlock {
    block(num, content, TextKind::Fragment)
}

/// A signature beat.
pub fn beat(num: u32, content: impl Into<String>) -> TextBlock {
    block(num, content, TextKind::Beat)
}

/// A consent moment.
pub fn consent(num: u32, content: impl Into<String>) -> TextBlock {
    block(num, content, TextKind::Consent)
}

/// Anchor at `top`/`right` offsets, the common placement for parchment fragments.
pub fn anchor(top: impl Into<String>, right: impl Into<String>) -> Anchor {
    Anchor {
        top: Some(top.into()),
        right: Some(right.into()),
        ..Anchor::default()
    }
}

/// A crossfade cue.
pub fn crossfade(from: impl Into<String>, to: impl Into<String>) -> LayerCue {
    LayerCue::Crossfade {
        from: from.into(),
        to: to.into(),
        jitter: false,
    }
}

/// A crossfade cue with impact jitter on the outgoing layer.
pub fn impact_swap(from: impl Into<String>, to: impl Into<String>) -> LayerCue {
    LayerCue::Crossfade {
        from: from.into(),
        to: to.into(),
        jitter: true,
    }
}

impl TextBlock {
    /// Set the anchor position.
    pub fn at(mut self, anchor: Anchor) -> Self {
        self.position = Some(anchor);
        self
    }

    /// Override the visible duration (ms).
    pub fn visible_for(mut self, ms: u64) -> Self {
        self.visible_duration_ms = Some(ms);
        self
    }

    /// Override the drift distance (px).
    pub fn drift(mut self, px: f64) -> Self {
        self.drift_px = Some(px);
        self
    }

    /// Declare an outbound bridge.
    pub fn bridges_to(mut self, chapter: u32, text: u32) -> Self {
        self.bridges_to = Some(BridgeRef {
            chapter: ChapterId(chapter),
            text_num: TextNum(text),
        });
        self
    }

    /// Declare an inbound bridge.
    pub fn bridges_from(mut self, chapter: u32, text: u32) -> Self {
        self.bridges_from = Some(BridgeRef {
            chapter: ChapterId(chapter),
            text_num: TextNum(text),
        });
        self
    }

    /// Toggle a named global effect when this block appears.
    pub fn toggles(mut self, effect: impl Into<String>, active: bool) -> Self {
        self.effect = Some(EffectCue {
            name: effect.into(),
            active,
        });
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/dsl.rs"]
mod tests;
