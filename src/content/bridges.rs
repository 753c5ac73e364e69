//! Consistency checks for text blocks that persist across a chapter cut.
//!
//! A bridge is declared twice: the source block carries `bridgesTo` and the destination block
//! carries `bridgesFrom`. Both sides must show the same text at the same anchor, otherwise the
//! cut is visible. Run these checks at build/test time; the rendering path never calls them.

use std::fmt;

use crate::{
    content::model::Content,
    foundation::core::{ChapterId, TextNum},
    foundation::error::{ScrolltideError, ScrolltideResult},
};

/// Why a bridge is broken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeErrorKind {
    /// The destination chapter does not exist.
    TargetChapterMissing,
    /// The destination block does not exist.
    TargetTextMissing,
    /// Source and destination content differ.
    ContentMismatch,
    /// Source and destination anchors differ (rendered as JSON for the report).
    PositionMismatch {
        /// Source anchor.
        source: String,
        /// Destination anchor.
        target: String,
    },
    /// The destination's `bridgesFrom` is absent or points elsewhere.
    MissingBackReference,
    /// An inbound `bridgesFrom` whose source never declared the matching `bridgesTo`.
    DanglingInbound,
}

impl fmt::Display for BridgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetChapterMissing => write!(f, "target chapter not found"),
            Self::TargetTextMissing => write!(f, "target text block not found"),
            Self::ContentMismatch => write!(f, "content mismatch"),
            Self::PositionMismatch { source, target } => {
                write!(f, "position mismatch: {source} vs {target}")
            }
            Self::MissingBackReference => {
                write!(f, "target missing or incorrect bridgesFrom reference")
            }
            Self::DanglingInbound => write!(f, "source does not declare the matching bridgesTo"),
        }
    }
}

/// One broken bridge, identified by its source and destination blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeError {
    /// Chapter declaring `bridgesTo`.
    pub source_chapter: ChapterId,
    /// Block declaring `bridgesTo`.
    pub source_text: TextNum,
    /// Chapter named by the bridge.
    pub target_chapter: ChapterId,
    /// Block named by the bridge.
    pub target_text: TextNum,
    /// Failure reason.
    pub kind: BridgeErrorKind,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ch{} text {} -> Ch{} text {}: {}",
            self.source_chapter, self.source_text, self.target_chapter, self.target_text, self.kind
        )
    }
}

/// Every broken bridge found in one validation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeErrors {
    /// Collected errors, in content order.
    pub errors: Vec<BridgeError>,
}

impl fmt::Display for BridgeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bridge validation failed:")?;
        for e in &self.errors {
            write!(f, "\n{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BridgeErrors {}

/// Check every declared bridge. An empty list means the content is consistent.
pub fn validate_bridges(content: &Content) -> Vec<BridgeError> {
    let mut errors = Vec::new();

    for chapter in &content.chapters {
        for text in &chapter.text_blocks {
            if let Some(to) = text.bridges_to {
                check_outbound(content, chapter.id, text.num, to, &mut errors);
            }
            if let Some(from) = text.bridges_from {
                let declared = content
                    .text(from)
                    .and_then(|src| src.bridges_to)
                    .is_some_and(|b| b.chapter == chapter.id && b.text_num == text.num);
                if !declared {
                    errors.push(BridgeError {
                        source_chapter: from.chapter,
                        source_text: from.text_num,
                        target_chapter: chapter.id,
                        target_text: text.num,
                        kind: BridgeErrorKind::DanglingInbound,
                    });
                }
            }
        }
    }

    errors
}

fn check_outbound(
    content: &Content,
    chapter: ChapterId,
    num: TextNum,
    to: crate::content::model::BridgeRef,
    errors: &mut Vec<BridgeError>,
) {
    let err = |kind| BridgeError {
        source_chapter: chapter,
        source_text: num,
        target_chapter: to.chapter,
        target_text: to.text_num,
        kind,
    };

    let Some(source) = content.chapter(chapter).and_then(|c| c.text(num)) else {
        return;
    };
    let Some(target_chapter) = content.chapter(to.chapter) else {
        errors.push(err(BridgeErrorKind::TargetChapterMissing));
        return;
    };
    let Some(target) = target_chapter.text(to.text_num) else {
        errors.push(err(BridgeErrorKind::TargetTextMissing));
        return;
    };

    if target.content != source.content {
        errors.push(err(BridgeErrorKind::ContentMismatch));
    }
    if target.position != source.position {
        errors.push(err(BridgeErrorKind::PositionMismatch {
            source: anchor_json(&source.position),
            target: anchor_json(&target.position),
        }));
    }
    let points_back = target
        .bridges_from
        .is_some_and(|b| b.chapter == chapter && b.text_num == num);
    if !points_back {
        errors.push(err(BridgeErrorKind::MissingBackReference));
    }
}

fn anchor_json(anchor: &Option<crate::content::model::Anchor>) -> String {
    serde_json::to_string(anchor).unwrap_or_else(|_| format!("{anchor:?}"))
}

/// Fail with [`ScrolltideError::Integrity`] listing every broken bridge.
pub fn assert_bridges_valid(content: &Content) -> ScrolltideResult<()> {
    let errors = validate_bridges(content);
    if errors.is_empty() {
        return Ok(());
    }
    tracing::error!(count = errors.len(), "bridge validation failed");
    Err(ScrolltideError::Integrity(BridgeErrors { errors }))
}

#[cfg(test)]
#[path = "../../tests/unit/content/bridges.rs"]
mod tests;
