//! Duration model: how long text stays on screen, and how long frames and chapters last.
//!
//! Every figure here is in milliseconds and derived only from text content plus
//! [`TimingConfig`]. The timeline builder walks the same rules with its own cursor, and the engine
//! checks that both arrive at the same chapter length.
//!
//! Arithmetic saturates: validated content and timing keep every span far below `u64::MAX`, and
//! unvalidated input yields a saturated length instead of a panic.

use crate::{
    content::model::{Chapter, Frame, TextBlock},
    foundation::config::TimingConfig,
};

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time: a fixed base plus a per-word allowance.
pub fn reading_time_ms(text: &str, timing: &TimingConfig) -> u64 {
    let words = u64::try_from(word_count(text)).unwrap_or(u64::MAX);
    timing
        .reading_base_ms
        .saturating_add(words.saturating_mul(timing.reading_ms_per_word))
}

/// Length of a character-staggered signature reveal.
pub fn signature_reveal_ms(text: &str, timing: &TimingConfig) -> u64 {
    let chars = u64::try_from(text.chars().count()).unwrap_or(u64::MAX);
    timing
        .signature_ms
        .saturating_add(chars.saturating_mul(timing.per_char_stagger_ms))
}

/// Visible (post-appear, pre-fade) time of a block: the explicit override, or its reading time.
pub fn visible_ms(block: &TextBlock, timing: &TimingConfig) -> u64 {
    block
        .visible_duration_ms
        .unwrap_or_else(|| reading_time_ms(&block.content, timing))
}

/// Appear + visible + fade. Outbound bridges have no fade; the block lives on in the next chapter.
pub fn fragment_lifecycle_ms(block: &TextBlock, timing: &TimingConfig) -> u64 {
    let fade = if block.bridges_to.is_some() {
        0
    } else {
        timing.fade_ms()
    };
    timing
        .appear_ms()
        .saturating_add(visible_ms(block, timing))
        .saturating_add(fade)
}

/// Cursor advance of a beat or consent block: held breath, reveal, held breath.
pub fn signature_slot_ms(block: &TextBlock, timing: &TimingConfig) -> u64 {
    timing
        .held_breath_ms()
        .saturating_mul(2)
        .saturating_add(signature_reveal_ms(&block.content, timing))
}

/// Start of a fragment in the sequential-with-overlap fold.
///
/// The first fragment of a frame starts at the cursor. Later ones pull back by the overlap,
/// which is clamped so a start never goes negative and the cursor never moves backwards.
pub(crate) fn fragment_start_ms(
    cursor: u64,
    lifecycle: u64,
    first: bool,
    timing: &TimingConfig,
) -> u64 {
    if first {
        return cursor;
    }
    let overlap = timing.text_overlap_ms.min(lifecycle).min(cursor);
    cursor - overlap
}

/// Time taken by a frame's text sequence alone (no closing transition, no hold).
pub fn frame_text_ms(chapter: &Chapter, frame: &Frame, timing: &TimingConfig) -> u64 {
    let mut cursor = 0u64;
    let mut first = true;
    for block in frame.texts.iter().filter_map(|&n| chapter.text(n)) {
        if block.kind.is_signature() {
            cursor = cursor.saturating_add(signature_slot_ms(block, timing));
        } else {
            let len = fragment_lifecycle_ms(block, timing);
            cursor = fragment_start_ms(cursor, len, first, timing).saturating_add(len);
            first = false;
        }
    }
    cursor
}

/// Full frame length: text sequence, closing layer transition and hold.
pub fn frame_duration_ms(chapter: &Chapter, frame: &Frame, timing: &TimingConfig) -> u64 {
    let transition = frame
        .layer_transition
        .map_or(0, |t| timing.token_ms(t));
    frame_text_ms(chapter, frame, timing)
        .saturating_add(transition)
        .saturating_add(frame.hold_after.unwrap_or(0))
}

/// Chapter length: transition in, breath, frames separated by pauses, breath, transition out.
#[tracing::instrument(skip_all, fields(chapter = %chapter.id))]
pub fn chapter_duration_ms(chapter: &Chapter, timing: &TimingConfig) -> u64 {
    let frames = chapter
        .frames
        .iter()
        .map(|f| frame_duration_ms(chapter, f, timing))
        .fold(0u64, u64::saturating_add);
    let gaps = u64::try_from(chapter.frames.len().saturating_sub(1)).unwrap_or(u64::MAX);
    let pauses = gaps.saturating_mul(timing.inter_frame_pause_ms());
    let total = [
        timing.token_ms(chapter.transition_in),
        timing.breath_ms(),
        frames,
        pauses,
        timing.breath_ms(),
        timing.token_ms(chapter.transition_out),
    ]
    .into_iter()
    .fold(0u64, u64::saturating_add);
    tracing::debug!(total_ms = total, frames = chapter.frames.len(), "chapter duration");
    total
}

#[cfg(test)]
#[path = "../../tests/unit/duration/model.rs"]
mod tests;
