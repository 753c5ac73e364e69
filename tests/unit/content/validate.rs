use super::*;
use crate::content::dsl::{
    ChapterBuilder, FrameBuilder, crossfade, fragment,
};
use crate::content::model::LayerCue;
use crate::foundation::config::DurationToken;

fn chapter(id: u32) -> Chapter {
    ChapterBuilder::new(id)
        .layer("bg")
        .frame(FrameBuilder::new(format!("{id}A")).texts([1]).build())
        .text(fragment(1, "Some words."))
        .unwrap()
        .build()
}

fn messages(content: &Content) -> Vec<String> {
    match validate_content(content) {
        Ok(()) => Vec::new(),
        Err(e) => e.errors.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn well_formed_content_passes() {
    let content = Content {
        chapters: vec![chapter(1), chapter(2)],
    };
    assert!(messages(&content).is_empty());
}

#[test]
fn empty_content_is_rejected() {
    let content = Content { chapters: vec![] };
    assert_eq!(
        messages(&content),
        vec!["$.chapters: content must declare at least one chapter".to_owned()]
    );
}

#[test]
fn ids_must_be_dense() {
    let content = Content {
        chapters: vec![chapter(1), chapter(3)],
    };
    let msgs = messages(&content);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].starts_with("$.chapters[1].id:"));
}

#[test]
fn dangling_frame_reference_has_a_path() {
    let mut ch = chapter(1);
    ch.frames[0].texts.push(TextNum(9));
    let content = Content { chapters: vec![ch] };
    assert_eq!(
        messages(&content),
        vec!["$.chapters[0].frames[0].texts[1]: frame references missing text block 9".to_owned()]
    );
}

#[test]
fn every_problem_is_reported_in_one_pass() {
    let mut ch = chapter(1);
    ch.text_blocks.push(fragment(1, "dup"));
    ch.frames[0].cues.push(crossfade("bg", "nowhere"));
    ch.frames.push(FrameBuilder::new("1A").texts([1]).build());
    let content = Content { chapters: vec![ch] };
    let msgs = messages(&content);
    // duplicate block, cue without transition, undeclared layer,
    // duplicate frame id, text sequenced twice
    assert_eq!(msgs.len(), 5, "{msgs:#?}");
}

#[test]
fn cues_need_a_transition_window() {
    let mut ch = chapter(1);
    ch.frames[0].cues.push(LayerCue::Reveal {
        layer: "bg".to_owned(),
    });
    let content = Content {
        chapters: vec![ch.clone()],
    };
    assert_eq!(messages(&content).len(), 1);

    ch.frames[0].layer_transition = Some(DurationToken::Section);
    let content = Content { chapters: vec![ch] };
    assert!(messages(&content).is_empty());
}

#[test]
fn zoom_scale_must_be_positive() {
    let mut ch = chapter(1);
    ch.opening.push(LayerCue::Zoom {
        layer: "bg".to_owned(),
        scale: 0.0,
    });
    let content = Content { chapters: vec![ch] };
    assert_eq!(
        messages(&content),
        vec!["$.chapters[0].opening[0]: zoom scale must be finite and > 0".to_owned()]
    );
}

#[test]
fn self_bridges_are_rejected() {
    let mut ch = chapter(1);
    ch.text_blocks[0] = fragment(1, "Some words.").bridges_to(1, 1);
    let content = Content { chapters: vec![ch] };
    assert_eq!(
        messages(&content),
        vec![
            "$.chapters[0].textBlocks[0].bridgesTo: a bridge must connect two different chapters"
                .to_owned()
        ]
    );
}

#[test]
fn oversized_spans_are_rejected() {
    let mut ch = chapter(1);
    ch.text_blocks[0].visible_duration_ms = Some(18_446_744_073_709_551_000);
    ch.frames[0].hold_after = Some(u64::MAX / 2);
    let content = Content { chapters: vec![ch] };
    assert_eq!(
        messages(&content),
        vec![
            "$.chapters[0].textBlocks[0].visibleDurationMs: duration must be <= 86400000 ms \
             (got 18446744073709551000)"
                .to_owned(),
            format!(
                "$.chapters[0].frames[0].holdAfter: duration must be <= 86400000 ms (got {})",
                u64::MAX / 2
            ),
        ]
    );

    let mut ch = chapter(1);
    ch.text_blocks[0].visible_duration_ms = Some(MAX_SPAN_MS);
    ch.frames[0].hold_after = Some(MAX_SPAN_MS);
    assert!(messages(&Content { chapters: vec![ch] }).is_empty());
}
