use super::*;
use crate::content::dsl::{ChapterBuilder, FrameBuilder, anchor, fragment};
use crate::content::model::TextBlock;

const SHARED: &str = "When the mirror slipped its wire, the silence struck.";

fn two_chapters(source: TextBlock, target: TextBlock) -> Content {
    Content {
        chapters: vec![
            ChapterBuilder::new(1)
                .frame(FrameBuilder::new("1A").texts([1, 2]).build())
                .text(fragment(1, "Before the cut."))
                .unwrap()
                .text(source)
                .unwrap()
                .build(),
            ChapterBuilder::new(2)
                .frame(FrameBuilder::new("2A").texts([1]).build())
                .text(target)
                .unwrap()
                .build(),
        ],
    }
}

fn valid_pair() -> (TextBlock, TextBlock) {
    (
        fragment(2, SHARED)
            .at(anchor("40%", "0"))
            .bridges_to(2, 1),
        fragment(1, SHARED)
            .at(anchor("40%", "0"))
            .bridges_from(1, 2),
    )
}

#[test]
fn reciprocal_bridge_is_valid() {
    let (s, t) = valid_pair();
    let content = two_chapters(s, t);
    assert!(validate_bridges(&content).is_empty());
    assert_bridges_valid(&content).unwrap();
}

#[test]
fn content_change_yields_exactly_one_error() {
    let (s, mut t) = valid_pair();
    t.content.push('!');
    let errors = validate_bridges(&two_chapters(s, t));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, BridgeErrorKind::ContentMismatch);
    assert_eq!(
        (errors[0].source_chapter, errors[0].source_text),
        (ChapterId(1), TextNum(2))
    );
    assert_eq!(
        (errors[0].target_chapter, errors[0].target_text),
        (ChapterId(2), TextNum(1))
    );
}

#[test]
fn position_change_yields_exactly_one_error() {
    let (s, t) = valid_pair();
    let t = t.at(anchor("41%", "0"));
    let errors = validate_bridges(&two_chapters(s, t));
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].kind,
        BridgeErrorKind::PositionMismatch { .. }
    ));
    assert!(errors[0].to_string().contains("41%"));
}

#[test]
fn missing_back_reference() {
    let (s, mut t) = valid_pair();
    t.bridges_from = None;
    let errors = validate_bridges(&two_chapters(s, t));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, BridgeErrorKind::MissingBackReference);
}

#[test]
fn wrong_back_reference_is_reported_on_both_sides() {
    let (s, t) = valid_pair();
    let t = t.bridges_from(1, 1);
    let errors = validate_bridges(&two_chapters(s, t));
    let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            BridgeErrorKind::MissingBackReference,
            BridgeErrorKind::DanglingInbound
        ]
    );
}

#[test]
fn missing_targets() {
    let (s, t) = valid_pair();
    let errors = validate_bridges(&two_chapters(s.clone().bridges_to(7, 1), t.clone()));
    assert!(
        errors
            .iter()
            .any(|e| e.kind == BridgeErrorKind::TargetChapterMissing)
    );

    let errors = validate_bridges(&two_chapters(s.bridges_to(2, 9), t));
    assert!(
        errors
            .iter()
            .any(|e| e.kind == BridgeErrorKind::TargetTextMissing)
    );
}

#[test]
fn assert_collects_all_errors() {
    let (mut s, mut t) = valid_pair();
    s.content = "changed".to_owned();
    t.position = None;
    let err = assert_bridges_valid(&two_chapters(s, t)).unwrap_err();
    let ScrolltideError::Integrity(list) = err else {
        panic!("expected integrity error");
    };
    assert_eq!(list.errors.len(), 2);
}
