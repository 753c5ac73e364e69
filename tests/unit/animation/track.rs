use super::*;
use crate::animation::ease::Ease;
use crate::animation::segment::SegmentKind;
use crate::foundation::core::{ChapterId, TextNum};

fn text() -> Target {
    Target::Text {
        chapter: ChapterId(1),
        text: TextNum(1),
    }
}

fn seg(kind: SegmentKind, from: f64, to: f64, start: f64, duration: f64) -> Segment {
    Segment {
        target: text(),
        property: Property::Opacity,
        kind,
        from,
        to,
        start,
        duration,
        ease: Ease::Linear,
    }
}

#[test]
fn empty_track_has_no_value() {
    let t = Track::new(text(), Property::Opacity);
    assert_eq!(t.sample(0.5), None);
}

#[test]
fn appear_then_fade_lifecycle() {
    let mut t = Track::new(text(), Property::Opacity);
    // Pushed out of order on purpose.
    t.push(seg(SegmentKind::Fade, 1.0, 0.0, 0.6, 0.1));
    t.push(seg(SegmentKind::Appear, 0.0, 1.0, 0.1, 0.1));

    assert_eq!(t.segments()[0].kind, SegmentKind::Appear);
    assert_eq!(t.sample(0.0), Some(0.0));
    assert!((t.sample(0.15).unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(t.sample(0.4), Some(1.0));
    assert!((t.sample(0.65).unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(t.sample(1.0), Some(0.0));
}

#[test]
fn backward_seek_matches_forward_seek() {
    let mut t = Track::new(text(), Property::Opacity);
    t.push(seg(SegmentKind::Appear, 0.0, 1.0, 0.1, 0.1));
    t.push(seg(SegmentKind::Fade, 1.0, 0.0, 0.6, 0.1));

    let forward: Vec<_> = (0..=100).map(|i| t.sample(i as f64 / 100.0)).collect();
    let backward: Vec<_> = (0..=100)
        .rev()
        .map(|i| t.sample(i as f64 / 100.0))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    assert_eq!(forward, backward);
}

#[test]
fn equal_starts_keep_insertion_order() {
    let mut t = Track::new(text(), Property::Opacity);
    t.push(seg(SegmentKind::Snap, 0.0, 1.0, 0.3, 0.0));
    t.push(seg(SegmentKind::Fade, 1.0, 0.0, 0.3, 0.2));
    assert_eq!(t.segments()[1].kind, SegmentKind::Fade);
    assert!((t.sample(0.4).unwrap() - 0.5).abs() < 1e-12);
}
