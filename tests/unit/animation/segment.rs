use super::*;

fn fade(start: f64, duration: f64) -> Segment {
    Segment {
        target: Target::Text {
            chapter: ChapterId(1),
            text: TextNum(2),
        },
        property: Property::Opacity,
        kind: SegmentKind::Fade,
        from: 1.0,
        to: 0.0,
        start,
        duration,
        ease: Ease::Linear,
    }
}

#[test]
fn value_outside_window_holds_endpoints() {
    let s = fade(0.2, 0.1);
    assert_eq!(s.value_at(0.0), 1.0);
    assert_eq!(s.value_at(0.3), 0.0);
    assert_eq!(s.value_at(0.9), 0.0);
    assert!((s.value_at(0.25) - 0.5).abs() < 1e-12);
}

#[test]
fn zero_duration_is_a_set() {
    let s = fade(0.4, 0.0);
    assert_eq!(s.value_at(0.39), 1.0);
    assert_eq!(s.value_at(0.4), 0.0);
}

#[test]
fn validate_rejects_nan_and_negative() {
    assert!(fade(f64::NAN, 0.1).validate().is_err());
    assert!(fade(0.1, -0.1).validate().is_err());
    assert!(fade(0.1, 0.1).validate().is_ok());
}

#[test]
fn targets_display_and_serialize() {
    let t = Target::Glyph {
        chapter: ChapterId(4),
        text: TextNum(2),
        index: 5,
    };
    assert_eq!(t.to_string(), "ch4/text:2/char:5");
    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["type"], "glyph");
    assert_eq!(json["index"], 5);
}
