use super::*;

#[test]
fn region_new_rejects_bad_bounds() {
    assert!(ScrollRegion::new(0.5, 0.4).is_err());
    assert!(ScrollRegion::new(-0.1, 0.4).is_err());
    assert!(ScrollRegion::new(0.1, 1.1).is_err());
    assert!(ScrollRegion::new(f64::NAN, 0.4).is_err());
    assert!(ScrollRegion::new(0.2, 0.2).is_ok());
}

#[test]
fn region_contains_is_half_open() {
    let r = ScrollRegion::new(0.25, 0.5).unwrap();
    assert!(!r.contains(0.2499));
    assert!(r.contains(0.25));
    assert!(r.contains(0.4999));
    assert!(!r.contains(0.5));
}

#[test]
fn local_progress_clamps() {
    let r = ScrollRegion::new(0.2, 0.6).unwrap();
    assert_eq!(r.local_progress(0.0), 0.0);
    assert!((r.local_progress(0.4) - 0.5).abs() < 1e-12);
    assert_eq!(r.local_progress(0.9), 1.0);

    let empty = ScrollRegion::new(0.3, 0.3).unwrap();
    assert_eq!(empty.local_progress(0.1), 0.0);
    assert_eq!(empty.local_progress(0.3), 1.0);
}

#[test]
fn ids_serialize_as_plain_numbers() {
    let s = serde_json::to_string(&(ChapterId(3), TextNum(7))).unwrap();
    assert_eq!(s, "[3,7]");
    assert_eq!(format!("{}/{}", ChapterId(3), TextNum(7)), "3/7");
}
