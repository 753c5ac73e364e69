use approx::assert_relative_eq;
use proptest::prelude::*;

use super::*;

fn durations(ms: &[u64]) -> BTreeMap<ChapterId, u64> {
    ms.iter()
        .enumerate()
        .map(|(i, &d)| (ChapterId(i as u32 + 1), d))
        .collect()
}

#[test]
fn regions_are_proportional() {
    let r = derive_scroll_regions(&durations(&[1000, 3000])).unwrap();
    let a = r.get(ChapterId(1)).unwrap();
    let b = r.get(ChapterId(2)).unwrap();
    assert_relative_eq!(a.start, 0.0);
    assert_relative_eq!(a.end, 0.25);
    assert_eq!(a.end, b.start);
    assert_eq!(b.end, 1.0);
}

#[test]
fn zero_total_is_a_configuration_error() {
    assert!(matches!(
        derive_scroll_regions(&durations(&[])),
        Err(ScrolltideError::Configuration(_))
    ));
    assert!(matches!(
        derive_scroll_regions(&durations(&[0, 0])),
        Err(ScrolltideError::Configuration(_))
    ));
}

#[test]
fn overflowing_total_is_a_configuration_error() {
    let half = u64::MAX / 2 + 1;
    let err = derive_scroll_regions(&durations(&[half, half])).unwrap_err();
    assert!(matches!(err, ScrolltideError::Configuration(_)));
}

#[test]
fn chapter_lookup_and_local_progress() {
    let r = derive_scroll_regions(&durations(&[1000, 1000, 2000])).unwrap();
    assert_eq!(r.chapter_at(0.0), Some(ChapterId(1)));
    assert_eq!(r.chapter_at(0.25), Some(ChapterId(2)));
    assert_eq!(r.chapter_at(0.75), Some(ChapterId(3)));
    assert_eq!(r.chapter_at(1.0), Some(ChapterId(3)));
    assert_eq!(r.chapter_at(7.0), Some(ChapterId(3)));
    assert_eq!(r.chapter_at(-1.0), Some(ChapterId(1)));
    assert_eq!(r.chapter_at(f64::NAN), None);

    assert_relative_eq!(r.local_progress(0.375, ChapterId(2)).unwrap(), 0.5);
    assert_eq!(r.local_progress(0.9, ChapterId(1)), Some(1.0));
    assert_eq!(r.local_progress(0.1, ChapterId(9)), None);
}

proptest! {
    #[test]
    fn regions_partition_unit_range(ms in prop::collection::vec(1u64..200_000, 1..12)) {
        let r = derive_scroll_regions(&durations(&ms)).unwrap();
        prop_assert_eq!(r.len(), ms.len());

        let mut prev_end = 0.0;
        let mut width = 0.0;
        for (_, region) in r.iter() {
            prop_assert_eq!(region.start, prev_end);
            prop_assert!(region.start <= region.end);
            width += region.width();
            prev_end = region.end;
        }
        prop_assert_eq!(prev_end, 1.0);
        prop_assert!((width - 1.0).abs() < 1e-6);
    }
}
