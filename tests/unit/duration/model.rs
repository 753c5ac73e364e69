use proptest::prelude::*;

use super::*;
use crate::content::dsl::{ChapterBuilder, FrameBuilder, beat, fragment};
use crate::foundation::config::DurationToken;
use crate::foundation::core::TextNum;

const BEAT: &str = "Let them look. Let the city breathe again.";

fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

fn scenario(beat_text: &str) -> Chapter {
    let counts = [10, 15, 8, 20, 5, 6, 12, 9];
    let mut b = ChapterBuilder::new(1)
        .frame(FrameBuilder::new("1A").texts([1, 2, 3]).build())
        .frame(FrameBuilder::new("1B").texts([4, 5, 6]).build())
        .frame(FrameBuilder::new("1C").texts([7, 8, 9]).build());
    for (i, n) in counts.iter().enumerate() {
        b = b.text(fragment(i as u32 + 1, words(*n))).unwrap();
    }
    b.text(beat(9, beat_text)).unwrap().build()
}

#[test]
fn reading_time_uses_base_and_per_word() {
    let t = TimingConfig::default();
    assert_eq!(word_count("  a  b\tc\n"), 3);
    assert_eq!(reading_time_ms("", &t), 1000);
    assert_eq!(reading_time_ms(&words(10), &t), 3000);
}

#[test]
fn signature_reveal_counts_chars() {
    let t = TimingConfig::default();
    assert_eq!(BEAT.chars().count(), 42);
    assert_eq!(signature_reveal_ms(BEAT, &t), 1050 + 40 * 42);
    assert_eq!(signature_reveal_ms("é", &t), 1090);
}

#[test]
fn fragment_lifecycle_variants() {
    let t = TimingConfig::default();
    assert_eq!(fragment_lifecycle_ms(&fragment(1, words(10)), &t), 3780);
    assert_eq!(
        fragment_lifecycle_ms(&fragment(1, words(10)).bridges_to(2, 1), &t),
        3550
    );
    assert_eq!(
        fragment_lifecycle_ms(&fragment(1, words(10)).visible_for(0), &t),
        780
    );
}

#[test]
fn three_frame_scenario_is_deterministic() {
    let t = TimingConfig::default();
    let ch = scenario(BEAT);
    let frames: Vec<u64> = ch
        .frames
        .iter()
        .map(|f| frame_duration_ms(&ch, f, &t))
        .collect();
    assert_eq!(frames, vec![10_340, 9_940, 11_340]);
    assert_eq!(chapter_duration_ms(&ch, &t), 34_920);
    assert_eq!(chapter_duration_ms(&ch, &t), chapter_duration_ms(&ch, &t));
}

#[test]
fn extra_beat_word_adds_stagger_per_char() {
    let t = TimingConfig::default();
    let base = chapter_duration_ms(&scenario(BEAT), &t);
    let longer = format!("{BEAT} Now");
    assert_eq!(chapter_duration_ms(&scenario(&longer), &t), base + 40 * 4);
}

#[test]
fn transition_and_hold_extend_the_frame() {
    let t = TimingConfig::default();
    let ch = ChapterBuilder::new(1)
        .frame(
            FrameBuilder::new("1A")
                .transition(DurationToken::SectionHeld)
                .hold(120)
                .build(),
        )
        .build();
    assert_eq!(frame_duration_ms(&ch, &ch.frames[0], &t), 825 + 120);
    assert_eq!(chapter_duration_ms(&ch, &t), 550 * 4 + 945);
}

#[test]
fn oversized_overlap_is_clamped() {
    let t = TimingConfig {
        text_overlap_ms: 10_000,
        ..TimingConfig::default()
    };
    let ch = ChapterBuilder::new(1)
        .frame(FrameBuilder::new("1A").texts([1, 2, 3]).build())
        .text(fragment(1, ""))
        .unwrap()
        .text(fragment(2, ""))
        .unwrap()
        .text(fragment(3, ""))
        .unwrap()
        .build();
    assert_eq!(frame_text_ms(&ch, &ch.frames[0], &t), 1780);
}

#[test]
fn fragment_after_beat_starts_fresh() {
    let t = TimingConfig::default();
    let ch = ChapterBuilder::new(1)
        .frame(FrameBuilder::new("1A").texts([1, 2]).build())
        .text(beat(1, "Un."))
        .unwrap()
        .text(fragment(2, ""))
        .unwrap()
        .build();
    let slot = 825 + 1050 + 40 * 3 + 825;
    assert_eq!(frame_text_ms(&ch, &ch.frames[0], &t), slot + 1780);
}

#[test]
fn unvalidated_overrides_saturate_instead_of_overflowing() {
    let t = TimingConfig::default();
    let ch = ChapterBuilder::new(1)
        .frame(FrameBuilder::new("1A").texts([1]).hold(u64::MAX / 2).build())
        .frame(FrameBuilder::new("1B").texts([2]).build())
        .text(fragment(1, "w").visible_for(18_446_744_073_709_551_000))
        .unwrap()
        .text(fragment(2, "w"))
        .unwrap()
        .build();
    assert_eq!(fragment_lifecycle_ms(ch.text(TextNum(1)).unwrap(), &t), u64::MAX);
    assert_eq!(frame_duration_ms(&ch, &ch.frames[0], &t), u64::MAX);
    assert_eq!(chapter_duration_ms(&ch, &t), u64::MAX);
}

proptest! {
    #[test]
    fn reading_time_is_monotonic(a in 0usize..200, b in 0usize..200) {
        let t = TimingConfig::default();
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert!(reading_time_ms(&words(lo), &t) <= reading_time_ms(&words(hi), &t));
    }

    #[test]
    fn overlap_fold_matches_closed_form(n in 1usize..8, w in 0usize..40) {
        let t = TimingConfig::default();
        let mut b = ChapterBuilder::new(1)
            .frame(FrameBuilder::new("1A").texts(1..=n as u32).build());
        for i in 1..=n as u32 {
            b = b.text(fragment(i, words(w))).unwrap();
        }
        let ch = b.build();
        let l = 1780 + 200 * w as u64;
        let got = frame_text_ms(&ch, &ch.frames[0], &t);
        prop_assert_eq!(got, l + (n as u64 - 1) * (l - 800));
        prop_assert!(n == 1 || got < n as u64 * l);
    }
}
