use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ScrolltideError, ScrolltideResult};

/// Brand duration tokens used for chapter and layer transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationToken {
    /// Fast micro-interaction.
    MicroFast,
    /// Normal micro-interaction; also the text fade-out length.
    Micro,
    /// Content/section transition; also the text appear length and breath pause.
    Section,
    /// Held breath moment.
    SectionHeld,
    /// Signature moment.
    Signature,
}

/// Longest single span (ms) a timing constant or a content override may declare: one day.
pub const MAX_SPAN_MS: u64 = 86_400_000;

/// Timing constants shared by the duration model and every timeline builder.
///
/// There is exactly one instance per [`crate::Engine`]; region derivation and schedule
/// construction both read from it, so they cannot drift apart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingConfig {
    /// `microFast` token (ms).
    pub micro_fast_ms: u64,
    /// `micro` token (ms).
    pub micro_ms: u64,
    /// `section` token (ms).
    pub section_ms: u64,
    /// `sectionHeld` token (ms).
    pub section_held_ms: u64,
    /// `signature` token (ms).
    pub signature_ms: u64,

    /// Minimum visibility of any text block (ms).
    pub reading_base_ms: u64,
    /// Additional visibility per word (ms).
    pub reading_ms_per_word: u64,
    /// How far a subsequent text starts before the running cursor (ms).
    pub text_overlap_ms: u64,
    /// Per-character delay of signature reveals (ms).
    pub per_char_stagger_ms: u64,

    /// Vertical distance texts rise from while appearing (px).
    pub entry_offset_px: f64,
    /// Upward drift distance while a fragment is visible (px).
    pub drift_px: f64,
    /// Upward drift after a signature reveal (px).
    pub beat_drift_px: f64,
    /// Horizontal jitter amplitude on impact crossfades (px).
    pub jitter_px: f64,
    /// Length of each half of the jitter back-and-forth (ms).
    pub jitter_half_ms: u64,

    /// Scroll-length multiplier; higher means more scrolling for the same content.
    pub scroll_multiplier: f64,
    /// Baseline viewport heights of scroll per second of content.
    pub base_vh_per_second: f64,
    /// Comfortable reading scroll speed (px/s).
    pub comfortable_scroll_px_per_s: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            micro_fast_ms: 140,
            micro_ms: 230,
            section_ms: 550,
            section_held_ms: 825,
            signature_ms: 1050,
            reading_base_ms: 1000,
            reading_ms_per_word: 200,
            text_overlap_ms: 800,
            per_char_stagger_ms: 40,
            entry_offset_px: 20.0,
            drift_px: 20.0,
            beat_drift_px: 10.0,
            jitter_px: 3.0,
            jitter_half_ms: 50,
            scroll_multiplier: 4.0,
            base_vh_per_second: 700.0 / 90.0,
            comfortable_scroll_px_per_s: 65.0,
        }
    }
}

impl TimingConfig {
    /// Parse a timing configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrolltideResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrolltideError::serde(format!("parse timing config JSON: {e}")))
    }

    /// Parse a timing configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrolltideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrolltideError::configuration(format!(
                "open timing config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Duration of a brand token (ms).
    pub fn token_ms(&self, token: DurationToken) -> u64 {
        match token {
            DurationToken::MicroFast => self.micro_fast_ms,
            DurationToken::Micro => self.micro_ms,
            DurationToken::Section => self.section_ms,
            DurationToken::SectionHeld => self.section_held_ms,
            DurationToken::Signature => self.signature_ms,
        }
    }

    /// Text appear length (ms).
    pub fn appear_ms(&self) -> u64 {
        self.section_ms
    }

    /// Text fade-out length (ms).
    pub fn fade_ms(&self) -> u64 {
        self.micro_ms
    }

    /// Held-breath pause around signature reveals (ms).
    pub fn held_breath_ms(&self) -> u64 {
        self.section_held_ms
    }

    /// Pause after the transition-in and before the transition-out of a chapter (ms).
    pub fn breath_ms(&self) -> u64 {
        self.section_ms
    }

    /// Pause between consecutive frames of a chapter (ms).
    pub fn inter_frame_pause_ms(&self) -> u64 {
        self.section_ms
    }

    /// Reject configurations that would produce degenerate schedules.
    pub fn validate(&self) -> ScrolltideResult<()> {
        if self.section_ms == 0 {
            return Err(ScrolltideError::configuration(
                "sectionMs must be > 0 (text appear length)",
            ));
        }
        if self.signature_ms == 0 {
            return Err(ScrolltideError::configuration("signatureMs must be > 0"));
        }
        for (name, v) in [
            ("microFastMs", self.micro_fast_ms),
            ("microMs", self.micro_ms),
            ("sectionMs", self.section_ms),
            ("sectionHeldMs", self.section_held_ms),
            ("signatureMs", self.signature_ms),
            ("readingBaseMs", self.reading_base_ms),
            ("readingMsPerWord", self.reading_ms_per_word),
            ("textOverlapMs", self.text_overlap_ms),
            ("perCharStaggerMs", self.per_char_stagger_ms),
            ("jitterHalfMs", self.jitter_half_ms),
        ] {
            if v > MAX_SPAN_MS {
                return Err(ScrolltideError::configuration(format!(
                    "{name} must be <= {MAX_SPAN_MS} (got {v})"
                )));
            }
        }
        for (name, v) in [
            ("entryOffsetPx", self.entry_offset_px),
            ("driftPx", self.drift_px),
            ("beatDriftPx", self.beat_drift_px),
            ("jitterPx", self.jitter_px),
        ] {
            if !v.is_finite() {
                return Err(ScrolltideError::configuration(format!(
                    "{name} must be finite"
                )));
            }
        }
        for (name, v) in [
            ("scrollMultiplier", self.scroll_multiplier),
            ("baseVhPerSecond", self.base_vh_per_second),
            ("comfortableScrollPxPerS", self.comfortable_scroll_px_per_s),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ScrolltideError::configuration(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
