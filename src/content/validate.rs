use std::collections::HashSet;
use std::fmt;

use crate::content::model::{Chapter, Content, LayerCue};
use crate::foundation::config::MAX_SPAN_MS;
use crate::foundation::core::{ChapterId, TextNum};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct ContentError {
    pub(crate) path: Vec<PathElem>,
    pub(crate) message: String,
}

impl ContentError {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct ContentErrors {
    pub(crate) errors: Vec<ContentError>,
}

impl fmt::Display for ContentErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContentErrors {}

pub(crate) fn validate_content(content: &Content) -> Result<(), ContentErrors> {
    let mut errors = Vec::new();

    if content.chapters.is_empty() {
        errors.push(ContentError::at(
            &[PathElem::Field("chapters")],
            "content must declare at least one chapter",
        ));
    }

    for (i, chapter) in content.chapters.iter().enumerate() {
        let mut path = vec![PathElem::Field("chapters"), PathElem::Index(i)];
        let expected = ChapterId(u32::try_from(i + 1).unwrap_or(u32::MAX));
        if chapter.id != expected {
            let mut p = path.clone();
            p.push(PathElem::Field("id"));
            errors.push(ContentError::at(
                &p,
                format!(
                    "chapter ids must be dense from 1 (expected {expected}, got {})",
                    chapter.id
                ),
            ));
        }
        validate_chapter(chapter, &mut path, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ContentErrors { errors })
    }
}

fn validate_chapter(chapter: &Chapter, path: &mut Vec<PathElem>, errors: &mut Vec<ContentError>) {
    let mut nums = HashSet::<TextNum>::new();
    path.push(PathElem::Field("textBlocks"));
    for (i, block) in chapter.text_blocks.iter().enumerate() {
        path.push(PathElem::Index(i));
        if !nums.insert(block.num) {
            errors.push(ContentError::at(
                path,
                format!("duplicate text block number {}", block.num),
            ));
        }
        if let Some(ms) = block.visible_duration_ms
            && ms > MAX_SPAN_MS
        {
            path.push(PathElem::Field("visibleDurationMs"));
            errors.push(ContentError::at(path, span_message(ms)));
            path.pop();
        }
        if let Some(d) = block.drift_px
            && !d.is_finite()
        {
            errors.push(ContentError::at(path, "driftPx must be finite"));
        }
        for (field, r) in [
            ("bridgesTo", block.bridges_to),
            ("bridgesFrom", block.bridges_from),
        ] {
            if r.is_some_and(|r| r.chapter == chapter.id) {
                path.push(PathElem::Field(field));
                errors.push(ContentError::at(
                    path,
                    "a bridge must connect two different chapters",
                ));
                path.pop();
            }
        }
        if block.effect.as_ref().is_some_and(|e| e.name.trim().is_empty()) {
            path.push(PathElem::Field("effect"));
            errors.push(ContentError::at(path, "effect name must be non-empty"));
            path.pop();
        }
        path.pop();
    }
    path.pop();

    let layers: HashSet<&str> = chapter.layers.iter().map(String::as_str).collect();

    path.push(PathElem::Field("opening"));
    validate_cues(&chapter.opening, &layers, path, errors);
    path.pop();

    let mut frame_ids = HashSet::<&str>::new();
    let mut sequenced = HashSet::<TextNum>::new();
    path.push(PathElem::Field("frames"));
    for (i, frame) in chapter.frames.iter().enumerate() {
        path.push(PathElem::Index(i));
        if !frame_ids.insert(frame.id.as_str()) {
            errors.push(ContentError::at(
                path,
                format!("duplicate frame id '{}'", frame.id),
            ));
        }
        for (j, num) in frame.texts.iter().enumerate() {
            path.push(PathElem::Field("texts"));
            path.push(PathElem::Index(j));
            if !nums.contains(num) {
                errors.push(ContentError::at(
                    path,
                    format!("frame references missing text block {num}"),
                ));
            } else if !sequenced.insert(*num) {
                errors.push(ContentError::at(
                    path,
                    format!("text block {num} is sequenced more than once"),
                ));
            }
            path.pop();
            path.pop();
        }
        if let Some(ms) = frame.hold_after
            && ms > MAX_SPAN_MS
        {
            path.push(PathElem::Field("holdAfter"));
            errors.push(ContentError::at(path, span_message(ms)));
            path.pop();
        }
        if !frame.cues.is_empty() && frame.layer_transition.is_none() {
            errors.push(ContentError::at(
                path,
                "frame cues require a layerTransition to run in",
            ));
        }
        path.push(PathElem::Field("cues"));
        validate_cues(&frame.cues, &layers, path, errors);
        path.pop();
        path.pop();
    }
    path.pop();
}

fn span_message(ms: u64) -> String {
    format!("duration must be <= {MAX_SPAN_MS} ms (got {ms})")
}

fn validate_cues(
    cues: &[LayerCue],
    layers: &HashSet<&str>,
    path: &mut Vec<PathElem>,
    errors: &mut Vec<ContentError>,
) {
    for (i, cue) in cues.iter().enumerate() {
        path.push(PathElem::Index(i));
        for layer in cue.layers() {
            if !layers.contains(layer) {
                errors.push(ContentError::at(
                    path,
                    format!("cue references undeclared layer '{layer}'"),
                ));
            }
        }
        if let LayerCue::Zoom { scale, .. } = cue
            && !(scale.is_finite() && *scale > 0.0)
        {
            errors.push(ContentError::at(path, "zoom scale must be finite and > 0"));
        }
        path.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/validate.rs"]
mod tests;
