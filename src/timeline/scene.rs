//! Handles onto whatever presents a chapter (a DOM subtree, a GPU scene, a test double).
//!
//! Builders only ask whether a target exists; missing targets are skipped with a warning so the
//! remaining choreography keeps its timing.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    content::model::{Chapter, Content},
    foundation::core::{ChapterId, TextNum},
};

/// One chapter's presentation scene.
pub trait SceneHandle {
    /// `true` when the scene exposes a layer with this name.
    fn has_layer(&self, layer: &str) -> bool;
    /// `true` when the scene exposes the text block with this number.
    fn has_text(&self, text: TextNum) -> bool;
}

/// The whole presentation: one scene per chapter.
pub trait StageHandle {
    /// Scene of a chapter, if it is mounted.
    fn scene(&self, chapter: ChapterId) -> Option<&dyn SceneHandle>;
}

/// In-memory scene listing its layers and text blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticScene {
    layers: BTreeSet<String>,
    texts: BTreeSet<TextNum>,
}

impl StaticScene {
    /// Scene exposing exactly what the chapter declares.
    pub fn from_chapter(chapter: &Chapter) -> Self {
        Self {
            layers: chapter.layers.iter().cloned().collect(),
            texts: chapter.text_blocks.iter().map(|t| t.num).collect(),
        }
    }

    /// Drop a layer, simulating a scene that failed to mount it.
    pub fn without_layer(mut self, layer: &str) -> Self {
        self.layers.remove(layer);
        self
    }

    /// Drop a text block.
    pub fn without_text(mut self, text: TextNum) -> Self {
        self.texts.remove(&text);
        self
    }
}

impl SceneHandle for StaticScene {
    fn has_layer(&self, layer: &str) -> bool {
        self.layers.contains(layer)
    }

    fn has_text(&self, text: TextNum) -> bool {
        self.texts.contains(&text)
    }
}

/// In-memory stage holding a [`StaticScene`] per chapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticStage {
    scenes: BTreeMap<ChapterId, StaticScene>,
}

impl StaticStage {
    /// Stage with every chapter of `content` fully mounted.
    pub fn from_content(content: &Content) -> Self {
        Self {
            scenes: content
                .chapters
                .iter()
                .map(|c| (c.id, StaticScene::from_chapter(c)))
                .collect(),
        }
    }

    /// Replace one chapter's scene.
    pub fn with_scene(mut self, chapter: ChapterId, scene: StaticScene) -> Self {
        self.scenes.insert(chapter, scene);
        self
    }

    /// Unmount a chapter.
    pub fn without_chapter(mut self, chapter: ChapterId) -> Self {
        self.scenes.remove(&chapter);
        self
    }
}

impl StageHandle for StaticStage {
    fn scene(&self, chapter: ChapterId) -> Option<&dyn SceneHandle> {
        self.scenes.get(&chapter).map(|s| s as &dyn SceneHandle)
    }
}
