use std::collections::HashMap;
use std::collections::hash_map::Entry;

use blake3::Hash;

use crate::frame::{Frame, FrameSpec, RenderedFrame};
use crate::width::WidthOracle;

pub type PanelId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Panel,
    TitleBar,
}

#[derive(Debug, Clone)]
struct CachedFrame {
    hash: Hash,
    frame: RenderedFrame,
}

/// Last rendered frame per panel, re-rendered only when its frame spec or content change.
///
/// Frames are pure functions of their inputs, so a blake3 fingerprint of the
/// spec and content is enough to decide whether a cached frame is still valid.
#[derive(Debug, Default)]
pub struct FrameCache {
    entries: HashMap<PanelId, CachedFrame>,
    hits: u64,
    misses: u64,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached equivalent of [`Frame::render`].
    pub fn render<W: WidthOracle>(
        &mut self,
        id: &str,
        frame: &Frame<W>,
        content: &str,
    ) -> &RenderedFrame {
        let hash = fingerprint(frame.spec(), Layout::Panel, content);
        self.lookup(id, hash, || frame.render(content))
    }

    /// Cached equivalent of [`Frame::render_title`].
    pub fn render_title<W: WidthOracle>(
        &mut self,
        id: &str,
        frame: &Frame<W>,
        info: &str,
    ) -> &RenderedFrame {
        let hash = fingerprint(frame.spec(), Layout::TitleBar, info);
        self.lookup(id, hash, || frame.render_title(info))
    }

    fn lookup(
        &mut self,
        id: &str,
        hash: Hash,
        build: impl FnOnce() -> RenderedFrame,
    ) -> &RenderedFrame {
        match self.entries.entry(id.to_string()) {
            Entry::Occupied(entry) if entry.get().hash == hash => {
                self.hits = self.hits.saturating_add(1);
                &entry.into_mut().frame
            }
            Entry::Occupied(entry) => {
                self.misses = self.misses.saturating_add(1);
                let cached = entry.into_mut();
                *cached = CachedFrame {
                    hash,
                    frame: build(),
                };
                &cached.frame
            }
            Entry::Vacant(entry) => {
                self.misses = self.misses.saturating_add(1);
                &entry
                    .insert(CachedFrame {
                        hash,
                        frame: build(),
                    })
                    .frame
            }
        }
    }

    /// Drop a panel so its next render is rebuilt.
    pub fn invalidate(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Keep only the listed panels.
    pub fn retain(&mut self, live: &[&str]) {
        self.entries.retain(|id, _| live.contains(&id.as_str()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn fingerprint(spec: &FrameSpec, layout: Layout, content: &str) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[layout as u8]);
    hasher.update(&(spec.width as u64).to_le_bytes());
    hash_field(&mut hasher, spec.label().unwrap_or_default());
    hash_field(&mut hasher, spec.style.as_str());
    hash_field(&mut hasher, spec.label_mode.as_str());
    hash_field(
        &mut hasher,
        spec.color.as_ref().map_or("", |accent| accent.sgr()),
    );
    hash_field(&mut hasher, content);
    hasher.finalize()
}

/// Length-prefixed so adjacent fields cannot run into each other.
fn hash_field(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
