//! Grouped request collection for mixed glyph/image atlases.
//!
//! Callers register named images and per-font glyph sets with their already
//! measured bitmap sizes, then `build` packs everything in one run and returns
//! a lookup with pixel and UV boxes per entry.

use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::{PageGeometry, RectRequest};
use crate::pipeline::pack;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one entry of a grouped atlas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AtlasKey {
    Image(String),
    Glyph { font: String, codepoint: u32 },
}

impl fmt::Display for AtlasKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasKey::Image(name) => write!(f, "image:{name}"),
            AtlasKey::Glyph { font, codepoint } => write!(f, "glyph:{font}:U+{codepoint:04X}"),
        }
    }
}

/// Location of one entry inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasEntry {
    pub page: usize,
    /// Pixel box `[x0, y0, x1, y1]`, end-exclusive.
    pub bbox: [u32; 4],
    /// `bbox` divided by the page size.
    pub uv: [f32; 4],
    pub size: (u32, u32),
}

/// Collects images and glyph sets, then packs them together.
#[derive(Debug, Clone)]
pub struct AtlasBuilder {
    cfg: PackerConfig,
    requests: Vec<RectRequest<AtlasKey>>,
    blank: Vec<AtlasKey>,
}

impl AtlasBuilder {
    pub fn new(cfg: PackerConfig) -> Self {
        Self {
            cfg,
            requests: Vec::new(),
            blank: Vec::new(),
        }
    }

    /// Adds a named image of `width x height` pixels.
    pub fn image(&mut self, name: impl Into<String>, width: u32, height: u32) -> &mut Self {
        self.push(AtlasKey::Image(name.into()), width, height, None);
        self
    }

    /// Adds a named image with its own padding instead of the configured default.
    pub fn image_padded(
        &mut self,
        name: impl Into<String>,
        width: u32,
        height: u32,
        padding: u32,
    ) -> &mut Self {
        self.push(AtlasKey::Image(name.into()), width, height, Some(padding));
        self
    }

    /// Adds the glyphs of one font as `(codepoint, width, height)` bitmap sizes.
    ///
    /// Glyphs without ink (zero width or height, e.g. a space) take no atlas
    /// space and are reported through `AtlasLayout::is_blank`.
    pub fn glyphs<I>(&mut self, font: impl Into<String>, glyphs: I) -> &mut Self
    where
        I: IntoIterator<Item = (u32, u32, u32)>,
    {
        let font = font.into();
        for (codepoint, w, h) in glyphs {
            let key = AtlasKey::Glyph {
                font: font.clone(),
                codepoint,
            };
            self.push(key, w, h, None);
        }
        self
    }

    fn push(&mut self, key: AtlasKey, width: u32, height: u32, padding: Option<u32>) {
        if matches!(key, AtlasKey::Glyph { .. }) && (width == 0 || height == 0) {
            self.blank.push(key);
            return;
        }
        self.requests.push(RectRequest {
            id: key,
            width,
            height,
            padding,
        });
    }

    /// Number of entries that will occupy atlas space.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Packs everything registered so far.
    pub fn build(&self) -> Result<AtlasLayout> {
        let out = pack(self.requests.clone(), &self.cfg)?;
        let mut entries = BTreeMap::new();
        for p in out.placements.iter() {
            let page = &out.pages[p.page];
            let r = p.rect();
            let entry = AtlasEntry {
                page: p.page,
                bbox: [r.x, r.y, r.right_ex(), r.bottom_ex()],
                uv: p.uv_box(page),
                size: (p.width, p.height),
            };
            entries.insert(p.id.clone(), entry);
        }
        Ok(AtlasLayout {
            pages: out.pages,
            entries,
            blank: self.blank.clone(),
        })
    }
}

/// Packed grouped atlas.
#[derive(Debug, Clone)]
pub struct AtlasLayout {
    pub pages: Vec<PageGeometry>,
    entries: BTreeMap<AtlasKey, AtlasEntry>,
    blank: Vec<AtlasKey>,
}

impl AtlasLayout {
    pub fn get(&self, key: &AtlasKey) -> Option<&AtlasEntry> {
        self.entries.get(key)
    }

    pub fn image(&self, name: &str) -> Option<&AtlasEntry> {
        self.entries.get(&AtlasKey::Image(name.to_string()))
    }

    pub fn glyph(&self, font: &str, codepoint: u32) -> Option<&AtlasEntry> {
        self.entries.get(&AtlasKey::Glyph {
            font: font.to_string(),
            codepoint,
        })
    }

    /// True for glyphs registered with a zero-sized bitmap.
    pub fn is_blank(&self, font: &str, codepoint: u32) -> bool {
        self.blank.iter().any(|k| match k {
            AtlasKey::Glyph { font: f, codepoint: c } => f == font && *c == codepoint,
            AtlasKey::Image(_) => false,
        })
    }

    /// Entries in key order (images first, then glyphs by font and codepoint).
    pub fn entries(&self) -> impl Iterator<Item = (&AtlasKey, &AtlasEntry)> {
        self.entries.iter()
    }

    /// Glyph entries of one font in codepoint order.
    pub fn font_glyphs<'a>(
        &'a self,
        font: &'a str,
    ) -> impl Iterator<Item = (u32, &'a AtlasEntry)> {
        self.entries.iter().filter_map(move |(k, e)| match k {
            AtlasKey::Glyph { font: f, codepoint } if f == font => Some((*codepoint, e)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
