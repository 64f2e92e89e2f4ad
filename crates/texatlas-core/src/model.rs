use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`), saturating at `u32::MAX`.
    pub fn right_ex(&self) -> u32 {
        self.x.saturating_add(self.w)
    }
    /// Exclusive bottom edge (`y + h`), saturating at `u32::MAX`.
    pub fn bottom_ex(&self) -> u32 {
        self.y.saturating_add(self.h)
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x
            && r.y >= self.y
            && r.right_ex() <= self.right_ex()
            && r.bottom_ex() <= self.bottom_ex()
    }
    /// Returns true if the interiors of `self` and `r` share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.right_ex()
            || r.x >= self.right_ex()
            || self.y >= r.bottom_ex()
            || r.y >= self.bottom_ex())
    }
}

/// One rectangle to place, as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RectRequest<K = String> {
    /// Caller-supplied identifier; must be unique within one `pack` call.
    pub id: K,
    pub width: u32,
    pub height: u32,
    /// Padding on all four sides. `None` uses `PackerConfig::default_padding`.
    #[serde(default)]
    pub padding: Option<u32>,
}

impl<K> RectRequest<K> {
    pub fn new(id: K, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            padding: None,
        }
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Padding that applies to this request under `default_padding`.
    pub fn effective_padding(&self, default_padding: u32) -> u32 {
        self.padding.unwrap_or(default_padding)
    }

    /// Width and height including padding on both sides, or `None` on overflow.
    pub fn padded_size(&self, default_padding: u32) -> Option<(u32, u32)> {
        let p2 = self.effective_padding(default_padding).checked_mul(2)?;
        Some((self.width.checked_add(p2)?, self.height.checked_add(p2)?))
    }
}

impl<K, S: Into<K>> From<(S, u32, u32)> for RectRequest<K> {
    fn from((id, width, height): (S, u32, u32)) -> Self {
        Self::new(id.into(), width, height)
    }
}

/// Final geometry of one atlas page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageGeometry {
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

/// Where a request ended up.
///
/// `x,y` is the top-left of the unpadded content, ready to be used as a
/// texture-sampling offset. The reserved slot extends `padding` pixels on
/// every side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement<K = String> {
    pub id: K,
    pub page: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

impl<K> Placement<K> {
    /// Content rectangle within the page.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Reserved rectangle including padding. Saturates for hand-built
    /// placements whose padding does not fit the page coordinates.
    pub fn padded_rect(&self) -> Rect {
        let border = self.padding.saturating_mul(2);
        Rect::new(
            self.x.saturating_sub(self.padding),
            self.y.saturating_sub(self.padding),
            self.width.saturating_add(border),
            self.height.saturating_add(border),
        )
    }

    /// Content box normalized to the page size: `[u0, v0, u1, v1]`.
    pub fn uv_box(&self, page: &PageGeometry) -> [f32; 4] {
        let pw = page.width as f32;
        let ph = page.height as f32;
        [
            self.x as f32 / pw,
            self.y as f32 / ph,
            self.x.saturating_add(self.width) as f32 / pw,
            self.y.saturating_add(self.height) as f32 / ph,
        ]
    }
}

/// Result of a packing run: page geometry plus one placement per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackOutput<K = String> {
    pub pages: Vec<PageGeometry>,
    /// Placements in the order the requests were submitted.
    pub placements: Vec<Placement<K>>,
}

impl<K> Default for PackOutput<K> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            placements: Vec::new(),
        }
    }
}

impl<K> PackOutput<K> {
    /// Placements that landed on page `index`.
    pub fn placements_on(&self, index: usize) -> impl Iterator<Item = &Placement<K>> {
        self.placements.iter().filter(move |p| p.page == index)
    }

    pub fn page(&self, index: usize) -> Option<&PageGeometry> {
        self.pages.get(index)
    }

    /// Computes packing statistics for this output.
    pub fn stats(&self) -> PackStats {
        let num_pages = self.pages.len();
        let mut total_page_area = 0u64;
        let mut max_page_side = 0u32;
        for page in &self.pages {
            total_page_area += page.width as u64 * page.height as u64;
            max_page_side = max_page_side.max(page.width).max(page.height);
        }

        let mut used_area = 0u64;
        let mut padded_area = 0u64;
        for p in &self.placements {
            used_area += p.rect().area();
            padded_area += p.padded_rect().area();
        }

        let occupancy = if total_page_area > 0 {
            used_area as f64 / total_page_area as f64
        } else {
            0.0
        };

        PackStats {
            num_pages,
            num_placements: self.placements.len(),
            total_page_area,
            used_area,
            padded_area,
            occupancy,
            max_page_side,
        }
    }
}

/// Statistics about atlas packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PackStats {
    pub num_pages: usize,
    pub num_placements: usize,
    /// Sum of `width * height` over all pages.
    pub total_page_area: u64,
    /// Sum of unpadded content areas.
    pub used_area: u64,
    /// Sum of reserved slot areas (content plus padding).
    pub padded_area: u64,
    /// `used_area / total_page_area` (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
    /// Largest page side across all pages.
    pub max_page_side: u32,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Placements: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px², Padded Area: {} px²",
            self.num_pages,
            self.num_placements,
            self.occupancy * 100.0,
            self.total_page_area,
            self.used_area,
            self.padded_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_page_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.total_page_area > 0 {
            (self.wasted_area() as f64 / self.total_page_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
