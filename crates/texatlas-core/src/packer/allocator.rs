use super::free_space::FreeSpace;
use crate::config::{FitHeuristic, PackerConfig, SplitRule};
use crate::model::{PageGeometry, Rect};
use tracing::debug;

/// A page being filled during one packing run.
///
/// The size is fixed when the page is opened, so coordinates already handed
/// out for it stay valid.
#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    free: FreeSpace,
    /// Reserved (padded) slots in placement order.
    slots: Vec<Rect>,
}

impl Page {
    fn new(index: usize, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
            free: FreeSpace::new(width, height),
            slots: Vec::new(),
        }
    }

    /// Reserves a `w x h` slot, or returns `None` if no free region fits.
    pub fn place(
        &mut self,
        heuristic: FitHeuristic,
        rule: SplitRule,
        w: u32,
        h: u32,
    ) -> Option<Rect> {
        let slot = self.free.insert(heuristic, rule, w, h)?;
        self.slots.push(slot);
        Some(slot)
    }

    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    pub fn free_space(&self) -> &FreeSpace {
        &self.free
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            index: self.index,
            width: self.width,
            height: self.height,
        }
    }
}

/// Owns the pages of one packing run and decides how big new pages are.
#[derive(Debug, Clone)]
pub struct PageAllocator {
    default_page_size: u32,
    max_page_size: u32,
    pow2: bool,
    pages: Vec<Page>,
}

impl PageAllocator {
    pub fn new(cfg: &PackerConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
            pow2: cfg.page_size_is_power_of_two,
            pages: Vec::new(),
        }
    }

    /// Side length of a page that must hold at least a `min_w x min_h` slot.
    pub fn page_side(&self, min_w: u32, min_h: u32) -> u32 {
        let need = min_w.max(min_h);
        let side = if self.pow2 {
            self.default_page_size.max(next_pow2(need))
        } else {
            self.default_page_size.max(need)
        };
        side.min(self.max_page_size)
    }

    /// Appends a fresh square page able to hold a `min_w x min_h` slot and
    /// returns its index.
    pub fn open_page(&mut self, min_w: u32, min_h: u32) -> usize {
        let side = self.page_side(min_w, min_h);
        let index = self.pages.len();
        debug!(index, side, "opening page");
        self.pages.push(Page::new(index, side, side));
        index
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_mut(&mut self, index: usize) -> &mut Page {
        &mut self.pages[index]
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn geometry(&self) -> Vec<PageGeometry> {
        self.pages.iter().map(Page::geometry).collect()
    }
}

/// Smallest power of two `>= v` (1 for 0). Past `1 << 31` there is none, so
/// `v` itself is returned.
pub fn next_pow2(v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    v.checked_next_power_of_two().unwrap_or(v)
}
