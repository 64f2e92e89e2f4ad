use super::heuristic::{self, FitScore};
use crate::config::{FitHeuristic, SplitRule};
use crate::model::Rect;
use tracing::trace;

/// Free regions of one page.
///
/// Regions are created only by guillotine splits of an unused region, so they
/// never overlap each other or any reserved slot.
#[derive(Debug, Clone)]
pub struct FreeSpace {
    free: Vec<Rect>,
}

impl FreeSpace {
    /// Seeds a single region covering the whole `width x height` page.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            free: vec![Rect::new(0, 0, width, height)],
        }
    }

    pub fn regions(&self) -> &[Rect] {
        &self.free
    }

    pub fn free_list_len(&self) -> usize {
        self.free.len()
    }

    /// Total free area in pixels.
    pub fn free_area(&self) -> u64 {
        self.free.iter().map(Rect::area).sum()
    }

    /// Picks the region a `w x h` slot would go into. `None` means no fit.
    pub fn find(&self, heuristic: FitHeuristic, w: u32, h: u32) -> Option<usize> {
        let mut best: Option<(FitScore, usize)> = None;
        for (i, fr) in self.free.iter().enumerate() {
            let Some(s) = heuristic::score(heuristic, fr, w, h) else {
                continue;
            };
            if best.is_none_or(|(bs, _)| s < bs) {
                best = Some((s, i));
            }
        }
        best.map(|(_, i)| i)
    }

    /// Consumes region `idx` with a `w x h` slot at its top-left corner and
    /// returns the slot.
    pub fn commit(&mut self, idx: usize, w: u32, h: u32, rule: SplitRule) -> Rect {
        let fr = self.free.remove(idx);
        let slot = Rect::new(fr.x, fr.y, w, h);
        let (right, bottom) = heuristic::split(rule, &fr, w, h);
        if let Some(r) = right {
            self.free.push(r);
        }
        if let Some(r) = bottom {
            self.free.push(r);
        }
        self.prune_free_list();
        trace!(?slot, free = self.free.len(), "committed slot");
        slot
    }

    /// Finds a region for `w x h` and commits it in one step.
    pub fn insert(
        &mut self,
        heuristic: FitHeuristic,
        rule: SplitRule,
        w: u32,
        h: u32,
    ) -> Option<Rect> {
        let idx = self.find(heuristic, w, h)?;
        Some(self.commit(idx, w, h, rule))
    }

    /// Drops every region fully contained in another one. Of two identical
    /// regions the earlier one is kept.
    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            let mut remove_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                let b = self.free[j];
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }
}
