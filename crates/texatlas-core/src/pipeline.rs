use crate::config::PackerConfig;
use crate::error::{AtlasError, Result};
use crate::model::{PackOutput, Placement, Rect, RectRequest};
use crate::packer::PageAllocator;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use tracing::{debug, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bounds an id type must satisfy to go through `pack`.
pub trait RequestId: Clone + Eq + Hash + Display {}
impl<T: Clone + Eq + Hash + Display> RequestId for T {}

/// Validated request with its padded slot size.
struct Prep {
    w: u32,
    h: u32,
    padding: u32,
}

#[instrument(skip_all, fields(requests = requests.len()))]
/// Packs `requests` into as many pages as needed and returns page geometry
/// plus one placement per request.
///
/// Notes:
/// - Config and every request are validated before any placement work; on
///   error nothing is returned but the error.
/// - Requests are placed by decreasing padded height, then padded width, then
///   submission order. Each one goes to the most recent page if it fits,
///   else to the first earlier page that fits, else to a new page.
/// - Output placements are in submission order. Identical input yields
///   identical output.
pub fn pack<K: RequestId>(
    requests: Vec<RectRequest<K>>,
    cfg: &PackerConfig,
) -> Result<PackOutput<K>> {
    cfg.validate()?;
    let prepared = prepare_requests(&requests, cfg)?;
    if prepared.is_empty() {
        return Ok(PackOutput::default());
    }

    // Stable sort keeps submission order for equal sizes.
    let mut order: Vec<usize> = (0..prepared.len()).collect();
    order.sort_by(|&a, &b| {
        prepared[b]
            .h
            .cmp(&prepared[a].h)
            .then_with(|| prepared[b].w.cmp(&prepared[a].w))
    });

    let mut alloc = PageAllocator::new(cfg);
    let mut slots: Vec<(usize, Rect)> = vec![(0, Rect::new(0, 0, 0, 0)); prepared.len()];
    for idx in order {
        let p = &prepared[idx];
        let (page, slot) = place_one(&mut alloc, cfg, p.w, p.h).ok_or_else(|| {
            AtlasError::OversizedRectangle {
                id: requests[idx].id.to_string(),
                width: p.w,
                height: p.h,
                max: cfg.max_page_size,
            }
        })?;
        trace!(id = %requests[idx].id, page, x = slot.x, y = slot.y, "placed");
        slots[idx] = (page, slot);
    }

    let placements: Vec<Placement<K>> = requests
        .into_iter()
        .zip(prepared.iter().zip(slots))
        .map(|(req, (p, (page, slot)))| Placement {
            id: req.id,
            page,
            x: slot.x + p.padding,
            y: slot.y + p.padding,
            width: req.width,
            height: req.height,
            padding: p.padding,
        })
        .collect();

    debug!(
        pages = alloc.len(),
        placements = placements.len(),
        "pack finished"
    );
    Ok(PackOutput {
        pages: alloc.geometry(),
        placements,
    })
}

fn prepare_requests<K: RequestId>(
    requests: &[RectRequest<K>],
    cfg: &PackerConfig,
) -> Result<Vec<Prep>> {
    let mut seen: HashSet<&K> = HashSet::with_capacity(requests.len());
    let mut out = Vec::with_capacity(requests.len());
    for req in requests {
        if req.width == 0 || req.height == 0 {
            return Err(AtlasError::InvalidRequest {
                id: req.id.to_string(),
                reason: format!("size {}x{} has a zero side", req.width, req.height),
            });
        }
        if !seen.insert(&req.id) {
            return Err(AtlasError::DuplicateId {
                id: req.id.to_string(),
            });
        }
        let padding = req.effective_padding(cfg.default_padding);
        let oversized = || AtlasError::OversizedRectangle {
            id: req.id.to_string(),
            width: req.width.saturating_add(padding.saturating_mul(2)),
            height: req.height.saturating_add(padding.saturating_mul(2)),
            max: cfg.max_page_size,
        };
        match req.padded_size(cfg.default_padding) {
            Some((w, h)) if w <= cfg.max_page_size && h <= cfg.max_page_size => {
                out.push(Prep { w, h, padding });
            }
            _ => return Err(oversized()),
        }
    }
    Ok(out)
}

/// Finds a slot for a `w x h` padded rectangle, opening a page if needed.
/// `None` only if even a fresh page cannot hold it.
fn place_one(
    alloc: &mut PageAllocator,
    cfg: &PackerConfig,
    w: u32,
    h: u32,
) -> Option<(usize, Rect)> {
    if let Some(last) = alloc.len().checked_sub(1) {
        if let Some(slot) = alloc.page_mut(last).place(cfg.heuristic, cfg.split, w, h) {
            return Some((last, slot));
        }
        for i in 0..last {
            if let Some(slot) = alloc.page_mut(i).place(cfg.heuristic, cfg.split, w, h) {
                return Some((i, slot));
            }
        }
    }
    let index = alloc.open_page(w, h);
    let slot = alloc.page_mut(index).place(cfg.heuristic, cfg.split, w, h)?;
    Some((index, slot))
}

/// Explicit context for a series of independent packing runs sharing one
/// validated configuration. Holds no state between runs.
#[derive(Debug, Clone)]
pub struct PackSession {
    cfg: PackerConfig,
}

impl PackSession {
    pub fn new(cfg: PackerConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &PackerConfig {
        &self.cfg
    }

    pub fn pack<K: RequestId>(&self, requests: Vec<RectRequest<K>>) -> Result<PackOutput<K>> {
        pack(requests, &self.cfg)
    }

    /// True if `pack_many` will spread batches over the rayon pool: the config
    /// asks for it and the crate was built with the `parallel` feature.
    pub fn runs_parallel(&self) -> bool {
        runs_parallel(&self.cfg)
    }

    pub fn pack_many<K: RequestId + Send>(
        &self,
        batches: Vec<Vec<RectRequest<K>>>,
    ) -> Vec<Result<PackOutput<K>>> {
        pack_many(batches, &self.cfg)
    }
}

/// Packs several unrelated request sets, each into its own page set.
///
/// Results come back in input order. With the `parallel` feature and
/// `cfg.parallel` set, batches run on the rayon pool. Without the feature a
/// set `cfg.parallel` is logged and the batches run sequentially.
pub fn pack_many<K: RequestId + Send>(
    batches: Vec<Vec<RectRequest<K>>>,
    cfg: &PackerConfig,
) -> Vec<Result<PackOutput<K>>> {
    #[cfg(feature = "parallel")]
    {
        if cfg.parallel {
            return batches
                .into_par_iter()
                .map(|batch| pack(batch, cfg))
                .collect();
        }
    }

    if cfg.parallel && !runs_parallel(cfg) {
        warn!(
            batches = batches.len(),
            "parallel packing requested but the `parallel` feature is disabled; running sequentially"
        );
    }
    batches.into_iter().map(|batch| pack(batch, cfg)).collect()
}

fn runs_parallel(cfg: &PackerConfig) -> bool {
    cfg!(feature = "parallel") && cfg.parallel
}
