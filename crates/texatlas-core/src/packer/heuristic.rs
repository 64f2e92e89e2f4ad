use crate::config::{FitHeuristic, SplitRule};
use crate::model::Rect;

/// Ordering key for a candidate region; lexicographically smaller wins.
///
/// `(primary, leftover area, leftover width, leftover height, y, x)`
pub type FitScore = (u64, u64, u32, u32, u32, u32);

/// Scores `region` for a `w x h` slot, or `None` if it does not fit.
pub fn score(heuristic: FitHeuristic, region: &Rect, w: u32, h: u32) -> Option<FitScore> {
    if region.w < w || region.h < h {
        return None;
    }
    let leftover_w = region.w - w;
    let leftover_h = region.h - h;
    let leftover_area = region.area() - (w as u64 * h as u64);
    let primary = match heuristic {
        FitHeuristic::BestAreaFit => leftover_area,
        FitHeuristic::BestShortSideFit => leftover_w.min(leftover_h) as u64,
        FitHeuristic::BestLongSideFit => leftover_w.max(leftover_h) as u64,
        FitHeuristic::BottomLeft => region.y as u64 + h as u64,
    };
    Some((
        primary,
        leftover_area,
        leftover_w,
        leftover_h,
        region.y,
        region.x,
    ))
}

/// Splits `region` after a `w x h` slot was placed at its top-left corner.
///
/// Returns `(right, bottom)`; zero-area remainders come back as `None`.
pub fn split(rule: SplitRule, region: &Rect, w: u32, h: u32) -> (Option<Rect>, Option<Rect>) {
    let w_right = region.w - w;
    let h_bottom = region.h - h;

    let bottom_full_width = match rule {
        SplitRule::BottomFullWidth => true,
        SplitRule::RightFullHeight => false,
        SplitRule::ShorterLeftoverAxis => h_bottom < w_right,
    };

    let (right, bottom) = if bottom_full_width {
        (
            Rect::new(region.x + w, region.y, w_right, h),
            Rect::new(region.x, region.y + h, region.w, h_bottom),
        )
    } else {
        (
            Rect::new(region.x + w, region.y, w_right, region.h),
            Rect::new(region.x, region.y + h, w, h_bottom),
        )
    };
    let keep = |r: Rect| if r.is_empty() { None } else { Some(r) };
    (keep(right), keep(bottom))
}
