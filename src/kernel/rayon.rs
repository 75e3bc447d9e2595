//! Rayon-parallel scan (feature-gated).
//!
//! Parallelizes over placement rows, each worker keeping the best peak of
//! its rows. The merges use the same total order as the sequential scans, so
//! results are identical to `Kernel::scan_full` and `Kernel::scan_topk`.

use crate::candidate::best::{BestPeak, Peak};
use crate::candidate::topk::TopK;
use crate::image::FrameView;
use crate::kernel::{placement_range, Kernel};
use crate::template::TemplatePlan;
use crate::util::ClickerResult;
use rayon::prelude::*;

/// Row-parallel full scan with kernel `K`.
pub fn scan_full_par<K: Kernel>(
    frame: FrameView<'_>,
    plan: &TemplatePlan,
    min_var_i: f32,
) -> ClickerResult<Option<Peak>> {
    let (max_x, max_y) = placement_range(frame, plan)?;

    let best = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut row_best = BestPeak::new();
            for x in 0..=max_x {
                let score = K::score_at(frame, plan, x, y, min_var_i);
                if score.is_finite() {
                    row_best.push(Peak { x, y, score });
                }
            }
            row_best
        })
        .reduce(BestPeak::new, BestPeak::merge);

    Ok(best.into_best())
}

/// Row-parallel top-K scan with kernel `K`.
pub fn scan_topk_par<K: Kernel>(
    frame: FrameView<'_>,
    plan: &TemplatePlan,
    min_var_i: f32,
    k: usize,
) -> ClickerResult<Vec<Peak>> {
    let (max_x, max_y) = placement_range(frame, plan)?;

    let topk = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut row_topk = TopK::new(k);
            for x in 0..=max_x {
                let score = K::score_at(frame, plan, x, y, min_var_i);
                if score.is_finite() {
                    row_topk.push(Peak { x, y, score });
                }
            }
            row_topk
        })
        .reduce(|| TopK::new(k), TopK::merge);

    Ok(topk.into_sorted_desc())
}
