//! Refinement of coarse candidates at finer pyramid levels.
//!
//! Each candidate is upscaled to the next level and re-scored inside a small
//! window around its projected position.

use super::{MatchConfig, Zncc};
use crate::candidate::best::Peak;
use crate::candidate::nms::nms_2d;
use crate::image::FrameView;
use crate::kernel::{placement_range, Kernel};
use crate::template::TemplatePlan;
use crate::trace::trace_debug;
use crate::util::ClickerResult;

/// Returns the inclusive placement window around a candidate projected from
/// the next coarser level, or `None` if it falls outside `[0, max]`.
fn projected_window(
    coarse: Peak,
    radius: usize,
    (max_x, max_y): (usize, usize),
) -> Option<((usize, usize), (usize, usize))> {
    // A coarse placement covers fine placements 2p and 2p + 1.
    let fx = coarse.x.saturating_mul(2);
    let fy = coarse.y.saturating_mul(2);
    let x0 = fx.saturating_sub(radius);
    let y0 = fy.saturating_sub(radius);
    if x0 > max_x || y0 > max_y {
        return None;
    }
    let x1 = fx.saturating_add(radius + 1).min(max_x);
    let y1 = fy.saturating_add(radius + 1).min(max_y);
    Some(((x0, y0), (x1, y1)))
}

pub(crate) fn refine_candidates(
    frame: FrameView<'_>,
    plan: &TemplatePlan,
    level: usize,
    prev: &[Peak],
    cfg: &MatchConfig,
) -> ClickerResult<Vec<Peak>> {
    let range = placement_range(frame, plan)?;
    let mut peaks = Vec::with_capacity(prev.len());
    for &cand in prev {
        let Some((start, end)) = projected_window(cand, cfg.roi_radius, range) else {
            continue;
        };
        if let Some(peak) = Zncc::scan_window(frame, plan, start, end, cfg.min_var_i) {
            peaks.push(peak);
        }
    }

    let kept = nms_2d(peaks, cfg.nms_radius, cfg.beam_width);
    trace_debug!("refine_candidates", level = level, count = kept.len());
    Ok(kept)
}
