//! Correlation kernel implementations.
//!
//! Every kernel computes the same zero-mean normalized cross-correlation
//! (ZNCC) score in `[-1, 1]`; they differ only in how the inner loops run.

use crate::candidate::best::{BestPeak, Peak};
use crate::candidate::topk::TopK;
use crate::image::FrameView;
use crate::template::TemplatePlan;
use crate::util::{ClickerError, ClickerResult};

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    /// Computes the score at a single placement (top-left coordinates).
    ///
    /// Returns `f32::NEG_INFINITY` for placements that do not fit or whose
    /// window variance is at or below `min_var_i`.
    fn score_at(frame: FrameView<'_>, plan: &TemplatePlan, x: usize, y: usize, min_var_i: f32)
        -> f32;

    /// Scans every valid placement and returns the best peak, if any
    /// placement produced a finite score.
    fn scan_full(
        frame: FrameView<'_>,
        plan: &TemplatePlan,
        min_var_i: f32,
    ) -> ClickerResult<Option<Peak>> {
        let (max_x, max_y) = placement_range(frame, plan)?;
        let mut best = BestPeak::new();
        for y in 0..=max_y {
            for x in 0..=max_x {
                let score = Self::score_at(frame, plan, x, y, min_var_i);
                if score.is_finite() {
                    best.push(Peak { x, y, score });
                }
            }
        }
        Ok(best.into_best())
    }

    /// Scans every valid placement and returns the `k` best peaks,
    /// best-first.
    fn scan_topk(
        frame: FrameView<'_>,
        plan: &TemplatePlan,
        min_var_i: f32,
        k: usize,
    ) -> ClickerResult<Vec<Peak>> {
        let (max_x, max_y) = placement_range(frame, plan)?;
        let mut topk = TopK::new(k);
        for y in 0..=max_y {
            for x in 0..=max_x {
                let score = Self::score_at(frame, plan, x, y, min_var_i);
                if score.is_finite() {
                    topk.push(Peak { x, y, score });
                }
            }
        }
        Ok(topk.into_sorted_desc())
    }

    /// Returns the best peak among placements in the inclusive window
    /// `[x0, x1] x [y0, y1]`. Placements that do not fit are skipped.
    fn scan_window(
        frame: FrameView<'_>,
        plan: &TemplatePlan,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
        min_var_i: f32,
    ) -> Option<Peak> {
        let mut best = BestPeak::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let score = Self::score_at(frame, plan, x, y, min_var_i);
                if score.is_finite() {
                    best.push(Peak { x, y, score });
                }
            }
        }
        best.into_best()
    }
}

/// Returns the largest valid top-left placement `(max_x, max_y)`.
pub(crate) fn placement_range(
    frame: FrameView<'_>,
    plan: &TemplatePlan,
) -> ClickerResult<(usize, usize)> {
    let frame_width = frame.width();
    let frame_height = frame.height();
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    if frame_width < tpl_width || frame_height < tpl_height {
        return Err(ClickerError::TemplateTooLarge {
            tpl_width,
            tpl_height,
            frame_width,
            frame_height,
        });
    }
    Ok((frame_width - tpl_width, frame_height - tpl_height))
}

pub(crate) fn placement_fits(frame: FrameView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> bool {
    frame.width() >= plan.width()
        && frame.height() >= plan.height()
        && x <= frame.width() - plan.width()
        && y <= frame.height() - plan.height()
}

/// Turns window sums into a ZNCC score.
pub(crate) fn zncc_from_sums(
    plan: &TemplatePlan,
    dot: f64,
    sum_i: f64,
    sum_i2: f64,
    min_var_i: f32,
) -> f32 {
    let n = plan.sample_count() as f64;
    let var_i = sum_i2 - (sum_i * sum_i) / n;
    if var_i / n <= min_var_i as f64 {
        return f32::NEG_INFINITY;
    }
    let score = dot / (plan.var_t() as f64 * var_i).sqrt();
    if score.is_finite() {
        score as f32
    } else {
        f32::NEG_INFINITY
    }
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;
