//! Coarse search at the top pyramid level.
//!
//! Every placement of the coarsest template is scored, the best peaks are
//! kept, and non-maximum suppression spreads them into a beam of distinct
//! candidates for refinement.

use super::{MatchConfig, Zncc};
use crate::candidate::best::Peak;
use crate::candidate::nms::nms_2d;
use crate::image::FrameView;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::scan_topk_par;
use crate::kernel::Kernel;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::ClickerResult;

/// Peaks collected per beam slot before suppression.
const PEAKS_PER_BEAM_SLOT: usize = 8;

pub(crate) fn coarse_candidates(
    frame: FrameView<'_>,
    plan: &TemplatePlan,
    level: usize,
    cfg: &MatchConfig,
) -> ClickerResult<Vec<Peak>> {
    let _span = trace_span!(
        "coarse_search",
        level = level,
        width = frame.width(),
        height = frame.height()
    )
    .entered();

    let k = cfg.beam_width.saturating_mul(PEAKS_PER_BEAM_SLOT);
    #[cfg(feature = "rayon")]
    let peaks = if cfg.parallel {
        scan_topk_par::<Zncc>(frame, plan, cfg.min_var_i, k)?
    } else {
        Zncc::scan_topk(frame, plan, cfg.min_var_i, k)?
    };
    #[cfg(not(feature = "rayon"))]
    let peaks = Zncc::scan_topk(frame, plan, cfg.min_var_i, k)?;

    let kept = nms_2d(peaks, cfg.nms_radius, cfg.beam_width);
    trace_event!("coarse_candidates", level = level, count = kept.len());
    Ok(kept)
}
