//! Non-maximum suppression over placement peaks.

use super::best::Peak;
use super::topk::sort_peaks_desc;

/// Keeps peaks farther than `radius` (Chebyshev distance) from every
/// better-ranked kept peak, best-first, at most `limit` of them.
pub(crate) fn nms_2d(mut peaks: Vec<Peak>, radius: usize, limit: usize) -> Vec<Peak> {
    sort_peaks_desc(&mut peaks);
    let mut kept: Vec<Peak> = Vec::with_capacity(limit.min(peaks.len()));

    'outer: for peak in peaks {
        if kept.len() >= limit {
            break;
        }
        for kept_peak in &kept {
            let dist = peak.x.abs_diff(kept_peak.x).max(peak.y.abs_diff(kept_peak.y));
            if dist <= radius {
                continue 'outer;
            }
        }
        kept.push(peak);
    }

    kept
}
