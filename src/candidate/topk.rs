//! Bounded top-K collection of peaks.

use std::cmp::Ordering;

use super::best::{peak_cmp_desc, Peak};

/// Sorts peaks best-first with deterministic tie-breaking.
pub(crate) fn sort_peaks_desc(peaks: &mut [Peak]) {
    peaks.sort_by(peak_cmp_desc);
}

/// Keeps the `k` best peaks under the total peak order.
///
/// The kept set does not depend on push order, so per-row collectors can be
/// merged in any order.
pub(crate) struct TopK {
    k: usize,
    items: Vec<Peak>,
}

impl TopK {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Pushes a peak, evicting the worst kept peak if at capacity.
    pub(crate) fn push(&mut self, peak: Peak) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(peak);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if peak_cmp_desc(item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }
        if peak_cmp_desc(&peak, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = peak;
        }
    }

    pub(crate) fn merge(mut self, other: TopK) -> Self {
        for peak in other.items {
            self.push(peak);
        }
        self
    }

    /// Returns the kept peaks sorted best-first.
    pub(crate) fn into_sorted_desc(mut self) -> Vec<Peak> {
        sort_peaks_desc(&mut self.items);
        self.items
    }
}
