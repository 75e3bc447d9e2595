//! Best-peak tracking with deterministic tie-breaking.

use std::cmp::Ordering;

/// Scored placement of the template's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the placement.
    pub x: usize,
    /// Y coordinate (row) of the placement.
    pub y: usize,
    /// ZNCC score at the placement.
    pub score: f32,
}

/// Orders peaks best-first: higher score, then smaller `y`, then smaller `x`.
pub(crate) fn peak_cmp_desc(a: &Peak, b: &Peak) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Keeps the single best peak seen so far.
#[derive(Default)]
pub(crate) struct BestPeak {
    best: Option<Peak>,
}

impl BestPeak {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Offers a peak, keeping it if it ranks ahead of the current best.
    pub(crate) fn push(&mut self, peak: Peak) {
        match self.best {
            Some(current) if peak_cmp_desc(&peak, &current) != Ordering::Less => {}
            _ => self.best = Some(peak),
        }
    }

    /// Merges another tracker into this one.
    pub(crate) fn merge(mut self, other: BestPeak) -> Self {
        if let Some(peak) = other.best {
            self.push(peak);
        }
        self
    }

    pub(crate) fn into_best(self) -> Option<Peak> {
        self.best
    }
}
