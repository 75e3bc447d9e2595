//! Template search: single-frame matching and bounded-retry target location.
//!
//! `Matcher` searches a frame coarse-to-fine over an image pyramid and
//! reports the best placement of the template. Templates too small for a
//! pyramid are scanned exhaustively at full resolution. `TargetLocator`
//! wraps any [`TemplateMatcher`] with a capture-and-retry policy and a
//! strict confidence threshold.

use crate::candidate::best::Peak;
use crate::geometry::Point;
use crate::image::pyramid::{downsample, FramePyramid};
use crate::image::{Frame, FrameView};
#[cfg(feature = "rayon")]
use crate::kernel::rayon::scan_full_par;
use crate::kernel::{placement_range, Kernel};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_debug, trace_span};
use crate::util::{ClickerError, ClickerResult};

mod coarse;
mod locate;
mod refine;

pub use locate::{LocateConfig, TargetLocator};

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ZnccScalar as Zncc;
#[cfg(feature = "simd")]
use crate::kernel::simd::ZnccSimd as Zncc;

/// Matcher configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Scan placement rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
    /// Minimum per-sample variance of a frame window; flatter windows are
    /// skipped because their correlation is undefined.
    pub min_var_i: f32,
    /// Pyramid levels to search, counting full resolution. `1` scores every
    /// placement at full resolution.
    pub max_levels: usize,
    /// Candidates carried from each level to the next finer one.
    pub beam_width: usize,
    /// Refinement radius around each projected candidate, in placements.
    pub roi_radius: usize,
    /// Minimum Chebyshev distance between kept candidates.
    pub nms_radius: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            min_var_i: 1e-6,
            max_levels: 4,
            beam_width: 8,
            roi_radius: 2,
            nms_radius: 4,
        }
    }
}

impl MatchConfig {
    /// Validates configuration values.
    pub fn validate(&self) -> ClickerResult<()> {
        if self.min_var_i.is_nan() || self.min_var_i < 0.0 {
            return Err(ClickerError::InvalidInput("min_var_i must be non-negative"));
        }
        if self.max_levels == 0 {
            return Err(ClickerError::InvalidInput("max_levels must be at least 1"));
        }
        if self.beam_width == 0 {
            return Err(ClickerError::InvalidInput("beam_width must be at least 1"));
        }
        Ok(())
    }
}

/// Best placement of the template inside a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Column of the template's top-left corner.
    pub x: usize,
    /// Row of the template's top-left corner.
    pub y: usize,
    /// ZNCC score in `[-1, 1]`; higher is more similar.
    pub confidence: f32,
}

impl Match {
    /// Returns the top-left corner as a point.
    pub fn top_left(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    /// Returns the center of the matched template.
    ///
    /// Half sizes are truncated, so the same match always yields the same
    /// point.
    pub fn center(&self, tpl_width: usize, tpl_height: usize) -> Point {
        Point::new((self.x + tpl_width / 2) as i32, (self.y + tpl_height / 2) as i32)
    }
}

/// Outcome of a match or locate call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchResult {
    NotFound,
    Found(Match),
}

impl MatchResult {
    /// Returns the match, if any.
    pub fn found(self) -> Option<Match> {
        match self {
            Self::Found(m) => Some(m),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Anything that can search a frame for a fixed template.
pub trait TemplateMatcher {
    /// Finds the best placement of the template inside `frame`.
    fn match_frame(&self, frame: FrameView<'_>) -> ClickerResult<MatchResult>;

    /// Returns the template `(width, height)` used for center math.
    fn template_size(&self) -> (usize, usize);
}

impl<M: TemplateMatcher + ?Sized> TemplateMatcher for &M {
    fn match_frame(&self, frame: FrameView<'_>) -> ClickerResult<MatchResult> {
        (**self).match_frame(frame)
    }

    fn template_size(&self) -> (usize, usize) {
        (**self).template_size()
    }
}

/// Smallest template side kept at a coarse pyramid level.
const MIN_LEVEL_SIDE: usize = 8;

/// Upper bound on template pyramid depth.
const MAX_PYRAMID_LEVELS: usize = 6;

/// ZNCC matcher bound to a single template.
pub struct Matcher {
    /// Template plans per pyramid level; index 0 is full resolution.
    plans: Vec<TemplatePlan>,
    cfg: MatchConfig,
}

impl Matcher {
    /// Builds a matcher for `template`, rejecting flat templates.
    pub fn new(template: &Template) -> ClickerResult<Self> {
        let plans = template_plans(template)?;
        trace_debug!("matcher.levels", levels = plans.len());
        Ok(Self {
            plans,
            cfg: MatchConfig::default(),
        })
    }

    /// Replaces the matcher configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns the ZNCC score of a single placement.
    pub fn score_at(&self, frame: FrameView<'_>, x: usize, y: usize) -> f32 {
        Zncc::score_at(frame, self.base_plan(), x, y, self.cfg.min_var_i)
    }

    /// Returns how many pyramid levels a match will search.
    pub fn levels(&self) -> usize {
        self.cfg.max_levels.clamp(1, self.plans.len())
    }

    fn base_plan(&self) -> &TemplatePlan {
        &self.plans[0]
    }

    fn scan_exhaustive(&self, frame: FrameView<'_>) -> ClickerResult<Option<Peak>> {
        #[cfg(feature = "rayon")]
        let peak = if self.cfg.parallel {
            scan_full_par::<Zncc>(frame, self.base_plan(), self.cfg.min_var_i)?
        } else {
            Zncc::scan_full(frame, self.base_plan(), self.cfg.min_var_i)?
        };
        #[cfg(not(feature = "rayon"))]
        let peak = Zncc::scan_full(frame, self.base_plan(), self.cfg.min_var_i)?;
        Ok(peak)
    }

    fn scan_pyramid(&self, frame: FrameView<'_>, levels: usize) -> ClickerResult<Option<Peak>> {
        let pyramid = FramePyramid::build(frame, levels)?;
        let levels = levels.min(pyramid.len());
        let level_view = |level: usize| {
            pyramid
                .level(level)
                .ok_or(ClickerError::InvalidInput("pyramid level out of range"))
        };

        let top = levels - 1;
        let mut beam = coarse::coarse_candidates(level_view(top)?, &self.plans[top], top, &self.cfg)?;
        for level in (0..top).rev() {
            if beam.is_empty() {
                break;
            }
            beam = refine::refine_candidates(
                level_view(level)?,
                &self.plans[level],
                level,
                &beam,
                &self.cfg,
            )?;
        }
        Ok(beam.first().copied())
    }
}

/// Plans the template at full resolution and at each coarser level that
/// keeps both sides at or above `MIN_LEVEL_SIDE` and is not flat.
fn template_plans(template: &Template) -> ClickerResult<Vec<TemplatePlan>> {
    let mut plans = vec![TemplatePlan::from_view(template.view())?];
    let mut level: Option<Frame> = None;
    while plans.len() < MAX_PYRAMID_LEVELS {
        let src = level.as_ref().map_or(template.view(), Frame::view);
        if src.width() / 2 < MIN_LEVEL_SIDE || src.height() / 2 < MIN_LEVEL_SIDE {
            break;
        }
        let next = downsample(src)?;
        match TemplatePlan::from_view(next.view()) {
            Ok(plan) => plans.push(plan),
            Err(ClickerError::DegenerateTemplate { .. }) => break,
            Err(err) => return Err(err),
        }
        level = Some(next);
    }
    Ok(plans)
}

impl TemplateMatcher for Matcher {
    fn match_frame(&self, frame: FrameView<'_>) -> ClickerResult<MatchResult> {
        let _span = trace_span!(
            "match_frame",
            width = frame.width(),
            height = frame.height()
        )
        .entered();

        placement_range(frame, self.base_plan())?;
        let levels = self.levels();
        let peak = if levels == 1 {
            self.scan_exhaustive(frame)?
        } else {
            self.scan_pyramid(frame, levels)?
        };

        Ok(match peak {
            Some(peak) => {
                trace_debug!("match_frame.peak", x = peak.x, y = peak.y, score = peak.score);
                MatchResult::Found(Match {
                    x: peak.x,
                    y: peak.y,
                    confidence: peak.score,
                })
            }
            None => MatchResult::NotFound,
        })
    }

    fn template_size(&self) -> (usize, usize) {
        (self.base_plan().width(), self.base_plan().height())
    }
}

/// One-shot match of `template` inside `frame` with default settings.
pub fn match_template(frame: FrameView<'_>, template: &Template) -> ClickerResult<MatchResult> {
    Matcher::new(template)?.match_frame(frame)
}
