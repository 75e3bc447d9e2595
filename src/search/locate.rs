//! Bounded-retry target location with a strict confidence threshold.

use crate::geometry::Point;
use crate::image::Frame;
use crate::search::{MatchResult, TemplateMatcher};
use crate::trace::{trace_debug, trace_event, trace_warn};
use crate::util::{ClickerError, ClickerResult};

/// Retry and acceptance policy for [`TargetLocator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocateConfig {
    /// Capture-and-match attempts per `locate` call; at least 1.
    pub max_attempts: usize,
    /// A match is accepted only when its confidence is strictly greater.
    pub confidence_threshold: f32,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            confidence_threshold: 0.8,
        }
    }
}

impl LocateConfig {
    pub fn validate(&self) -> ClickerResult<()> {
        if self.max_attempts == 0 {
            return Err(ClickerError::InvalidInput("max_attempts must be at least 1"));
        }
        if !self.confidence_threshold.is_finite() {
            return Err(ClickerError::InvalidInput("confidence_threshold must be finite"));
        }
        Ok(())
    }
}

/// Repeats capture and match until a confident hit or the attempt budget
/// runs out.
pub struct TargetLocator<M> {
    matcher: M,
    cfg: LocateConfig,
}

impl<M: TemplateMatcher> TargetLocator<M> {
    pub fn new(matcher: M, cfg: LocateConfig) -> ClickerResult<Self> {
        cfg.validate()?;
        Ok(Self { matcher, cfg })
    }

    pub fn config(&self) -> &LocateConfig {
        &self.cfg
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Runs up to `max_attempts` capture+match cycles.
    ///
    /// Returns the first `Found` whose confidence exceeds the threshold, or
    /// `NotFound` once every attempt is spent. A capture failure consumes an
    /// attempt; any other error is returned immediately.
    pub fn locate<F>(&self, capture: F) -> ClickerResult<MatchResult>
    where
        F: FnMut() -> ClickerResult<Frame>,
    {
        self.locate_with_cancel(capture, || false)
    }

    /// Like [`locate`](Self::locate), but `cancelled` is polled before every
    /// attempt and ends the search with `NotFound` once it returns `true`.
    pub fn locate_with_cancel<F, C>(&self, mut capture: F, cancelled: C) -> ClickerResult<MatchResult>
    where
        F: FnMut() -> ClickerResult<Frame>,
        C: Fn() -> bool,
    {
        for attempt in 1..=self.cfg.max_attempts {
            if cancelled() {
                trace_event!("locate.cancelled", attempt = attempt);
                return Ok(MatchResult::NotFound);
            }
            trace_debug!("locate.attempt", attempt = attempt);
            let frame = match capture() {
                Ok(frame) => frame,
                Err(err) if err.is_transient() => {
                    let reason = err.to_string();
                    trace_warn!("locate.capture_failed", attempt = attempt, reason = reason.as_str());
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let MatchResult::Found(m) = self.matcher.match_frame(frame.view())? {
                if m.confidence > self.cfg.confidence_threshold {
                    trace_event!(
                        "locate.found",
                        attempt = attempt,
                        x = m.x,
                        y = m.y,
                        confidence = m.confidence
                    );
                    return Ok(MatchResult::Found(m));
                }
                trace_debug!("locate.below_threshold", attempt = attempt, confidence = m.confidence);
            }
        }
        trace_event!("locate.not_found", attempts = self.cfg.max_attempts);
        Ok(MatchResult::NotFound)
    }

    /// Runs [`locate`](Self::locate) and converts a hit into the template
    /// center point, relative to the captured frame.
    pub fn locate_target<F>(&self, capture: F) -> ClickerResult<Option<Point>>
    where
        F: FnMut() -> ClickerResult<Frame>,
    {
        self.locate_target_with_cancel(capture, || false)
    }

    /// Cancellable form of [`locate_target`](Self::locate_target).
    pub fn locate_target_with_cancel<F, C>(
        &self,
        capture: F,
        cancelled: C,
    ) -> ClickerResult<Option<Point>>
    where
        F: FnMut() -> ClickerResult<Frame>,
        C: Fn() -> bool,
    {
        let (tpl_width, tpl_height) = self.matcher.template_size();
        Ok(self
            .locate_with_cancel(capture, cancelled)?
            .found()
            .map(|m| m.center(tpl_width, tpl_height)))
    }
}
