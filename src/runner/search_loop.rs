//! Periodic re-location of the target and pointer parking.

use std::time::Duration;

use super::config::{cycle_interval, SearchConfig};
use super::ShutdownSignal;
use crate::actuator::PointerActuator;
use crate::capture::FrameSource;
use crate::geometry::{Point, Region};
use crate::search::{TargetLocator, TemplateMatcher};
use crate::trace::{trace_debug, trace_event, trace_span, trace_warn};
use crate::util::{ClickerError, ClickerResult};

/// Search loop state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// No confident match on the last cycle (or no cycle yet).
    Searching,
    /// The last cycle found the target and the pointer is parked on it.
    TargetAcquired,
    /// The shutdown signal was observed; terminal.
    Stopped,
}

/// Counters reported when the search loop exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    pub cycles: u64,
    pub moves: u64,
    pub last_target: Option<Point>,
    pub state: SearchState,
}

/// Periodically locates the target and moves the pointer when it moved.
pub struct SearchLoop<M, S, A> {
    locator: TargetLocator<M>,
    source: S,
    actuator: A,
    region: Region,
    click_offset: Point,
    origin: Point,
    interval: Duration,
    signal: ShutdownSignal,
    state: SearchState,
    last_target: Option<Point>,
    cycles: u64,
    moves: u64,
}

impl<M, S, A> SearchLoop<M, S, A>
where
    M: TemplateMatcher,
    S: FrameSource,
    A: PointerActuator,
{
    /// Builds a loop; fails if `cfg.rate` is invalid or zero.
    pub fn new(
        locator: TargetLocator<M>,
        source: S,
        actuator: A,
        cfg: &SearchConfig,
        signal: ShutdownSignal,
    ) -> ClickerResult<Self> {
        let interval = cycle_interval(cfg.rate)?
            .ok_or(ClickerError::InvalidInput("search loop is disabled by a zero rate"))?;
        Ok(Self {
            locator,
            source,
            actuator,
            region: cfg.region,
            click_offset: cfg.click_offset,
            origin: cfg.origin,
            interval,
            signal,
            state: SearchState::Searching,
            last_target: None,
            cycles: 0,
            moves: 0,
        })
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Last target center (frame-relative) the pointer was moved to.
    pub fn last_target(&self) -> Option<Point> {
        self.last_target
    }

    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            cycles: self.cycles,
            moves: self.moves,
            last_target: self.last_target,
            state: self.state,
        }
    }

    /// Runs one search cycle without sleeping.
    ///
    /// The shutdown signal is polled between locate attempts. Once it is
    /// raised the cycle ends without moving the pointer.
    pub fn step(&mut self) -> ClickerResult<SearchState> {
        let region = self.region;
        let source = &mut self.source;
        let signal = &self.signal;
        let located = self
            .locator
            .locate_target_with_cancel(|| source.capture(&region), || signal.is_set())?;
        self.cycles += 1;

        match located {
            _ if self.signal.is_set() => {
                trace_debug!("search.cancelled", cycle = self.cycles);
            }
            None => {
                trace_event!("search.no_target", cycle = self.cycles);
                self.state = SearchState::Searching;
            }
            Some(point) if self.last_target == Some(point) => {
                trace_debug!("search.target_unchanged", x = point.x, y = point.y);
                self.state = SearchState::TargetAcquired;
            }
            Some(point) => {
                let moved = self
                    .actuator
                    .move_to_target(point, self.click_offset, self.origin)?;
                self.last_target = Some(point);
                self.moves += 1;
                self.state = SearchState::TargetAcquired;
                trace_event!("search.target_updated", x = moved.x, y = moved.y);
            }
        }
        Ok(self.state)
    }

    /// Cycles until the shutdown signal is observed.
    ///
    /// A fatal error raises the signal before it is returned, so a sibling
    /// loop stops within its own interval.
    pub fn run(mut self) -> ClickerResult<SearchSummary> {
        let _span = trace_span!("search_loop").entered();
        trace_event!(
            "search.start",
            interval_ms = self.interval.as_millis() as u64,
            width = self.region.width(),
            height = self.region.height()
        );

        loop {
            if self.signal.is_set() {
                self.state = SearchState::Stopped;
                break;
            }
            if let Err(err) = self.step() {
                self.signal.trigger();
                let reason = err.to_string();
                trace_warn!("search.failed", reason = reason.as_str());
                return Err(err);
            }
            self.signal.sleep(self.interval);
        }

        trace_event!("search.exit", cycles = self.cycles, moves = self.moves);
        Ok(self.summary())
    }
}
