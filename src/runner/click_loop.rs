//! Constant-rate clicking, independent of search results.

use std::time::Duration;

use super::config::{cycle_interval, ClickConfig};
use super::ShutdownSignal;
use crate::actuator::PointerActuator;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{ClickerError, ClickerResult};

/// Counters reported when the click loop exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickSummary {
    pub clicks: u64,
}

/// Clicks wherever the pointer currently is, once per interval.
pub struct ClickLoop<A> {
    actuator: A,
    interval: Duration,
    signal: ShutdownSignal,
    clicks: u64,
}

impl<A: PointerActuator> ClickLoop<A> {
    /// Builds a loop; fails if `cfg.rate` is invalid or zero.
    pub fn new(actuator: A, cfg: &ClickConfig, signal: ShutdownSignal) -> ClickerResult<Self> {
        let interval = cycle_interval(cfg.rate)?
            .ok_or(ClickerError::InvalidInput("click loop is disabled by a zero rate"))?;
        Ok(Self {
            actuator,
            interval,
            signal,
            clicks: 0,
        })
    }

    /// Clicks until the shutdown signal is observed.
    pub fn run(mut self) -> ClickerResult<ClickSummary> {
        let _span = trace_span!("click_loop").entered();
        trace_event!("click.start", interval_us = self.interval.as_micros() as u64);

        while !self.signal.is_set() {
            if let Err(err) = self.actuator.click() {
                self.signal.trigger();
                let reason = err.to_string();
                trace_warn!("click.failed", clicks = self.clicks, reason = reason.as_str());
                return Err(err);
            }
            self.clicks += 1;
            self.signal.sleep(self.interval);
        }

        trace_event!("click.exit", clicks = self.clicks);
        Ok(ClickSummary {
            clicks: self.clicks,
        })
    }
}
