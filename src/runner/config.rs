//! Run configuration for the search and click loops.
//!
//! Every value is fixed at start; nothing here is read from ambient state.

use std::time::Duration;

use crate::geometry::{Point, Region};
use crate::search::{LocateConfig, MatchConfig};
use crate::util::{ClickerError, ClickerResult};

/// Search loop settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Search cycles per second; 0 disables the loop.
    pub rate: f64,
    /// Screen region captured on every attempt.
    pub region: Region,
    /// Displacement from the template center to the click point.
    pub click_offset: Point,
    /// Screen position of the captured region's coordinate system.
    pub origin: Point,
    pub locate: LocateConfig,
    pub matching: MatchConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            region: Region::default(),
            click_offset: Point::new(-65, 40),
            origin: Point::new(0, 0),
            locate: LocateConfig::default(),
            matching: MatchConfig::default(),
        }
    }
}

/// Click loop settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickConfig {
    /// Click cycles per second; 0 disables the loop.
    pub rate: f64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self { rate: 200.0 }
    }
}

/// Complete configuration of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickerConfig {
    pub search: SearchConfig,
    pub click: ClickConfig,
}

impl ClickerConfig {
    /// Checks every parameter without starting anything.
    pub fn validate(&self) -> ClickerResult<()> {
        cycle_interval(self.search.rate)?;
        cycle_interval(self.click.rate)?;
        self.search.locate.validate()?;
        self.search.matching.validate()
    }
}

/// Converts a cycles-per-second rate into a sleep interval.
///
/// A rate of 0 yields `None` (loop disabled). Negative, NaN and infinite
/// rates are rejected.
pub fn cycle_interval(rate: f64) -> ClickerResult<Option<Duration>> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ClickerError::InvalidInput("rate must be a finite, non-negative number"));
    }
    if rate == 0.0 {
        return Ok(None);
    }
    Duration::try_from_secs_f64(1.0 / rate)
        .map(Some)
        .map_err(|_| ClickerError::InvalidInput("rate is too small to derive an interval"))
}
