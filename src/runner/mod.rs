//! Search/click coordination.
//!
//! `Clicker` validates a [`ClickerConfig`] against the template, then runs
//! the search loop and the click loop on their own threads. The two loops
//! share nothing but a [`ShutdownSignal`]; each owns its actuator, built by
//! a factory on the loop's own thread so platform handles never cross
//! threads.

use std::thread::{self, Scope, ScopedJoinHandle};

use crate::actuator::PointerActuator;
use crate::capture::FrameSource;
use crate::search::{Matcher, TargetLocator};
use crate::template::Template;
use crate::trace::trace_event;
use crate::util::{ClickerError, ClickerResult};

mod click_loop;
mod config;
mod search_loop;
mod shutdown;
mod stop_keys;

pub use click_loop::{ClickLoop, ClickSummary};
pub use config::{cycle_interval, ClickConfig, ClickerConfig, SearchConfig};
pub use search_loop::{SearchLoop, SearchState, SearchSummary};
pub use shutdown::ShutdownSignal;
#[cfg(feature = "platform")]
pub use stop_keys::listen_for_stop_keys;
pub use stop_keys::StopKeys;

/// What each started loop reported; `None` for a loop disabled by rate 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub search: Option<SearchSummary>,
    pub click: Option<ClickSummary>,
}

/// Validated run: template, locator and loop settings.
pub struct Clicker {
    config: ClickerConfig,
    locator: TargetLocator<Matcher>,
    signal: ShutdownSignal,
}

impl Clicker {
    /// Validates `config` and `template`; nothing is started.
    ///
    /// Fails when any rate or locate parameter is invalid, when the template
    /// is flat, or when it does not fit inside the search region.
    pub fn new(config: ClickerConfig, template: Template) -> ClickerResult<Self> {
        config.validate()?;
        let region = config.search.region;
        if template.width() > region.width() || template.height() > region.height() {
            return Err(ClickerError::TemplateTooLarge {
                tpl_width: template.width(),
                tpl_height: template.height(),
                frame_width: region.width(),
                frame_height: region.height(),
            });
        }
        let matcher = Matcher::new(&template)?.with_config(config.search.matching);
        let locator = TargetLocator::new(matcher, config.search.locate)?;
        Ok(Self {
            config,
            locator,
            signal: ShutdownSignal::new(),
        })
    }

    pub fn config(&self) -> &ClickerConfig {
        &self.config
    }

    /// Returns a handle to the run's shutdown signal.
    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// Runs the enabled loops until the shutdown signal is raised.
    ///
    /// `make_source` is called once on the search thread; `make_actuator`
    /// once on each loop thread. Returns the first fatal error (the search
    /// loop's takes precedence) after both loops have stopped.
    pub fn run<S, A, FS, FA>(self, make_source: FS, make_actuator: FA) -> ClickerResult<RunReport>
    where
        S: FrameSource,
        A: PointerActuator,
        FS: FnOnce() -> ClickerResult<S> + Send,
        FA: Fn() -> ClickerResult<A> + Sync,
    {
        let Clicker {
            config,
            locator,
            signal,
        } = self;
        let search_enabled = cycle_interval(config.search.rate)?.is_some();
        let click_enabled = cycle_interval(config.click.rate)?.is_some();
        trace_event!(
            "clicker.start",
            search = search_enabled,
            click = click_enabled
        );

        let make_actuator = &make_actuator;
        let report: ClickerResult<RunReport> = thread::scope(|scope| {
            let search = search_enabled.then(|| {
                let signal_for_loop = signal.clone();
                spawn_loop(scope, "search", &signal, move || {
                    let source = make_source()?;
                    let actuator = make_actuator()?;
                    SearchLoop::new(locator, source, actuator, &config.search, signal_for_loop)?.run()
                })
            });
            let click = click_enabled.then(|| {
                let signal_for_loop = signal.clone();
                spawn_loop(scope, "click", &signal, move || {
                    let actuator = make_actuator()?;
                    ClickLoop::new(actuator, &config.click, signal_for_loop)?.run()
                })
            });

            let search = search.map(|handle| handle.and_then(|h| join_loop(h, "search")));
            let click = click.map(|handle| handle.and_then(|h| join_loop(h, "click")));
            Ok(RunReport {
                search: search.transpose()?,
                click: click.transpose()?,
            })
        });

        trace_event!("clicker.stopped", ok = report.is_ok());
        report
    }
}

/// Spawns a loop thread that raises `signal` when it fails or panics.
fn spawn_loop<'scope, 'env, T, F>(
    scope: &'scope Scope<'scope, 'env>,
    name: &'static str,
    signal: &ShutdownSignal,
    body: F,
) -> ClickerResult<ScopedJoinHandle<'scope, ClickerResult<T>>>
where
    T: Send + 'scope,
    F: FnOnce() -> ClickerResult<T> + Send + 'scope,
{
    let loop_signal = signal.clone();
    thread::Builder::new()
        .name(name.into())
        .spawn_scoped(scope, move || {
            let _guard = loop_signal.panic_guard();
            let result = body();
            if result.is_err() {
                loop_signal.trigger();
            }
            result
        })
        .map_err(|err| {
            signal.trigger();
            ClickerError::LoopSpawn {
                name,
                reason: err.to_string(),
            }
        })
}

fn join_loop<T>(handle: ScopedJoinHandle<'_, ClickerResult<T>>, name: &'static str) -> ClickerResult<T> {
    handle
        .join()
        .map_err(|_| ClickerError::LoopPanicked { name })?
}
