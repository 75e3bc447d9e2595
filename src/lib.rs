//! cvclicker is a template-driven auto-clicker built on a CPU ZNCC matcher.
//!
//! The crate locates a reference image on screen with zero-mean normalized
//! cross-correlation, parks the pointer on the located target and clicks at
//! a constant rate from a second loop. Screen capture, pointer control and
//! stop-key listening sit behind small traits; platform adapters are enabled
//! with the `platform` feature. Row-parallel scanning is available via the
//! `rayon` feature and an `f32x8` kernel via `simd`.

pub mod actuator;
mod candidate;
pub mod capture;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod runner;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;

pub use actuator::{pointer_target, PointerActuator};
pub use candidate::best::Peak;
pub use capture::FrameSource;
pub use geometry::{Point, Region};
pub use image::{Frame, FrameView};
pub use kernel::Kernel;
pub use runner::{
    cycle_interval, ClickConfig, ClickLoop, ClickSummary, Clicker, ClickerConfig, RunReport,
    SearchConfig, SearchLoop, SearchState, SearchSummary, ShutdownSignal, StopKeys,
};
pub use search::{
    match_template, LocateConfig, Match, MatchConfig, MatchResult, Matcher, TargetLocator,
    TemplateMatcher,
};
pub use template::{Template, TemplatePlan};
pub use util::{ClickerError, ClickerResult};
