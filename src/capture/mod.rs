//! Frame sources: produce a fresh BGR frame of a screen region on demand.

use crate::geometry::Region;
use crate::image::Frame;
use crate::util::ClickerResult;

#[cfg(feature = "platform")]
mod xcap;

#[cfg(feature = "platform")]
pub use self::xcap::XcapSource;

/// Supplies captures of a fixed screen region.
///
/// Transient failures should be reported as `ClickerError::Capture` so the
/// locator can count them against its attempt budget.
pub trait FrameSource {
    /// Captures `region` as a frame of exactly `region.width() x
    /// region.height()` pixels.
    fn capture(&mut self, region: &Region) -> ClickerResult<Frame>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn capture(&mut self, region: &Region) -> ClickerResult<Frame> {
        (**self).capture(region)
    }
}
