//! Screen capture backed by `xcap`.
//!
//! Captures the primary monitor and crops the configured region. Region
//! coordinates are taken relative to the primary monitor's top-left corner.

use xcap::Monitor;

use super::FrameSource;
use crate::geometry::Region;
use crate::image::Frame;
use crate::util::{ClickerError, ClickerResult};

/// Frame source reading the primary monitor.
pub struct XcapSource {
    monitor: Monitor,
}

impl XcapSource {
    /// Opens the primary monitor, falling back to the first one listed.
    pub fn primary() -> ClickerResult<Self> {
        let monitors = Monitor::all().map_err(|err| ClickerError::Capture {
            reason: err.to_string(),
        })?;
        let index = monitors.iter().position(|m| m.is_primary()).unwrap_or(0);
        let monitor = monitors
            .into_iter()
            .nth(index)
            .ok_or_else(|| ClickerError::Capture {
                reason: "no monitors found".into(),
            })?;
        Ok(Self { monitor })
    }
}

impl FrameSource for XcapSource {
    fn capture(&mut self, region: &Region) -> ClickerResult<Frame> {
        let image = self
            .monitor
            .capture_image()
            .map_err(|err| ClickerError::Capture {
                reason: err.to_string(),
            })?;
        let screen = Frame::from_rgba(image.as_raw(), image.width() as usize, image.height() as usize)
            .map_err(|err| ClickerError::Capture {
                reason: err.to_string(),
            })?;
        if region.left() < 0 || region.top() < 0 {
            return Err(ClickerError::InvalidRegion {
                left: region.left(),
                top: region.top(),
                right: region.right(),
                bottom: region.bottom(),
            });
        }
        // Out-of-monitor regions surface as RoiOutOfBounds, fatal to the locator.
        let crop = screen.view().roi(
            region.left() as usize,
            region.top() as usize,
            region.width(),
            region.height(),
        )?;
        Ok(crop.to_frame())
    }
}
