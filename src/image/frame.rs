//! Owned, contiguous BGR frames.

use super::{FrameView, CHANNELS};
use crate::util::{ClickerError, ClickerResult};

/// Owned contiguous BGR image, produced fresh by every capture.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Frame {
    /// Creates a frame from a contiguous BGR buffer of exactly
    /// `width * height * 3` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ClickerResult<Self> {
        let needed = expected_len(width, height, CHANNELS)?;
        if data.len() < needed {
            return Err(ClickerError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ClickerError::InvalidDimensions { width, height });
        }
        Ok(Self::from_parts(data, width, height))
    }

    /// Creates a frame filled with a single BGR color.
    pub fn filled(width: usize, height: usize, bgr: [u8; CHANNELS]) -> ClickerResult<Self> {
        let needed = expected_len(width, height, CHANNELS)?;
        let data = bgr.iter().copied().cycle().take(needed).collect();
        Ok(Self::from_parts(data, width, height))
    }

    /// Converts an interleaved RGB buffer into a BGR frame.
    pub fn from_rgb(rgb: &[u8], width: usize, height: usize) -> ClickerResult<Self> {
        Self::from_rgb_like(rgb, width, height, 3)
    }

    /// Converts an interleaved RGBA buffer into a BGR frame, dropping alpha.
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> ClickerResult<Self> {
        Self::from_rgb_like(rgba, width, height, 4)
    }

    fn from_rgb_like(src: &[u8], width: usize, height: usize, src_channels: usize) -> ClickerResult<Self> {
        let needed = expected_len(width, height, src_channels)?;
        if src.len() < needed {
            return Err(ClickerError::BufferTooSmall {
                needed,
                got: src.len(),
            });
        }
        if src.len() > needed {
            return Err(ClickerError::InvalidDimensions { width, height });
        }
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for px in src.chunks_exact(src_channels) {
            data.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        Ok(Self::from_parts(data, width, height))
    }

    pub(crate) fn from_parts(data: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns a borrowed view of the frame.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the contiguous BGR bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies `patch` into this frame with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, patch: FrameView<'_>, x: usize, y: usize) -> ClickerResult<()> {
        let end_x = x.checked_add(patch.width());
        let end_y = y.checked_add(patch.height());
        let fits = matches!((end_x, end_y), (Some(ex), Some(ey)) if ex <= self.width && ey <= self.height);
        if !fits {
            return Err(ClickerError::RoiOutOfBounds {
                x,
                y,
                width: patch.width(),
                height: patch.height(),
                img_width: self.width,
                img_height: self.height,
            });
        }
        let row_bytes = patch.width() * CHANNELS;
        for py in 0..patch.height() {
            let Some(src) = patch.row(py) else { continue };
            let start = ((y + py) * self.width + x) * CHANNELS;
            self.data[start..start + row_bytes].copy_from_slice(src);
        }
        Ok(())
    }
}

fn expected_len(width: usize, height: usize, channels: usize) -> ClickerResult<usize> {
    if width == 0 || height == 0 {
        return Err(ClickerError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(ClickerError::InvalidDimensions { width, height })
}
