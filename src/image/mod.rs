//! Frame buffers and borrowed views.
//!
//! Pixels are stored as interleaved BGR triples. `FrameView` is a borrowed 2D
//! view into a byte buffer with an explicit stride. The stride counts pixels
//! between the starts of consecutive rows, so a stride larger than the width
//! represents padded rows. ROI slices are zero-copy views into the same
//! backing slice and retain the original stride.

use crate::util::{ClickerError, ClickerResult};

mod frame;
#[cfg(feature = "image-io")]
pub mod io;
pub mod pyramid;

pub use frame::Frame;

/// Number of interleaved channels per pixel (B, G, R).
pub const CHANNELS: usize = 3;

/// Borrowed BGR view with an explicit stride.
#[derive(Copy, Clone)]
pub struct FrameView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> FrameView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> ClickerResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride in pixels.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> ClickerResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(ClickerError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the BGR triple at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; CHANNELS]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x)?
            .checked_mul(CHANNELS)?;
        let px = self.data.get(start..start + CHANNELS)?;
        Some([px[0], px[1], px[2]])
    }

    /// Returns the bytes of row `y`, `width * CHANNELS` long.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?.checked_mul(CHANNELS)?;
        let end = start.checked_add(self.width * CHANNELS)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> ClickerResult<FrameView<'a>> {
        if width == 0 || height == 0 {
            return Err(ClickerError::InvalidDimensions { width, height });
        }
        let out_of_bounds = ClickerError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = (y * self.stride + x) * CHANNELS;
        let data = self.data.get(start..).ok_or(ClickerError::BufferTooSmall {
            needed: start.saturating_add(CHANNELS),
            got: self.data.len(),
        })?;
        FrameView::new(data, width, height, self.stride)
    }

    /// Copies the view into a contiguous owned frame.
    pub fn to_frame(&self) -> Frame {
        let mut data = Vec::with_capacity(self.width * self.height * CHANNELS);
        for y in 0..self.height {
            if let Some(row) = self.row(y) {
                data.extend_from_slice(row);
            }
        }
        Frame::from_parts(data, self.width, self.height)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> ClickerResult<usize> {
    if width == 0 || height == 0 {
        return Err(ClickerError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(ClickerError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(ClickerError::InvalidDimensions { width, height })
}
