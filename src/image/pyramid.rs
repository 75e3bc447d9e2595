//! Frame pyramids for coarse-to-fine matching.
//!
//! Each level halves the previous one with a 2x2 box filter applied per
//! channel, rounded to nearest: `dst = (a + b + c + d + 2) / 4`. Odd
//! trailing rows and columns are dropped.

use super::{Frame, FrameView, CHANNELS};
use crate::util::{ClickerError, ClickerResult};

/// Halves `src` in both dimensions.
///
/// Fails with `InvalidDimensions` if either side is below 2 pixels.
pub fn downsample(src: FrameView<'_>) -> ClickerResult<Frame> {
    let dst_width = src.width() / 2;
    let dst_height = src.height() / 2;
    if dst_width == 0 || dst_height == 0 {
        return Err(ClickerError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    let mut data = Vec::with_capacity(dst_width * dst_height * CHANNELS);
    for y in 0..dst_height {
        let (Some(row0), Some(row1)) = (src.row(2 * y), src.row(2 * y + 1)) else {
            return Err(ClickerError::BufferTooSmall {
                needed: (2 * y + 2) * src.stride() * CHANNELS,
                got: src.as_slice().len(),
            });
        };
        for x in 0..dst_width {
            let left = 2 * x * CHANNELS;
            let right = left + CHANNELS;
            for c in 0..CHANNELS {
                let sum = u16::from(row0[left + c])
                    + u16::from(row0[right + c])
                    + u16::from(row1[left + c])
                    + u16::from(row1[right + c]);
                data.push(((sum + 2) / 4) as u8);
            }
        }
    }
    Frame::new(data, dst_width, dst_height)
}

/// Owned frame pyramid; level 0 is the base resolution.
pub struct FramePyramid<'a> {
    base: FrameView<'a>,
    coarser: Vec<Frame>,
}

impl<'a> FramePyramid<'a> {
    /// Builds up to `levels` levels (at least the base), stopping early once
    /// a level can no longer be halved.
    pub fn build(base: FrameView<'a>, levels: usize) -> ClickerResult<Self> {
        let mut coarser: Vec<Frame> = Vec::with_capacity(levels.saturating_sub(1));
        while coarser.len() + 1 < levels {
            let src = coarser.last().map_or(base, Frame::view);
            if src.width() < 2 || src.height() < 2 {
                break;
            }
            let next = downsample(src)?;
            coarser.push(next);
        }
        Ok(Self { base, coarser })
    }

    /// Returns the number of levels, including the base.
    pub fn len(&self) -> usize {
        self.coarser.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns a view of level `index`.
    pub fn level(&self, index: usize) -> Option<FrameView<'_>> {
        match index {
            0 => Some(self.base),
            _ => self.coarser.get(index - 1).map(Frame::view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{downsample, FramePyramid};
    use crate::image::{Frame, FrameView};

    #[test]
    fn downsample_averages_each_channel() {
        let data = [
            0, 10, 200, 2, 10, 201, 9, 9, 9, //
            4, 10, 203, 5, 11, 204, 9, 9, 9, //
        ];
        let view = FrameView::from_slice(&data, 3, 2).unwrap();
        let half = downsample(view).unwrap();
        assert_eq!((half.width(), half.height()), (1, 1));
        // (0+2+4+5+2)/4 = 2, (10+10+10+11+2)/4 = 10, (200+201+203+204+2)/4 = 202
        assert_eq!(half.data(), &[2, 10, 202]);
    }

    #[test]
    fn pyramid_stops_when_too_small() {
        let frame = Frame::filled(9, 5, [1, 2, 3]).unwrap();
        let pyramid = FramePyramid::build(frame.view(), 8).unwrap();
        assert_eq!(pyramid.len(), 3);
        let sizes: Vec<_> = (0..pyramid.len())
            .map(|i| {
                let level = pyramid.level(i).unwrap();
                (level.width(), level.height())
            })
            .collect();
        assert_eq!(sizes, [(9, 5), (4, 2), (2, 1)]);
        assert!(pyramid.level(3).is_none());

        let single = FramePyramid::build(frame.view(), 1).unwrap();
        assert_eq!(single.len(), 1);
    }
}
