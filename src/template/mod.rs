//! Template storage and planning utilities.

use crate::image::{Frame, FrameView};
use crate::util::ClickerResult;

mod plan;

pub use plan::TemplatePlan;

/// Owned reference image of the target, fixed for the process lifetime.
#[derive(Clone, Debug)]
pub struct Template {
    img: Frame,
}

impl Template {
    /// Creates a template from a contiguous BGR buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ClickerResult<Self> {
        let img = Frame::new(data, width, height)?;
        Ok(Self { img })
    }

    /// Wraps an already captured or loaded frame.
    pub fn from_frame(img: Frame) -> Self {
        Self { img }
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> FrameView<'_> {
        self.img.view()
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.img.width(), self.img.height())
    }
}
