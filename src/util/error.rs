//! Error types for cvclicker.

use thiserror::Error;

/// Result alias for cvclicker operations.
pub type ClickerResult<T> = std::result::Result<T, ClickerError>;

/// Errors that can occur while matching, locating or driving the pointer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClickerError {
    /// A parameter is out of its valid range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer is shorter than the declared image.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Region bounds are not ordered.
    #[error("invalid region: left={left} top={top} right={right} bottom={bottom}")]
    InvalidRegion {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
    /// A sub-view does not fit inside its parent image.
    #[error(
        "roi {width}x{height} at ({x}, {y}) is outside a {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The template does not fit inside the frame.
    #[error(
        "template {tpl_width}x{tpl_height} is larger than frame {frame_width}x{frame_height}"
    )]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        frame_width: usize,
        frame_height: usize,
    },
    /// The template cannot produce a normalized score.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// Loading or decoding an image failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
    /// The frame source could not produce an image.
    #[error("capture failed: {reason}")]
    Capture { reason: String },
    /// A pointer move or button action could not be performed.
    #[error("pointer actuator failed: {reason}")]
    Actuator { reason: String },
    /// The stop-key listener could not be started.
    #[error("stop key listener failed: {reason}")]
    StopListener { reason: String },
    /// A loop thread could not be spawned.
    #[error("failed to spawn {name} loop: {reason}")]
    LoopSpawn { name: &'static str, reason: String },
    /// A loop thread panicked.
    #[error("{name} loop panicked")]
    LoopPanicked { name: &'static str },
}

impl ClickerError {
    /// Returns true for errors caused by invalid parameters or images.
    ///
    /// These are fatal at startup: the loops are never started.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidDimensions { .. }
                | Self::BufferTooSmall { .. }
                | Self::InvalidStride { .. }
                | Self::InvalidRegion { .. }
                | Self::RoiOutOfBounds { .. }
                | Self::TemplateTooLarge { .. }
                | Self::DegenerateTemplate { .. }
                | Self::ImageIo { .. }
        )
    }

    /// Returns true for errors a single search attempt may absorb.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Capture { .. })
    }
}
