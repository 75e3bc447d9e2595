//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::Frame;
use crate::template::Template;
use crate::util::{ClickerError, ClickerResult};
use std::path::Path;

/// Creates a BGR frame from an RGB image buffer.
pub fn frame_from_rgb_image(img: &image::RgbImage) -> ClickerResult<Frame> {
    Frame::from_rgb(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates a BGR frame from a dynamic image, dropping any alpha channel.
pub fn frame_from_dynamic_image(img: &image::DynamicImage) -> ClickerResult<Frame> {
    frame_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk as a BGR frame.
pub fn load_frame<P: AsRef<Path>>(path: P) -> ClickerResult<Frame> {
    let img = image::open(path).map_err(|err| ClickerError::ImageIo {
        reason: err.to_string(),
    })?;
    frame_from_dynamic_image(&img)
}

/// Loads the reference template from disk.
pub fn load_template<P: AsRef<Path>>(path: P) -> ClickerResult<Template> {
    Ok(Template::from_frame(load_frame(path)?))
}
