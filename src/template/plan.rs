//! Template plan precomputation for ZNCC scoring.
//!
//! All three channels of every template pixel are treated as one sample
//! vector of length `width * height * 3`, so a single mean and variance
//! describe the whole template.

use crate::image::{FrameView, CHANNELS};
use crate::util::{ClickerError, ClickerResult};

/// Precomputed statistics and zero-mean samples for template matching.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f32,
    var_t: f32,
    t_prime: Vec<f32>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: FrameView<'_>) -> ClickerResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(ClickerError::InvalidDimensions { width, height })?;

        let mut samples = Vec::with_capacity(count);
        for y in 0..height {
            let row = tpl.row(y).ok_or(ClickerError::BufferTooSmall {
                needed: (y + 1) * tpl.stride() * CHANNELS,
                got: tpl.as_slice().len(),
            })?;
            samples.extend(row.iter().map(|&v| v as f64));
        }

        let count_f = count as f64;
        let mean = samples.iter().sum::<f64>() / count_f;
        let var_t: f64 = samples.iter().map(|v| (v - mean) * (v - mean)).sum();
        if var_t / count_f <= 1e-8 {
            return Err(ClickerError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        let t_prime = samples.iter().map(|v| (v - mean) as f32).collect();
        Ok(Self {
            width,
            height,
            mean: mean as f32,
            var_t: var_t as f32,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of samples (pixels times channels).
    pub fn sample_count(&self) -> usize {
        self.t_prime.len()
    }

    /// Returns the mean sample value.
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn var_t(&self) -> f32 {
        self.var_t
    }

    /// Returns the zero-mean samples in row-major, channel-interleaved order.
    pub fn t_prime(&self) -> &[f32] {
        &self.t_prime
    }
}
