//! Scalar reference kernel for score evaluation.

use crate::image::{FrameView, CHANNELS};
use crate::kernel::{placement_fits, zncc_from_sums, Kernel};
use crate::template::TemplatePlan;

/// Scalar ZNCC kernel over interleaved BGR samples.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    fn score_at(
        frame: FrameView<'_>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32 {
        if !placement_fits(frame, plan, x, y) {
            return f32::NEG_INFINITY;
        }

        let row_len = plan.width() * CHANNELS;
        let x0 = x * CHANNELS;
        let t_prime = plan.t_prime();

        // Integer window sums are exact; only the dot product is floating.
        let mut dot = 0.0f64;
        let mut sum_i = 0u64;
        let mut sum_i2 = 0u64;
        for ty in 0..plan.height() {
            let Some(row) = frame.row(y + ty) else {
                return f32::NEG_INFINITY;
            };
            let window = &row[x0..x0 + row_len];
            let tpl_row = &t_prime[ty * row_len..(ty + 1) * row_len];
            for (&value, &t) in window.iter().zip(tpl_row) {
                let v = value as u64;
                dot += t as f64 * value as f64;
                sum_i += v;
                sum_i2 += v * v;
            }
        }

        zncc_from_sums(plan, dot, sum_i as f64, sum_i2 as f64, min_var_i)
    }
}
