//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The dot product over a template row is vectorized to process 8 samples at
//! a time using `f32x8`, and each row's partial dot is widened to `f64`.
//! Window sums stay in integers so the variance cancellation is exact.

use crate::image::{FrameView, CHANNELS};
use crate::kernel::{placement_fits, zncc_from_sums, Kernel};
use crate::template::TemplatePlan;
use wide::f32x8;

const LANES: usize = 8;

#[inline]
fn load_u8x8_as_f32x8(slice: &[u8]) -> f32x8 {
    f32x8::from([
        slice[0] as f32,
        slice[1] as f32,
        slice[2] as f32,
        slice[3] as f32,
        slice[4] as f32,
        slice[5] as f32,
        slice[6] as f32,
        slice[7] as f32,
    ])
}

#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

#[inline]
fn hsum(v: f32x8) -> f64 {
    v.to_array().iter().map(|&x| x as f64).sum()
}

/// SIMD ZNCC kernel over interleaved BGR samples.
pub struct ZnccSimd;

impl Kernel for ZnccSimd {
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
        let simd_end = row_len / LANES * LANES;
        let x0 = x * CHANNELS;
        let t_prime = plan.t_prime();

        let mut dot = 0.0f64;
        let mut sum_i = 0u64;
        let mut sum_i2 = 0u64;
        for ty in 0..plan.height() {
            let Some(row) = frame.row(y + ty) else {
                return f32::NEG_INFINITY;
            };
            let window = &row[x0..x0 + row_len];
            let tpl_row = &t_prime[ty * row_len..(ty + 1) * row_len];

            let mut dot_vec = f32x8::ZERO;
            let mut tx = 0;
            while tx < simd_end {
                let img_vals = load_u8x8_as_f32x8(&window[tx..]);
                let tpl_vals = load_f32x8(&tpl_row[tx..]);
                dot_vec += tpl_vals * img_vals;
                tx += LANES;
            }
            dot += hsum(dot_vec);
            for (&value, &t) in window[simd_end..].iter().zip(&tpl_row[simd_end..]) {
                dot += t as f64 * value as f64;
            }

            for &value in window {
                let v = u64::from(value);
                sum_i += v;
                sum_i2 += v * v;
            }
        }

        zncc_from_sums(plan, dot, sum_i as f64, sum_i2 as f64, min_var_i)
    }
}

#[cfg(test)]
mod tests {
    use super::ZnccSimd;
    use crate::image::Frame;
    use crate::kernel::scalar::ZnccScalar;
    use crate::kernel::Kernel;
    use crate::template::TemplatePlan;

    #[test]
    fn simd_scores_match_scalar() {
        let (width, height) = (40, 30);
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                for c in 0..3 {
                    data.push(((x * 13) ^ (y * 7) ^ (x * y) ^ (c * 29)) as u8);
                }
            }
        }
        let frame = Frame::new(data, width, height).unwrap();
        // 7 px wide gives 21 samples per row, exercising the scalar tail.
        let tpl = frame.view().roi(11, 9, 7, 5).unwrap().to_frame();
        let plan = TemplatePlan::from_view(tpl.view()).unwrap();

        for (x, y) in [(0, 0), (11, 9), (20, 17), (33, 25)] {
            let scalar = ZnccScalar::score_at(frame.view(), &plan, x, y, 1e-6);
            let simd = ZnccSimd::score_at(frame.view(), &plan, x, y, 1e-6);
            assert!((scalar - simd).abs() < 1e-4, "({x}, {y}): {scalar} vs {simd}");
        }

        let best = ZnccSimd::scan_full(frame.view(), &plan, 1e-6).unwrap().unwrap();
        assert_eq!((best.x, best.y), (11, 9));
    }

    #[test]
    fn bright_near_flat_windows_keep_exact_variance() {
        // 200 px rows give 600 samples per row; per-lane f32 sums of 255^2
        // would exceed 2^24 and lose the +-1 texture below.
        let (width, height) = (200, 4);
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 254 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        let frame = Frame::new(data, width, height).unwrap();
        let plan = TemplatePlan::from_view(frame.view()).unwrap();

        let scalar = ZnccScalar::score_at(frame.view(), &plan, 0, 0, 0.2);
        let simd = ZnccSimd::score_at(frame.view(), &plan, 0, 0, 0.2);
        assert!((scalar - 1.0).abs() < 1e-4);
        assert!((scalar - simd).abs() < 1e-4, "{scalar} vs {simd}");

        // Per-sample variance is 0.25; a floor above it rejects the window.
        assert_eq!(ZnccSimd::score_at(frame.view(), &plan, 0, 0, 0.3), f32::NEG_INFINITY);
    }
}
