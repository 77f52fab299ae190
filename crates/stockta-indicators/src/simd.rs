//! SIMD helpers for window accumulation.
//!
//! These use the `wide` crate for portable SIMD and back the exact
//! (re)synchronisation of the rolling accumulators.

use wide::f64x4;

/// Sum and sum of squares of `data - shift` in one pass.
///
/// Shifting by a representative value of the series keeps the sum of
/// squares small, which limits cancellation when the variance is derived
/// from the two sums.
pub fn shifted_sums_simd(data: &[f64], shift: f64) -> (f64, f64) {
    let chunks = data.len() / 4;
    let shift_vec = f64x4::splat(shift);
    let mut sum_vec = f64x4::splat(0.0);
    let mut sq_vec = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        let diff = values - shift_vec;
        sum_vec += diff;
        sq_vec += diff * diff;
    }

    let mut sum = sum_vec.reduce_add();
    let mut sum_sq = sq_vec.reduce_add();

    for &value in &data[(chunks * 4)..] {
        let diff = value - shift;
        sum += diff;
        sum_sq += diff * diff;
    }

    (sum, sum_sq)
}
