//! Least-squares slope of a data set on linear and log-log axes.
//!
//! ```text
//! m = Σ(xi − x̄)(yi − ȳ) / Σ(xi − x̄)²
//! ```
//!
//! A series with a constant `x` has a zero denominator; the slope is then NaN
//! (or infinite) rather than an error.

use crate::error::{FractalError, Result};

/// Slope of the least-squares line through `(xs[i], ys[i])`.
///
/// Fails on empty input or mismatched lengths.
pub fn slope_linear(xs: &[f64], ys: &[f64]) -> Result<f64> {
  check_sets(xs, ys)?;

  let avg_x = average(xs);
  let avg_y = average(ys);

  let (covariance, variance) = xs
    .iter()
    .zip(ys)
    .fold((0.0, 0.0), |(cov, var), (&x, &y)| {
      let dx = x - avg_x;
      (cov + dx * (y - avg_y), var + dx * dx)
    });

  Ok(covariance / variance)
}

/// Slope of the least-squares line through `(log_base(xs[i]), log_base(ys[i]))`.
///
/// This is the power-law exponent of `y = c·x^m`. Fails on empty input,
/// mismatched lengths, or a base that is not finite, `<= 0`, or `== 1`.
pub fn slope_log_log(xs: &[f64], ys: &[f64], base: f64) -> Result<f64> {
  check_sets(xs, ys)?;

  if !base.is_finite() || base <= 0.0 || base == 1.0 {
    return Err(FractalError::InvalidLogBase(base));
  }

  let log_xs: Vec<f64> = xs.iter().map(|x| x.log(base)).collect();
  let log_ys: Vec<f64> = ys.iter().map(|y| y.log(base)).collect();

  slope_linear(&log_xs, &log_ys)
}

fn check_sets(xs: &[f64], ys: &[f64]) -> Result<()> {
  if xs.is_empty() || ys.is_empty() || xs.len() != ys.len() {
    return Err(FractalError::InvalidInput {
      xs: xs.len(),
      ys: ys.len(),
    });
  }
  Ok(())
}

#[inline]
fn average(set: &[f64]) -> f64 {
  set.iter().sum::<f64>() / set.len() as f64
}
