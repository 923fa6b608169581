//! Power-distributed random values for synthetic graph fixtures.
//!
//! A standard normal draw is folded to `|x|`, clamped to 3 standard
//! deviations and scaled into `[min, max]`. Values near `min` are the most
//! likely, values near `max` the rarest.

use std::f64::consts::TAU;

use rand::Rng;

/// Clamp for the folded normal draw, in standard deviations.
const SIGMA_CLAMP: f64 = 3.0;

/// Standard normal sample (Box-Muller).
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
  // (0, 1] so the logarithm stays finite
  let u1 = 1.0 - rng.random::<f64>();
  let u2 = rng.random::<f64>();
  (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Fraction of the `[min, max]` span for one draw, in `[0, 1]`.
#[inline]
fn folded_fraction<R: Rng + ?Sized>(rng: &mut R) -> f64 {
  gaussian(rng).abs().min(SIGMA_CLAMP) / SIGMA_CLAMP
}

/// Integer in `[min, max]`, truncated toward `min`.
///
/// `max < min` always yields `min`.
pub fn power_distributed_int<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
  let span = max.saturating_sub(min) as f64;
  min + (span * folded_fraction(rng)) as usize
}

/// Real value in `[min, max]`.
pub fn power_distributed_f64<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
  min + (max - min) * folded_fraction(rng)
}
