//! Defaults and limits for box counting.
//!
//! The radius defaults mirror the statistic's out-of-the-box parameters:
//! box radii 1 through 16, all available cores, log-log fit in base 2.

/// Largest worker count a pool accepts.
pub const MAX_THREADS: usize = 512;

/// Worker count used when hardware parallelism cannot be queried.
pub const FALLBACK_THREADS: usize = 1;

/// Smallest radius the dimensioner accepts.
pub const MIN_RADIUS: u32 = 1;

/// Default lower radius bound.
pub const DEFAULT_MIN_RADIUS: u32 = 1;

/// Default upper radius bound.
pub const DEFAULT_MAX_RADIUS: u32 = 16;

/// Default explicit core count when `use_all_cores` is off.
pub const DEFAULT_CORES: usize = 4;

/// Default logarithm base for the log-log fit.
pub const DEFAULT_LOG_BASE: f64 = 2.0;

/// Radius value that config files use to request an automatic bound.
pub const AUTO_RADIUS_SENTINEL: i64 = -1;

/// Resolve a requested worker count.
///
/// `0` selects `std::thread::available_parallelism`, anything above
/// [`MAX_THREADS`] is rejected by the caller.
#[inline]
pub fn resolve_threads(requested: usize) -> usize {
  if requested == 0 {
    std::thread::available_parallelism()
      .map(|n| n.get())
      .unwrap_or(FALLBACK_THREADS)
  } else {
    requested
  }
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
