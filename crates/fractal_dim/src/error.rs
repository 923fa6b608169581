//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

use crate::constants::MAX_THREADS;

/// Errors returned by box counting, interpolation and the statistic.
#[derive(Debug, Error)]
pub enum FractalError {
  /// Worker count outside `0..=MAX_THREADS` (0 selects the hardware default).
  #[error("unsupported thread amount: {0} (expected 0..={MAX_THREADS})")]
  InvalidThreadCount(usize),

  /// Radius range that is empty or starts at zero.
  #[error("invalid radius range [{min}, {max}]: radii start at 1 and min must not exceed max")]
  InvalidRadiusRange { min: u32, max: u32 },

  /// Interpolation input that is empty or of mismatched length.
  #[error("sets are empty or have different lengths ({xs} vs {ys})")]
  InvalidInput { xs: usize, ys: usize },

  /// Logarithm base that is not finite, not positive, or equal to 1.
  #[error("logarithmic base must be > 0 and != 1, got {0}")]
  InvalidLogBase(f64),

  /// Fewer than two radius samples left to fit a slope through.
  #[error("need at least 2 data points to fit a slope, got {0}")]
  InsufficientData(usize),

  /// The host graph reported a neighbor that is not part of its node set.
  #[error("neighbor {neighbor} of node {node} is not in the node set")]
  UnknownNeighbor { node: String, neighbor: String },

  /// The statistic was asked to run on a graph without nodes.
  #[error("graph has no nodes")]
  EmptyGraph,

  /// The OS refused to start a pool worker.
  #[error("failed to spawn worker thread: {0}")]
  WorkerSpawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FractalError>;
