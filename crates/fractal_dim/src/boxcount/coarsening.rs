//! Recursive coarsening driver - the box count for one radius.
//!
//! Covering passes are re-applied to the graph of boxes-of-boxes until two
//! consecutive passes produce the same number of boxes. The box count is the
//! sum over every pass except that repeated terminal one.
//!
//! ```text
//! nodes ──cover──► boxes(L1) ──cover──► boxes(L2) ──cover──► ... ──► |Ln| == |Ln-1|
//! total = |L1| + |L2| + ... + |Ln-1|
//! ```
//!
//! A layer with at most one participant stops the recursion without a pass
//! and contributes its size.

use super::covering::cover;
use super::participant::ParticipantLayer;

/// Why coarsening stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
  /// The current layer had 0 or 1 participants.
  Trivial,
  /// A pass reproduced the previous pass's box count.
  Stable,
}

/// Per-level record of one radius' coarsening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoarseningTrace {
  /// Radius every box was built with.
  pub radius: u32,
  /// Box count of each counted pass, finest level first.
  pub level_counts: Vec<usize>,
  /// Covering passes performed, including a repeated terminal one.
  pub passes: usize,
  /// Accumulated box count.
  pub total: usize,
  /// Stop condition.
  pub termination: Termination,
}

/// Box count of `base` at `radius`.
pub fn box_count(base: &ParticipantLayer, radius: u32) -> usize {
  box_count_trace(base, radius).total
}

/// Box count of `base` at `radius` with per-level detail.
pub fn box_count_trace(base: &ParticipantLayer, radius: u32) -> CoarseningTrace {
  let mut level_counts: Vec<usize> = Vec::new();
  let mut passes = 0;
  let mut total = 0;
  let mut coarse: Option<ParticipantLayer> = None;

  let termination = loop {
    let layer = coarse.as_ref().unwrap_or(base);
    if layer.len() <= 1 {
      total += layer.len();
      break Termination::Trivial;
    }

    let next = cover(layer, radius);
    passes += 1;

    let count = next.len();
    if level_counts.last() == Some(&count) {
      break Termination::Stable;
    }

    tracing::trace!(radius, level = level_counts.len(), boxes = count, "coarsened");
    total += count;
    level_counts.push(count);
    coarse = Some(next);
  };

  CoarseningTrace {
    radius,
    level_counts,
    passes,
    total,
    termination,
  }
}

#[cfg(test)]
#[path = "coarsening_test.rs"]
mod coarsening_test;
