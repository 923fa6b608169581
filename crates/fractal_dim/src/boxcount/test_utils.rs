//! Test utilities for box covering tests.
//!
//! Provides independent hop-distance computations and invariant checks so
//! covering results can be verified without trusting the code under test.

use std::collections::{HashMap, VecDeque};

use super::{cover, ParticipantLayer};
use crate::graph::{AdjacencyGraph, Graph};

// =============================================================================
// Fixtures
// =============================================================================

/// Base layer for `graph`, panicking on wiring errors.
pub fn base_layer<G: Graph>(graph: &G) -> ParticipantLayer {
  ParticipantLayer::from_graph(graph).expect("fixture graph must wire")
}

/// Graph keyed by string labels, reporting only outgoing neighbors.
///
/// Exercises non-integer node identity and one-sided adjacency reports.
pub struct LabelGraph {
  pub order: Vec<&'static str>,
  pub out: HashMap<&'static str, Vec<&'static str>>,
}

impl LabelGraph {
  pub fn new(order: &[&'static str], arcs: &[(&'static str, &'static str)]) -> Self {
    let mut out: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for label in order {
      out.entry(*label).or_default();
    }
    for &(from, to) in arcs {
      out.entry(from).or_default().push(to);
    }
    Self {
      order: order.to_vec(),
      out,
    }
  }
}

impl Graph for LabelGraph {
  type Node = &'static str;

  fn nodes(&self) -> Vec<&'static str> {
    self.order.clone()
  }

  fn neighbors(&self, node: &'static str) -> Vec<&'static str> {
    self.out.get(node).cloned().unwrap_or_default()
  }
}

// =============================================================================
// Reference distances
// =============================================================================

/// Hop distances from `origin` in `layer` (`None` = unreachable).
pub fn layer_distances(layer: &ParticipantLayer, origin: usize) -> Vec<Option<u32>> {
  let mut dist = vec![None; layer.len()];
  let mut queue = VecDeque::new();
  dist[origin] = Some(0);
  queue.push_back(origin);

  while let Some(current) = queue.pop_front() {
    let d = dist[current].unwrap_or(0);
    for &next in layer.neighbors(current) {
      if dist[next].is_none() {
        dist[next] = Some(d + 1);
        queue.push_back(next);
      }
    }
  }

  dist
}

/// Hop distances from `origin` computed straight on the graph.
pub fn graph_distances(graph: &AdjacencyGraph, origin: usize) -> Vec<Option<u32>> {
  let mut dist = vec![None; graph.node_count()];
  let mut queue = VecDeque::new();
  dist[origin] = Some(0);
  queue.push_back(origin);

  while let Some(current) = queue.pop_front() {
    let d = dist[current].unwrap_or(0);
    for next in graph.neighbors(current) {
      if dist[next].is_none() {
        dist[next] = Some(d + 1);
        queue.push_back(next);
      }
    }
  }

  dist
}

// =============================================================================
// Invariant checks
// =============================================================================

/// Assert every pair inside every box of `covered` is within `radius` hops
/// in `layer`, and that the boxes partition `layer`.
pub fn assert_cover_invariant(layer: &ParticipantLayer, covered: &ParticipantLayer, radius: u32) {
  let mut seen = vec![0usize; layer.len()];

  for (box_idx, fractal_box) in covered.boxes().enumerate() {
    for &a in fractal_box.members() {
      seen[a] += 1;
      let dist = layer_distances(layer, a);
      for &b in fractal_box.members() {
        if a == b {
          continue;
        }
        let d = dist[b];
        assert!(
          d.is_some_and(|d| d <= radius),
          "box {box_idx}: members {a} and {b} are {d:?} hops apart, radius {radius}"
        );
      }
    }
  }

  assert!(
    seen.iter().all(|&count| count == 1),
    "every participant must land in exactly one box: {seen:?}"
  );
}

/// Run coarsening to the end, checking the invariant at every level.
pub fn assert_invariant_all_levels(base: &ParticipantLayer, radius: u32) {
  let mut layer = base.clone();
  let mut last = None;

  while layer.len() > 1 {
    let covered = cover(&layer, radius);
    assert_cover_invariant(&layer, &covered, radius);
    if last == Some(covered.len()) {
      break;
    }
    last = Some(covered.len());
    layer = covered;
  }
}
