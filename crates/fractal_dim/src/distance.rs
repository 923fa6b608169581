//! Hop distances over the wired node layer.
//!
//! The diameter bounds the useful box radius: a box of radius equal to the
//! diameter already swallows each connected component whole.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::boxcount::ParticipantLayer;
use crate::error::Result;
use crate::graph::Graph;

/// Longest finite shortest path of `graph`, ignoring edge direction.
///
/// Unreachable pairs are skipped, so a disconnected graph reports the
/// largest component diameter. Graphs with fewer than two nodes report 0.
pub fn diameter<G: Graph + ?Sized>(graph: &G) -> Result<usize> {
  let layer = ParticipantLayer::from_graph(graph)?;
  Ok(layer_diameter(&layer))
}

/// Diameter of an already wired layer. One BFS per source, sources in
/// parallel.
pub(crate) fn layer_diameter(layer: &ParticipantLayer) -> usize {
  if layer.len() < 2 {
    return 0;
  }

  (0..layer.len())
    .into_par_iter()
    .map(|source| eccentricity(layer, source))
    .max()
    .unwrap_or(0)
}

/// Largest hop distance from `source` to any node it reaches.
pub(crate) fn eccentricity(layer: &ParticipantLayer, source: usize) -> usize {
  let mut dist = vec![usize::MAX; layer.len()];
  let mut queue = VecDeque::new();
  let mut farthest = 0;

  dist[source] = 0;
  queue.push_back(source);

  while let Some(current) = queue.pop_front() {
    let next = dist[current] + 1;
    for &neighbor in layer.neighbors(current) {
      if dist[neighbor] == usize::MAX {
        dist[neighbor] = next;
        farthest = next;
        queue.push_back(neighbor);
      }
    }
  }

  farthest
}
