//! Minimal read-only graph interface consumed by box counting.
//!
//! The host supplies the graph. Box counting only needs the node set, a
//! one-hop neighbor query and stable node identity, so any graph library can
//! be plugged in by implementing [`Graph`].
//!
//! [`AdjacencyGraph`] is a small in-memory implementation used by tests,
//! benchmarks and the command line front end.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use crate::sampler::power_distributed_int;

/// Read-only view of an undirected (or direction-ignored) graph.
pub trait Graph: Sync {
  /// Node handle. Equality is node identity.
  type Node: Copy + Eq + Hash + Debug + Send + Sync;

  /// All nodes, in a stable order.
  fn nodes(&self) -> Vec<Self::Node>;

  /// One-hop neighbors of `node`, ignoring edge direction.
  ///
  /// May contain duplicates (parallel edges) and `node` itself (self loops);
  /// both are collapsed by the caller.
  fn neighbors(&self, node: Self::Node) -> Vec<Self::Node>;

  /// Number of nodes.
  fn node_count(&self) -> usize {
    self.nodes().len()
  }
}

/// Dense-index adjacency list graph. Nodes are `0..node_count()`.
///
/// Parallel edges are kept as inserted so callers can exercise duplicate
/// collapsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
  adjacency: Vec<Vec<usize>>,
  edge_count: usize,
}

impl AdjacencyGraph {
  /// Graph with `node_count` isolated nodes.
  pub fn with_nodes(node_count: usize) -> Self {
    Self {
      adjacency: vec![Vec::new(); node_count],
      edge_count: 0,
    }
  }

  /// Build from an edge list. Nodes referenced by an edge must be
  /// `< node_count`.
  pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
    let mut graph = Self::with_nodes(node_count);
    for &(a, b) in edges {
      graph.add_edge(a, b);
    }
    graph
  }

  /// Append an isolated node, returning its index.
  pub fn add_node(&mut self) -> usize {
    self.adjacency.push(Vec::new());
    self.adjacency.len() - 1
  }

  /// Add an undirected edge.
  ///
  /// # Panics
  ///
  /// Panics if either endpoint is out of range.
  pub fn add_edge(&mut self, a: usize, b: usize) {
    assert!(
      a < self.adjacency.len() && b < self.adjacency.len(),
      "edge ({a}, {b}) out of range for {} nodes",
      self.adjacency.len()
    );
    self.adjacency[a].push(b);
    if a != b {
      self.adjacency[b].push(a);
    }
    self.edge_count += 1;
  }

  /// True if `a` and `b` share at least one edge.
  pub fn has_edge(&self, a: usize, b: usize) -> bool {
    self.adjacency.get(a).is_some_and(|list| list.contains(&b))
  }

  /// Number of inserted edges, parallel edges included.
  pub fn edge_count(&self) -> usize {
    self.edge_count
  }

  /// Degree of `node` counting parallel edges.
  pub fn degree(&self, node: usize) -> usize {
    self.adjacency[node].len()
  }

  // ===========================================================================
  // Fixtures
  // ===========================================================================

  /// Path `0 - 1 - ... - (n-1)`.
  pub fn path(n: usize) -> Self {
    let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
    Self::from_edges(n, &edges)
  }

  /// Cycle of `n` nodes (a path for `n < 3`).
  pub fn cycle(n: usize) -> Self {
    let mut graph = Self::path(n);
    if n >= 3 {
      graph.add_edge(n - 1, 0);
    }
    graph
  }

  /// Star with hub `0` and `n - 1` leaves.
  pub fn star(n: usize) -> Self {
    let edges: Vec<_> = (1..n).map(|i| (0, i)).collect();
    Self::from_edges(n, &edges)
  }

  /// Complete graph on `n` nodes.
  pub fn complete(n: usize) -> Self {
    let mut graph = Self::with_nodes(n);
    for a in 0..n {
      for b in (a + 1)..n {
        graph.add_edge(a, b);
      }
    }
    graph
  }

  /// `width x height` lattice with 4-neighborhood, row-major indices.
  pub fn grid(width: usize, height: usize) -> Self {
    let mut graph = Self::with_nodes(width * height);
    for y in 0..height {
      for x in 0..width {
        let idx = y * width + x;
        if x + 1 < width {
          graph.add_edge(idx, idx + 1);
        }
        if y + 1 < height {
          graph.add_edge(idx, idx + width);
        }
      }
    }
    graph
  }

  /// Random graph: every unordered pair is wired with probability `p_wiring`.
  pub fn random<R: Rng + ?Sized>(n: usize, p_wiring: f64, rng: &mut R) -> Self {
    let p = if p_wiring.is_nan() { 0.0 } else { p_wiring.clamp(0.0, 1.0) };
    let mut graph = Self::with_nodes(n);
    for a in 0..n {
      for b in (a + 1)..n {
        if rng.random_bool(p) {
          graph.add_edge(a, b);
        }
      }
    }
    graph
  }

  /// Ring where node `i` links to the next `k` nodes, `k` drawn per node
  /// from a power distribution over `[k_min, k_max]`.
  ///
  /// `k` is capped at `n - 1` so no node links to itself.
  pub fn power_ring<R: Rng + ?Sized>(n: usize, k_min: usize, k_max: usize, rng: &mut R) -> Self {
    let mut graph = Self::with_nodes(n);
    if n < 2 {
      return graph;
    }
    for a in 0..n {
      let k = power_distributed_int(rng, k_min, k_max).clamp(1, n - 1);
      for step in 1..=k {
        let b = (a + step) % n;
        if !graph.has_edge(a, b) {
          graph.add_edge(a, b);
        }
      }
    }
    graph
  }
}

impl Graph for AdjacencyGraph {
  type Node = usize;

  fn nodes(&self) -> Vec<usize> {
    (0..self.adjacency.len()).collect()
  }

  fn neighbors(&self, node: usize) -> Vec<usize> {
    self.adjacency.get(node).cloned().unwrap_or_default()
  }

  fn node_count(&self) -> usize {
    self.adjacency.len()
  }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;
