//! Participants - the things a covering pass groups into boxes.
//!
//! A coarsening round works on one [`ParticipantLayer`]: an arena of
//! participants plus their adjacency as index sets. The base layer wraps the
//! original graph nodes; every later layer wraps the boxes of the round
//! before it.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use smallvec::SmallVec;

use super::fractal_box::FractalBox;
use crate::error::{FractalError, Result};
use crate::graph::Graph;

/// Sorted, duplicate-free neighbor indices of one participant.
pub type Neighbors = SmallVec<[usize; 8]>;

/// One original graph node taking part in box counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeParticipant {
  node: usize,
}

impl NodeParticipant {
  /// Position of the wrapped node in the graph's node order.
  #[inline]
  pub fn node_index(&self) -> usize {
    self.node
  }
}

/// Anything that can be absorbed into a box this round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Participant {
  /// A node of the original graph.
  Node(NodeParticipant),
  /// A box formed during the previous round.
  Box(FractalBox),
}

impl Participant {
  /// The wrapped box, if this participant is one.
  pub fn as_box(&self) -> Option<&FractalBox> {
    match self {
      Participant::Box(fractal_box) => Some(fractal_box),
      Participant::Node(_) => None,
    }
  }

  /// The wrapped graph node, if this participant is one.
  pub fn as_node(&self) -> Option<NodeParticipant> {
    match self {
      Participant::Node(node) => Some(*node),
      Participant::Box(_) => None,
    }
  }
}

/// Participants of one coarsening round with their adjacency.
///
/// Adjacency is symmetric: `b` is in `neighbors(a)` iff `a` is in
/// `neighbors(b)`.
#[derive(Clone, Debug, Default)]
pub struct ParticipantLayer {
  participants: Vec<Participant>,
  adjacency: Vec<Neighbors>,
}

impl ParticipantLayer {
  /// Wrap every graph node and wire node adjacency once.
  ///
  /// Edge direction is ignored, self loops are dropped and parallel edges
  /// collapse into one link. A neighbor outside the node set is rejected.
  pub fn from_graph<G: Graph + ?Sized>(graph: &G) -> Result<Self> {
    let nodes = graph.nodes();
    let index: HashMap<G::Node, usize> = nodes
      .iter()
      .enumerate()
      .map(|(idx, node)| (*node, idx))
      .collect();

    // Neighbor lookups only read the graph, so they run in parallel.
    let direct: Vec<Vec<usize>> = nodes
      .par_iter()
      .map(|&node| {
        graph
          .neighbors(node)
          .into_iter()
          .filter(|neighbor| *neighbor != node)
          .map(|neighbor| {
            index
              .get(&neighbor)
              .copied()
              .ok_or_else(|| FractalError::UnknownNeighbor {
                node: format!("{node:?}"),
                neighbor: format!("{neighbor:?}"),
              })
          })
          .collect::<Result<Vec<usize>>>()
      })
      .collect::<Result<Vec<_>>>()?;

    // Link both directions so one-sided reports still yield an undirected
    // adjacency.
    let mut adjacency = vec![Neighbors::new(); nodes.len()];
    for (idx, list) in direct.into_iter().enumerate() {
      for neighbor in list {
        adjacency[idx].push(neighbor);
        adjacency[neighbor].push(idx);
      }
    }
    normalize(&mut adjacency);

    let participants = (0..nodes.len())
      .map(|node| Participant::Node(NodeParticipant { node }))
      .collect();

    let layer = Self {
      participants,
      adjacency,
    };
    tracing::debug!(
      nodes = layer.len(),
      links = layer.link_count(),
      "wired node participants"
    );
    Ok(layer)
  }

  /// Layer of boxes with precomputed inter-box adjacency.
  pub(crate) fn from_boxes(boxes: Vec<FractalBox>, mut adjacency: Vec<Neighbors>) -> Self {
    debug_assert_eq!(boxes.len(), adjacency.len());
    normalize(&mut adjacency);
    Self {
      participants: boxes.into_iter().map(Participant::Box).collect(),
      adjacency,
    }
  }

  /// Number of participants.
  #[inline]
  pub fn len(&self) -> usize {
    self.participants.len()
  }

  /// True when the layer holds no participants.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.participants.is_empty()
  }

  /// All participants in layer order.
  pub fn participants(&self) -> &[Participant] {
    &self.participants
  }

  /// Participant at `idx`.
  pub fn participant(&self, idx: usize) -> &Participant {
    &self.participants[idx]
  }

  /// Boxes of this layer, empty for the base layer.
  pub fn boxes(&self) -> impl Iterator<Item = &FractalBox> {
    self.participants.iter().filter_map(Participant::as_box)
  }

  /// One-hop neighbors of `idx`.
  #[inline]
  pub fn neighbors(&self, idx: usize) -> &[usize] {
    &self.adjacency[idx]
  }

  /// True if `a` and `b` are one-hop neighbors.
  #[inline]
  pub fn is_neighbor(&self, a: usize, b: usize) -> bool {
    self.adjacency[a].binary_search(&b).is_ok()
  }

  /// Number of undirected links.
  pub fn link_count(&self) -> usize {
    self.adjacency.iter().map(|list| list.len()).sum::<usize>() / 2
  }

  /// Participants reachable from `origin` within `radius` hops.
  ///
  /// Bounded breadth-first expansion over participant adjacency; `origin`
  /// itself is never part of the result.
  pub fn neighborhood(&self, origin: usize, radius: u32) -> Neighborhood {
    let mut reach = HashSet::new();
    reach.insert(origin);

    let mut frontier = vec![origin];
    for _ in 0..radius {
      let mut next = Vec::new();
      for &current in &frontier {
        for &neighbor in self.neighbors(current) {
          if reach.insert(neighbor) {
            next.push(neighbor);
          }
        }
      }
      if next.is_empty() {
        break;
      }
      frontier = next;
    }

    reach.remove(&origin);
    Neighborhood {
      origin,
      radius,
      reach,
    }
  }
}

fn normalize(adjacency: &mut [Neighbors]) {
  for list in adjacency {
    list.sort_unstable();
    list.dedup();
  }
}

/// Radius-bounded neighborhood of one participant.
#[derive(Clone, Debug)]
pub struct Neighborhood {
  origin: usize,
  radius: u32,
  reach: HashSet<usize>,
}

impl Neighborhood {
  /// Participant the expansion started from.
  #[inline]
  pub fn origin(&self) -> usize {
    self.origin
  }

  /// Hop limit used for the expansion.
  #[inline]
  pub fn radius(&self) -> u32 {
    self.radius
  }

  /// True if `idx` is within the radius (never true for the origin).
  #[inline]
  pub fn contains(&self, idx: usize) -> bool {
    self.reach.contains(&idx)
  }

  /// Number of participants within the radius.
  pub fn len(&self) -> usize {
    self.reach.len()
  }

  /// True when nothing is within the radius.
  pub fn is_empty(&self) -> bool {
    self.reach.is_empty()
  }
}

#[cfg(test)]
#[path = "participant_test.rs"]
mod participant_test;
