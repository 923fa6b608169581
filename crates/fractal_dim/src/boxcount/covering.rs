//! Greedy single-radius covering pass.
//!
//! One left-to-right scan: each participant joins the first open box that
//! accepts it, otherwise it seeds a new box. First-fit is order dependent and
//! not globally minimal, but deterministic for a fixed participant order.

use super::fractal_box::FractalBox;
use super::participant::{Neighbors, ParticipantLayer};

/// Partition `layer` into boxes of `radius` and link them.
///
/// The returned layer holds one [`Participant::Box`](super::Participant::Box)
/// per box, in creation order, ready for the next coarsening round.
pub fn cover(layer: &ParticipantLayer, radius: u32) -> ParticipantLayer {
  if layer.is_empty() {
    return ParticipantLayer::default();
  }

  let mut boxed = vec![false; layer.len()];
  let mut boxes = vec![FractalBox::new(radius)];

  for candidate in 0..layer.len() {
    if boxed[candidate] {
      continue;
    }

    // One expansion per candidate serves every box it is tried against.
    let neighborhood = layer.neighborhood(candidate, radius);

    if boxes
      .iter_mut()
      .any(|open| open.try_add(candidate, &neighborhood))
    {
      boxed[candidate] = true;
      continue;
    }

    let mut seeded = FractalBox::new(radius);
    boxed[candidate] = seeded.try_add(candidate, &neighborhood);
    boxes.push(seeded);
  }

  debug_assert!(boxed.iter().all(|&b| b));

  let adjacency = link_boxes(layer, &boxes);
  ParticipantLayer::from_boxes(boxes, adjacency)
}

/// Inter-box adjacency: two boxes are linked iff a member of one is a one-hop
/// neighbor of a member of the other.
fn link_boxes(layer: &ParticipantLayer, boxes: &[FractalBox]) -> Vec<Neighbors> {
  let mut owner = vec![usize::MAX; layer.len()];
  for (box_idx, fractal_box) in boxes.iter().enumerate() {
    for &member in fractal_box.members() {
      owner[member] = box_idx;
    }
  }

  let mut adjacency = vec![Neighbors::new(); boxes.len()];
  for (box_idx, fractal_box) in boxes.iter().enumerate() {
    for &member in fractal_box.members() {
      for &neighbor in layer.neighbors(member) {
        let other = owner[neighbor];
        if other != box_idx {
          adjacency[box_idx].push(other);
          adjacency[other].push(box_idx);
        }
      }
    }
  }

  adjacency
}

#[cfg(test)]
#[path = "covering_test.rs"]
mod covering_test;
