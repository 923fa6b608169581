//! FractalBox - a cluster of participants within a bounded radius.

use super::participant::{Neighborhood, ParticipantLayer};

/// Participants whose pairwise hop distance is bounded by `radius`.
///
/// Members are indices into the layer the box was built from, kept in
/// absorption order. Each member lies inside the radius-bounded neighborhood
/// of every member absorbed after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FractalBox {
  radius: u32,
  members: Vec<usize>,
}

impl FractalBox {
  /// Empty box accepting members up to `radius` hops apart.
  pub fn new(radius: u32) -> Self {
    Self {
      radius,
      members: Vec::new(),
    }
  }

  /// Maximum hop distance between members.
  #[inline]
  pub fn radius(&self) -> u32 {
    self.radius
  }

  /// Members in absorption order.
  #[inline]
  pub fn members(&self) -> &[usize] {
    &self.members
  }

  /// Number of members.
  #[inline]
  pub fn len(&self) -> usize {
    self.members.len()
  }

  /// True for a box nothing was absorbed into yet.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  /// True if `candidate` is already a member.
  #[inline]
  pub fn contains(&self, candidate: usize) -> bool {
    self.members.contains(&candidate)
  }

  /// Absorb `candidate` if every current member is inside its neighborhood.
  ///
  /// `neighborhood` must be the candidate's expansion at this box's radius.
  /// Returns `true` if the candidate is a member afterwards. A rejected
  /// candidate leaves the box untouched; an empty box accepts anything.
  pub fn try_add(&mut self, candidate: usize, neighborhood: &Neighborhood) -> bool {
    debug_assert_eq!(neighborhood.origin(), candidate);
    debug_assert_eq!(neighborhood.radius(), self.radius);

    if self.contains(candidate) {
      return true;
    }

    if !self.members.iter().all(|&member| neighborhood.contains(member)) {
      return false;
    }

    self.members.push(candidate);
    true
  }

  /// [`try_add`](Self::try_add) with a fresh expansion over `layer`.
  pub fn try_add_in(&mut self, layer: &ParticipantLayer, candidate: usize) -> bool {
    let neighborhood = layer.neighborhood(candidate, self.radius);
    self.try_add(candidate, &neighborhood)
  }
}

#[cfg(test)]
#[path = "fractal_box_test.rs"]
mod fractal_box_test;
