//! Box covering of graphs.
//!
//! # Module Structure
//!
//! - [`participant`]: `ParticipantLayer` - arena of participants (graph nodes
//!   or boxes) and their index adjacency
//! - [`fractal_box`]: `FractalBox` - bounded-radius cluster with the greedy
//!   admission check
//! - [`covering`]: one first-fit covering pass plus inter-box linking
//! - [`coarsening`]: repeated covering until the box count stabilizes

pub mod coarsening;
pub mod covering;
pub mod fractal_box;
pub mod participant;

// Re-exports
pub use coarsening::{box_count, box_count_trace, CoarseningTrace, Termination};
pub use covering::cover;
pub use fractal_box::FractalBox;
pub use participant::{Neighborhood, Neighbors, NodeParticipant, Participant, ParticipantLayer};

#[cfg(test)]
pub(crate) mod test_utils;
