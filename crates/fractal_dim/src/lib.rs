//! fractal_dim - Box-counting fractal dimension of graphs
//!
//! This crate measures how the number of bounded-radius boxes needed to cover
//! a graph shrinks as the box radius grows. Box counts for a range of radii
//! are computed in parallel on a fixed worker pool, then fitted on linear and
//! log-log axes; the log-log slope is the fractal dimension.
//!
//! # Features
//!
//! - **Greedy Covering**: First-fit assignment of participants to boxes whose
//!   members are pairwise within the radius
//! - **Recursive Coarsening**: Boxes of boxes until the count stabilizes,
//!   accumulating the count of every level
//! - **Worker Pool**: One task per radius on persistent named threads, panics
//!   isolated per task
//! - **Graph Agnostic**: Any graph implementing [`Graph`] can be measured
//!
//! # Example
//!
//! ```ignore
//! use fractal_dim::{run_box_count, AdjacencyGraph, FractalDimension};
//!
//! let graph = AdjacencyGraph::grid(32, 32);
//!
//! // Raw box counts for radii 1..=8 on all cores
//! let series = run_box_count(&graph, 1, 8, 0)?;
//! println!("dimension: {:.3}", series.dimension_log_log(2.0)?);
//!
//! // Or the full statistic with automatic radius range
//! let report = FractalDimension::default().execute(&graph)?;
//! println!("{report}");
//! ```

pub mod constants;
pub mod error;
pub mod graph;

// Re-export commonly used items
pub use constants::{DEFAULT_LOG_BASE, DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS, MAX_THREADS};
pub use error::{FractalError, Result};
pub use graph::{AdjacencyGraph, Graph};

// Box covering and coarsening
pub mod boxcount;
pub use boxcount::{box_count, box_count_trace, CoarseningTrace, FractalBox, ParticipantLayer};

// Worker pool for per-radius tasks
pub mod pool;
pub use pool::WorkerPool;

// Parallel orchestration over radii
pub mod dimensioner;
pub use dimensioner::{run_box_count, BoxCountSeries, DimensionRun, Dimensioner, RunStats};

// Slope fitting
pub mod interpolation;
pub use interpolation::{slope_linear, slope_log_log};

pub mod distance;
pub mod sampler;

// Statistic front end
pub mod statistic;
pub use statistic::{FractalDimension, FractalDimensionSettings, FractalReport, RadiusBound};
