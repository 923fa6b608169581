//! Parallel box counting over a range of radii.
//!
//! The base layer is wired once on the calling thread and shared read-only
//! through an `Arc`. Every radius becomes one pool task that builds its own
//! boxes and writes one entry into a mutex-guarded map. A radius whose task
//! panicked is simply absent from the result.
//!
//! ```text
//! graph ──wire──► Arc<ParticipantLayer> ──┬─► task(r=1) ─┐
//!                                         ├─► task(r=2) ─┼─► Mutex<BTreeMap<r, count>>
//!                                         └─► task(r=n) ─┘
//! ```

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use web_time::Instant;

use crate::boxcount::{box_count, ParticipantLayer};
use crate::constants::{resolve_threads, MAX_THREADS, MIN_RADIUS};
use crate::error::{FractalError, Result};
use crate::graph::Graph;
use crate::interpolation::{slope_linear, slope_log_log};
use crate::pool::{lock, WorkerPool};

// =============================================================================
// Series
// =============================================================================

/// Box count per radius, ordered by radius.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BoxCountSeries(BTreeMap<u32, usize>);

impl BoxCountSeries {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record `count` for `radius`, returning the previous value.
  pub fn insert(&mut self, radius: u32, count: usize) -> Option<usize> {
    self.0.insert(radius, count)
  }

  pub fn get(&self, radius: u32) -> Option<usize> {
    self.0.get(&radius).copied()
  }

  pub fn contains(&self, radius: u32) -> bool {
    self.0.contains_key(&radius)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// `(radius, count)` pairs in ascending radius order.
  pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
    self.0.iter().map(|(&radius, &count)| (radius, count))
  }

  pub fn radii(&self) -> impl Iterator<Item = u32> + '_ {
    self.0.keys().copied()
  }

  /// Radii of `range` that have no count.
  pub fn missing_radii(&self, range: RangeInclusive<u32>) -> Vec<u32> {
    range.filter(|radius| !self.contains(*radius)).collect()
  }

  /// Radii and counts as parallel `f64` vectors.
  pub fn to_xy(&self) -> (Vec<f64>, Vec<f64>) {
    self
      .iter()
      .map(|(radius, count)| (f64::from(radius), count as f64))
      .unzip()
  }

  /// Slope of box count over radius on linear axes.
  pub fn dimension_linear(&self) -> Result<f64> {
    self.check_fit()?;
    let (xs, ys) = self.to_xy();
    slope_linear(&xs, &ys)
  }

  /// Slope of box count over radius on log-log axes.
  pub fn dimension_log_log(&self, base: f64) -> Result<f64> {
    self.check_fit()?;
    let (xs, ys) = self.to_xy();
    slope_log_log(&xs, &ys, base)
  }

  fn check_fit(&self) -> Result<()> {
    if self.len() < 2 {
      return Err(FractalError::InsufficientData(self.len()));
    }
    Ok(())
  }
}

impl FromIterator<(u32, usize)> for BoxCountSeries {
  fn from_iter<I: IntoIterator<Item = (u32, usize)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl From<BoxCountSeries> for BTreeMap<u32, usize> {
  fn from(series: BoxCountSeries) -> Self {
    series.0
  }
}

// =============================================================================
// Run
// =============================================================================

/// Bookkeeping of one dimensioner run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
  /// Workers the pool was started with.
  pub threads: usize,
  /// Radius tasks accepted by the pool.
  pub tasks_submitted: usize,
  /// Radius tasks that panicked.
  pub tasks_failed: usize,
  /// Wall time from pool start to join, microseconds.
  pub elapsed_us: u64,
}

/// Result of [`Dimensioner::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DimensionRun {
  pub series: BoxCountSeries,
  pub stats: RunStats,
}

/// Runs box counting for a range of radii on a worker pool.
#[derive(Clone, Copy, Debug)]
pub struct Dimensioner {
  threads: usize,
}

impl Dimensioner {
  /// `threads == 0` uses every available core.
  pub fn new(threads: usize) -> Result<Self> {
    if threads > MAX_THREADS {
      return Err(FractalError::InvalidThreadCount(threads));
    }
    Ok(Self { threads })
  }

  pub fn with_all_cores() -> Self {
    Self { threads: 0 }
  }

  /// Requested worker count, 0 meaning "all cores".
  pub fn threads(&self) -> usize {
    self.threads
  }

  /// Worker count the pool will actually start.
  pub fn resolved_threads(&self) -> usize {
    resolve_threads(self.threads).min(MAX_THREADS)
  }

  /// Box count of `graph` for every radius in `min_radius..=max_radius`.
  #[tracing::instrument(skip_all, name = "dimensioner::run", fields(min = min_radius, max = max_radius))]
  pub fn run<G: Graph + ?Sized>(
    &self,
    graph: &G,
    min_radius: u32,
    max_radius: u32,
  ) -> Result<DimensionRun> {
    validate_radii(min_radius, max_radius)?;
    let base = Arc::new(ParticipantLayer::from_graph(graph)?);
    self.run_layer(base, min_radius..=max_radius, box_count)
  }

  /// Same as [`Dimensioner::run`] on a layer the caller already wired.
  pub(crate) fn run_wired(
    &self,
    base: Arc<ParticipantLayer>,
    min_radius: u32,
    max_radius: u32,
  ) -> Result<DimensionRun> {
    validate_radii(min_radius, max_radius)?;
    self.run_layer(base, min_radius..=max_radius, box_count)
  }

  /// Shared driver: one task per radius applying `count` to `base`.
  pub(crate) fn run_layer<F>(
    &self,
    base: Arc<ParticipantLayer>,
    radii: RangeInclusive<u32>,
    count: F,
  ) -> Result<DimensionRun>
  where
    F: Fn(&ParticipantLayer, u32) -> usize + Send + Sync + 'static,
  {
    let started = Instant::now();
    let threads = self.resolved_threads();
    let pool = WorkerPool::new(threads)?;
    let results: Arc<Mutex<BTreeMap<u32, usize>>> = Arc::default();
    let count = Arc::new(count);

    let mut tasks_submitted = 0;
    for radius in radii.clone() {
      let base = Arc::clone(&base);
      let results = Arc::clone(&results);
      let count = Arc::clone(&count);

      let accepted = pool.submit(move || {
        let boxes = (*count)(base.as_ref(), radius);
        tracing::debug!(radius, boxes, "radius counted");
        lock(&results).insert(radius, boxes);
      });
      if accepted {
        tasks_submitted += 1;
      }
    }

    pool.join();
    let tasks_failed = pool.panicked_count();

    let series = BoxCountSeries(std::mem::take(&mut *lock(&results)));
    let missing = series.missing_radii(radii);
    if !missing.is_empty() {
      tracing::warn!(?missing, "radii without a box count");
    }

    let stats = RunStats {
      threads,
      tasks_submitted,
      tasks_failed,
      elapsed_us: started.elapsed().as_micros() as u64,
    };
    tracing::debug!(
      radii = series.len(),
      threads,
      elapsed_us = stats.elapsed_us,
      "box counting finished"
    );

    Ok(DimensionRun { series, stats })
  }
}

impl Default for Dimensioner {
  fn default() -> Self {
    Self::with_all_cores()
  }
}

/// Box count of `graph` for every radius in `min_radius..=max_radius`,
/// on `threads` workers (0 = all cores).
pub fn run_box_count<G: Graph + ?Sized>(
  graph: &G,
  min_radius: u32,
  max_radius: u32,
  threads: usize,
) -> Result<BoxCountSeries> {
  Dimensioner::new(threads)?
    .run(graph, min_radius, max_radius)
    .map(|run| run.series)
}

fn validate_radii(min_radius: u32, max_radius: u32) -> Result<()> {
  if min_radius < MIN_RADIUS || min_radius > max_radius {
    return Err(FractalError::InvalidRadiusRange {
      min: min_radius,
      max: max_radius,
    });
  }
  Ok(())
}

#[cfg(test)]
#[path = "dimensioner_test.rs"]
mod dimensioner_test;
