//! Fractal dimension statistic.
//!
//! Wires the graph, measures its diameter, resolves automatic radius bounds,
//! runs box counting for every radius and fits the box-count curve on linear
//! and log-log axes. The log-log slope is the reported dimension.

use std::fmt;
use std::sync::Arc;

use crate::boxcount::ParticipantLayer;
use crate::constants::{
  AUTO_RADIUS_SENTINEL, DEFAULT_CORES, DEFAULT_LOG_BASE, DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS,
  MIN_RADIUS,
};
use crate::dimensioner::{BoxCountSeries, Dimensioner, RunStats};
use crate::distance::layer_diameter;
use crate::error::{FractalError, Result};
use crate::graph::Graph;

// =============================================================================
// Settings
// =============================================================================

/// One end of the radius range.
///
/// Written as an integer in config files, `-1` meaning [`RadiusBound::Auto`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(try_from = "i64", into = "i64")
)]
pub enum RadiusBound {
  /// `1` for the lower bound, the graph diameter for the upper bound.
  Auto,
  Fixed(u32),
}

impl TryFrom<i64> for RadiusBound {
  type Error = String;

  fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
    if value == AUTO_RADIUS_SENTINEL {
      return Ok(RadiusBound::Auto);
    }
    u32::try_from(value)
      .ok()
      .filter(|radius| *radius >= MIN_RADIUS)
      .map(RadiusBound::Fixed)
      .ok_or_else(|| {
        format!("radius must be >= {MIN_RADIUS} or {AUTO_RADIUS_SENTINEL} for automatic, got {value}")
      })
  }
}

impl From<RadiusBound> for i64 {
  fn from(bound: RadiusBound) -> Self {
    match bound {
      RadiusBound::Auto => AUTO_RADIUS_SENTINEL,
      RadiusBound::Fixed(radius) => i64::from(radius),
    }
  }
}

/// Parameters of the statistic.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FractalDimensionSettings {
  pub min_radius: RadiusBound,
  pub max_radius: RadiusBound,
  /// Use every available core; `cores` is ignored when set.
  pub use_all_cores: bool,
  /// Worker count when `use_all_cores` is off (0 also means all cores).
  pub cores: usize,
  /// Logarithm base of the log-log fit.
  pub log_base: f64,
}

impl Default for FractalDimensionSettings {
  fn default() -> Self {
    Self {
      min_radius: RadiusBound::Fixed(DEFAULT_MIN_RADIUS),
      max_radius: RadiusBound::Fixed(DEFAULT_MAX_RADIUS),
      use_all_cores: true,
      cores: DEFAULT_CORES,
      log_base: DEFAULT_LOG_BASE,
    }
  }
}

impl FractalDimensionSettings {
  /// Worker count handed to the dimensioner (0 = all cores).
  pub fn threads(&self) -> usize {
    if self.use_all_cores {
      0
    } else {
      self.cores
    }
  }

  /// Concrete `(min, max)` radii for a graph of the given diameter.
  ///
  /// An automatic upper bound never drops below the lower bound, so a graph
  /// without edges still gets one radius.
  pub fn resolve_radii(&self, diameter: usize) -> (u32, u32) {
    let min = match self.min_radius {
      RadiusBound::Auto => MIN_RADIUS,
      RadiusBound::Fixed(radius) => radius,
    };
    let max = match self.max_radius {
      RadiusBound::Auto => u32::try_from(diameter).unwrap_or(u32::MAX).max(min),
      RadiusBound::Fixed(radius) => radius,
    };
    (min, max)
  }
}

// =============================================================================
// Statistic
// =============================================================================

/// Box-counting fractal dimension of a graph.
#[derive(Clone, Debug, Default)]
pub struct FractalDimension {
  settings: FractalDimensionSettings,
}

impl FractalDimension {
  pub fn new(settings: FractalDimensionSettings) -> Self {
    Self { settings }
  }

  pub fn settings(&self) -> &FractalDimensionSettings {
    &self.settings
  }

  /// Run the statistic on `graph`.
  ///
  /// Fails on an empty graph, a bad log base, a bad radius range or too many
  /// threads. A curve with fewer than two points yields no slopes.
  #[tracing::instrument(skip_all, name = "fractal_dimension::execute")]
  pub fn execute<G: Graph + ?Sized>(&self, graph: &G) -> Result<FractalReport> {
    let settings = &self.settings;
    check_log_base(settings.log_base)?;
    let dimensioner = Dimensioner::new(settings.threads())?;

    let layer = ParticipantLayer::from_graph(graph)?;
    if layer.is_empty() {
      return Err(FractalError::EmptyGraph);
    }

    let diameter = layer_diameter(&layer);
    let (min_radius, max_radius) = settings.resolve_radii(diameter);
    tracing::info!(
      nodes = layer.len(),
      links = layer.link_count(),
      diameter,
      min_radius,
      max_radius,
      "computing fractal dimension"
    );

    let run = dimensioner.run_wired(Arc::new(layer), min_radius, max_radius)?;

    let dimension_linear = fitted(run.series.dimension_linear())?;
    let dimension_log_log = fitted(run.series.dimension_log_log(settings.log_base))?;
    match dimension_log_log {
      Some(dimension) => tracing::info!(dimension, "fractal dimension"),
      None => tracing::warn!(points = run.series.len(), "too few radii to fit a dimension"),
    }

    Ok(FractalReport {
      min_radius,
      max_radius,
      diameter,
      threads: run.stats.threads,
      log_base: settings.log_base,
      series: run.series,
      dimension_linear,
      dimension_log_log,
      stats: run.stats,
    })
  }
}

fn check_log_base(base: f64) -> Result<()> {
  if !base.is_finite() || base <= 0.0 || base == 1.0 {
    return Err(FractalError::InvalidLogBase(base));
  }
  Ok(())
}

/// `None` when there are too few points, any other error propagates.
fn fitted(slope: Result<f64>) -> Result<Option<f64>> {
  match slope {
    Ok(value) => Ok(Some(value)),
    Err(FractalError::InsufficientData(_)) => Ok(None),
    Err(err) => Err(err),
  }
}

// =============================================================================
// Report
// =============================================================================

/// Outcome of [`FractalDimension::execute`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FractalReport {
  pub min_radius: u32,
  pub max_radius: u32,
  pub diameter: usize,
  pub threads: usize,
  pub log_base: f64,
  pub series: BoxCountSeries,
  pub dimension_linear: Option<f64>,
  pub dimension_log_log: Option<f64>,
  pub stats: RunStats,
}

impl FractalReport {
  /// The fractal dimension: slope of the log-log fit.
  pub fn dimension(&self) -> Option<f64> {
    self.dimension_log_log
  }
}

impl fmt::Display for FractalReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Parameters:")?;
    writeln!(f, "  min radius:     {}", self.min_radius)?;
    writeln!(f, "  max radius:     {}", self.max_radius)?;
    writeln!(f, "  diameter:       {}", self.diameter)?;
    writeln!(f, "  threads:        {}", self.threads)?;
    writeln!(f, "Box counts:")?;
    for (radius, count) in self.series.iter() {
      writeln!(f, "  {radius:>4} {count:>10}")?;
    }
    writeln!(f, "Results:")?;
    writeln!(f, "  dimension (linear):     {}", format_slope(self.dimension_linear))?;
    writeln!(
      f,
      "  dimension (log{}-log{}): {}",
      self.log_base,
      self.log_base,
      format_slope(self.dimension_log_log)
    )?;
    write!(f, "  elapsed:                {} us", self.stats.elapsed_us)
  }
}

fn format_slope(slope: Option<f64>) -> String {
  slope.map_or_else(|| "n/a".to_owned(), |value| format!("{value:.3}"))
}

#[cfg(test)]
#[path = "statistic_test.rs"]
mod statistic_test;
