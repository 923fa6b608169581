use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::boxcount::box_count;
use crate::graph::AdjacencyGraph;

fn series(pairs: &[(u32, usize)]) -> BoxCountSeries {
  pairs.iter().copied().collect()
}

// =========================================================================
// Orchestration
// =========================================================================

#[test]
fn test_path_series() {
  let result = run_box_count(&AdjacencyGraph::path(5), 1, 4, 2).unwrap();
  assert_eq!(result, series(&[(1, 7), (2, 4), (3, 4), (4, 2)]));
}

#[test]
fn test_single_node_counts_one_per_radius() {
  let result = run_box_count(&AdjacencyGraph::with_nodes(1), 1, 5, 1).unwrap();
  assert_eq!(result.len(), 5);
  assert!(result.iter().all(|(_, count)| count == 1));
}

#[test]
fn test_single_radius_range() {
  let result = run_box_count(&AdjacencyGraph::star(6), 2, 2, 1).unwrap();
  assert_eq!(result.radii().collect::<Vec<_>>(), vec![2]);
}

/// Worker count never changes the result.
#[test]
fn test_thread_count_does_not_change_series() {
  let mut rng = StdRng::seed_from_u64(31);
  let graphs = [
    AdjacencyGraph::grid(8, 6),
    AdjacencyGraph::random(60, 0.06, &mut rng),
    AdjacencyGraph::power_ring(80, 1, 6, &mut rng),
  ];

  for graph in &graphs {
    let single = run_box_count(graph, 1, 6, 1).unwrap();
    let all_cores = run_box_count(graph, 1, 6, 0).unwrap();
    let four = run_box_count(graph, 1, 6, 4).unwrap();
    assert_eq!(single, all_cores);
    assert_eq!(single, four);
  }
}

#[test]
fn test_series_matches_direct_box_count() {
  let graph = AdjacencyGraph::grid(5, 5);
  let layer = ParticipantLayer::from_graph(&graph).unwrap();
  let result = run_box_count(&graph, 1, 4, 3).unwrap();

  for (radius, count) in result.iter() {
    assert_eq!(count, box_count(&layer, radius), "radius {radius}");
  }
}

#[test]
fn test_run_reports_stats() {
  let dimensioner = Dimensioner::new(2).unwrap();
  let run = dimensioner.run(&AdjacencyGraph::cycle(10), 1, 5).unwrap();

  assert_eq!(run.stats.threads, 2);
  assert_eq!(run.stats.tasks_submitted, 5);
  assert_eq!(run.stats.tasks_failed, 0);
  assert_eq!(run.series.len(), 5);
}

#[test]
fn test_all_cores_resolves_to_hardware() {
  let dimensioner = Dimensioner::with_all_cores();
  assert_eq!(dimensioner.threads(), 0);
  assert!(dimensioner.resolved_threads() >= 1);
  assert!(dimensioner.resolved_threads() <= MAX_THREADS);
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_rejects_too_many_threads() {
  assert!(matches!(
    run_box_count(&AdjacencyGraph::path(3), 1, 2, MAX_THREADS + 1),
    Err(FractalError::InvalidThreadCount(_))
  ));
  assert!(Dimensioner::new(MAX_THREADS).is_ok());
}

#[test]
fn test_rejects_bad_radius_ranges() {
  let graph = AdjacencyGraph::path(3);
  assert!(matches!(
    run_box_count(&graph, 0, 3, 1),
    Err(FractalError::InvalidRadiusRange { min: 0, max: 3 })
  ));
  assert!(matches!(
    run_box_count(&graph, 4, 2, 1),
    Err(FractalError::InvalidRadiusRange { min: 4, max: 2 })
  ));
}

#[test]
fn test_unknown_neighbor_propagates() {
  use crate::boxcount::test_utils::LabelGraph;

  let graph = LabelGraph::new(&["a", "b"], &[("a", "b"), ("b", "ghost")]);
  assert!(matches!(
    run_box_count(&graph, 1, 2, 1),
    Err(FractalError::UnknownNeighbor { .. })
  ));
}

// =========================================================================
// Failed radii
// =========================================================================

/// A panicking radius is missing; every other radius is present.
#[test]
fn test_panicking_radius_is_missing() {
  let base = Arc::new(ParticipantLayer::from_graph(&AdjacencyGraph::path(6)).unwrap());
  let run = Dimensioner::new(2)
    .unwrap()
    .run_layer(base, 1..=5, |layer, radius| {
      if radius == 3 {
        panic!("radius 3 failed");
      }
      box_count(layer, radius)
    })
    .unwrap();

  assert_eq!(run.series.radii().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
  assert_eq!(run.series.missing_radii(1..=5), vec![3]);
  assert_eq!(run.stats.tasks_submitted, 5);
  assert_eq!(run.stats.tasks_failed, 1);

  // The partial series still fits.
  assert!(run.series.dimension_linear().is_ok());
}

// =========================================================================
// Series fits
// =========================================================================

#[test]
fn test_series_fits() {
  let points = series(&[(1, 16), (2, 8), (4, 4), (8, 2)]);

  let log_log = points.dimension_log_log(2.0).unwrap();
  assert!((log_log + 1.0).abs() < 1e-12, "log_log = {log_log}");

  let linear = points.dimension_linear().unwrap();
  assert!(linear < 0.0, "Counts fall with radius");
}

#[test]
fn test_series_fit_needs_two_points() {
  assert!(matches!(
    BoxCountSeries::new().dimension_linear(),
    Err(FractalError::InsufficientData(0))
  ));
  assert!(matches!(
    series(&[(1, 4)]).dimension_log_log(2.0),
    Err(FractalError::InsufficientData(1))
  ));
}

#[test]
fn test_series_to_xy_is_ordered() {
  let mut points = BoxCountSeries::new();
  points.insert(3, 5);
  points.insert(1, 9);
  assert_eq!(points.insert(3, 6), Some(5));

  let (xs, ys) = points.to_xy();
  assert_eq!(xs, vec![1.0, 3.0]);
  assert_eq!(ys, vec![9.0, 6.0]);
  assert_eq!(points.get(2), None);
}
