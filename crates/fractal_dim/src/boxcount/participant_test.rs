use super::*;
use crate::boxcount::test_utils::{base_layer, graph_distances, LabelGraph};
use crate::graph::AdjacencyGraph;

// =========================================================================
// Wiring
// =========================================================================

#[test]
fn test_base_layer_wraps_every_node() {
  let graph = AdjacencyGraph::path(4);
  let layer = base_layer(&graph);

  assert_eq!(layer.len(), 4);
  for (idx, participant) in layer.participants().iter().enumerate() {
    let node = participant.as_node().expect("base layer holds nodes");
    assert_eq!(node.node_index(), idx);
    assert!(participant.as_box().is_none());
  }
  assert_eq!(layer.boxes().count(), 0);
}

#[test]
fn test_wiring_matches_graph() {
  let graph = AdjacencyGraph::star(5);
  let layer = base_layer(&graph);

  assert_eq!(layer.neighbors(0), &[1, 2, 3, 4]);
  for leaf in 1..5 {
    assert_eq!(layer.neighbors(leaf), &[0]);
  }
  assert_eq!(layer.link_count(), 4);
}

/// Parallel edges collapse into one link.
#[test]
fn test_duplicate_edges_collapse() {
  let graph = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 0), (0, 1), (1, 2)]);
  let layer = base_layer(&graph);

  assert_eq!(layer.neighbors(0), &[1]);
  assert_eq!(layer.neighbors(1), &[0, 2]);
  assert_eq!(layer.link_count(), 2);
}

#[test]
fn test_self_loops_are_ignored() {
  let graph = AdjacencyGraph::from_edges(2, &[(0, 0), (0, 1), (1, 1)]);
  let layer = base_layer(&graph);

  assert_eq!(layer.neighbors(0), &[1]);
  assert_eq!(layer.neighbors(1), &[0]);
}

/// A graph that only reports outgoing arcs still wires undirected links.
#[test]
fn test_one_sided_reports_are_symmetrized() {
  let graph = LabelGraph::new(&["a", "b", "c"], &[("a", "b"), ("c", "b")]);
  let layer = base_layer(&graph);

  // a=0, b=1, c=2
  assert_eq!(layer.neighbors(0), &[1]);
  assert_eq!(layer.neighbors(1), &[0, 2]);
  assert_eq!(layer.neighbors(2), &[1]);
  assert!(layer.is_neighbor(1, 2));
  assert!(layer.is_neighbor(2, 1));
}

#[test]
fn test_unknown_neighbor_is_rejected() {
  let graph = LabelGraph::new(&["a", "b"], &[("a", "ghost")]);
  let err = ParticipantLayer::from_graph(&graph).unwrap_err();

  match err {
    FractalError::UnknownNeighbor { node, neighbor } => {
      assert!(node.contains('a'));
      assert!(neighbor.contains("ghost"));
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_empty_graph_gives_empty_layer() {
  let layer = base_layer(&AdjacencyGraph::default());
  assert!(layer.is_empty());
  assert_eq!(layer.link_count(), 0);
}

// =========================================================================
// Neighborhood expansion
// =========================================================================

#[test]
fn test_neighborhood_on_path() {
  let layer = base_layer(&AdjacencyGraph::path(5));

  let hood = layer.neighborhood(0, 2);
  assert_eq!(hood.origin(), 0);
  assert_eq!(hood.radius(), 2);
  assert_eq!(hood.len(), 2);
  assert!(hood.contains(1));
  assert!(hood.contains(2));
  assert!(!hood.contains(3));

  let middle = layer.neighborhood(2, 1);
  assert!(middle.contains(1) && middle.contains(3));
  assert_eq!(middle.len(), 2);
}

#[test]
fn test_neighborhood_excludes_origin() {
  let layer = base_layer(&AdjacencyGraph::cycle(4));
  let hood = layer.neighborhood(0, 5);

  assert!(!hood.contains(0), "Origin is never in its own neighborhood");
  assert_eq!(hood.len(), 3);
}

#[test]
fn test_zero_radius_is_empty() {
  let layer = base_layer(&AdjacencyGraph::complete(4));
  assert!(layer.neighborhood(1, 0).is_empty());
}

/// The expansion must reach exactly the nodes within `radius` shortest-path
/// hops, whatever the visiting order.
#[test]
fn test_neighborhood_matches_shortest_paths_on_grid() {
  let graph = AdjacencyGraph::grid(4, 4);
  let layer = base_layer(&graph);

  for origin in 0..graph.node_count() {
    let dist = graph_distances(&graph, origin);
    for radius in 0..5 {
      let hood = layer.neighborhood(origin, radius);
      for (node, d) in dist.iter().enumerate() {
        let expected = node != origin && d.is_some_and(|d| d <= radius);
        assert_eq!(
          hood.contains(node),
          expected,
          "origin {origin}, radius {radius}, node {node} at {d:?}"
        );
      }
    }
  }
}

/// Two routes of different length to the same node: the short route must win
/// even when the long route is explored first.
#[test]
fn test_neighborhood_prefers_shortest_route() {
  // 0-1-2-3 chain plus a shortcut 0-3, then 3-4.
  let graph = AdjacencyGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (0, 3), (3, 4)]);
  let layer = base_layer(&graph);

  let hood = layer.neighborhood(0, 2);
  assert!(hood.contains(4), "4 is two hops away through the shortcut");
}

#[test]
fn test_isolated_node_has_empty_neighborhood() {
  let layer = base_layer(&AdjacencyGraph::with_nodes(3));
  for node in 0..3 {
    assert!(layer.neighborhood(node, 3).is_empty());
  }
}
