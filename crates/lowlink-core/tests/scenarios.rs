//! End-to-end scenarios over the public API: each exercises the full
//! decomposition / ordering / path pipeline against hand-checked results.

use lowlink_core::paths::{UNREACHABLE, UNREACHED};
use lowlink_core::{Edge, Error, Graph, analyze, scc, topo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn graph(n: usize, edges: &[(usize, usize, i64)], source: usize) -> Graph {
    Graph::new(
        true,
        n,
        edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect(),
        source,
        "edge",
    )
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn chain_of_three() {
    let g = graph(3, &[(0, 1, 5), (1, 2, 3)], 0);
    let analysis = analyze(&g).expect("valid graph");

    assert_eq!(analysis.scc.component_count(), 3);
    assert_eq!(analysis.topo.vertex_order, vec![0, 1, 2]);
    assert_eq!(analysis.paths.shortest.distances, vec![0, 5, 8]);
    assert_eq!(analysis.paths.longest.distances, vec![0, 5, 8]);
    assert_eq!(analysis.paths.longest.critical_path, vec![0, 1, 2]);
    assert_eq!(analysis.paths.longest.critical_path_length, 8);
}

#[test]
fn diamond_shortest_and_longest_disagree() {
    let g = graph(4, &[(0, 1, 2), (0, 2, 5), (1, 3, 1), (2, 3, 2)], 0);
    let analysis = analyze(&g).expect("valid graph");

    assert_eq!(analysis.paths.shortest.distance_to(3), Some(3));
    assert_eq!(analysis.paths.shortest.reconstruct_path(3), vec![0, 1, 3]);
    assert_eq!(analysis.paths.longest.distance_to(3), Some(7));
    assert_eq!(analysis.paths.longest.critical_path, vec![0, 2, 3]);
}

#[test]
fn cycle_with_unreachable_tail() {
    // 3-cycle {1,2,3}, separate chain 4 -> 5 -> 6 -> 7, isolated vertex 0.
    let g = graph(
        8,
        &[
            (1, 2, 1),
            (2, 3, 1),
            (3, 1, 1),
            (4, 5, 2),
            (5, 6, 2),
            (6, 7, 2),
        ],
        4,
    );
    let analysis = analyze(&g).expect("valid graph");

    assert_eq!(analysis.scc.component_count(), 6);
    let cycle_component = analysis.scc.component_of(1);
    assert_eq!(cycle_component, analysis.scc.component_of(2));
    assert_eq!(cycle_component, analysis.scc.component_of(3));

    assert!(topo::validate_vertex_order(
        &g,
        &analysis.topo.vertex_order,
        &analysis.scc
    ));

    for v in [0, 1, 2, 3] {
        assert_eq!(analysis.paths.shortest.distances[v], UNREACHABLE);
        assert_eq!(analysis.paths.longest.distances[v], UNREACHED);
        assert!(analysis.paths.shortest.reconstruct_path(v).is_empty());
    }
    assert_eq!(analysis.paths.longest.critical_path, vec![4, 5, 6, 7]);
}

#[test]
fn single_vertex_no_edges() {
    let g = graph(1, &[], 0);
    let analysis = analyze(&g).expect("valid graph");

    assert_eq!(analysis.scc.components, vec![vec![0]]);
    assert_eq!(analysis.topo.vertex_order, vec![0]);
    assert_eq!(analysis.paths.shortest.distance_to(0), Some(0));
    assert_eq!(analysis.paths.longest.distance_to(0), Some(0));
    assert_eq!(analysis.paths.shortest.critical_path, vec![0]);
    assert_eq!(analysis.paths.shortest.critical_path_length, 0);
}

#[test]
fn empty_graph_engines_are_total_but_pipeline_refuses() {
    let g = graph(0, &[], 0);

    // The engines themselves handle zero vertices.
    let scc = scc::find_components(&g);
    assert_eq!(scc.component_count(), 0);
    let order = topo::order(&scc.condensation, &scc);
    assert!(order.is_valid());
    assert!(order.vertex_order.is_empty());

    // The validated pipeline rejects it before any stage runs.
    let err = analyze(&g).expect_err("empty graph fails validation");
    assert!(matches!(err, Error::InvalidGraph { .. }));
}

#[test]
fn self_loops_and_parallel_edges_survive_the_pipeline() {
    let g = graph(3, &[(0, 0, 9), (0, 1, 4), (0, 1, 2), (1, 2, 1)], 0);
    let analysis = analyze(&g).expect("valid graph");

    // A self-loop makes a singleton component but no larger cycle.
    assert_eq!(analysis.scc.component_count(), 3);
    // Parallel edges: shortest takes the cheaper one, longest the dearer.
    assert_eq!(analysis.paths.shortest.distance_to(1), Some(2));
    assert_eq!(analysis.paths.longest.distance_to(1), Some(4));
    assert_eq!(analysis.paths.shortest.distance_to(2), Some(3));
    assert_eq!(analysis.paths.longest.distance_to(2), Some(5));
}
