//! Single-source shortest and longest paths over a DAG-ordered graph.
//!
//! # Overview
//!
//! Both modes relax edges strictly in the `vertex_order` produced by the
//! topological orderer, which makes each run linear in vertices plus
//! edges. Distances live in a dense `Vec<i64>` with one reserved sentinel
//! per mode: [`UNREACHABLE`] (shortest) and [`UNREACHED`] (longest). A
//! vertex still at its sentinel has never been relaxed and is skipped as a
//! relaxation origin.
//!
//! Both modes guard every relaxation with `checked_add`: a sum that would
//! wrap, or that would land exactly on the sentinel, is skipped and the
//! target keeps its previous distance. With pathological weight magnitudes
//! this can under-approximate reachability, which is the accepted
//! trade-off; it never produces a wrapped distance.
//!
//! The critical path is extracted after relaxation: the vertex with the
//! maximum finite distance, excluding the source itself and sentinel
//! values, lowest id on ties. When nothing else is reachable, or the
//! predecessor chain back from the chosen vertex is broken, the result
//! degenerates to `[source]` with length 0.

use tracing::{instrument, warn};

use crate::counters::Counters;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::topo::TopoResult;

/// Shortest-mode sentinel: the vertex was never reached.
pub const UNREACHABLE: i64 = i64::MAX;

/// Longest-mode sentinel: the vertex was never reached.
pub const UNREACHED: i64 = i64::MIN;

// ---------------------------------------------------------------------------
// PathMode
// ---------------------------------------------------------------------------

/// Relaxation objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Minimize distances; unreached vertices sit at [`UNREACHABLE`].
    Shortest,
    /// Maximize distances; unreached vertices sit at [`UNREACHED`].
    Longest,
}

impl PathMode {
    /// The reserved distance value meaning "never relaxed" in this mode.
    #[must_use]
    pub const fn sentinel(self) -> i64 {
        match self {
            Self::Shortest => UNREACHABLE,
            Self::Longest => UNREACHED,
        }
    }

    /// `true` for [`PathMode::Shortest`].
    #[must_use]
    pub const fn is_shortest(self) -> bool {
        matches!(self, Self::Shortest)
    }

    const fn improves(self, candidate: i64, current: i64) -> bool {
        match self {
            Self::Shortest => candidate < current,
            Self::Longest => candidate > current,
        }
    }
}

// ---------------------------------------------------------------------------
// PathResult
// ---------------------------------------------------------------------------

/// Distances, predecessors, and the extracted critical path for one mode.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Which objective produced this result.
    pub mode: PathMode,
    /// The source vertex all distances are measured from.
    pub source: usize,
    /// Dense per-vertex distances; sentinel of `mode` means unreached.
    pub distances: Vec<i64>,
    /// Per-vertex predecessor on the recorded path; `None` means the
    /// vertex was never relaxed from any edge.
    pub predecessors: Vec<Option<usize>>,
    /// Vertices from `source` to the critical-path terminal, inclusive.
    pub critical_path: Vec<usize>,
    /// Distance of the critical-path terminal, 0 when it is the source.
    pub critical_path_length: i64,
}

impl PathResult {
    /// Return `true` if `vertex` was reached from the source.
    #[must_use]
    pub fn is_reached(&self, vertex: usize) -> bool {
        self.distances
            .get(vertex)
            .is_some_and(|&d| d != self.mode.sentinel())
    }

    /// Distance to `vertex`, or `None` when unreached or out of range.
    #[must_use]
    pub fn distance_to(&self, vertex: usize) -> Option<i64> {
        self.distances
            .get(vertex)
            .copied()
            .filter(|&d| d != self.mode.sentinel())
    }

    /// Reconstruct the recorded path from the source to `target`.
    ///
    /// Returns `[source]` when `target` is the source itself, and an empty
    /// sequence when `target` has no predecessor entry or the chain does
    /// not terminate at the source. A partial path is never returned.
    #[must_use]
    pub fn reconstruct_path(&self, target: usize) -> Vec<usize> {
        if target >= self.distances.len() {
            return Vec::new();
        }
        if target == self.source {
            return vec![self.source];
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            match self.predecessors[current] {
                Some(prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => return Vec::new(),
            }
            // A chain longer than the vertex count has looped.
            if path.len() > self.distances.len() {
                warn!(target, "predecessor chain does not terminate");
                return Vec::new();
            }
        }
        path.reverse();
        path
    }
}

// ---------------------------------------------------------------------------
// AllPaths
// ---------------------------------------------------------------------------

/// Both relaxation modes over the same graph, order, and source.
#[derive(Debug, Clone)]
pub struct AllPaths {
    /// Shortest-mode result.
    pub shortest: PathResult,
    /// Longest-mode result.
    pub longest: PathResult,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Compute shortest-mode distances from `source`.
///
/// # Errors
///
/// [`Error::UnorderedInput`] when `topo` reports a cycle, and
/// [`Error::SourceOutOfRange`] when `source` is not a vertex of `graph`.
pub fn shortest_paths(graph: &Graph, topo: &TopoResult, source: usize) -> Result<PathResult> {
    relax(graph, topo, source, PathMode::Shortest, &mut Counters::default())
}

/// Like [`shortest_paths`], accumulating work counters into `counters`.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`].
pub fn shortest_paths_with(
    graph: &Graph,
    topo: &TopoResult,
    source: usize,
    counters: &mut Counters,
) -> Result<PathResult> {
    relax(graph, topo, source, PathMode::Shortest, counters)
}

/// Compute longest-mode distances from `source`.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`].
pub fn longest_paths(graph: &Graph, topo: &TopoResult, source: usize) -> Result<PathResult> {
    relax(graph, topo, source, PathMode::Longest, &mut Counters::default())
}

/// Like [`longest_paths`], accumulating work counters into `counters`.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`].
pub fn longest_paths_with(
    graph: &Graph,
    topo: &TopoResult,
    source: usize,
    counters: &mut Counters,
) -> Result<PathResult> {
    relax(graph, topo, source, PathMode::Longest, counters)
}

/// Run both modes independently over the same inputs.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`].
pub fn compute_all_paths(graph: &Graph, topo: &TopoResult, source: usize) -> Result<AllPaths> {
    compute_all_paths_with(graph, topo, source, &mut Counters::default())
}

/// Like [`compute_all_paths`], accumulating work counters into `counters`.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`].
pub fn compute_all_paths_with(
    graph: &Graph,
    topo: &TopoResult,
    source: usize,
    counters: &mut Counters,
) -> Result<AllPaths> {
    Ok(AllPaths {
        shortest: relax(graph, topo, source, PathMode::Shortest, counters)?,
        longest: relax(graph, topo, source, PathMode::Longest, counters)?,
    })
}

// ---------------------------------------------------------------------------
// Relaxation
// ---------------------------------------------------------------------------

#[instrument(skip(graph, topo, counters), fields(n = graph.n(), source, mode = ?mode))]
fn relax(
    graph: &Graph,
    topo: &TopoResult,
    source: usize,
    mode: PathMode,
    counters: &mut Counters,
) -> Result<PathResult> {
    if !topo.is_valid() {
        return Err(Error::UnorderedInput);
    }
    if source >= graph.n() {
        return Err(Error::SourceOutOfRange {
            source,
            n: graph.n(),
        });
    }

    let sentinel = mode.sentinel();
    let mut distances = vec![sentinel; graph.n()];
    distances[source] = 0;
    let mut predecessors: Vec<Option<usize>> = vec![None; graph.n()];

    for &u in &topo.vertex_order {
        if distances[u] == sentinel {
            continue;
        }
        counters.vertices_visited += 1;
        for edge in graph.outgoing(u) {
            counters.edges_relaxed += 1;
            // A self-loop never lies on a simple path; relaxing it would
            // move the origin's own distance mid-visit.
            if edge.is_self_loop() {
                continue;
            }
            let Some(candidate) = distances[u].checked_add(edge.w) else {
                continue;
            };
            // A candidate landing exactly on the sentinel would alias
            // "unreached"; skip it like an overflow.
            if candidate == sentinel {
                continue;
            }
            if mode.improves(candidate, distances[edge.v]) {
                distances[edge.v] = candidate;
                predecessors[edge.v] = Some(u);
            }
        }
    }

    let mut result = PathResult {
        mode,
        source,
        distances,
        predecessors,
        critical_path: Vec::new(),
        critical_path_length: 0,
    };
    let (critical_path, critical_path_length) = extract_critical_path(&result);
    result.critical_path = critical_path;
    result.critical_path_length = critical_path_length;
    Ok(result)
}

/// Pick the terminal with the maximum finite distance, excluding the
/// source and sentinel values (lowest id on ties), and walk back to the
/// source. Falls back to `([source], 0)` when nothing else is reachable or
/// the chain is broken.
fn extract_critical_path(result: &PathResult) -> (Vec<usize>, i64) {
    let mut terminal: Option<(usize, i64)> = None;
    for (v, &d) in result.distances.iter().enumerate() {
        // Either sentinel is excluded regardless of mode.
        if v == result.source || d == UNREACHABLE || d == UNREACHED {
            continue;
        }
        if terminal.is_none_or(|(_, best)| d > best) {
            terminal = Some((v, d));
        }
    }

    match terminal {
        None => (vec![result.source], 0),
        Some((v, d)) => {
            let path = result.reconstruct_path(v);
            if path.is_empty() {
                warn!(terminal = v, "critical path chain broken, degenerating");
                (vec![result.source], 0)
            } else {
                (path, d)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::{scc, topo};

    fn graph(n: usize, edges: &[(usize, usize, i64)], source: usize) -> Graph {
        Graph::new(
            true,
            n,
            edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect(),
            source,
            "edge",
        )
    }

    fn ordered(g: &Graph) -> TopoResult {
        let scc = scc::find_components(g);
        topo::order(&scc.condensation, &scc)
    }

    // -----------------------------------------------------------------------
    // Relaxation
    // -----------------------------------------------------------------------

    #[test]
    fn chain_distances_accumulate() {
        let g = graph(3, &[(0, 1, 5), (1, 2, 3)], 0);
        let t = ordered(&g);

        let shortest = shortest_paths(&g, &t, 0).expect("valid input");
        assert_eq!(shortest.distances, vec![0, 5, 8]);
        assert_eq!(shortest.critical_path, vec![0, 1, 2]);
        assert_eq!(shortest.critical_path_length, 8);

        let longest = longest_paths(&g, &t, 0).expect("valid input");
        assert_eq!(longest.distances, vec![0, 5, 8], "single path, modes agree");
    }

    #[test]
    fn diamond_splits_shortest_and_longest() {
        let g = graph(4, &[(0, 1, 2), (0, 2, 5), (1, 3, 1), (2, 3, 2)], 0);
        let t = ordered(&g);
        let all = compute_all_paths(&g, &t, 0).expect("valid input");

        assert_eq!(all.shortest.distance_to(3), Some(3), "via 1");
        assert_eq!(all.longest.distance_to(3), Some(7), "via 2");
        assert_eq!(all.longest.critical_path, vec![0, 2, 3]);
        assert_eq!(all.longest.critical_path_length, 7);
        assert_eq!(all.shortest.reconstruct_path(3), vec![0, 1, 3]);
    }

    #[test]
    fn unreachable_vertices_stay_at_sentinel() {
        let g = graph(3, &[(1, 2, 4)], 0);
        let t = ordered(&g);

        let shortest = shortest_paths(&g, &t, 0).expect("valid input");
        assert_eq!(shortest.distances[1], UNREACHABLE);
        assert!(!shortest.is_reached(1));
        assert_eq!(shortest.distance_to(2), None);

        let longest = longest_paths(&g, &t, 0).expect("valid input");
        assert_eq!(longest.distances[2], UNREACHED);
    }

    #[test]
    fn single_vertex_degenerates() {
        let g = graph(1, &[], 0);
        let t = ordered(&g);
        let all = compute_all_paths(&g, &t, 0).expect("valid input");

        assert_eq!(all.shortest.distances, vec![0]);
        assert_eq!(all.shortest.critical_path, vec![0]);
        assert_eq!(all.shortest.critical_path_length, 0);
        assert_eq!(all.longest.critical_path, vec![0]);
    }

    #[test]
    fn negative_weights_relax_in_both_modes() {
        let g = graph(3, &[(0, 1, -4), (1, 2, -1), (0, 2, 1)], 0);
        let t = ordered(&g);
        let all = compute_all_paths(&g, &t, 0).expect("valid input");

        assert_eq!(all.shortest.distance_to(2), Some(-5));
        assert_eq!(all.longest.distance_to(2), Some(1));
    }

    #[test]
    fn overflow_guard_skips_instead_of_wrapping() {
        // 0 -> 1 at i64::MAX aliases the shortest sentinel; 1 -> 2 would
        // then wrap. Both relaxations must be skipped.
        let g = graph(3, &[(0, 1, i64::MAX), (1, 2, 1)], 0);
        let t = ordered(&g);
        let shortest = shortest_paths(&g, &t, 0).expect("valid input");

        assert_eq!(shortest.distances[1], UNREACHABLE);
        assert_eq!(shortest.distances[2], UNREACHABLE);
    }

    #[test]
    fn longest_mode_overflow_guard() {
        let g = graph(3, &[(0, 1, i64::MIN), (1, 2, -1)], 0);
        let t = ordered(&g);
        let longest = longest_paths(&g, &t, 0).expect("valid input");

        // i64::MIN aliases the longest sentinel; skipped, not recorded.
        assert_eq!(longest.distances[1], UNREACHED);
        assert_eq!(longest.distances[2], UNREACHED);
    }

    #[test]
    fn vertices_inside_one_component_are_still_relaxed() {
        // 3-cycle {1,2,3} fed by 0, then a tail 3 -> 4. Relaxation follows
        // vertex_order, so edges inside the cycle relax at most once per
        // origin but the tail stays reachable.
        let g = graph(
            5,
            &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 1, 1), (3, 4, 1)],
            0,
        );
        let t = ordered(&g);
        let shortest = shortest_paths(&g, &t, 0).expect("valid input");

        assert!(shortest.is_reached(4));
        assert_eq!(shortest.distance_to(1), Some(1));
    }

    // -----------------------------------------------------------------------
    // Critical path
    // -----------------------------------------------------------------------

    #[test]
    fn critical_path_excludes_source_and_breaks_ties_low() {
        // Vertices 1 and 2 both at distance 3; the lower id wins.
        let g = graph(3, &[(0, 1, 3), (0, 2, 3)], 0);
        let t = ordered(&g);
        let longest = longest_paths(&g, &t, 0).expect("valid input");

        assert_eq!(longest.critical_path, vec![0, 1]);
        assert_eq!(longest.critical_path_length, 3);
    }

    #[test]
    fn critical_path_degenerates_when_nothing_reachable() {
        let g = graph(3, &[(1, 2, 5)], 0);
        let t = ordered(&g);
        let longest = longest_paths(&g, &t, 0).expect("valid input");

        assert_eq!(longest.critical_path, vec![0]);
        assert_eq!(longest.critical_path_length, 0);
    }

    // -----------------------------------------------------------------------
    // Reconstruction
    // -----------------------------------------------------------------------

    #[test]
    fn reconstruct_source_is_trivial() {
        let g = graph(2, &[(0, 1, 1)], 0);
        let t = ordered(&g);
        let shortest = shortest_paths(&g, &t, 0).expect("valid input");
        assert_eq!(shortest.reconstruct_path(0), vec![0]);
    }

    #[test]
    fn reconstruct_unreached_target_is_empty() {
        let g = graph(3, &[(1, 2, 1)], 0);
        let t = ordered(&g);
        let shortest = shortest_paths(&g, &t, 0).expect("valid input");
        assert!(shortest.reconstruct_path(2).is_empty());
        assert!(shortest.reconstruct_path(99).is_empty(), "out of range");
    }

    #[test]
    fn reconstruct_corrupt_chain_is_empty_never_partial() {
        // Hand-built result with a predecessor cycle that never reaches
        // the source.
        let result = PathResult {
            mode: PathMode::Shortest,
            source: 0,
            distances: vec![0, 1, 2],
            predecessors: vec![None, Some(2), Some(1)],
            critical_path: vec![0],
            critical_path_length: 0,
        };
        assert!(result.reconstruct_path(2).is_empty());
    }

    // -----------------------------------------------------------------------
    // Preconditions and counters
    // -----------------------------------------------------------------------

    #[test]
    fn invalid_order_is_refused() {
        let g = graph(2, &[(0, 1, 1)], 0);
        let mut t = ordered(&g);
        t.has_cycle = true;

        let err = shortest_paths(&g, &t, 0).expect_err("must refuse");
        assert_eq!(err, Error::UnorderedInput);
    }

    #[test]
    fn out_of_range_source_is_refused() {
        let g = graph(2, &[(0, 1, 1)], 0);
        let t = ordered(&g);
        let err = longest_paths(&g, &t, 9).expect_err("must refuse");
        assert_eq!(err, Error::SourceOutOfRange { source: 9, n: 2 });
    }

    #[test]
    fn counters_track_relaxations() {
        let g = graph(3, &[(0, 1, 1), (0, 2, 1), (1, 2, 1)], 0);
        let t = ordered(&g);
        let mut counters = Counters::default();
        let _ = shortest_paths_with(&g, &t, 0, &mut counters).expect("valid input");

        assert_eq!(counters.vertices_visited, 3);
        assert_eq!(counters.edges_relaxed, 3);
    }
}
