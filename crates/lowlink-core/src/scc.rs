//! Strongly connected component decomposition (Tarjan's algorithm).
//!
//! # Overview
//!
//! [`find_components`] partitions a graph into SCCs and builds the
//! condensation graph (SCCs collapsed to single vertices). The
//! condensation is acyclic by construction — that acyclicity is this
//! engine's correctness property, and the orderer re-checks it
//! defensively rather than assuming it.
//!
//! # Algorithm
//!
//! Tarjan's low-link computation, run iteratively: the DFS is driven by an
//! explicit work-stack of `(vertex, edge-cursor)` frames, so traversal
//! depth is bounded by memory rather than the call stack. The low-link
//! update rule and the root-closing condition are unchanged from the
//! recursive formulation:
//!
//! - a freshly visited neighbor contributes its *low-link* when its frame
//!   closes;
//! - an already-visited neighbor still on the component stack contributes
//!   its *discovery index*;
//! - a vertex whose low-link equals its own discovery index is a component
//!   root: the component stack is popped down to and including it.
//!
//! Components are emitted in root-close order, which is a reverse
//! topological order of the condensation. Nothing downstream relies on
//! that, but it is a useful sanity check on output order.
//!
//! Decomposition is total: the empty graph yields zero components, an
//! edgeless vertex yields a singleton, and self-loops and parallel edges
//! need no special casing.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::counters::Counters;
use crate::graph::{Edge, Graph};

/// Sentinel discovery index for vertices the DFS has not reached.
const UNVISITED: usize = usize::MAX;

// ---------------------------------------------------------------------------
// SccResult
// ---------------------------------------------------------------------------

/// Result of SCC decomposition.
#[derive(Debug, Clone)]
pub struct SccResult {
    /// Components in root-close (reverse topological) order. Each
    /// component's members are sorted ascending by vertex id; together
    /// the components cover every vertex exactly once.
    pub components: Vec<Vec<usize>>,
    /// Dense mapping vertex → index into `components`.
    pub component_id: Vec<usize>,
    /// The condensation: a directed graph over `components.len()`
    /// vertices, with cross-component edges de-duplicated (first weight
    /// seen wins) and the source mapped through `component_id`.
    pub condensation: Graph,
}

impl SccResult {
    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component index containing `vertex`, or `None` when out of range.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> Option<usize> {
        self.component_id.get(vertex).copied()
    }

    /// Sizes of the components, in component order.
    #[must_use]
    pub fn component_sizes(&self) -> Vec<usize> {
        self.components.iter().map(Vec::len).collect()
    }

    /// Number of components with more than one member (true cycles).
    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.components.iter().filter(|c| c.len() > 1).count()
    }
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// Decompose `graph` into strongly connected components.
///
/// Total over any validated graph, including the empty one.
#[must_use]
pub fn find_components(graph: &Graph) -> SccResult {
    find_components_with(graph, &mut Counters::default())
}

/// Like [`find_components`], accumulating work counters into `counters`.
#[must_use]
#[instrument(skip(graph, counters), fields(n = graph.n(), edges = graph.edges().len()))]
pub fn find_components_with(graph: &Graph, counters: &mut Counters) -> SccResult {
    let n = graph.n();

    let mut index_of = vec![UNVISITED; n];
    let mut lowlink = vec![0_usize; n];
    let mut on_stack = FixedBitSet::with_capacity(n);
    let mut stack: Vec<usize> = Vec::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut next_index = 0_usize;

    // Explicit DFS frames: (vertex, cursor into its outgoing edges).
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if index_of[root] != UNVISITED {
            continue;
        }

        open_vertex(
            root,
            &mut next_index,
            &mut index_of,
            &mut lowlink,
            &mut stack,
            &mut on_stack,
            &mut frames,
            counters,
        );

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            if let Some(edge) = graph.outgoing(v).get(frame.1).copied() {
                frame.1 += 1;
                let w = edge.v;
                if index_of[w] == UNVISITED {
                    open_vertex(
                        w,
                        &mut next_index,
                        &mut index_of,
                        &mut lowlink,
                        &mut stack,
                        &mut on_stack,
                        &mut frames,
                        counters,
                    );
                } else if on_stack.contains(w) {
                    lowlink[v] = lowlink[v].min(index_of[w]);
                }
            } else {
                // All edges of `v` explored: close the frame.
                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }
                if lowlink[v] == index_of[v] {
                    // `v` is a component root: pop down to and including it.
                    let mut component = Vec::new();
                    while let Some(popped) = stack.pop() {
                        on_stack.set(popped, false);
                        component.push(popped);
                        if popped == v {
                            break;
                        }
                    }
                    component.sort_unstable();
                    components.push(component);
                }
            }
        }
    }

    let component_id = build_component_ids(&components, n);
    let condensation = build_condensation(graph, &components, &component_id);

    debug!(
        components = components.len(),
        cycles = components.iter().filter(|c| c.len() > 1).count(),
        "scc decomposition complete"
    );

    SccResult {
        components,
        component_id,
        condensation,
    }
}

/// Assign the next discovery index to `vertex` and push it onto both the
/// component stack and the DFS frame stack.
#[allow(clippy::too_many_arguments)]
fn open_vertex(
    vertex: usize,
    next_index: &mut usize,
    index_of: &mut [usize],
    lowlink: &mut [usize],
    stack: &mut Vec<usize>,
    on_stack: &mut FixedBitSet,
    frames: &mut Vec<(usize, usize)>,
    counters: &mut Counters,
) {
    index_of[vertex] = *next_index;
    lowlink[vertex] = *next_index;
    *next_index += 1;
    stack.push(vertex);
    on_stack.insert(vertex);
    frames.push((vertex, 0));
    counters.vertices_visited += 1;
    counters.stack_ops += 1;
}

// ---------------------------------------------------------------------------
// Post-processing
// ---------------------------------------------------------------------------

fn build_component_ids(components: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut component_id = vec![0_usize; n];
    for (cid, component) in components.iter().enumerate() {
        for &vertex in component {
            component_id[vertex] = cid;
        }
    }
    component_id
}

/// Build the condensation graph by mapping each original edge through the
/// component ids, skipping intra-component edges and de-duplicating
/// cross-component pairs (first occurrence's weight is kept; later
/// duplicate weights are dropped — a documented simplification).
fn build_condensation(graph: &Graph, components: &[Vec<usize>], component_id: &[usize]) -> Graph {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut edges: Vec<Edge> = Vec::new();

    for edge in graph.edges() {
        let a = component_id[edge.u];
        let b = component_id[edge.v];
        if a != b && seen.insert((a, b)) {
            edges.push(Edge::new(a, b, edge.w));
        }
    }

    let source = if graph.n() == 0 {
        0
    } else {
        component_id[graph.source()]
    };

    Graph::new(true, components.len(), edges, source, graph.weight_model())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
