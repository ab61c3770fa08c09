//! Topological ordering of the condensation graph (Kahn's algorithm).
//!
//! # Overview
//!
//! [`order`] linearizes the condensation produced by the SCC engine and
//! derives an order over the *original* vertices from it. A topological
//! order only constrains vertices in different components; inside one
//! component no acyclic order exists, so intra-component order is fixed by
//! convention: members are appended sorted ascending by vertex id. That
//! tie-break makes the derived `vertex_order` deterministic.
//!
//! A correctly built condensation is acyclic, so `has_cycle` should never
//! be set — it is a defensive check that surfaces an SCC-engine bug here
//! instead of letting it corrupt path results downstream.
//!
//! The two validation helpers are part of the public surface: callers and
//! test harnesses use them to confirm an order against the graph it came
//! from.

use std::collections::VecDeque;

use tracing::{instrument, warn};

use crate::counters::Counters;
use crate::graph::Graph;
use crate::scc::SccResult;

// ---------------------------------------------------------------------------
// TopoResult
// ---------------------------------------------------------------------------

/// Result of topologically ordering a condensation graph.
#[derive(Debug, Clone)]
pub struct TopoResult {
    /// Permutation of condensation vertex ids; for every condensation edge
    /// `(a, b)`, `a` appears before `b`.
    pub component_order: Vec<usize>,
    /// Original vertices: each component's members (sorted ascending),
    /// concatenated in `component_order`.
    pub vertex_order: Vec<usize>,
    /// Set when the condensation could not be fully ordered. Indicates an
    /// internal inconsistency, not bad input.
    pub has_cycle: bool,
}

impl TopoResult {
    /// Return `true` if the order is usable by the path engine.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.has_cycle
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Topologically order `condensation`, deriving the vertex order from the
/// SCC partition in `scc`.
#[must_use]
pub fn order(condensation: &Graph, scc: &SccResult) -> TopoResult {
    order_with(condensation, scc, &mut Counters::default())
}

/// Like [`order`], accumulating work counters into `counters`.
#[must_use]
#[instrument(skip(condensation, scc, counters), fields(components = condensation.n()))]
pub fn order_with(condensation: &Graph, scc: &SccResult, counters: &mut Counters) -> TopoResult {
    let n = condensation.n();

    let mut in_degree = vec![0_usize; n];
    for edge in condensation.edges() {
        in_degree[edge.v] += 1;
    }

    // Seed with all zero-in-degree components, in ascending id order so
    // the result is deterministic.
    let mut queue: VecDeque<usize> = (0..n).filter(|&c| in_degree[c] == 0).collect();
    counters.queue_ops += queue.len() as u64;

    let mut component_order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        component_order.push(u);
        for edge in condensation.outgoing(u) {
            in_degree[edge.v] -= 1;
            if in_degree[edge.v] == 0 {
                queue.push_back(edge.v);
                counters.queue_ops += 1;
            }
        }
    }

    let has_cycle = component_order.len() != n;
    if has_cycle {
        warn!(
            ordered = component_order.len(),
            components = n,
            "condensation could not be fully ordered"
        );
    }

    let vertex_order = component_order
        .iter()
        .flat_map(|&cid| scc.components[cid].iter().copied())
        .collect();

    TopoResult {
        component_order,
        vertex_order,
        has_cycle,
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Check a candidate `vertex_order` against the original graph: every edge
/// whose endpoints lie in *different* components must go from an earlier
/// position to a later one. Intra-component edges are exempt (no acyclic
/// order can satisfy them).
///
/// Returns `false` when the order is not a usable permutation of the
/// graph's vertices or when any cross-component edge is violated.
#[must_use]
pub fn validate_vertex_order(graph: &Graph, vertex_order: &[usize], scc: &SccResult) -> bool {
    let mut position: Vec<Option<usize>> = vec![None; graph.n()];
    for (pos, &v) in vertex_order.iter().enumerate() {
        if v >= graph.n() || position[v].is_some() {
            return false;
        }
        position[v] = Some(pos);
    }

    for edge in graph.edges() {
        if scc.component_of(edge.u) == scc.component_of(edge.v) {
            continue;
        }
        match (position[edge.u], position[edge.v]) {
            (Some(pu), Some(pv)) if pu < pv => {}
            _ => {
                warn!(u = edge.u, v = edge.v, "vertex order violates edge");
                return false;
            }
        }
    }
    true
}

/// Stricter variant: check only condensation-level edges against the
/// component order itself.
#[must_use]
pub fn validate_component_order(condensation: &Graph, component_order: &[usize]) -> bool {
    let mut position: Vec<Option<usize>> = vec![None; condensation.n()];
    for (pos, &c) in component_order.iter().enumerate() {
        if c >= condensation.n() || position[c].is_some() {
            return false;
        }
        position[c] = Some(pos);
    }

    condensation.edges().iter().all(|edge| {
        matches!(
            (position[edge.u], position[edge.v]),
            (Some(pu), Some(pv)) if pu < pv
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
