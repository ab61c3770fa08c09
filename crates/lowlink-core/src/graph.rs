//! Graph model: immutable-after-construction adjacency representation.
//!
//! # Overview
//!
//! [`Graph`] is the input boundary of the whole pipeline. Vertices are the
//! integers `0..n`; edges are ordered `(u, v, w)` triples. The persisted
//! record (see the CLI loader) carries exactly the fields serialized here:
//! a directedness flag, the vertex count, the edge list, a designated
//! source vertex, and an opaque `weight_model` tag the engines carry
//! through without interpreting.
//!
//! ## Adjacency index
//!
//! The outgoing-edge index is derived data, built at construction and
//! rebuilt whenever the edge list is replaced via [`Graph::set_edges`].
//! When `directed` is false, every edge is mirrored into the reverse
//! direction at index-build time — the engines themselves only ever see
//! outgoing edges and have no undirected mode.
//!
//! ## Validation
//!
//! The engines assume a validated graph and may index out of bounds on a
//! bad one. Callers must gate inputs through [`Graph::validate`] (or
//! [`Graph::ensure_valid`] for a typed error) before running any
//! algorithm. Self-loops and parallel edges are legal and validate fine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A weighted directed edge `u → v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex.
    pub u: usize,
    /// Target vertex.
    pub v: usize,
    /// Integer weight; any representable value is legal.
    pub w: i64,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub const fn new(u: usize, v: usize, w: i64) -> Self {
        Self { u, v, w }
    }

    /// Return `true` if this edge starts and ends at the same vertex.
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.u == self.v
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Mirror of the persisted graph record; [`Graph`] converts through this so
/// the adjacency index is always built after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRecord {
    directed: bool,
    n: usize,
    edges: Vec<Edge>,
    source: usize,
    weight_model: String,
}

/// A finite directed (or mirrored-undirected) integer-weighted graph.
///
/// Construction builds the outgoing-edge adjacency index once; all
/// engine-facing accessors are `&self` and cheap. Replacing the edge list
/// requires `&mut self`, so a graph shared between concurrent readers
/// cannot be mutated mid-call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GraphRecord", into = "GraphRecord")]
pub struct Graph {
    directed: bool,
    n: usize,
    edges: Vec<Edge>,
    source: usize,
    weight_model: String,
    /// Derived: outgoing edges per vertex, mirrored when undirected.
    adjacency: Vec<Vec<Edge>>,
}

impl From<GraphRecord> for Graph {
    fn from(record: GraphRecord) -> Self {
        Self::new(
            record.directed,
            record.n,
            record.edges,
            record.source,
            record.weight_model,
        )
    }
}

impl From<Graph> for GraphRecord {
    fn from(graph: Graph) -> Self {
        Self {
            directed: graph.directed,
            n: graph.n,
            edges: graph.edges,
            source: graph.source,
            weight_model: graph.weight_model,
        }
    }
}

impl Graph {
    /// Construct a graph and build its adjacency index.
    #[must_use]
    pub fn new(
        directed: bool,
        n: usize,
        edges: Vec<Edge>,
        source: usize,
        weight_model: impl Into<String>,
    ) -> Self {
        let mut graph = Self {
            directed,
            n,
            edges,
            source,
            weight_model: weight_model.into(),
            adjacency: Vec::new(),
        };
        graph.rebuild_adjacency();
        graph
    }

    /// Vertex count.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Directedness flag of the persisted record.
    #[must_use]
    pub const fn directed(&self) -> bool {
        self.directed
    }

    /// Designated source vertex for path computations.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Opaque weight-model tag carried through the pipeline.
    #[must_use]
    pub fn weight_model(&self) -> &str {
        &self.weight_model
    }

    /// The edge list as constructed (un-mirrored, insertion order).
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `vertex` from the cached index.
    ///
    /// Returns an empty slice for vertices with no outgoing edges and for
    /// out-of-range vertices.
    #[must_use]
    pub fn outgoing(&self, vertex: usize) -> &[Edge] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Replace the edge list and rebuild the adjacency index.
    ///
    /// Mutation requires exclusive access; concurrent readers never
    /// observe a stale index.
    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
        self.rebuild_adjacency();
    }

    /// Check structural validity: `n > 0`, source in range, and every edge
    /// endpoint in `[0, n)`.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.first_violation().is_none()
    }

    /// Like [`Graph::validate`], but return a typed error naming the first
    /// violation found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGraph`] when the graph is structurally
    /// invalid.
    pub fn ensure_valid(&self) -> Result<()> {
        match self.first_violation() {
            None => Ok(()),
            Some(reason) => Err(Error::InvalidGraph { reason }),
        }
    }

    fn first_violation(&self) -> Option<String> {
        if self.n == 0 {
            return Some("graph has no vertices".to_string());
        }
        if self.source >= self.n {
            return Some(format!(
                "source {} out of range for {} vertices",
                self.source, self.n
            ));
        }
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.u >= self.n || edge.v >= self.n {
                return Some(format!(
                    "edge {} ({} -> {}) has an endpoint out of range for {} vertices",
                    i, edge.u, edge.v, self.n
                ));
            }
        }
        None
    }

    fn rebuild_adjacency(&mut self) {
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); self.n];
        for edge in &self.edges {
            if edge.u < self.n && edge.v < self.n {
                adjacency[edge.u].push(*edge);
                if !self.directed && !edge.is_self_loop() {
                    adjacency[edge.v].push(Edge::new(edge.v, edge.u, edge.w));
                }
            }
        }
        self.adjacency = adjacency;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph {
        Graph::new(
            true,
            3,
            vec![Edge::new(0, 1, 5), Edge::new(1, 2, 3)],
            0,
            "edge",
        )
    }

    #[test]
    fn adjacency_built_on_construction() {
        let g = chain();
        assert_eq!(g.outgoing(0), &[Edge::new(0, 1, 5)]);
        assert_eq!(g.outgoing(1), &[Edge::new(1, 2, 3)]);
        assert!(g.outgoing(2).is_empty());
        assert!(g.outgoing(99).is_empty(), "out of range is empty, not panic");
    }

    #[test]
    fn undirected_edges_are_mirrored() {
        let g = Graph::new(false, 2, vec![Edge::new(0, 1, 7)], 0, "edge");
        assert_eq!(g.outgoing(0), &[Edge::new(0, 1, 7)]);
        assert_eq!(g.outgoing(1), &[Edge::new(1, 0, 7)]);
    }

    #[test]
    fn undirected_self_loop_not_duplicated() {
        let g = Graph::new(false, 1, vec![Edge::new(0, 0, 1)], 0, "edge");
        assert_eq!(g.outgoing(0).len(), 1);
    }

    #[test]
    fn set_edges_rebuilds_index() {
        let mut g = chain();
        g.set_edges(vec![Edge::new(2, 0, 1)]);
        assert!(g.outgoing(0).is_empty());
        assert_eq!(g.outgoing(2), &[Edge::new(2, 0, 1)]);
    }

    #[test]
    fn validate_rejects_bad_structure() {
        assert!(chain().validate());
        assert!(!Graph::new(true, 0, vec![], 0, "edge").validate());
        assert!(!Graph::new(true, 3, vec![], 5, "edge").validate());
        assert!(!Graph::new(true, 3, vec![Edge::new(0, 9, 1)], 0, "edge").validate());
    }

    #[test]
    fn ensure_valid_names_the_violation() {
        let err = Graph::new(true, 3, vec![Edge::new(0, 9, 1)], 0, "edge")
            .ensure_valid()
            .expect_err("edge endpoint out of range");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn self_loops_and_parallel_edges_validate() {
        let g = Graph::new(
            true,
            2,
            vec![
                Edge::new(0, 0, 1),
                Edge::new(0, 1, 2),
                Edge::new(0, 1, 9),
            ],
            0,
            "edge",
        );
        assert!(g.validate());
        assert_eq!(g.outgoing(0).len(), 3);
    }

    #[test]
    fn serde_round_trip_rebuilds_adjacency() {
        let json = serde_json::to_string(&chain()).expect("serialize");
        let back: Graph = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.n(), 3);
        assert_eq!(back.weight_model(), "edge");
        assert_eq!(back.outgoing(0), &[Edge::new(0, 1, 5)]);
    }

    #[test]
    fn record_schema_field_names() {
        let json = serde_json::to_value(&chain()).expect("serialize");
        for key in ["directed", "n", "edges", "source", "weight_model"] {
            assert!(json.get(key).is_some(), "record must carry `{key}`");
        }
        assert_eq!(json["edges"][0]["u"], 0);
        assert_eq!(json["edges"][0]["v"], 1);
        assert_eq!(json["edges"][0]["w"], 5);
    }
}
