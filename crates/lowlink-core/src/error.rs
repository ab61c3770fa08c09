//! Error types for the lowlink analysis engine.
//!
//! The engines distinguish *refusing to run* (precondition failures,
//! surfaced as [`Error`]) from *empty but successful* results (zero
//! components, unreachable vertices). Unreachability is never an error; it
//! is encoded in the distance sentinels of
//! [`PathResult`](crate::paths::PathResult).

/// Result type alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition and internal-consistency errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The graph failed structural validation and must not reach the
    /// engines (they assume in-range indices and may otherwise index out
    /// of bounds).
    InvalidGraph {
        /// Human-readable description of the first violation found.
        reason: String,
    },

    /// A topological result with `has_cycle` set was passed to the path
    /// engine. Distinct from "zero reachable vertices", which is a normal
    /// result.
    UnorderedInput,

    /// The requested source vertex lies outside `[0, n)`.
    SourceOutOfRange {
        /// The offending source vertex.
        source: usize,
        /// Vertex count of the graph.
        n: usize,
    },

    /// Kahn's algorithm failed to order a condensation the SCC engine
    /// claims is acyclic. This indicates a bug in the SCC engine, not bad
    /// input; it is surfaced so callers can report it without a crash.
    CyclicCondensation,
}

// Manual `Display`/`Error` impls: `thiserror`'s derive hardwires any field
// named `source` as the error's `source()`, which does not type-check for a
// plain `usize`, and the field name is part of the public API.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGraph { reason } => write!(f, "invalid graph: {reason}"),
            Self::UnorderedInput => {
                write!(
                    f,
                    "topological order is not valid: condensation reported a cycle"
                )
            }
            Self::SourceOutOfRange { source, n } => {
                write!(
                    f,
                    "source vertex {source} out of range for graph with {n} vertices"
                )
            }
            Self::CyclicCondensation => write!(
                f,
                "internal inconsistency: condensation graph could not be topologically ordered"
            ),
        }
    }
}

impl std::error::Error for Error {}
