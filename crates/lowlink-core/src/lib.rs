#![forbid(unsafe_code)]
//! lowlink-core: SCC decomposition, condensation ordering, and DAG paths.
//!
//! The pipeline runs in three linked stages over a finite directed
//! integer-weighted [`Graph`]:
//!
//! 1. [`scc::find_components`] — iterative Tarjan decomposition into
//!    strongly connected components plus the acyclic condensation graph.
//! 2. [`topo::order`] — Kahn ordering of the condensation, flattened
//!    into a deterministic order over the original vertices.
//! 3. [`paths`] — single-source shortest- and longest-mode relaxation in
//!    that order, with critical-path extraction.
//!
//! [`pipeline::analyze`] runs all three from a graph's designated source.
//! Each stage is a pure function of its inputs; nothing is retained
//! between invocations, so concurrent calls on distinct graphs need no
//! locking.
//!
//! # Conventions
//!
//! - **Errors**: typed [`Error`](error::Error) with a crate-local
//!   [`Result`](error::Result) alias; unreachability is a normal result,
//!   never an error.
//! - **Logging**: `tracing` macros and `#[instrument]` on engine entry
//!   points; no subscriber is installed here.

pub mod counters;
pub mod error;
pub mod graph;
pub mod paths;
pub mod pipeline;
pub mod scc;
pub mod topo;

pub use counters::Counters;
pub use error::{Error, Result};
pub use graph::{Edge, Graph};
pub use paths::{AllPaths, PathMode, PathResult, UNREACHABLE, UNREACHED};
pub use pipeline::{Analysis, StageCounters, analyze};
pub use scc::SccResult;
pub use topo::TopoResult;
