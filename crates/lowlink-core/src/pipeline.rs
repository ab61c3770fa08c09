//! Whole-graph analysis: validation, SCC, ordering, and both path modes
//! in one call.

use tracing::instrument;

use crate::counters::Counters;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::paths::{self, AllPaths};
use crate::scc::{self, SccResult};
use crate::topo::{self, TopoResult};

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Per-stage work counters for one [`analyze`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StageCounters {
    /// SCC decomposition.
    pub scc: Counters,
    /// Topological ordering.
    pub topo: Counters,
    /// Both path modes combined.
    pub paths: Counters,
}

impl StageCounters {
    /// Sum of all stages.
    #[must_use]
    pub fn total(&self) -> Counters {
        let mut total = self.scc;
        total.absorb(self.topo);
        total.absorb(self.paths);
        total
    }
}

/// Everything the pipeline produces for one graph.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Component decomposition and condensation.
    pub scc: SccResult,
    /// Component and vertex orders.
    pub topo: TopoResult,
    /// Shortest- and longest-mode results from the graph's source.
    pub paths: AllPaths,
    /// Work counters, per stage.
    pub counters: StageCounters,
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

/// Run the full pipeline on `graph` from its designated source.
///
/// Stages run to completion in order; each receives its own working
/// arrays and no state is shared between invocations.
///
/// # Errors
///
/// [`Error::InvalidGraph`] when the graph fails structural validation,
/// and [`Error::CyclicCondensation`] when the orderer cannot linearize
/// the condensation (an internal inconsistency, not bad input).
#[instrument(skip(graph), fields(n = graph.n(), edges = graph.edges().len()))]
pub fn analyze(graph: &Graph) -> Result<Analysis> {
    graph.ensure_valid()?;

    let mut counters = StageCounters::default();
    let scc = scc::find_components_with(graph, &mut counters.scc);
    let topo = topo::order_with(&scc.condensation, &scc, &mut counters.topo);
    if !topo.is_valid() {
        return Err(Error::CyclicCondensation);
    }
    let paths = paths::compute_all_paths_with(graph, &topo, graph.source(), &mut counters.paths)?;

    Ok(Analysis {
        scc,
        topo,
        paths,
        counters,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
