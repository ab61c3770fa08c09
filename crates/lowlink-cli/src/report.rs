//! Console report over one full analysis run, with per-stage wall-clock
//! timings and validation verdicts.

use std::fmt::Write as _;
use std::time::Instant;

use lowlink_core::{Graph, PathResult, StageCounters, paths, scc, topo};
use serde::Serialize;
use tracing::instrument;

// ---------------------------------------------------------------------------
// Report model
// ---------------------------------------------------------------------------

/// Wall-clock milliseconds per pipeline stage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageTimings {
    pub scc_ms: f64,
    pub topo_ms: f64,
    pub paths_ms: f64,
}

/// One path mode, summarized for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct PathSummary {
    pub mode: &'static str,
    /// Per-vertex distance, `null` when unreached.
    pub distances: Vec<Option<i64>>,
    pub reachable: usize,
    pub critical_path: Vec<usize>,
    pub critical_path_length: i64,
}

impl PathSummary {
    fn of(result: &PathResult) -> Self {
        let distances: Vec<Option<i64>> =
            (0..result.distances.len()).map(|v| result.distance_to(v)).collect();
        let reachable = distances.iter().flatten().count();
        Self {
            mode: if result.mode.is_shortest() {
                "shortest"
            } else {
                "longest"
            },
            distances,
            reachable,
            critical_path: result.critical_path.clone(),
            critical_path_length: result.critical_path_length,
        }
    }
}

/// Machine- and human-renderable summary of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub vertices: usize,
    pub edges: usize,
    pub source: usize,
    pub components: Vec<Vec<usize>>,
    pub largest_component: usize,
    pub is_dag: bool,
    pub component_order: Vec<usize>,
    pub vertex_order: Vec<usize>,
    pub order_valid: bool,
    pub vertex_order_check: bool,
    pub component_order_check: bool,
    pub shortest: PathSummary,
    pub longest: PathSummary,
    pub counters: StageCounters,
    pub timings: StageTimings,
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

impl Report {
    /// Run all pipeline stages over a validated graph, timing each one.
    ///
    /// Stages run here individually rather than through
    /// [`lowlink_core::analyze`] so each gets its own wall-clock window.
    ///
    /// # Errors
    ///
    /// Fails when the graph is structurally invalid or the condensation
    /// cannot be ordered.
    #[instrument(skip(graph), fields(n = graph.n()))]
    pub fn build(graph: &Graph) -> anyhow::Result<Self> {
        graph.ensure_valid()?;
        let mut counters = StageCounters::default();

        let started = Instant::now();
        let scc = scc::find_components_with(graph, &mut counters.scc);
        let scc_ms = elapsed_ms(started);

        let started = Instant::now();
        let order = topo::order_with(&scc.condensation, &scc, &mut counters.topo);
        let topo_ms = elapsed_ms(started);
        if !order.is_valid() {
            return Err(lowlink_core::Error::CyclicCondensation.into());
        }
        let vertex_order_check = topo::validate_vertex_order(graph, &order.vertex_order, &scc);
        let component_order_check =
            topo::validate_component_order(&scc.condensation, &order.component_order);

        let started = Instant::now();
        let all =
            paths::compute_all_paths_with(graph, &order, graph.source(), &mut counters.paths)?;
        let paths_ms = elapsed_ms(started);

        Ok(Self {
            vertices: graph.n(),
            edges: graph.edges().len(),
            source: graph.source(),
            largest_component: scc.components.iter().map(Vec::len).max().unwrap_or(0),
            is_dag: scc.component_count() == graph.n(),
            components: scc.components,
            component_order: order.component_order,
            vertex_order: order.vertex_order,
            order_valid: true,
            vertex_order_check,
            component_order_check,
            shortest: PathSummary::of(&all.shortest),
            longest: PathSummary::of(&all.longest),
            counters,
            timings: StageTimings {
                scc_ms,
                topo_ms,
                paths_ms,
            },
        })
    }

    /// Render the human-readable console report.
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== SCC Analysis ===");
        let _ = writeln!(out, "Components found: {}", self.components.len());
        for (cid, members) in self.components.iter().enumerate() {
            let _ = writeln!(out, "  component {cid}: {members:?}");
        }
        let _ = writeln!(
            out,
            "Vertices visited: {}, stack operations: {}",
            self.counters.scc.vertices_visited, self.counters.scc.stack_ops
        );
        let _ = writeln!(out, "Completed in {:.3} ms", self.timings.scc_ms);

        let _ = writeln!(out, "\n=== Topological Sort ===");
        let _ = writeln!(out, "Component order: {:?}", self.component_order);
        let _ = writeln!(out, "Vertex order: {:?}", self.vertex_order);
        let _ = writeln!(out, "Vertex order validation: {}", verdict(self.vertex_order_check));
        let _ = writeln!(
            out,
            "Component order validation: {}",
            verdict(self.component_order_check)
        );
        let _ = writeln!(out, "Queue operations: {}", self.counters.topo.queue_ops);
        let _ = writeln!(out, "Completed in {:.3} ms", self.timings.topo_ms);

        let _ = writeln!(out, "\n=== Path Analysis ===");
        for summary in [&self.shortest, &self.longest] {
            let _ = writeln!(out, "{} paths from source {}:", summary.mode, self.source);
            for (v, distance) in summary.distances.iter().enumerate() {
                match distance {
                    Some(d) => {
                        let _ = writeln!(out, "  vertex {v}: {d}");
                    }
                    None => {
                        let _ = writeln!(out, "  vertex {v}: unreachable");
                    }
                }
            }
            let _ = writeln!(
                out,
                "  critical path: {:?} (length {})",
                summary.critical_path, summary.critical_path_length
            );
        }
        let _ = writeln!(
            out,
            "Edges relaxed: {}, completed in {:.3} ms",
            self.counters.paths.edges_relaxed, self.timings.paths_ms
        );

        let _ = writeln!(out, "\n=== Summary ===");
        let _ = writeln!(out, "Graph: {} vertices, {} edges", self.vertices, self.edges);
        let _ = writeln!(out, "SCCs: {} components", self.components.len());
        let _ = writeln!(out, "Largest SCC: {} vertices", self.largest_component);
        let _ = writeln!(
            out,
            "Is DAG: {}",
            if self.is_dag { "yes" } else { "no (has cycles)" }
        );

        out
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1_000.0
}

const fn verdict(passed: bool) -> &'static str {
    if passed { "PASSED" } else { "FAILED" }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
