//! Random dataset generation: DAG, cyclic, and mixed graph shapes.

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use lowlink_core::{Edge, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Shape of a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphKind {
    /// Edges only run from lower to higher vertex ids.
    Dag,
    /// A spanning cycle plus random extra edges.
    Cyclic,
    /// One small cycle plus mostly-forward edges.
    Mixed,
}

/// The standard dataset suite: name, vertices, edges, max weight, kind.
const SUITE: &[(&str, usize, usize, i64, GraphKind)] = &[
    ("small_dag_1", 8, 12, 10, GraphKind::Dag),
    ("small_cyclic_1", 7, 10, 10, GraphKind::Cyclic),
    ("small_mixed_1", 9, 12, 10, GraphKind::Mixed),
    ("medium_dag_1", 15, 25, 15, GraphKind::Dag),
    ("medium_cyclic_1", 18, 30, 15, GraphKind::Cyclic),
    ("medium_mixed_1", 16, 28, 15, GraphKind::Mixed),
    ("large_dag_1", 35, 60, 20, GraphKind::Dag),
    ("large_cyclic_1", 40, 70, 20, GraphKind::Cyclic),
    ("large_mixed_1", 45, 65, 20, GraphKind::Mixed),
];

/// Generate one graph of the given shape.
///
/// Duplicate `(u, v)` pairs are removed after generation (first weight
/// wins), so the edge count is an upper bound, not a guarantee.
pub fn generate(kind: GraphKind, vertices: usize, edges: usize, max_weight: i64, rng: &mut StdRng) -> Graph {
    match kind {
        GraphKind::Dag => generate_dag(vertices, edges, max_weight, rng),
        GraphKind::Cyclic => generate_cyclic(vertices, edges, max_weight, rng),
        GraphKind::Mixed => generate_mixed(vertices, edges, max_weight, rng),
    }
}

fn generate_dag(vertices: usize, edges: usize, max_weight: i64, rng: &mut StdRng) -> Graph {
    if vertices < 2 {
        return finish(vertices, Vec::new(), rng);
    }
    let mut edge_list = Vec::with_capacity(edges);
    for _ in 0..edges {
        // Pick u below the last vertex so a forward target always exists.
        let u = rng.gen_range(0..vertices - 1);
        let v = rng.gen_range(u + 1..vertices);
        edge_list.push(Edge::new(u, v, rng.gen_range(1..=max_weight)));
    }
    finish(vertices, edge_list, rng)
}

fn generate_cyclic(vertices: usize, edges: usize, max_weight: i64, rng: &mut StdRng) -> Graph {
    let mut edge_list = Vec::with_capacity(edges);
    // A spanning cycle guarantees at least one non-trivial component.
    for u in 0..vertices {
        edge_list.push(Edge::new(u, (u + 1) % vertices, rng.gen_range(1..=max_weight)));
    }
    for _ in 0..edges.saturating_sub(vertices) {
        let u = rng.gen_range(0..vertices);
        let v = rng.gen_range(0..vertices);
        edge_list.push(Edge::new(u, v, rng.gen_range(1..=max_weight)));
    }
    finish(vertices, edge_list, rng)
}

fn generate_mixed(vertices: usize, edges: usize, max_weight: i64, rng: &mut StdRng) -> Graph {
    let cycle_size = (vertices / 2).clamp(1, 5);
    let mut edge_list = Vec::with_capacity(edges);
    for u in 0..cycle_size {
        edge_list.push(Edge::new(u, (u + 1) % cycle_size, rng.gen_range(1..=max_weight)));
    }
    for _ in 0..edges.saturating_sub(cycle_size) {
        let u = rng.gen_range(0..vertices);
        // 70% forward edges, 30% fully random (may close extra cycles).
        let v = if u < vertices - 1 && rng.gen_bool(0.7) {
            rng.gen_range(u + 1..vertices)
        } else {
            rng.gen_range(0..vertices)
        };
        edge_list.push(Edge::new(u, v, rng.gen_range(1..=max_weight)));
    }
    finish(vertices, edge_list, rng)
}

fn finish(vertices: usize, edge_list: Vec<Edge>, rng: &mut StdRng) -> Graph {
    let source = rng.gen_range(0..vertices);
    Graph::new(true, vertices, dedupe(edge_list), source, "edge")
}

/// Drop repeated `(u, v)` pairs, keeping the first occurrence.
fn dedupe(edges: Vec<Edge>) -> Vec<Edge> {
    let mut seen = std::collections::HashSet::new();
    edges
        .into_iter()
        .filter(|edge| seen.insert((edge.u, edge.v)))
        .collect()
}

/// Write the standard dataset suite into `out_dir` as pretty-printed JSON.
///
/// # Errors
///
/// Fails when the directory cannot be created or a dataset file cannot
/// be written.
pub fn write_suite(out_dir: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating dataset directory {}", out_dir.display()))?;

    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    for &(name, vertices, edges, max_weight, kind) in SUITE {
        let graph = generate(kind, vertices, edges, max_weight, &mut rng);
        let path = out_dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(&graph).context("serializing dataset")?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(
            dataset = name,
            vertices,
            edges = graph.edges().len(),
            "generated"
        );
        println!(
            "Generated: {name}.json ({vertices} vertices, {} edges)",
            graph.edges().len()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
