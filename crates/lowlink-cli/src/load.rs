//! Graph loading from JSON dataset files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use lowlink_core::Graph;
use tracing::info;

/// Load and structurally validate a graph record.
///
/// Parse errors and validation failures both surface with the file path
/// attached; an invalid graph never reaches an engine.
///
/// # Errors
///
/// Fails when the file cannot be read, is not a well-formed graph
/// record, or fails structural validation.
pub fn load_graph(path: &Path) -> anyhow::Result<Graph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading graph file {}", path.display()))?;
    let graph: Graph = serde_json::from_str(&text)
        .with_context(|| format!("parsing graph file {}", path.display()))?;
    graph
        .ensure_valid()
        .with_context(|| format!("validating graph file {}", path.display()))?;

    info!(
        n = graph.n(),
        edges = graph.edges().len(),
        source = graph.source(),
        "graph loaded"
    );
    Ok(graph)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_a_well_formed_record() {
        let file = write_temp(
            r#"{
                "directed": true,
                "n": 3,
                "edges": [{"u": 0, "v": 1, "w": 5}, {"u": 1, "v": 2, "w": 3}],
                "source": 0,
                "weight_model": "edge"
            }"#,
        );
        let graph = load_graph(file.path()).expect("valid record");
        assert_eq!(graph.n(), 3);
        assert_eq!(graph.outgoing(0).len(), 1);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_graph(Path::new("/nonexistent/graph.json")).expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/graph.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_temp("{ not json");
        let err = load_graph(file.path()).expect_err("malformed");
        assert!(err.to_string().contains("parsing"));
    }

    #[test]
    fn structurally_invalid_graph_is_rejected() {
        let file = write_temp(
            r#"{
                "directed": true,
                "n": 2,
                "edges": [{"u": 0, "v": 9, "w": 1}],
                "source": 0,
                "weight_model": "edge"
            }"#,
        );
        let err = load_graph(file.path()).expect_err("bad endpoint");
        assert!(err.to_string().contains("validating"));
    }
}
