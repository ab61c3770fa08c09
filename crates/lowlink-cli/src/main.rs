#![forbid(unsafe_code)]
//! lowlink CLI: load, validate, generate, and analyze graph datasets.

mod generate;
mod load;
mod report;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use report::Report;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lowlink: SCC, topological order, and DAG path analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Run the full analysis pipeline on a graph file",
        long_about = "Decompose the graph into strongly connected components, order the \
                      condensation topologically, and compute shortest and longest paths \
                      from the graph's source vertex.",
        after_help = "EXAMPLES:\n    # Analyze a dataset\n    lowlink analyze data/small_dag_1.json\n\n    # Emit a machine-readable summary\n    lowlink analyze data/small_dag_1.json --json"
    )]
    Analyze {
        /// Path to the JSON graph file.
        file: PathBuf,
    },

    #[command(
        next_help_heading = "Analysis",
        about = "Check that a graph file parses and validates",
        after_help = "EXAMPLES:\n    # Validate a dataset without analyzing it\n    lowlink validate data/small_dag_1.json"
    )]
    Validate {
        /// Path to the JSON graph file.
        file: PathBuf,
    },

    #[command(
        next_help_heading = "Datasets",
        about = "Generate the standard random dataset suite",
        long_about = "Write the small/medium/large DAG, cyclic, and mixed datasets as \
                      pretty-printed JSON graph records.",
        after_help = "EXAMPLES:\n    # Generate into ./data\n    lowlink generate\n\n    # Reproducible datasets in a chosen directory\n    lowlink generate --out datasets --seed 42"
    )]
    Generate {
        /// Output directory for the dataset files.
        #[arg(long, default_value = "data")]
        out: PathBuf,

        /// Seed for reproducible generation.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOWLINK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lowlink=debug,info"
        } else {
            "lowlink=info,warn"
        })
    });

    let format = env::var("LOWLINK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Analyze { file } => {
            let graph = load::load_graph(&file)?;
            let report = Report::build(&graph)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_human());
            }
        }
        Commands::Validate { file } => {
            let graph = load::load_graph(&file)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": true,
                        "vertices": graph.n(),
                        "edges": graph.edges().len(),
                        "source": graph.source(),
                    })
                );
            } else {
                println!(
                    "OK: {} vertices, {} edges, source {}",
                    graph.n(),
                    graph.edges().len(),
                    graph.source()
                );
            }
        }
        Commands::Generate { out, seed } => {
            generate::write_suite(&out, seed)?;
        }
    }

    Ok(())
}
