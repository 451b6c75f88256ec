//! Extract the schema graph of an imported MAG graph.
//!
//! ## Usage
//!
//! ```sh
//! magimport-group data/mag-graph out/schema
//! RUST_LOG=debug magimport-group data/mag-graph out/schema
//! ```
//!
//! Reads `vertices.json`/`edges.json` from the input directory, groups by
//! label and writes `graph.dot` into the output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use magimport::io::{DotDataSink, GraphSink, GraphSource, JsonDataSource};
use magimport::pipeline::{self, PipelineConfig};

#[derive(Parser, Debug)]
#[command(about = "Group a MAG graph by label into its schema graph")]
struct Args {
    /// Directory holding vertices.json and edges.json.
    input: PathBuf,

    /// Directory receiving graph.dot. Created if missing.
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    if args.output.is_file() {
        eprintln!("Output path is file.");
        eprintln!("Usage: magimport-group INPATH OUTPATH");
        return Ok(ExitCode::from(2));
    }
    if !args.output.exists() {
        info!("Creating output directory {}", args.output.display());
        tokio::fs::create_dir_all(&args.output).await?;
    }

    let graph = JsonDataSource::new(&args.input).load().await?;
    info!("Input:  {} vertices, {} edges", graph.vertex_count(), graph.edge_count());

    let schema = pipeline::run(graph, &PipelineConfig::default())?;
    info!("Schema: {} vertices, {} edges", schema.vertex_count(), schema.edge_count());

    let sink = DotDataSink::new(&args.output);
    sink.write(&schema).await?;
    info!("Wrote {}", sink.path().display());

    Ok(ExitCode::SUCCESS)
}
