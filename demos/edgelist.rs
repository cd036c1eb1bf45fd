//! `edgelist` example: run DEMON on an edge-list file.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example edgelist -- network.ncol 0.25
//! cargo run --example edgelist -- network.ncol 0.25 -c 4 --output demon_communities.tsv
//! ```

use clap::Parser;
use demon::io::{read_edgelist_path, write_communities, write_communities_path};
use demon::{Demon, DemonConfig};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for the edge-list example.
#[derive(Parser, Debug)]
#[command(
    name = "edgelist",
    about = "Local-first overlapping community discovery (DEMON)",
    long_about = None
)]
struct Args {
    /// Network file, one `node1 node2` pair per line.
    #[arg(value_name = "FILE")]
    network_file: PathBuf,

    /// Merging threshold in [0, 1].
    epsilon: f64,

    /// Minimum community size (exclusive).
    #[arg(short = 'c', long, default_value_t = 3)]
    min_com_size: usize,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write communities here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set RUST_LOG=debug for per-ego logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = DemonConfig::default()
        .with_epsilon(args.epsilon)
        .with_min_community_size(args.min_com_size);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let demon = Demon::with_config(config)?;

    let graph = read_edgelist_path(&args.network_file)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let mut communities = demon.run(&graph)?;
    // Largest first; ties by members.
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    match args.output.as_deref() {
        Some(path) => {
            write_communities_path(path, &communities)?;
            info!(path = %path.display(), communities = communities.len(), "communities written");
        }
        None => write_communities(std::io::stdout().lock(), &communities)?,
    }
    Ok(())
}
