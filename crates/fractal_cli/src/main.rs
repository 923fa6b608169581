//! Graph box counting.
//!
//! Reads an edge list, measures the box-counting fractal dimension and prints
//! the per-radius box counts with both fitted slopes.
//!
//! Settings come from an optional TOML file and are overridden by command
//! line flags. Logging goes to stderr and follows `RUST_LOG`.

mod config;
mod edge_list;

use anyhow::{Context, Result};
use clap::Parser;
use fractal_dim::{FractalDimension, RadiusBound};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;
use edge_list::EdgeList;

const DEFAULT_LOG_FILTER: &str = "box_count=info,fractal_dim=info";

/// Box-counting fractal dimension of a graph.
#[derive(Parser, Debug)]
#[command(name = "box_count")]
#[command(about = "Computes the box-counting fractal dimension of an edge-list graph")]
struct Args {
	/// Path to the edge list (one `source target` pair per line).
	#[arg(short, long)]
	graph: PathBuf,

	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Smallest box radius (-1 for automatic).
	#[arg(long, allow_negative_numbers = true)]
	min_radius: Option<i64>,

	/// Largest box radius (-1 for the graph diameter).
	#[arg(long, allow_negative_numbers = true)]
	max_radius: Option<i64>,

	/// Worker threads (0 for all cores).
	#[arg(short, long)]
	threads: Option<usize>,

	/// Print the report as JSON.
	#[arg(long)]
	json: bool,
}

fn main() -> Result<()> {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
	fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => {
			tracing::info!(path = %path.display(), "loading config");
			Config::load(path)?
		}
		None => Config::default(),
	};
	apply_overrides(&mut config, &args)?;

	let edges = EdgeList::load(&args.graph)?;
	tracing::info!(
		path = %args.graph.display(),
		nodes = edges.labels.len(),
		edges = edges.graph.edge_count(),
		"graph loaded"
	);

	let report = FractalDimension::new(config.statistic)
		.execute(&edges.graph)
		.with_context(|| format!("Box counting failed for {}", args.graph.display()))?;

	if config.output.json {
		let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
		println!("{json}");
	} else {
		println!("{report}");
	}

	Ok(())
}

/// Command line flags win over the config file.
fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
	let settings = &mut config.statistic;

	if let Some(min) = args.min_radius {
		settings.min_radius = radius_flag("--min-radius", min)?;
	}
	if let Some(max) = args.max_radius {
		settings.max_radius = radius_flag("--max-radius", max)?;
	}
	if let Some(threads) = args.threads {
		settings.use_all_cores = threads == 0;
		settings.cores = threads;
	}
	if args.json {
		config.output.json = true;
	}

	config.validate()
}

fn radius_flag(name: &str, value: i64) -> Result<RadiusBound> {
	RadiusBound::try_from(value).map_err(|msg| anyhow::anyhow!("{name}: {msg}"))
}
