// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use clap::Parser;
use rayon::prelude::*;
use reliable_hub_model::prelude::{Network, NetworkLoader, NodeIdentifier};
use reliable_hub_solver::prelude::{
    CandidateGenerator, ExplorationStats, ExplorerConfig, PlanExplorer, RouteCache,
};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[command(
    name = "reliable-hub",
    about = "Explore contingency routing plans on a reliable hub network"
)]
struct Args {
    /// Network instance file
    #[arg(long)]
    network: PathBuf,

    /// Discount factor on the inter-hub leg
    #[arg(long, default_value_t = 0.2)]
    alpha: f64,

    /// Number of nested hub failures to protect against
    #[arg(long, default_value_t = 1)]
    depth: usize,

    /// Explore only this origin (requires --destination)
    #[arg(long, requires = "destination")]
    origin: Option<usize>,

    /// Explore only this destination (requires --origin)
    #[arg(long, requires = "origin")]
    destination: Option<usize>,

    /// Stop each exploration after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Write run records as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    origin: NodeIdentifier,
    destination: NodeIdentifier,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    value: Option<f64>,
    roots: usize,
    expanded: usize,
    pruned: usize,
    dead_ends: usize,
    truncated: bool,
}

impl RunRecord {
    fn failed(
        origin: NodeIdentifier,
        destination: NodeIdentifier,
        start_ts: DateTime<Utc>,
        t0: Instant,
    ) -> Self {
        let stats = ExplorationStats::default();
        Self::from_stats(origin, destination, start_ts, t0, None, stats)
    }

    fn from_stats(
        origin: NodeIdentifier,
        destination: NodeIdentifier,
        start_ts: DateTime<Utc>,
        t0: Instant,
        value: Option<f64>,
        stats: ExplorationStats,
    ) -> Self {
        Self {
            origin,
            destination,
            start_ts,
            end_ts: Utc::now(),
            runtime_ms: t0.elapsed().as_millis(),
            value,
            roots: stats.roots,
            expanded: stats.expanded,
            pruned: stats.pruned,
            dead_ends: stats.dead_ends,
            truncated: stats.truncated,
        }
    }
}

fn demands(args: &Args, network: &Network) -> Vec<(NodeIdentifier, NodeIdentifier)> {
    match (args.origin, args.destination) {
        (Some(i), Some(j)) => vec![(NodeIdentifier::new(i), NodeIdentifier::new(j))],
        _ => network.demand_pairs().collect(),
    }
}

fn write_records(path: &Path, records: &[RunRecord]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    File::create(path)?.write_all(json.as_bytes())
}

fn main() -> ExitCode {
    enable_tracing();
    let args = Args::parse();

    let loader = NetworkLoader::new().alpha(args.alpha).depth(args.depth);
    let network = match loader.from_path(&args.network) {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", args.network.display(), e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "Loaded {} with {} nodes and {} hubs (alpha={}, depth={})",
        args.network.display(),
        network.len(),
        network.hubs().len(),
        network.alpha(),
        network.depth()
    );

    let cache = RouteCache::with_capacity(network.len() * network.hubs().len());
    let config = ExplorerConfig {
        max_expansions: args.max_expansions,
        ..ExplorerConfig::default()
    };
    let explorer = PlanExplorer::new(CandidateGenerator::new(&network, &cache), config);
    let pairs = demands(&args, &network);

    let runs: Vec<(RunRecord, Option<String>)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let start_ts = Utc::now();
            let t0 = Instant::now();
            match explorer.explore(i, j) {
                Ok(outcome) => {
                    let plan = outcome.best.as_ref().map(ToString::to_string);
                    let record =
                        RunRecord::from_stats(i, j, start_ts, t0, outcome.value(), outcome.stats);
                    tracing::debug!("Finished {} -> {}: {}", i, j, outcome.stats);
                    (record, plan)
                }
                Err(e) => {
                    tracing::error!("Failed {} -> {}: {}", i, j, e);
                    (RunRecord::failed(i, j, start_ts, t0), None)
                }
            }
        })
        .collect();

    let mut stdout = std::io::stdout().lock();
    for (record, plan) in &runs {
        let text = plan.as_deref().unwrap_or("no plan");
        if writeln!(stdout, "# {} -> {}\n{}\n", record.origin, record.destination, text).is_err() {
            break;
        }
    }

    let solved = runs.iter().filter(|(r, _)| r.value.is_some()).count();
    tracing::info!(
        "Explored {} demand(s), {} with a plan; {} route(s) cached after {} build(s)",
        runs.len(),
        solved,
        cache.len(),
        cache.builds()
    );

    if let Some(path) = &args.output {
        let records: Vec<RunRecord> = runs.into_iter().map(|(r, _)| r).collect();
        match write_records(path, &records) {
            Ok(()) => tracing::info!("Wrote {} run record(s) to {}", records.len(), path.display()),
            Err(e) => {
                tracing::error!("Failed to write results to {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
