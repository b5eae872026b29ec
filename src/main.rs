//! Relgraph - Relationship network analytics CLI
//!
//! Loads a case network snapshot and prints analysis results as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relgraph::network::{load_session, AnalysisSession, FilterParameters, InteractionType};
use relgraph::Config;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "relgraph")]
#[command(about = "Relationship network analytics")]
struct Cli {
    /// Path to a YAML config file (default: relgraph.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the snapshot from a JSON file (overrides config)
    #[arg(long, global = true, conflicts_with = "url")]
    snapshot: Option<String>,

    /// Fetch the snapshot from the network service at this base URL (overrides config)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Hide edges whose total interaction count is below this value
    #[arg(long, global = true, default_value = "1")]
    min_weight: u64,

    /// Comma-separated interaction types to keep (default: all)
    #[arg(long, global = true, value_delimiter = ',')]
    types: Vec<InteractionType>,

    /// Hide secondary persons that have no visible interaction
    #[arg(long, global = true)]
    hide_secondary: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node, edge and component counts
    Summary,

    /// Shortest path between two persons
    Path {
        /// Source person id
        from: String,
        /// Target person id
        to: String,
    },

    /// Label propagation communities
    Communities,

    /// Most connected and most bridging persons
    Centrality {
        /// Number of entries per ranking (default: analytics.top_n)
        #[arg(long)]
        top: Option<usize>,
    },

    /// A person and their visible connections
    Person {
        /// Person id
        id: String,
    },

    /// Every analysis in one document
    Report,
}

#[derive(Serialize)]
struct CentralityRanking {
    degree: Vec<(String, usize)>,
    betweenness: Vec<(String, f64)>,
}

impl Cli {
    fn filter_parameters(&self) -> FilterParameters {
        let mut params = FilterParameters::default()
            .with_min_weight(self.min_weight)
            .include_secondary(!self.hide_secondary);
        if !self.types.is_empty() {
            params = params.with_types(self.types.iter().copied());
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stdout carries the JSON output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relgraph=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration, CLI flags win
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;
    if let Some(path) = &cli.snapshot {
        config.source_path = Some(path.clone());
    }
    if let Some(url) = &cli.url {
        config.source_url = Some(url.clone());
        config.source_path = None;
    }

    let source = config.snapshot_source()?;
    let session = load_session(source.as_ref(), config.analytics.clone()).await?;

    run(&cli, &session)
}

fn run(cli: &Cli, session: &AnalysisSession) -> Result<()> {
    let params = cli.filter_parameters();
    tracing::debug!(
        "Filter: min_weight={}, types={:?}, include_secondary={}",
        params.min_weight,
        params.enabled_types,
        params.include_secondary
    );

    match &cli.command {
        Commands::Summary => print_json(&session.summary(&params)),
        Commands::Path { from, to } => print_json(&session.shortest_path(&params, from, to)),
        Commands::Communities => print_json(&session.communities(&params)),
        Commands::Centrality { top } => {
            let top = top.unwrap_or(session.config().top_n);
            let scores = session.centrality(&params)?;
            print_json(&CentralityRanking {
                degree: scores.ranked_by_degree(top),
                betweenness: scores.ranked_by_betweenness(top),
            })
        }
        Commands::Person { id } => {
            let details = session
                .person_details(&params, id)
                .with_context(|| format!("Person {} is not visible under the current filter", id))?;
            print_json(&details)
        }
        Commands::Report => print_json(&session.report(&params)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
