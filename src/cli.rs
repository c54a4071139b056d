// src/cli.rs

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::analysis::{ActivityAnalyzer, EntityKind};
use crate::config::Config;
use crate::output::Reporter;
use crate::ranking::SortKey;
use crate::store::RecordStore;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing actors.csv, commits.csv, events.csv and repos.csv
    #[arg(short, long, global = true, env = "OCTORANK_DATA", default_value = ".")]
    pub data: PathBuf,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long, global = true)]
    pub output_file: Option<String>,

    /// Aggregate with Rayon across all cores
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Number of threads for Rayon parallel aggregation (0 = auto-detect CPU cores)
    #[arg(short, long, global = true, default_value = "0")]
    pub threads: usize,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Top users by an arbitrary ordered list of fields
    Users(RankArgs),
    /// Top repositories by an arbitrary ordered list of fields
    Repos(RankArgs),
    /// Top users by pull requests and commits, top repos by commits and by watch events
    All {
        /// Number of entries per list
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Number of entries to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Fields to sort by, highest priority first (Commits or any *Event type)
    #[arg(short, long, value_delimiter = ',')]
    pub sort: Vec<String>,
}

/// A validated query, ready to run against a loaded export.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Ranked {
        kind: EntityKind,
        key: SortKey,
        limit: usize,
    },
    Summary {
        limit: usize,
    },
}

/// Turns a subcommand into a [`Query`], falling back to the configured
/// limit and per-entity default ranking.
pub fn resolve_query(command: &Command, config: &Config) -> Result<Query> {
    let analysis = &config.analysis;
    let ranked = |kind: EntityKind, args: &RankArgs, defaults: &[String]| -> Result<Query> {
        let key = if args.sort.is_empty() {
            SortKey::parse(defaults)?
        } else {
            SortKey::parse(&args.sort[..])?
        };
        Ok(Query::Ranked {
            kind,
            key,
            limit: args.limit.unwrap_or(analysis.default_limit),
        })
    };

    match command {
        Command::Users(args) => ranked(EntityKind::Actor, args, &analysis.default_sort[..]),
        Command::Repos(args) => ranked(EntityKind::Repo, args, &analysis.default_repo_sort[..]),
        Command::All { limit } => Ok(Query::Summary {
            limit: limit.unwrap_or(analysis.default_limit),
        }),
    }
}

/// Runs one query end to end. Sort keys are validated before any data is read.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let query = resolve_query(&cli.command, config)?;

    eprintln!(
        "{}",
        "OctoRank - GitHub Activity Ranker".bright_cyan().bold()
    );
    eprintln!("Data: {}", cli.data.display().to_string().bright_white());

    let store = RecordStore::load(&cli.data, &config.store)?;
    if store.is_empty() {
        warn!("No events found in {}", cli.data.display());
    }
    let parallel = cli.parallel || config.analysis.parallel_processing;
    debug!("Parallel aggregation: {}", parallel);

    info!("Starting activity analysis...");
    let analyzer = ActivityAnalyzer::new(&store, parallel);

    let sections = match &query {
        Query::Ranked { kind, key, limit } => vec![analyzer.rank_section(*kind, key, *limit)],
        Query::Summary { limit } => analyzer.summary(*limit),
    };

    let format = cli
        .output
        .as_deref()
        .unwrap_or(config.output.default_format.as_str());
    Reporter::new(format, cli.output_file.as_deref())
        .with_color(config.output.color_output)
        .generate_report(&sections)
}
