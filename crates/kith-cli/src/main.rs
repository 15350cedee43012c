//! Kith CLI - command line interface for the personal social graph

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, graph, kinds, person, relation, search};
use config::Config;
use kith_core::Registry;
use kith_storage::{JsonFileStore, LoadStatus, StorageBackend};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kith")]
#[command(author, version, about = "Keep track of people and how they are related")]
pub struct Cli {
    /// Data file (JSON)
    #[arg(long, env = "KITH_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage people
    Person(person::PersonArgs),
    /// Manage relationships
    Relation(relation::RelationArgs),
    /// List relationship kinds
    Kinds,
    /// Search people
    Search(search::SearchArgs),
    /// Export relationship graphs
    Graph(graph::GraphArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context: the loaded registry and where it is stored
pub struct AppContext {
    pub store: JsonFileStore,
    pub registry: Registry,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load()?;
        let path = cli.file.clone().unwrap_or_else(|| config.data_file());
        tracing::debug!("Using data file: {:?}", path);

        let store = JsonFileStore::new(path);
        let mut registry = Registry::new();
        if let LoadStatus::Missing = store.load_into(&mut registry)? {
            tracing::info!("Starting a new social graph at {:?}", store.path());
        }

        let format = cli.format.unwrap_or_else(|| config.format());
        Ok(Self {
            store,
            registry,
            config,
            format,
        })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.store.save(&self.registry)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kith CLI");

    match &cli.command {
        Commands::Person(args) => person::run(args, &mut AppContext::load(&cli)?)?,
        Commands::Relation(args) => relation::run(args, &mut AppContext::load(&cli)?)?,
        Commands::Kinds => kinds::run(&AppContext::load(&cli)?)?,
        Commands::Search(args) => search::run(args, &AppContext::load(&cli)?)?,
        Commands::Graph(args) => graph::run(args, &AppContext::load(&cli)?)?,
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
