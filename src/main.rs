mod error;
mod manifest;

use crate::error::{ErrorKind, Result};
use clap::{Parser, Subcommand};
use exn::{OptionExt, ResultExt};
use shelf_catalog::{Catalog, Library};
use shelf_config::{Config, Logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Parser)]
#[command(name = "shelf", version, about = "Search an in-memory book catalog", long_about = None)]
struct Cli {
    /// Extra configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON manifest of books to load
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ranked free-text search; quote phrases with double quotes
    Query {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Print at most this many results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Books whose title or an author equals TEXT exactly, newest first
    Find {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Count distinct books and copies
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            // EX_TEMPFAIL from sysexits.h
            if err.is_retryable() { ExitCode::from(75) } else { ExitCode::FAILURE }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = init_tracing();
    let config = load_config(cli.config.as_deref())?;
    if let Some(filter) = filter {
        filter.reload(EnvFilter::new(&config.log.level)).or_raise(|| ErrorKind::Logging)?;
    }

    let path = cli.library.or(config.library).ok_or_raise(|| ErrorKind::NoLibrary)?;
    let mut catalog = Catalog::with_ranking(config.ranking);
    manifest::load(&path, &mut catalog)?;
    info!(books = catalog.len(), copies = catalog.copy_count(), path = %path.display(), "library loaded");

    match cli.command {
        Command::Query { text, limit } => {
            let results = catalog.search(&text);
            for result in results.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("{:>4}  {}", result.score, result.book);
            }
        },
        Command::Find { text } => {
            for book in catalog.find_exact(&text) {
                println!("{book}");
            }
        },
        Command::Stats => {
            println!("books:  {}", catalog.len());
            println!("copies: {}", catalog.copy_count());
        },
    }
    Ok(())
}

/// Installs the subscriber ahead of configuration loading.
///
/// `RUST_LOG` wins over the configured level. Without it the default level is
/// used until configuration is known, and the returned handle swaps in the
/// configured one.
fn init_tracing() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let overridden = from_env.is_some();
    let (filter, handle) = reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(Logging::default().level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    (!overridden).then_some(handle)
}

/// Loads configuration, keeping a missing file distinguishable from a bad one.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(err) => {
            let kind = if err.is_retryable() { ErrorKind::ConfigUnavailable } else { ErrorKind::Config };
            Err(err).or_raise(|| kind.clone())
        },
    }
}
