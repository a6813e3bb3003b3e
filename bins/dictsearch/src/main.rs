//! dictsearch - data dictionary search
//!
//! Looks up data elements by exact name, falling back to a fuzzy keyword
//! search across the data structures that mention the query.

use clap::{Parser, Subcommand};
use dictsearch_cli::OutputFormat;
use dictsearch_core::error::exit_codes;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod history_store;

use commands::{config, fulltext, history, lookup, search};

/// Search a data dictionary by exact name or fuzzy keyword
#[derive(Parser)]
#[command(name = "dictsearch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to a configuration file
    #[arg(short, long, global = true, env = "DICTSEARCH_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find an element by exact name, or rank fuzzy matches
    Search {
        /// Query text; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Show full detail for the Nth ranked result
        #[arg(short, long)]
        pick: Option<usize>,
    },

    /// Show one element by exact name
    Lookup {
        /// Element name
        name: String,
    },

    /// Run the service's full-text element search, reranked locally
    Fulltext {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum hits to request
        #[arg(short, long)]
        size: Option<usize>,
    },

    /// Show or clear recent searches
    History {
        /// Remove every entry
        #[arg(long)]
        clear: bool,
    },

    /// Print the effective configuration
    Config,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dictsearch=debug,dictsearch_engine=debug,dictsearch_api_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Search { query, pick } => search::run(config_path, &query.join(" "), pick, cli.format).await,
        Commands::Lookup { name } => lookup::run(config_path, &name, cli.format).await,
        Commands::Fulltext { query, size } => fulltext::run(config_path, &query.join(" "), size, cli.format).await,
        Commands::History { clear } => history::run(config_path, clear, cli.format),
        Commands::Config => config::run(config_path, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, cli.format);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn report_error(error: &anyhow::Error, format: OutputFormat) {
    let core = error.downcast_ref::<dictsearch_core::Error>();

    if format == OutputFormat::Json {
        if let Some(json) = core.and_then(|core| serde_json::to_string_pretty(&core.to_report()).ok()) {
            eprintln!("{json}");
            return;
        }
    }

    eprintln!("{} {error:#}", "Error:".red().bold());
    if let Some(hint) = core.and_then(|core| core.suggestion.as_deref()) {
        eprintln!("  {} {hint}", "hint:".yellow());
    }
}

fn exit_code_for(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<dictsearch_core::Error>() {
        Some(core) if core.code.is_config() => exit_codes::CONFIG_ERROR,
        _ => exit_codes::FAILURE,
    }
}
