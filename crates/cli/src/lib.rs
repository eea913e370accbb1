mod clear;
mod export;
mod index;
mod search;
mod shell;
mod watch;

use clap::{Parser, Subcommand};
use quicksearch_core::SearchConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quicksearch",
    version,
    about = "Prefix search over generated API documentation symbols",
    long_about = "QuickSearch indexes the symbol lists a documentation generator emits \
                  (Doxygen searchData scripts or JSON record lists) and answers \
                  case-insensitive prefix queries, grouping overloads under one name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding index snapshots (defaults to ~/.quicksearch/indices)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index for a data source and save a snapshot
    #[command(
        long_about = "Reads every supported file under SOURCE, builds the prefix index and \
                      stores a snapshot. By default snapshots live in ~/.quicksearch/indices/."
    )]
    Index {
        /// Data file or directory (e.g. html/search)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
    },
    /// Run one prefix query
    Search {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Prefix to look up (case-insensitive)
        #[arg(value_name = "QUERY")]
        query: String,
        /// Maximum number of groups to print
        #[arg(long)]
        limit: Option<usize>,
        /// Print the groups as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the indexed records as JSON
    Export {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start an interactive shell for queries
    Shell {
        /// Data file or directory. Defaults to the current directory.
        #[arg(value_name = "SOURCE")]
        source: Option<PathBuf>,
    },
    /// Watch a data source and keep its snapshot up to date
    Watch {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
    },
    /// Clear saved snapshots
    #[command(
        long_about = "Removes snapshot files. If SOURCE is given, only that source's snapshot \
                      is removed. Otherwise, all snapshots are cleared."
    )]
    Clear {
        #[arg(value_name = "SOURCE")]
        source: Option<PathBuf>,
    },
}

impl Cli {
    /// Environment config with command-line overrides applied.
    fn config(&self) -> SearchConfig {
        let config = SearchConfig::from_env();
        match &self.cache_dir {
            Some(dir) => config.with_cache_dir(dir.clone()),
            None => config,
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = quicksearch_core::logging::init_logging("cli", cli.verbose);
    let config = cli.config();

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Index { source } => rt.block_on(index::run(source, config)),
        Commands::Search {
            source,
            query,
            limit,
            json,
        } => {
            let config = match limit {
                Some(n) => config.with_max_results(Some(n)),
                None => config,
            };
            rt.block_on(search::run(source, query, config, json))
        }
        Commands::Export { source, output } => rt.block_on(export::run(source, output, config)),
        Commands::Shell { source } => shell::run(&rt, source, config),
        Commands::Watch { source } => rt.block_on(watch::run(source, config)),
        Commands::Clear { source } => rt.block_on(clear::run(source, config)),
    }
}
