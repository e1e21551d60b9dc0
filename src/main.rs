use anyhow::{Context, Result};
use boolsearch::index::{self, InvertedIndex, build_index, load_snapshot, save_snapshot};
use boolsearch::output::{print_documents, print_summary};
use boolsearch::query::{QueryExecutor, process_query_file};
use boolsearch::utils::AppConfig;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boolsearch")]
#[command(about = "Boolean retrieval over an XML document collection")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the corpus directory and the query file
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    /// Directory for per-query result files
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    /// Index snapshot file
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Evaluate queries on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and evaluate the query file (default)
    Run {
        /// Save a snapshot after building
        #[arg(long)]
        save: bool,

        /// Load the snapshot instead of building
        #[arg(long, conflicts_with = "save")]
        from_snapshot: bool,
    },
    /// Build the index from the corpus
    Index {
        /// Save a snapshot after building
        #[arg(long)]
        save: bool,
    },
    /// Evaluate the query file against the saved snapshot
    Query {
        /// Build from the corpus instead of loading the snapshot
        #[arg(long)]
        rebuild: bool,
    },
    /// Evaluate a single query and print the matching documents
    Search {
        /// Query words and operators
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,

        /// Build from the corpus instead of loading the snapshot
        #[arg(long)]
        rebuild: bool,
    },
    /// Show snapshot statistics
    Stats {
        /// Number of most frequent words to list
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write it to the app data directory
        #[arg(long)]
        write: bool,
    },
}

/// Resolved settings shared by the subcommands
struct Session {
    config: AppConfig,
    silent: bool,
    color: bool,
}

impl Session {
    fn build(&self) -> Result<InvertedIndex> {
        let (index, report) = build_index(&self.config.corpus_path(), self.silent)?;
        if !report.failed_files.is_empty() {
            eprintln!("Skipped {} unreadable corpus files", report.failed_files.len());
        }
        if !self.silent {
            println!(
                "Indexed {} documents from {} files ({} distinct words) in {:.2?}",
                report.stats.documents_processed,
                report.stats.files_processed,
                report.vocabulary,
                report.elapsed
            );
        }
        Ok(index)
    }

    fn load(&self) -> Result<InvertedIndex> {
        let path = self.config.effective_snapshot_path()?;
        info!("Loading snapshot {}", path.display());
        load_snapshot(&path).with_context(|| {
            format!(
                "Failed to load snapshot {} (run `boolsearch index --save` first)",
                path.display()
            )
        })
    }

    fn save(&self, index: &InvertedIndex) -> Result<()> {
        let path = self.config.effective_snapshot_path()?;
        let bytes = save_snapshot(index, &path)
            .with_context(|| format!("Failed to save snapshot {}", path.display()))?;
        info!("Saved snapshot {} ({} bytes)", path.display(), bytes);
        if !self.silent {
            println!("Saved snapshot: {}", path.display());
        }
        Ok(())
    }

    fn run_queries(&self, index: &InvertedIndex) -> Result<()> {
        let outcomes = process_query_file(
            index,
            &self.config.queries_path(),
            &self.config.results_dir,
            self.config.effective_query_threads(),
        )?;
        print_summary(&outcomes, self.color)?;
        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if let Some(path) = &cli.data_path {
        config.data_path = path.clone();
    }
    if let Some(path) = &cli.results_dir {
        config.results_dir = path.clone();
    }
    if let Some(path) = &cli.snapshot {
        config.snapshot_path = Some(path.clone());
    }
    if cli.sequential {
        config.parallel_queries = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let session = Session {
        config: load_config(&cli)?,
        silent: cli.quiet || !std::io::stderr().is_terminal(),
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    match cli.command {
        None => {
            let index = session.build()?;
            session.run_queries(&index)?;
        }
        Some(Commands::Run {
            save,
            from_snapshot,
        }) => {
            let index = if from_snapshot { session.load()? } else { session.build()? };
            if save {
                session.save(&index)?;
            }
            session.run_queries(&index)?;
        }
        Some(Commands::Index { save }) => {
            let index = session.build()?;
            if save {
                session.save(&index)?;
            }
        }
        Some(Commands::Query { rebuild }) => {
            let index = if rebuild { session.build()? } else { session.load()? };
            session.run_queries(&index)?;
        }
        Some(Commands::Search { query, rebuild }) => {
            let index = if rebuild { session.build()? } else { session.load()? };
            let query = query.join(" ");
            let documents = QueryExecutor::new(&index)
                .execute(&query)
                .with_context(|| format!("Failed to evaluate {:?}", query))?;
            print_documents(&documents, session.color)?;
        }
        Some(Commands::Stats { top, json }) => {
            let path = session.config.effective_snapshot_path()?;
            index::stats::show_stats(&path, top, json)?;
        }
        Some(Commands::Config { write }) => {
            println!("{}", serde_json::to_string_pretty(&session.config)?);
            if write {
                let path = session.config.save()?;
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
