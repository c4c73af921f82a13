use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use kart_ranker::config::{self, Config};
use kart_ranker::error::Error;
use kart_ranker::import::{import_catalog, CatalogFile};
use kart_ranker::output::{self, OutputFormat};
use kart_ranker::query::{self, Directive, Query};
use kart_ranker::select::{Algorithm, SelectOptions};
use kart_ranker::store::SqliteCatalog;

const EXIT_SUCCESS: i32 = 0;
const EXIT_STORAGE: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_SELECTION: i32 = 5;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Listing {
    Filters,
    Sorts,
    Weights,
    RankingAttributes,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a YAML catalog and rebuild every build
    Import {
        /// Catalog file with drivers, vehicles, tyres and gliders
        file: PathBuf,
    },
    /// Rebuild the build table from the stored components
    Materialize,
    /// Filter, score and select builds
    Find {
        /// Selection algorithm (defaults to the config value)
        #[arg(short, long, value_enum)]
        algorithm: Option<Algorithm>,

        /// Maximum number of results (cluster count for kmeans)
        #[arg(short = 'n', long, conflicts_with = "no_limit")]
        limit: Option<usize>,

        /// Return every selected build
        #[arg(long)]
        no_limit: bool,

        /// Seed for kmeans centroid sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Apply a named preset from the config file (repeatable)
        #[arg(short, long)]
        preset: Vec<String>,

        /// Directive such as min_ground_speed=3, sort_score=-1 or rank_weight=1 (repeatable)
        #[arg(short, long = "directive", value_name = "KEY=VALUE")]
        directives: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Write results to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List valid directive keys
    List {
        #[arg(value_enum)]
        what: Listing,
    },
}

#[derive(Parser, Debug)]
#[command(name = "kart-ranker")]
#[command(about = "Rank kart builds by filters, weights and multi-objective selection", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/kart-ranker/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the catalog database (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "kart_ranker=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::InsufficientSamples(_) | Error::EmptyRankingSet => EXIT_SELECTION,
        e if e.is_config_error() => EXIT_CONFIG,
        _ => EXIT_STORAGE,
    }
}

fn fail(context: &str, err: Error) -> ! {
    eprintln!("{}: {}", context, err);
    if matches!(err, Error::NotFound(_)) {
        eprintln!("Run `kart-ranker import <FILE>` to load a catalog first.");
    }
    std::process::exit(exit_code(&err));
}

async fn open_store(path: &Path) -> SqliteCatalog {
    if let Err(e) = config::ensure_parent_dir(path) {
        eprintln!("Storage error: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }
    match SqliteCatalog::connect(path).await {
        Ok(store) => store,
        Err(e) => fail("Storage error", e),
    }
}

/// Config limit, then presets, then --directive, then --limit/--no-limit.
fn build_query(
    config: &Config,
    presets: &[String],
    directives: &[String],
    limit: Option<usize>,
    no_limit: bool,
) -> Query {
    let mut query = Query::new();
    query.apply(Directive::Limit(config.limit));

    for name in presets {
        let Some(pairs) = config.preset(name) else {
            eprintln!("Unknown preset '{}'", name);
            if !config.presets.is_empty() {
                let known: Vec<&str> = config.presets.keys().map(String::as_str).collect();
                eprintln!("Available presets: {}", known.join(", "));
            }
            std::process::exit(EXIT_CONFIG);
        };
        if let Err(e) = query.apply_all(pairs) {
            fail(&format!("Preset '{}'", name), e);
        }
    }

    if let Err(e) = query.apply_all(directives) {
        fail("Directive error", e);
    }

    if no_limit {
        query.apply(Directive::Limit(None));
    } else if limit.is_some() {
        query.apply(Directive::Limit(limit));
    }

    query
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let database = match config::resolve_database(cli.database, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(database = %database.display(), "using catalog database");

    match cli.command {
        Commands::Import { file } => {
            let content = match std::fs::read_to_string(&file) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to read catalog {}: {}", file.display(), e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let catalog = match CatalogFile::from_yaml(&content) {
                Ok(c) => c,
                Err(e) => fail("Catalog error", e),
            };

            let mut store = open_store(&database).await;
            let count = match import_catalog(&mut store, &catalog).await {
                Ok(n) => n,
                Err(e) => fail("Import failed", e),
            };
            store.close().await;

            println!(
                "Imported {} drivers, {} vehicles, {} tyres, {} gliders ({} builds)",
                catalog.drivers.len(),
                catalog.vehicles.len(),
                catalog.tyres.len(),
                catalog.gliders.len(),
                count
            );
        }
        Commands::Materialize => {
            let mut store = open_store(&database).await;
            let count = match kart_ranker::assemble::materialize(&mut store).await {
                Ok(n) => n,
                Err(e) => fail("Materialize failed", e),
            };
            store.close().await;
            println!("Materialized {} builds", count);
        }
        Commands::Find {
            algorithm,
            limit,
            no_limit,
            seed,
            preset,
            directives,
            format,
            output: output_path,
        } => {
            let query = build_query(&config, &preset, &directives, limit, no_limit);
            let algorithm = algorithm.unwrap_or(config.algorithm);
            let options = SelectOptions {
                seed: seed.or(config.seed),
                max_iterations: config.max_iterations,
            };

            let store = open_store(&database).await;
            let builds = match kart_ranker::rank::rank(&store, &query, algorithm, &options).await {
                Ok(b) => b,
                Err(e) => {
                    let context = match exit_code(&e) {
                        EXIT_SELECTION => "Selection error",
                        _ => "Storage error",
                    };
                    fail(context, e)
                }
            };
            store.close().await;

            let use_colors = output_path.is_none() && output::should_use_colors();
            let rendered = match output::render(&builds, format, use_colors) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };

            match output_path {
                Some(path) => {
                    if let Err(e) = output::write_output(&path, &rendered) {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_STORAGE);
                    }
                    println!("Wrote {} builds to {}", builds.len(), path.display());
                }
                None => println!("{}", rendered),
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} builds via {} in {:?}",
                    builds.len(),
                    algorithm,
                    start_time.elapsed()
                );
            }
        }
        Commands::List { what } => {
            let keys = match what {
                Listing::Filters => query::available_filters(),
                Listing::Sorts => query::available_sorts(),
                Listing::Weights => query::available_weights(),
                Listing::RankingAttributes => query::available_ranking_attributes(),
            };
            for key in keys {
                println!("{}", key);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
