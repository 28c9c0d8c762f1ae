use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use sql_bench::commands::{self, run::RunArgs};
use sql_bench::display;

/// sqlbench CLI - benchmark tool for text-to-SQL generation
#[derive(Parser)]
#[clap(
    name = "sqlbench",
    about = "Benchmark text-to-SQL generation by comparing query results",
    version
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a benchmark suite against the text-to-SQL service
    Run {
        /// The file (or directory of .jsonl files) containing the benchmark tests
        #[clap(short, long, default_value = "test_suites/v2_real_estate.jsonl")]
        file: PathBuf,

        /// Path to the configuration file (defaults to ./sqlbench.yaml)
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Copy the results file into the local artifact directory
        #[clap(short, long)]
        upload: bool,

        /// The directory to save the benchmark results file
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// The fraction of the test set to use as context
        #[clap(short, long)]
        percent: Option<f64>,

        /// The fraction of the test suite to use at all
        #[clap(short, long)]
        size: Option<f64>,

        /// Keep DISTINCT modifiers in gold and generated queries
        #[clap(long)]
        keep_distinct: bool,

        /// Seed for shuffling the test suite
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Compare two result files (JSON arrays of rows)
    Compare {
        /// Result of the gold query
        #[clap(short, long)]
        reference: PathBuf,

        /// Result of the generated query
        #[clap(short, long)]
        candidate: PathBuf,

        /// Require rows to appear in the same order
        #[clap(short, long)]
        order_matters: bool,

        /// Seed for the column permutation sampling
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Print the normalized form of a SQL query
    Normalize {
        /// The SQL text to normalize
        #[clap(long)]
        sql: String,

        /// Keep DISTINCT modifiers
        #[clap(long)]
        keep_distinct: bool,

        /// SQL dialect used for tokenizing
        #[clap(short, long, default_value = "generic")]
        dialect: String,
    },

    /// Show version information
    Version,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run {
            file,
            config,
            upload,
            output,
            percent,
            size,
            keep_distinct,
            seed,
        } => {
            let args = RunArgs {
                file,
                config,
                output,
                percent,
                size,
                upload,
                keep_distinct,
                seed,
            };
            if let Err(err) = commands::run::run_command(args) {
                tracing::error!(error = %format!("{:#}", err), "benchmark run failed");
                process::exit(1);
            }
        }
        Command::Compare {
            reference,
            candidate,
            order_matters,
            seed,
        } => match commands::compare::compare_command(&reference, &candidate, order_matters, seed)
        {
            Ok(equivalent) => {
                display::display_comparison(equivalent);
                if !equivalent {
                    process::exit(2);
                }
            }
            Err(err) => {
                eprintln!("Error: {:#}", err);
                process::exit(1);
            }
        },
        Command::Normalize {
            sql,
            keep_distinct,
            dialect,
        } => match commands::normalize_command(&sql, keep_distinct, &dialect) {
            Ok(normalized) => println!("{}", normalized),
            Err(err) => {
                eprintln!("Error: {:#}", err);
                process::exit(1);
            }
        },
        Command::Version => display::display_version(),
    }
}
