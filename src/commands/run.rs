use anyhow::{Context, Result};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use crate::benchmark::{
    load_suite, output_file_name, split_suite, BenchmarkRunner, RunSummary, ValidationOptions,
};
use crate::client::{ServiceClient, SqlGenerator};
use crate::commands::config::read_config;
use crate::display;
use crate::store::{ArtifactStore, LocalArtifactStore};

/// Options of the run command; unset values fall back to the configuration file
#[derive(Debug, Default)]
pub struct RunArgs {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub percent: Option<f64>,
    pub size: Option<f64>,
    pub upload: bool,
    pub keep_distinct: bool,
    pub seed: Option<u64>,
}

/// Run the benchmark command
pub fn run_command(args: RunArgs) -> Result<RunSummary> {
    let mut config = read_config(args.config.clone())?;
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(percent) = args.percent {
        config.context_percent = percent;
    }
    if let Some(size) = args.size {
        config.suite_size = size;
    }
    config.keep_distinct |= args.keep_distinct;

    let client = ServiceClient::new(
        &config.service_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let heartbeat = client
        .heartbeat()
        .with_context(|| format!("Service at {} is not reachable", client.base_url()))?;
    tracing::info!(service = %client.base_url(), heartbeat = %heartbeat, "running benchmark tests");

    let tests = load_suite(&args.file)
        .with_context(|| format!("Failed to load test suite: {}", args.file.display()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let split = split_suite(tests, config.suite_size, config.context_percent, &mut rng);
    tracing::info!(
        context = split.context.len(),
        benchmark = split.benchmark.len(),
        "split test suite"
    );

    if !split.context.is_empty() {
        client.add_context(&split.context)?;
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;
    let file_name = output_file_name(&args.file, &Local::now());
    let output_file = config.output_dir.join(&file_name);
    let mut out = BufWriter::new(
        File::create(&output_file)
            .with_context(|| format!("Failed to create {}", output_file.display()))?,
    );

    let options = ValidationOptions {
        keep_distinct: config.keep_distinct,
        degrade_on_execution_error: config.degrade_on_execution_error,
        dialect: config.sql_dialect()?,
    };
    let runner = BenchmarkRunner::new(&client, &client, options);
    let summary = runner.run(&split.benchmark, &mut out)?;
    drop(out);

    if args.upload {
        tracing::info!(results = split.benchmark.len(), bucket = %config.bucket, "uploading results");
        let store = LocalArtifactStore::new(&config.artifact_root);
        if !store.upload(&output_file, &file_name, &config.bucket) {
            tracing::warn!(file = %output_file.display(), "results were saved locally only");
        }
    }

    display::display_summary(&summary, &output_file);
    Ok(summary)
}
