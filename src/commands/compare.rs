use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

use crate::engine::{results_equivalent_with_rng, ResultSet};

/// Load a result set stored as a JSON array of row arrays
pub fn load_result_file(path: &Path) -> Result<ResultSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read result file: {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    ResultSet::from_json(&json).with_context(|| format!("Invalid result set in {}", path.display()))
}

/// Run the compare command, returning whether the candidate matches the reference
pub fn compare_command(
    reference: &Path,
    candidate: &Path,
    order_matters: bool,
    seed: Option<u64>,
) -> Result<bool> {
    let reference_results = load_result_file(reference)?;
    let candidate_results = load_result_file(candidate)?;
    tracing::debug!(
        reference_rows = reference_results.len(),
        candidate_rows = candidate_results.len(),
        order_matters,
        "comparing result files"
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(results_equivalent_with_rng(
        &reference_results,
        &candidate_results,
        order_matters,
        &mut rng,
    ))
}
