//! Loading and splitting of test suites

use chrono::{DateTime, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::records::TestRecord;
use crate::error::{Error, Result};

/// Test suite split into records sent as context and records to benchmark
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteSplit {
    pub context: Vec<TestRecord>,
    pub benchmark: Vec<TestRecord>,
}

/// Load test records from a JSONL file, or from every `.jsonl` file below a directory
pub fn load_suite(path: &Path) -> Result<Vec<TestRecord>> {
    if path.is_dir() {
        let mut tests = Vec::new();
        for file in find_suite_files(path) {
            tests.extend(load_suite_file(&file)?);
        }
        tracing::debug!(dir = %path.display(), tests = tests.len(), "loaded suite directory");
        Ok(tests)
    } else {
        load_suite_file(path)
    }
}

fn load_suite_file(path: &Path) -> Result<Vec<TestRecord>> {
    let content = fs::read_to_string(path)?;
    parse_jsonl(&content, &path.display().to_string())
}

/// Parse one test record per non-blank line
pub fn parse_jsonl(content: &str, source: &str) -> Result<Vec<TestRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| Error::InvalidTestRecord {
                path: source.to_string(),
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Find all suite files in the given directory (recursively), sorted by path
fn find_suite_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "jsonl"))
        .collect();
    files.sort();
    files
}

/// Shuffle the suite, keep `suite_size` of it and move the first `context_percent` of the kept
/// tests into the context set.
///
/// Both fractions are clamped to `[0, 1]`.
pub fn split_suite<R: Rng + ?Sized>(
    mut tests: Vec<TestRecord>,
    suite_size: f64,
    context_percent: f64,
    rng: &mut R,
) -> SuiteSplit {
    tests.shuffle(rng);

    let kept = fraction_of(tests.len(), suite_size);
    tests.truncate(kept);

    let context_len = fraction_of(tests.len(), context_percent);
    let benchmark = tests.split_off(context_len);

    SuiteSplit {
        context: tests,
        benchmark,
    }
}

fn fraction_of(len: usize, fraction: f64) -> usize {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    ((len as f64) * fraction).floor() as usize
}

/// Name of the results file: `<suite file name>-<YYYY-mm-dd-HH-MM-SS>.jsonl`
pub fn output_file_name<Tz: TimeZone>(suite_path: &Path, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let base = suite_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "benchmark".to_string());
    format!("{}-{}.jsonl", base, now.format("%Y-%m-%d-%H-%M-%S"))
}
