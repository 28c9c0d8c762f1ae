//! Benchmark records, suite handling and the run loop around the equivalence engine

pub mod records;
pub mod runner;
pub mod suite;

pub use records::{BenchmarkRecord, GenerationResponse, Status, TestRecord};
pub use runner::{validate_response, BenchmarkRunner, RunSummary, ValidationOptions};
pub use suite::{load_suite, output_file_name, split_suite, SuiteSplit};
