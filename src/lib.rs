//! sql_bench - scores text-to-SQL generation by comparing the results of generated queries
//! with those of human-written gold queries

pub mod benchmark;
pub mod client;
pub mod commands;
pub mod display;
pub mod engine;
pub mod error;
pub mod store;

pub use error::{Error, Result};
