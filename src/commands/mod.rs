//! Command implementations for the sqlbench CLI

pub mod compare;
pub mod config;
pub mod run;

use anyhow::Result;

use crate::engine::normalize_with_dialect;

/// Run the normalize command
pub fn normalize_command(sql: &str, keep_distinct: bool, dialect: &str) -> Result<String> {
    let dialect = config::resolve_dialect(dialect)?;
    Ok(normalize_with_dialect(sql, keep_distinct, dialect.as_ref())?)
}

#[cfg(test)]
mod tests;
