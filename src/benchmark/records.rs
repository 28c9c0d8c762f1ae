use serde::{Deserialize, Serialize};

/// One benchmark case as stored in a test suite file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Alias of the database the gold query runs against
    #[serde(rename = "db", alias = "database")]
    pub database: String,

    /// Human-written reference query
    #[serde(rename = "sql", alias = "gold_sql")]
    pub gold_sql: String,

    #[serde(rename = "nl_question", alias = "question")]
    pub question: String,
}

/// Answer of the SQL generation service for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(rename = "sql_query")]
    pub generated_sql: String,

    pub total_tokens: i64,

    pub total_cost: f64,

    /// Generation time in seconds
    #[serde(rename = "exec_time")]
    pub execution_time_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Correct,
    Wrong,
}

impl Status {
    pub fn from_equivalence(equivalent: bool) -> Self {
        if equivalent {
            Status::Correct
        } else {
            Status::Wrong
        }
    }
}

/// One line of the benchmark output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub question: String,
    pub db: String,
    pub gold_sql: String,
    pub num_tockens_used: i64,
    pub total_cost: f64,
    pub sql_generated: String,
    pub exec_time: f64,
    pub status: Status,
}
