//! HTTP client for the text-to-SQL service: question answering and query execution

use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

use crate::benchmark::records::{GenerationResponse, TestRecord};
use crate::engine::ResultSet;
use crate::error::{Error, Result};

/// Runs SQL against a named database and returns its rows
pub trait QueryExecutor {
    fn execute(&self, database: &str, sql: &str) -> Result<ResultSet>;
}

/// Produces SQL for natural-language questions
pub trait SqlGenerator {
    /// Register known question/query pairs the generator may learn from
    fn add_context(&self, samples: &[TestRecord]) -> Result<()>;

    fn generate(&self, test: &TestRecord) -> Result<GenerationResponse>;
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    db_alias: &'a str,
    sql_statement: &'a str,
}

/// Blocking client for the service REST API
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    http: Client,
}

impl ServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Service(format!("could not build HTTP client: {}", e)))?;

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check that the service is up, returning whatever status body it reports
    pub fn heartbeat(&self) -> Result<serde_json::Value> {
        self.http
            .get(self.endpoint("heartbeat"))
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Service(e.to_string()))?
            .json()
            .map_err(|e| Error::Service(format!("invalid heartbeat response: {}", e)))
    }
}

impl SqlGenerator for ServiceClient {
    fn add_context(&self, samples: &[TestRecord]) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("golden-record"))
            .json(samples)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Service(format!("adding context failed: {}", e)))?;

        tracing::info!(samples = samples.len(), status = %response.status(), "added context");
        Ok(())
    }

    fn generate(&self, test: &TestRecord) -> Result<GenerationResponse> {
        self.http
            .post(self.endpoint("question"))
            .query(&[
                ("db_alias", test.database.as_str()),
                ("question", test.question.as_str()),
            ])
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Generation(e.to_string()))?
            .json()
            .map_err(|e| Error::Generation(format!("invalid generation response: {}", e)))
    }
}

impl QueryExecutor for ServiceClient {
    fn execute(&self, database: &str, sql: &str) -> Result<ResultSet> {
        let body: serde_json::Value = self
            .http
            .post(self.endpoint("query"))
            .json(&QueryRequest {
                db_alias: database,
                sql_statement: sql,
            })
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::QueryExecution(e.to_string()))?
            .json()
            .map_err(|e| Error::QueryExecution(format!("invalid JSON response: {}", e)))?;

        extract_result(&body)
    }
}

/// Pull the rows out of a query response: a JSON array whose second element holds `result`
pub fn extract_result(body: &serde_json::Value) -> Result<ResultSet> {
    let result = body
        .get(1)
        .and_then(|payload| payload.get("result"))
        .ok_or_else(|| Error::QueryExecution("missing 'result' payload in response".to_string()))?;

    ResultSet::from_json(result)
}
