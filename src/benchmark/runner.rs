//! Scoring of generated queries and the benchmark run loop

use sqlparser::dialect::{Dialect, GenericDialect};
use std::io::Write;
use std::time::Instant;

use super::records::{BenchmarkRecord, GenerationResponse, Status, TestRecord};
use crate::client::{QueryExecutor, SqlGenerator};
use crate::engine::{normalize_with_dialect, order_matters, results_equivalent, ResultSet};
use crate::error::Result;

/// How generated queries are normalized and executed before comparison
#[derive(Debug)]
pub struct ValidationOptions {
    pub keep_distinct: bool,
    /// Treat a failed query execution as an empty result instead of failing the test case
    pub degrade_on_execution_error: bool,
    pub dialect: Box<dyn Dialect>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            keep_distinct: false,
            degrade_on_execution_error: false,
            dialect: Box::new(GenericDialect {}),
        }
    }
}

/// Counts of a finished benchmark run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub correct: usize,
    pub wrong: usize,
    /// Tests for which no query could be generated
    pub skipped: usize,
}

impl RunSummary {
    pub fn scored(&self) -> usize {
        self.correct + self.wrong
    }

    pub fn total(&self) -> usize {
        self.scored() + self.skipped
    }

    /// Share of scored tests that were correct
    pub fn accuracy(&self) -> Option<f64> {
        match self.scored() {
            0 => None,
            scored => Some(self.correct as f64 / scored as f64),
        }
    }

    fn record(&mut self, status: Status) {
        match status {
            Status::Correct => self.correct += 1,
            Status::Wrong => self.wrong += 1,
        }
    }
}

/// Normalize, execute and compare the gold and generated queries of one test
pub fn validate_response<E: QueryExecutor + ?Sized>(
    test: &TestRecord,
    response: &GenerationResponse,
    executor: &E,
    options: &ValidationOptions,
) -> BenchmarkRecord {
    let dialect = options.dialect.as_ref();
    let gold = normalize_with_dialect(&test.gold_sql, options.keep_distinct, dialect);
    let generated = normalize_with_dialect(&response.generated_sql, options.keep_distinct, dialect);

    let (gold_sql, sql_generated, status) = match (gold, generated) {
        (Ok(gold_sql), Ok(sql_generated)) => {
            let status = score(&test.database, &gold_sql, &sql_generated, executor, options);
            (gold_sql, sql_generated, status)
        }
        (gold, generated) => {
            for err in [&gold, &generated].into_iter().filter_map(|r| r.as_ref().err()) {
                tracing::warn!(db = %test.database, error = %err, "could not normalize query");
            }
            (
                gold.unwrap_or_else(|_| test.gold_sql.clone()),
                generated.unwrap_or_else(|_| response.generated_sql.clone()),
                Status::Wrong,
            )
        }
    };

    BenchmarkRecord {
        question: test.question.clone(),
        db: test.database.clone(),
        gold_sql,
        num_tockens_used: response.total_tokens,
        total_cost: response.total_cost,
        sql_generated,
        exec_time: response.execution_time_secs,
        status,
    }
}

fn score<E: QueryExecutor + ?Sized>(
    database: &str,
    gold_sql: &str,
    sql_generated: &str,
    executor: &E,
    options: &ValidationOptions,
) -> Status {
    let ordered = order_matters(gold_sql);
    let generated = run_query(executor, database, sql_generated, options);
    let gold = run_query(executor, database, gold_sql, options);

    match (gold, generated) {
        (Ok(gold), Ok(generated)) => {
            Status::from_equivalence(results_equivalent(&gold, &generated, ordered))
        }
        (gold, generated) => {
            for err in [gold.err(), generated.err()].into_iter().flatten() {
                tracing::warn!(db = %database, error = %err, "query execution failed");
            }
            Status::Wrong
        }
    }
}

fn run_query<E: QueryExecutor + ?Sized>(
    executor: &E,
    database: &str,
    sql: &str,
    options: &ValidationOptions,
) -> Result<ResultSet> {
    match executor.execute(database, sql) {
        Ok(results) => Ok(results),
        Err(err) if options.degrade_on_execution_error => {
            tracing::warn!(db = %database, error = %err, "query execution failed, comparing as empty result");
            Ok(ResultSet::empty())
        }
        Err(err) => Err(err),
    }
}

/// Drives the generation service and executor over a benchmark set
pub struct BenchmarkRunner<'a, G: ?Sized, E: ?Sized> {
    generator: &'a G,
    executor: &'a E,
    options: ValidationOptions,
}

impl<'a, G, E> BenchmarkRunner<'a, G, E>
where
    G: SqlGenerator + ?Sized,
    E: QueryExecutor + ?Sized,
{
    pub fn new(generator: &'a G, executor: &'a E, options: ValidationOptions) -> Self {
        Self {
            generator,
            executor,
            options,
        }
    }

    /// Score every test and write one JSON record per line to `out`
    pub fn run<W: Write>(&self, tests: &[TestRecord], out: &mut W) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();

        for (i, test) in tests.iter().enumerate() {
            let response = match self.generator.generate(test) {
                Ok(response) => response,
                Err(err) => {
                    tracing::error!(test = i, db = %test.database, error = %err, "skipping test");
                    summary.skipped += 1;
                    continue;
                }
            };

            let record = validate_response(test, &response, self.executor, &self.options);
            tracing::info!(
                test = i,
                db = %record.db,
                status = ?record.status,
                "scored generated query"
            );

            serde_json::to_writer(&mut *out, &record)?;
            out.write_all(b"\n")?;
            summary.record(record.status);
        }

        out.flush()?;
        tracing::info!(
            correct = summary.correct,
            wrong = summary.wrong,
            skipped = summary.skipped,
            elapsed = ?start_time.elapsed(),
            "benchmark finished"
        );
        Ok(summary)
    }
}
