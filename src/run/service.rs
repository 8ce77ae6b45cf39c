use crate::core::country::ShockTable;
use crate::data::{DataError, DataSource};
use crate::engine::calculator::{PortfolioResult, StressTestCalculator};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from executing a stress-test run.
///
/// The calculation itself cannot fail; only its collaborators can
/// (loading data, serializing the shock snapshot).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("failed to serialize shock inputs: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// A completed stress-test run: metadata, totals and per-portfolio results.
///
/// Produced by [`StressTestRunner::execute`] and persisted as-is by
/// [`crate::run::history::RunHistory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTestRun {
    id: Uuid,
    run_at: DateTime<Utc>,
    duration_ms: u64,
    /// JSON snapshot of the shock table the run was executed with, for audit.
    shock_inputs_json: String,
    total_portfolios: usize,
    total_loans: usize,
    total_outstanding: Decimal,
    total_expected_loss: Decimal,
    results: Vec<PortfolioResult>,
}

impl StressTestRun {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn run_at(&self) -> DateTime<Utc> {
        self.run_at
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn shock_inputs_json(&self) -> &str {
        &self.shock_inputs_json
    }

    pub fn total_portfolios(&self) -> usize {
        self.total_portfolios
    }

    pub fn total_loans(&self) -> usize {
        self.total_loans
    }

    pub fn total_outstanding(&self) -> Decimal {
        self.total_outstanding
    }

    pub fn total_expected_loss(&self) -> Decimal {
        self.total_expected_loss
    }

    pub fn results(&self) -> &[PortfolioResult] {
        &self.results
    }

    /// The run without its per-portfolio results, for listings.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            id: self.id,
            run_at: self.run_at,
            duration_ms: self.duration_ms,
            total_portfolios: self.total_portfolios,
            total_loans: self.total_loans,
            total_expected_loss: self.total_expected_loss,
        }
    }
}

/// Run metadata without the per-portfolio detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub run_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub total_portfolios: usize,
    pub total_loans: usize,
    pub total_expected_loss: Decimal,
}

/// Orchestrates a stress-test run: load the book, time the calculation,
/// snapshot the inputs and assemble the run record.
///
/// The runner owns no state between runs; each call to [`execute`] loads
/// fresh data from its source.
///
/// [`execute`]: StressTestRunner::execute
pub struct StressTestRunner<S: DataSource> {
    source: S,
}

impl<S: DataSource> StressTestRunner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Execute one stress test against the given shock table.
    pub fn execute(&self, shocks: &ShockTable) -> Result<StressTestRun, RunError> {
        let started = Instant::now();

        let book = self.source.load()?;
        log::info!(
            "loaded {} portfolios, {} loans, {} ratings",
            book.portfolio_count(),
            book.loan_count(),
            book.rating_count()
        );

        let results = StressTestCalculator::calculate_book(shocks, &book);
        let duration_ms = started.elapsed().as_millis() as u64;

        let shock_inputs_json = serde_json::to_string(shocks)?;
        let total_portfolios = results.len();
        let total_loans = results.iter().map(|r| r.loan_count).sum();
        let total_outstanding = results.iter().map(|r| r.total_outstanding).sum();
        let total_expected_loss = results.iter().map(|r| r.total_expected_loss).sum();

        log::info!(
            "stress test complete in {} ms: {} portfolios, total expected loss {}",
            duration_ms,
            total_portfolios,
            total_expected_loss
        );

        Ok(StressTestRun {
            id: Uuid::new_v4(),
            run_at: Utc::now(),
            duration_ms,
            shock_inputs_json,
            total_portfolios,
            total_loans,
            total_outstanding,
            total_expected_loss,
            results,
        })
    }
}

impl fmt::Display for StressTestRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Stress Test Run {} ===", self.id)?;
        writeln!(f, "Run at:         {}", self.run_at)?;
        writeln!(f, "Duration:       {} ms", self.duration_ms)?;
        writeln!(f, "Shock inputs:   {}", self.shock_inputs_json)?;
        writeln!(f, "Portfolios:     {}", self.total_portfolios)?;
        writeln!(f, "Loans:          {}", self.total_loans)?;
        writeln!(f, "Outstanding:    {}", self.total_outstanding)?;
        writeln!(f, "Expected loss:  {}", self.total_expected_loss)?;

        for r in &self.results {
            writeln!(
                f,
                "\n--- [{}] {} ({}, {}) ---",
                r.portfolio_id, r.name, r.country, r.currency
            )?;
            writeln!(f, "  Outstanding:         {}", r.total_outstanding)?;
            writeln!(f, "  Collateral:          {}", r.total_collateral)?;
            writeln!(f, "  Scenario collateral: {}", r.total_scenario_collateral)?;
            writeln!(f, "  Expected loss:       {}", r.total_expected_loss)?;
            writeln!(f, "  Loans:               {}", r.loan_count)?;
        }
        Ok(())
    }
}
