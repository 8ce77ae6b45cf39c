use crate::run::service::{RunSummary, StressTestRun};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON-file-backed store of past stress-test runs.
///
/// The file holds a JSON array of full run records. A missing file reads as
/// an empty history; `append` creates it on first write. Listing returns
/// summaries newest-first; full records are fetched by run id.
///
/// # Examples
///
/// ```no_run
/// use stress_engine::run::history::RunHistory;
///
/// let history = RunHistory::open("runs.json");
/// for summary in history.runs().unwrap() {
///     println!("{} {} EL={}", summary.run_at, summary.id, summary.total_expected_loss);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RunHistory {
    path: PathBuf,
}

impl RunHistory {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a run to the history file.
    pub fn append(&self, run: &StressTestRun) -> Result<(), HistoryError> {
        let mut all = self.load_all()?;
        all.push(run.clone());
        let json = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// All recorded runs as summaries, newest first.
    pub fn runs(&self) -> Result<Vec<RunSummary>, HistoryError> {
        let mut summaries: Vec<RunSummary> =
            self.load_all()?.iter().map(|r| r.summary()).collect();
        summaries.sort_by(|a, b| b.run_at.cmp(&a.run_at));
        Ok(summaries)
    }

    /// A specific run with its per-portfolio results, if recorded.
    pub fn find(&self, id: Uuid) -> Result<Option<StressTestRun>, HistoryError> {
        Ok(self.load_all()?.into_iter().find(|r| r.id() == id))
    }

    fn load_all(&self) -> Result<Vec<StressTestRun>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::{CountryCode, ShockTable};
    use crate::core::currency::CurrencyCode;
    use crate::core::loan::{Loan, LoanBook, LoanId};
    use crate::core::portfolio::{Portfolio, PortfolioId};
    use crate::core::rating::{Rating, RatingCode};
    use crate::data::{DataError, DataSource};
    use crate::run::service::StressTestRunner;
    use rust_decimal_macros::dec;

    struct FixedSource(LoanBook);

    impl DataSource for FixedSource {
        fn load(&self) -> Result<LoanBook, DataError> {
            Ok(self.0.clone())
        }
    }

    fn make_run(shock_pct: rust_decimal::Decimal) -> StressTestRun {
        let mut book = LoanBook::new();
        book.add_portfolio(Portfolio::new(
            PortfolioId::new(1),
            "PORT01",
            CountryCode::new("GB"),
            CurrencyCode::new("GBP"),
        ));
        book.add_loan(Loan::new(
            LoanId::new(1),
            PortfolioId::new(1),
            dec!(100),
            dec!(100),
            dec!(100),
            RatingCode::new("BB"),
        ));
        book.add_rating(Rating::new(RatingCode::new("BB"), dec!(60)));

        let mut shocks = ShockTable::new();
        shocks.set(CountryCode::new("GB"), shock_pct);
        StressTestRunner::new(FixedSource(book)).execute(&shocks).unwrap()
    }

    fn temp_history(tag: &str) -> RunHistory {
        let path = std::env::temp_dir().join(format!(
            "stress-engine-history-{}-{}.json",
            tag,
            Uuid::new_v4()
        ));
        RunHistory::open(path)
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let history = temp_history("empty");
        assert!(history.runs().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_list() {
        let history = temp_history("append");
        let first = make_run(dec!(-5));
        let second = make_run(dec!(-10));

        history.append(&first).unwrap();
        history.append(&second).unwrap();

        let summaries = history.runs().unwrap();
        assert_eq!(summaries.len(), 2);
        // Newest first.
        assert!(summaries[0].run_at >= summaries[1].run_at);

        fs::remove_file(history.path()).unwrap();
    }

    #[test]
    fn test_find_returns_full_results() {
        let history = temp_history("find");
        let run = make_run(dec!(-10));
        history.append(&run).unwrap();

        let found = history.find(run.id()).unwrap().unwrap();
        assert_eq!(found, run);
        assert_eq!(found.results().len(), 1);

        assert!(history.find(Uuid::new_v4()).unwrap().is_none());

        fs::remove_file(history.path()).unwrap();
    }
}
