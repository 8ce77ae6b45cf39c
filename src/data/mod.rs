//! Data-source collaborators: CSV loan book loading and random generation.

pub mod csv_source;
pub mod generate;

pub use csv_source::CsvDataSource;

use crate::core::loan::LoanBook;
use thiserror::Error;

/// Errors arising from loading or writing loan book data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to load {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies the three record sets a stress test consumes.
///
/// Implementations own their own failure modes (missing files, malformed
/// rows); the calculator downstream never fails on the *content* it is
/// given.
pub trait DataSource {
    fn load(&self) -> Result<LoanBook, DataError>;
}
