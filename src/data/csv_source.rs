//! CSV-backed loan book loading.
//!
//! Reads the three flat files the upstream system ships:
//! `portfolios.csv`, `loans.csv` and `ratings.csv`, with headers trimmed.

use crate::core::country::CountryCode;
use crate::core::currency::CurrencyCode;
use crate::core::loan::{Loan, LoanBook, LoanId};
use crate::core::portfolio::{Portfolio, PortfolioId};
use crate::core::rating::{Rating, RatingCode};
use crate::data::{DataError, DataSource};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PORTFOLIOS_FILE: &str = "portfolios.csv";
pub const LOANS_FILE: &str = "loans.csv";
pub const RATINGS_FILE: &str = "ratings.csv";

#[derive(Debug, Serialize, Deserialize)]
struct PortfolioRecord {
    #[serde(rename = "Port_ID")]
    id: i64,
    #[serde(rename = "Port_Name")]
    name: String,
    #[serde(rename = "Port_Country")]
    country: String,
    #[serde(rename = "Port_CCY")]
    currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct LoanRecord {
    #[serde(rename = "Loan_ID")]
    id: i64,
    #[serde(rename = "Port_ID")]
    portfolio_id: i64,
    #[serde(rename = "OriginalLoanAmount")]
    original_amount: Decimal,
    #[serde(rename = "OutstandingAmount")]
    outstanding_amount: Decimal,
    #[serde(rename = "CollateralValue")]
    collateral_value: Decimal,
    #[serde(rename = "CreditRating")]
    rating: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RatingRecord {
    #[serde(rename = "Rating")]
    code: String,
    // The upstream data files misspell this header; accept the correct
    // spelling as an alias and keep emitting the upstream form.
    #[serde(rename = "ProbablilityOfDefault", alias = "ProbabilityOfDefault")]
    pd_percent: Decimal,
}

/// Loads a [`LoanBook`] from a directory of CSV files.
///
/// # Examples
///
/// ```no_run
/// use stress_engine::data::{CsvDataSource, DataSource};
///
/// let source = CsvDataSource::new("data");
/// let book = source.load().expect("data directory should contain the three CSV files");
/// println!("{} loans", book.loan_count());
/// ```
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    data_dir: PathBuf,
}

impl CsvDataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_portfolios(&self) -> Result<Vec<Portfolio>, DataError> {
        let records: Vec<PortfolioRecord> = self.read_records(PORTFOLIOS_FILE)?;
        Ok(records
            .into_iter()
            .map(|r| {
                Portfolio::new(
                    PortfolioId::new(r.id),
                    r.name,
                    CountryCode::new(r.country),
                    CurrencyCode::new(r.currency),
                )
            })
            .collect())
    }

    pub fn load_loans(&self) -> Result<Vec<Loan>, DataError> {
        let records: Vec<LoanRecord> = self.read_records(LOANS_FILE)?;
        Ok(records
            .into_iter()
            .map(|r| {
                Loan::new(
                    LoanId::new(r.id),
                    PortfolioId::new(r.portfolio_id),
                    r.original_amount,
                    r.outstanding_amount,
                    r.collateral_value,
                    RatingCode::new(r.rating),
                )
            })
            .collect())
    }

    pub fn load_ratings(&self) -> Result<Vec<Rating>, DataError> {
        let records: Vec<RatingRecord> = self.read_records(RATINGS_FILE)?;
        Ok(records
            .into_iter()
            .map(|r| Rating::new(RatingCode::new(r.code), r.pd_percent))
            .collect())
    }

    fn read_records<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, DataError> {
        let path = self.data_dir.join(file);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|source| DataError::Csv {
                path: path.display().to_string(),
                source,
            })?;
        reader
            .deserialize()
            .collect::<Result<Vec<T>, _>>()
            .map_err(|source| DataError::Csv {
                path: path.display().to_string(),
                source,
            })
    }
}

impl DataSource for CsvDataSource {
    fn load(&self) -> Result<LoanBook, DataError> {
        let mut book = LoanBook::new();
        for p in self.load_portfolios()? {
            book.add_portfolio(p);
        }
        for l in self.load_loans()? {
            book.add_loan(l);
        }
        for r in self.load_ratings()? {
            book.add_rating(r);
        }
        Ok(book)
    }
}

/// Write a loan book out as the three CSV files, creating `dir` if needed.
///
/// The emitted headers match what [`CsvDataSource`] reads back, so a book
/// round-trips through a directory unchanged.
pub fn write_book(dir: impl AsRef<Path>, book: &LoanBook) -> Result<(), DataError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| DataError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let portfolio_records: Vec<PortfolioRecord> = book
        .portfolios()
        .iter()
        .map(|p| PortfolioRecord {
            id: p.id().as_i64(),
            name: p.name().to_string(),
            country: p.country().as_str().to_string(),
            currency: p.currency().as_str().to_string(),
        })
        .collect();
    write_records(&dir.join(PORTFOLIOS_FILE), &portfolio_records)?;

    let loan_records: Vec<LoanRecord> = book
        .loans()
        .iter()
        .map(|l| LoanRecord {
            id: l.id().as_i64(),
            portfolio_id: l.portfolio_id().as_i64(),
            original_amount: l.original_amount(),
            outstanding_amount: l.outstanding_amount(),
            collateral_value: l.collateral_value(),
            rating: l.rating().as_str().to_string(),
        })
        .collect();
    write_records(&dir.join(LOANS_FILE), &loan_records)?;

    let rating_records: Vec<RatingRecord> = book
        .ratings()
        .iter()
        .map(|r| RatingRecord {
            code: r.code().as_str().to_string(),
            pd_percent: r.pd_percent(),
        })
        .collect();
    write_records(&dir.join(RATINGS_FILE), &rating_records)?;

    Ok(())
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| DataError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    for record in records {
        writer.serialize(record).map_err(|source| DataError::Csv {
            path: path.display().to_string(),
            source,
        })?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}
