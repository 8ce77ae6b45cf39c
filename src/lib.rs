//! # stress-engine
//!
//! Portfolio credit stress testing and expected-loss engine.
//!
//! Given a loan book (portfolios, loans, credit ratings) and a per-country
//! collateral shock table, this engine computes aggregated expected-loss
//! metrics for each portfolio.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: portfolios, loans, ratings, shock tables
//! - **engine** — The expected-loss calculator
//! - **data** — CSV loan book loading and random book generation
//! - **run** — Run orchestration and file-backed run history

pub mod core;
pub mod data;
pub mod engine;
pub mod run;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::country::{CountryCode, ShockTable};
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::loan::{Loan, LoanBook, LoanId};
    pub use crate::core::portfolio::{Portfolio, PortfolioId};
    pub use crate::core::rating::{Rating, RatingCode};
    pub use crate::engine::calculator::{PortfolioResult, StressTestCalculator};
    pub use crate::run::service::{StressTestRun, StressTestRunner};
}
