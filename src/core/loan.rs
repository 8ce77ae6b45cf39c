use crate::core::portfolio::{Portfolio, PortfolioId};
use crate::core::rating::{Rating, RatingCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a loan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoanId(i64);

impl LoanId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LoanId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

/// A single loan in the book.
///
/// References its owning portfolio by id. A loan whose portfolio id has no
/// matching portfolio is silently excluded from stress results, so no
/// referential integrity is enforced here. Amounts are not validated either:
/// a zero outstanding balance is legal and contributes zero expected loss.
///
/// # Examples
///
/// ```
/// use stress_engine::core::loan::{Loan, LoanId};
/// use stress_engine::core::portfolio::PortfolioId;
/// use stress_engine::core::rating::RatingCode;
/// use rust_decimal_macros::dec;
///
/// let loan = Loan::new(
///     LoanId::new(1),
///     PortfolioId::new(1),
///     dec!(250_000),
///     dec!(198_500),
///     dec!(275_000),
///     RatingCode::new("BB"),
/// );
///
/// assert_eq!(loan.outstanding_amount(), dec!(198_500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier for this loan.
    id: LoanId,
    /// Owning portfolio.
    portfolio_id: PortfolioId,
    /// Principal at origination.
    original_amount: Decimal,
    /// Current outstanding balance.
    outstanding_amount: Decimal,
    /// Unshocked collateral value.
    collateral_value: Decimal,
    /// Credit rating, matched case-insensitively against the rating table.
    rating: RatingCode,
}

impl Loan {
    pub fn new(
        id: LoanId,
        portfolio_id: PortfolioId,
        original_amount: Decimal,
        outstanding_amount: Decimal,
        collateral_value: Decimal,
        rating: RatingCode,
    ) -> Self {
        Self {
            id,
            portfolio_id,
            original_amount,
            outstanding_amount,
            collateral_value,
            rating,
        }
    }

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn portfolio_id(&self) -> PortfolioId {
        self.portfolio_id
    }

    pub fn original_amount(&self) -> Decimal {
        self.original_amount
    }

    pub fn outstanding_amount(&self) -> Decimal {
        self.outstanding_amount
    }

    pub fn collateral_value(&self) -> Decimal {
        self.collateral_value
    }

    pub fn rating(&self) -> &RatingCode {
        &self.rating
    }
}

/// The three record sets a stress test consumes, bundled.
///
/// This is what a data source produces and what the calculator's
/// convenience entry point consumes. The sets are independent sequences;
/// nothing checks that loans reference known portfolios or ratings — the
/// calculator degrades gracefully instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanBook {
    portfolios: Vec<Portfolio>,
    loans: Vec<Loan>,
    ratings: Vec<Rating>,
}

impl LoanBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_portfolio(&mut self, portfolio: Portfolio) {
        self.portfolios.push(portfolio);
    }

    pub fn add_loan(&mut self, loan: Loan) {
        self.loans.push(loan);
    }

    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn portfolio_count(&self) -> usize {
        self.portfolios.len()
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty() && self.loans.is_empty() && self.ratings.is_empty()
    }

    /// Total outstanding balance across the whole book.
    pub fn total_outstanding(&self) -> Decimal {
        self.loans.iter().map(|l| l.outstanding_amount()).sum()
    }

    /// Total unshocked collateral value across the whole book.
    pub fn total_collateral(&self) -> Decimal {
        self.loans.iter().map(|l| l.collateral_value()).sum()
    }
}
