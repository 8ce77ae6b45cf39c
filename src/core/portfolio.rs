use crate::core::country::CountryCode;
use crate::core::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a portfolio.
///
/// Portfolio ids come from the source data as integers; loans reference
/// their owning portfolio through this id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PortfolioId(i64);

impl PortfolioId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PortfolioId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

/// A loan portfolio: a named book of loans in one country and one
/// reporting currency.
///
/// Portfolios are immutable once created. The calculator resolves each
/// loan's country shock through its owning portfolio.
///
/// # Examples
///
/// ```
/// use stress_engine::core::country::CountryCode;
/// use stress_engine::core::currency::CurrencyCode;
/// use stress_engine::core::portfolio::{Portfolio, PortfolioId};
///
/// let portfolio = Portfolio::new(
///     PortfolioId::new(1),
///     "PORT01",
///     CountryCode::new("GB"),
///     CurrencyCode::new("GBP"),
/// );
///
/// assert_eq!(portfolio.country().as_str(), "GB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Unique identifier for this portfolio.
    id: PortfolioId,
    /// Display name.
    name: String,
    /// Country whose collateral shock applies to this portfolio's loans.
    country: CountryCode,
    /// Reporting currency.
    currency: CurrencyCode,
}

impl Portfolio {
    pub fn new(
        id: PortfolioId,
        name: impl Into<String>,
        country: CountryCode,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            country,
            currency,
        }
    }

    pub fn id(&self) -> PortfolioId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &CountryCode {
        &self.country
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}
