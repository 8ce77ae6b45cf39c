use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit-rating code (e.g. "AAA", "BB").
///
/// Codes are free text in the source data and are matched against the rating
/// table case-insensitively: a loan rated `bb` resolves the PD of `BB`.
///
/// # Examples
///
/// ```
/// use stress_engine::core::rating::RatingCode;
///
/// assert_eq!(RatingCode::new("bb").normalized(), RatingCode::new("BB").normalized());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingCode(String);

impl RatingCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical lookup key: uppercase, so PD lookup is case-insensitive.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for RatingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RatingCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A credit rating and its associated probability of default.
///
/// The PD is expressed as a percentage in the source data (60 means 60%);
/// [`Rating::pd_fraction`] converts it to the fraction the expected-loss
/// formula consumes. Values outside [0, 100] are used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    code: RatingCode,
    /// Probability of default as a percentage (e.g. 60 means 60%).
    pd_percent: Decimal,
}

impl Rating {
    pub fn new(code: RatingCode, pd_percent: Decimal) -> Self {
        Self { code, pd_percent }
    }

    pub fn code(&self) -> &RatingCode {
        &self.code
    }

    pub fn pd_percent(&self) -> Decimal {
        self.pd_percent
    }

    /// Probability of default as a fraction: `pd_percent / 100`.
    pub fn pd_fraction(&self) -> Decimal {
        self.pd_percent / Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalized_is_case_insensitive() {
        assert_eq!(RatingCode::new("ccc").normalized(), "CCC");
        assert_eq!(RatingCode::new("Ccc").normalized(), "CCC");
        assert_eq!(RatingCode::new("CCC").normalized(), "CCC");
    }

    #[test]
    fn test_pd_fraction() {
        let r = Rating::new(RatingCode::new("BB"), dec!(60));
        assert_eq!(r.pd_fraction(), dec!(0.60));
    }

    #[test]
    fn test_pd_fraction_out_of_range_used_as_is() {
        let r = Rating::new(RatingCode::new("XX"), dec!(150));
        assert_eq!(r.pd_fraction(), dec!(1.50));
    }
}
