use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// ISO 3166-1 alpha-2 style country code.
///
/// Identifies the market a portfolio's collateral sits in, and keys the
/// shock table of a stress scenario.
///
/// # Examples
///
/// ```
/// use stress_engine::core::country::CountryCode;
///
/// let gb = CountryCode::new("GB");
/// let us = CountryCode::new("US");
/// assert_ne!(gb, us);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Per-country collateral shock table for a stress scenario.
///
/// Maps a country code to a signed percentage change in collateral value,
/// e.g. `-5.12` meaning collateral shrinks by 5.12%. A country absent from
/// the table is treated as a 0% change — never an error.
///
/// # Examples
///
/// ```
/// use stress_engine::core::country::{CountryCode, ShockTable};
/// use rust_decimal_macros::dec;
///
/// let mut shocks = ShockTable::new();
/// shocks.set(CountryCode::new("GB"), dec!(-5.12));
///
/// assert_eq!(shocks.change_for(&CountryCode::new("GB")), dec!(-5.12));
/// assert_eq!(shocks.multiplier_for(&CountryCode::new("GB")), dec!(0.9488));
/// // Unmapped country behaves as an explicit 0.
/// assert_eq!(shocks.multiplier_for(&CountryCode::new("DE")), dec!(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShockTable {
    changes: HashMap<CountryCode, Decimal>,
}

impl ShockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the percentage change for a country. Overwrites any prior value.
    pub fn set(&mut self, country: CountryCode, pct_change: Decimal) {
        self.changes.insert(country, pct_change);
    }

    /// The percentage change for a country, defaulting to 0 when unmapped.
    pub fn change_for(&self, country: &CountryCode) -> Decimal {
        self.changes.get(country).copied().unwrap_or(Decimal::ZERO)
    }

    /// The collateral multiplier for a country: `1 + pct/100`.
    pub fn multiplier_for(&self, country: &CountryCode) -> Decimal {
        Decimal::ONE + self.change_for(country) / Decimal::ONE_HUNDRED
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CountryCode, &Decimal)> {
        self.changes.iter()
    }
}

impl FromIterator<(CountryCode, Decimal)> for ShockTable {
    fn from_iter<T: IntoIterator<Item = (CountryCode, Decimal)>>(iter: T) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}
