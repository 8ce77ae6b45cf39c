//! Random loan book generation.
//!
//! Produces internally consistent books (every loan references a generated
//! portfolio) for CLI test data, benchmarks and demos.

use crate::core::country::CountryCode;
use crate::core::currency::CurrencyCode;
use crate::core::loan::{Loan, LoanBook, LoanId};
use crate::core::portfolio::{Portfolio, PortfolioId};
use crate::core::rating::{Rating, RatingCode};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random loan book.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Number of portfolios.
    pub portfolio_count: usize,
    /// Loans per portfolio.
    pub loans_per_portfolio: usize,
    /// Countries to spread portfolios across.
    pub countries: Vec<CountryCode>,
    /// Minimum outstanding balance.
    pub min_outstanding: Decimal,
    /// Maximum outstanding balance.
    pub max_outstanding: Decimal,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            portfolio_count: 10,
            loans_per_portfolio: 50,
            countries: vec![
                CountryCode::new("GB"),
                CountryCode::new("US"),
                CountryCode::new("DE"),
            ],
            min_outstanding: Decimal::from(10_000),
            max_outstanding: Decimal::from(1_000_000),
        }
    }
}

/// The standard seven-grade rating table (PD as a percentage).
pub fn standard_ratings() -> Vec<Rating> {
    vec![
        Rating::new(RatingCode::new("AAA"), Decimal::from(1)),
        Rating::new(RatingCode::new("AA"), Decimal::from(10)),
        Rating::new(RatingCode::new("A"), Decimal::from(25)),
        Rating::new(RatingCode::new("BBB"), Decimal::from(40)),
        Rating::new(RatingCode::new("BB"), Decimal::from(60)),
        Rating::new(RatingCode::new("B"), Decimal::from(75)),
        Rating::new(RatingCode::new("CCC"), Decimal::from(95)),
    ]
}

fn currency_for(country: &CountryCode) -> CurrencyCode {
    match country.as_str() {
        "GB" => CurrencyCode::new("GBP"),
        "US" => CurrencyCode::new("USD"),
        "JP" => CurrencyCode::new("JPY"),
        "SG" => CurrencyCode::new("SGD"),
        _ => CurrencyCode::new("EUR"),
    }
}

/// Generate a random loan book for testing.
pub fn generate_random_book(config: &BookConfig) -> LoanBook {
    let mut rng = rand::thread_rng();
    let mut book = LoanBook::new();

    let ratings = standard_ratings();
    let grades: Vec<RatingCode> = ratings.iter().map(|r| r.code().clone()).collect();
    for rating in ratings {
        book.add_rating(rating);
    }

    let min_f64: f64 = config.min_outstanding.to_string().parse().unwrap_or(10_000.0);
    let max_f64: f64 = config
        .max_outstanding
        .to_string()
        .parse()
        .unwrap_or(1_000_000.0);

    let mut loan_id = 1i64;
    for i in 0..config.portfolio_count {
        let id = PortfolioId::new(i as i64 + 1);
        let country = if config.countries.is_empty() {
            CountryCode::new("GB")
        } else {
            config.countries[rng.gen_range(0..config.countries.len())].clone()
        };
        let currency = currency_for(&country);
        book.add_portfolio(Portfolio::new(
            id,
            format!("PORT{:03}", i + 1),
            country,
            currency,
        ));

        for _ in 0..config.loans_per_portfolio {
            let outstanding_f64 = rng.gen_range(min_f64..max_f64);
            let outstanding = Decimal::from_f64_retain(outstanding_f64)
                .unwrap_or(Decimal::from(10_000))
                .round_dp(2);

            // Collateral between 50% and 150% of the balance, so some loans
            // are over-collateralized and carry negative expected loss.
            let collateral_ratio = rng.gen_range(0.5..1.5);
            let collateral = Decimal::from_f64_retain(outstanding_f64 * collateral_ratio)
                .unwrap_or(outstanding)
                .round_dp(2);

            let original_ratio = rng.gen_range(1.0..1.3);
            let original = Decimal::from_f64_retain(outstanding_f64 * original_ratio)
                .unwrap_or(outstanding)
                .round_dp(2);

            let grade = grades[rng.gen_range(0..grades.len())].clone();

            book.add_loan(Loan::new(
                LoanId::new(loan_id),
                id,
                original,
                outstanding,
                collateral,
                grade,
            ));
            loan_id += 1;
        }
    }

    book
}
