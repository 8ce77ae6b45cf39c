//! Basic stress-test walkthrough.
//!
//! Builds a tiny two-portfolio loan book by hand and shows how a country
//! collateral shock turns into per-portfolio expected loss.

use rust_decimal_macros::dec;
use stress_engine::core::country::{CountryCode, ShockTable};
use stress_engine::core::currency::CurrencyCode;
use stress_engine::core::loan::{Loan, LoanBook, LoanId};
use stress_engine::core::portfolio::{Portfolio, PortfolioId};
use stress_engine::core::rating::{Rating, RatingCode};
use stress_engine::engine::calculator::StressTestCalculator;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  stress-engine: Basic Stress Test Example ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let mut book = LoanBook::new();

    book.add_portfolio(Portfolio::new(
        PortfolioId::new(1),
        "Residential GB",
        CountryCode::new("GB"),
        CurrencyCode::new("GBP"),
    ));
    book.add_portfolio(Portfolio::new(
        PortfolioId::new(2),
        "Commercial US",
        CountryCode::new("US"),
        CurrencyCode::new("USD"),
    ));

    book.add_loan(Loan::new(
        LoanId::new(1),
        PortfolioId::new(1),
        dec!(250_000),
        dec!(198_500),
        dec!(230_000),
        RatingCode::new("BB"),
    ));
    book.add_loan(Loan::new(
        LoanId::new(2),
        PortfolioId::new(1),
        dec!(120_000),
        dec!(54_202),
        dec!(66_000),
        RatingCode::new("A"),
    ));
    book.add_loan(Loan::new(
        LoanId::new(3),
        PortfolioId::new(2),
        dec!(900_000),
        dec!(850_000),
        dec!(700_000),
        RatingCode::new("CCC"),
    ));

    book.add_rating(Rating::new(RatingCode::new("A"), dec!(25)));
    book.add_rating(Rating::new(RatingCode::new("BB"), dec!(60)));
    book.add_rating(Rating::new(RatingCode::new("CCC"), dec!(95)));

    // GB house prices fall 5.12%; the US market is untouched.
    let mut shocks = ShockTable::new();
    shocks.set(CountryCode::new("GB"), dec!(-5.12));

    let results = StressTestCalculator::calculate_book(&shocks, &book);

    for r in &results {
        println!("━━━ [{}] {} ({}, {}) ━━━\n", r.portfolio_id, r.name, r.country, r.currency);
        println!("Outstanding:         {}", r.total_outstanding);
        println!("Collateral:          {}", r.total_collateral);
        println!("Scenario collateral: {}", r.total_scenario_collateral);
        println!("Expected loss:       {}", r.total_expected_loss);
        println!("Loans:               {}\n", r.loan_count);
    }

    let total: rust_decimal::Decimal = results.iter().map(|r| r.total_expected_loss).sum();
    println!("Total expected loss across the book: {}", total.round_dp(2));
}
