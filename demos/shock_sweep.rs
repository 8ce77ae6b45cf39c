//! Shock sweep over a generated loan book.
//!
//! Applies progressively harsher collateral haircuts to the same book and
//! prints the expected-loss curve, illustrating that EL is monotone in the
//! shock direction.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stress_engine::core::country::{CountryCode, ShockTable};
use stress_engine::data::generate::{generate_random_book, BookConfig};
use stress_engine::engine::calculator::StressTestCalculator;

fn main() {
    println!("╔══════════════════════════════════════╗");
    println!("║  stress-engine: Shock Sweep Example  ║");
    println!("╚══════════════════════════════════════╝\n");

    let config = BookConfig {
        portfolio_count: 12,
        loans_per_portfolio: 200,
        ..Default::default()
    };
    let book = generate_random_book(&config);

    println!(
        "Book: {} portfolios, {} loans, total outstanding {}\n",
        book.portfolio_count(),
        book.loan_count(),
        book.total_outstanding().round_dp(2)
    );

    println!("{:>8}  {:>20}  {:>20}", "shock %", "scenario collateral", "expected loss");

    let mut pct = dec!(5);
    while pct >= dec!(-30) {
        let shocks: ShockTable = ["GB", "US", "DE"]
            .iter()
            .map(|c| (CountryCode::new(*c), pct))
            .collect();

        let results = StressTestCalculator::calculate_book(&shocks, &book);
        let scenario: Decimal = results.iter().map(|r| r.total_scenario_collateral).sum();
        let el: Decimal = results.iter().map(|r| r.total_expected_loss).sum();

        println!("{:>8}  {:>20}  {:>20}", pct, scenario.round_dp(2), el.round_dp(2));
        pct -= dec!(5);
    }
}
