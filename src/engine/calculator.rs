use crate::core::country::{CountryCode, ShockTable};
use crate::core::currency::CurrencyCode;
use crate::core::loan::{Loan, LoanBook};
use crate::core::portfolio::{Portfolio, PortfolioId};
use crate::core::rating::Rating;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated stress result for one portfolio.
///
/// One entry per portfolio that has at least one loan; results are always
/// sorted ascending by portfolio id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResult {
    pub portfolio_id: PortfolioId,
    pub name: String,
    pub country: CountryCode,
    pub currency: CurrencyCode,
    /// Sum of outstanding balances.
    pub total_outstanding: Decimal,
    /// Sum of unshocked collateral values.
    pub total_collateral: Decimal,
    /// Sum of collateral values after the country shock.
    pub total_scenario_collateral: Decimal,
    /// Sum of per-loan expected losses. Can be negative when the book is
    /// over-collateralized under the scenario.
    pub total_expected_loss: Decimal,
    pub loan_count: usize,
}

/// The core expected-loss calculator.
///
/// A pure, total function over its four inputs: for every combination of
/// empty, missing or duplicate records it produces a defined numeric answer
/// rather than an error. Unknown ratings contribute zero PD, unmapped
/// countries shock by 0%, zero-balance loans contribute zero expected loss,
/// and loans referencing an unknown portfolio are dropped.
pub struct StressTestCalculator;

impl StressTestCalculator {
    /// Run the stress test and return aggregated results grouped by portfolio.
    ///
    /// `shocks` maps country codes to raw percentage changes: `-5.12` means
    /// each loan's collateral is multiplied by `1 + (-5.12 / 100)`.
    ///
    /// # Algorithm
    ///
    /// 1. Build portfolio-by-id and PD-by-rating lookups (case-insensitive
    ///    rating keys; duplicate keys overwrite, last entry wins).
    /// 2. Group loans by portfolio id; drop groups with no known portfolio.
    /// 3. Per loan: `scenario = collateral * multiplier`,
    ///    `RR = scenario / outstanding` (0 for zero-balance loans),
    ///    `LGD = 1 - RR`, `EL = PD * LGD * outstanding`.
    /// 4. Sort results ascending by portfolio id.
    ///
    /// # Examples
    ///
    /// ```
    /// use stress_engine::core::country::{CountryCode, ShockTable};
    /// use stress_engine::core::currency::CurrencyCode;
    /// use stress_engine::core::loan::{Loan, LoanId};
    /// use stress_engine::core::portfolio::{Portfolio, PortfolioId};
    /// use stress_engine::core::rating::{Rating, RatingCode};
    /// use stress_engine::engine::calculator::StressTestCalculator;
    /// use rust_decimal_macros::dec;
    ///
    /// let portfolios = vec![Portfolio::new(
    ///     PortfolioId::new(1),
    ///     "PORT01",
    ///     CountryCode::new("GB"),
    ///     CurrencyCode::new("GBP"),
    /// )];
    /// let loans = vec![Loan::new(
    ///     LoanId::new(1),
    ///     PortfolioId::new(1),
    ///     dec!(100),
    ///     dec!(100),
    ///     dec!(100),
    ///     RatingCode::new("BB"),
    /// )];
    /// let ratings = vec![Rating::new(RatingCode::new("BB"), dec!(60))];
    /// let mut shocks = ShockTable::new();
    /// shocks.set(CountryCode::new("GB"), dec!(-10));
    ///
    /// let results = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings);
    /// // RR = 90/100, LGD = 0.10, EL = 0.60 * 0.10 * 100
    /// assert_eq!(results[0].total_expected_loss, dec!(6));
    /// ```
    pub fn calculate(
        shocks: &ShockTable,
        portfolios: &[Portfolio],
        loans: &[Loan],
        ratings: &[Rating],
    ) -> Vec<PortfolioResult> {
        let portfolio_by_id: HashMap<PortfolioId, &Portfolio> =
            portfolios.iter().map(|p| (p.id(), p)).collect();

        let pd_by_rating: HashMap<String, Decimal> = ratings
            .iter()
            .map(|r| (r.code().normalized(), r.pd_fraction()))
            .collect();

        // Group loans by portfolio id, keeping first-encounter order of ids.
        let mut group_order: Vec<PortfolioId> = Vec::new();
        let mut groups: HashMap<PortfolioId, Vec<&Loan>> = HashMap::new();
        for loan in loans {
            groups
                .entry(loan.portfolio_id())
                .or_insert_with(|| {
                    group_order.push(loan.portfolio_id());
                    Vec::new()
                })
                .push(loan);
        }

        let mut results = Vec::with_capacity(group_order.len());

        for id in group_order {
            let portfolio = match portfolio_by_id.get(&id) {
                Some(p) => *p,
                // Orphaned loans: no matching portfolio, drop the whole group.
                None => continue,
            };

            let multiplier = shocks.multiplier_for(portfolio.country());

            let mut total_outstanding = Decimal::ZERO;
            let mut total_collateral = Decimal::ZERO;
            let mut total_scenario_collateral = Decimal::ZERO;
            let mut total_expected_loss = Decimal::ZERO;
            let mut loan_count = 0usize;

            for loan in &groups[&id] {
                total_outstanding += loan.outstanding_amount();
                total_collateral += loan.collateral_value();

                let scenario_collateral = loan.collateral_value() * multiplier;
                total_scenario_collateral += scenario_collateral;

                // RR = scenario collateral / outstanding. A zero-balance loan
                // recovers nothing and loses nothing, by policy.
                let rr = if loan.outstanding_amount() != Decimal::ZERO {
                    scenario_collateral / loan.outstanding_amount()
                } else {
                    Decimal::ZERO
                };

                // LGD = 1 - RR; negative when over-collateralized.
                let lgd = Decimal::ONE - rr;

                // Unknown rating code: PD defaults to 0.
                let pd = pd_by_rating
                    .get(&loan.rating().normalized())
                    .copied()
                    .unwrap_or(Decimal::ZERO);

                total_expected_loss += pd * lgd * loan.outstanding_amount();
                loan_count += 1;
            }

            results.push(PortfolioResult {
                portfolio_id: id,
                name: portfolio.name().to_string(),
                country: portfolio.country().clone(),
                currency: portfolio.currency().clone(),
                total_outstanding,
                total_collateral,
                total_scenario_collateral,
                total_expected_loss,
                loan_count,
            });
        }

        results.sort_by_key(|r| r.portfolio_id);
        results
    }

    /// Convenience entry point over a bundled [`LoanBook`].
    pub fn calculate_book(shocks: &ShockTable, book: &LoanBook) -> Vec<PortfolioResult> {
        Self::calculate(shocks, book.portfolios(), book.loans(), book.ratings())
    }
}
