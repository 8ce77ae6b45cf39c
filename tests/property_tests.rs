use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use stress_engine::core::country::{CountryCode, ShockTable};
use stress_engine::core::currency::CurrencyCode;
use stress_engine::core::loan::{Loan, LoanId};
use stress_engine::core::portfolio::{Portfolio, PortfolioId};
use stress_engine::core::rating::{Rating, RatingCode};
use stress_engine::engine::calculator::StressTestCalculator;

/// The fixed seven-grade rating table used by every property.
fn ratings() -> Vec<Rating> {
    vec![
        Rating::new(RatingCode::new("AAA"), dec!(1)),
        Rating::new(RatingCode::new("AA"), dec!(10)),
        Rating::new(RatingCode::new("A"), dec!(25)),
        Rating::new(RatingCode::new("BBB"), dec!(40)),
        Rating::new(RatingCode::new("BB"), dec!(60)),
        Rating::new(RatingCode::new("B"), dec!(75)),
        Rating::new(RatingCode::new("CCC"), dec!(95)),
    ]
}

fn arb_country() -> impl Strategy<Value = CountryCode> {
    prop::sample::select(vec![
        CountryCode::new("GB"),
        CountryCode::new("US"),
        CountryCode::new("DE"),
    ])
}

/// Portfolios with ids 1..=4; loans may also reference ids 5 and 6, which
/// never exist — those loans must be dropped.
fn arb_portfolios() -> impl Strategy<Value = Vec<Portfolio>> {
    prop::collection::vec(arb_country(), 4).prop_map(|countries| {
        countries
            .into_iter()
            .enumerate()
            .map(|(i, country)| {
                Portfolio::new(
                    PortfolioId::new(i as i64 + 1),
                    format!("PORT{:02}", i + 1),
                    country,
                    CurrencyCode::new("GBP"),
                )
            })
            .collect()
    })
}

/// Outstanding balances restricted to 2^a * 5^b multiples so every recovery
/// rate division terminates and all arithmetic stays exact.
fn arb_outstanding() -> impl Strategy<Value = Decimal> {
    prop::sample::select(vec![
        dec!(0),
        dec!(1),
        dec!(2),
        dec!(5),
        dec!(8),
        dec!(10),
        dec!(25),
        dec!(40),
        dec!(50),
        dec!(80),
        dec!(100),
        dec!(125),
        dec!(200),
        dec!(250),
        dec!(400),
        dec!(500),
        dec!(800),
        dec!(1000),
    ])
}

/// Rating codes in mixed case, including one with no table entry.
fn arb_rating_code() -> impl Strategy<Value = RatingCode> {
    prop::sample::select(vec![
        RatingCode::new("AAA"),
        RatingCode::new("A"),
        RatingCode::new("bbb"),
        RatingCode::new("BB"),
        RatingCode::new("b"),
        RatingCode::new("CCC"),
        RatingCode::new("NR"),
    ])
}

fn arb_loans() -> impl Strategy<Value = Vec<Loan>> {
    prop::collection::vec(
        (1i64..=6, arb_outstanding(), 0u32..=2000, arb_rating_code()),
        0..40,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (port_id, outstanding, collateral, rating))| {
                Loan::new(
                    LoanId::new(i as i64 + 1),
                    PortfolioId::new(port_id),
                    outstanding,
                    outstanding,
                    Decimal::from(collateral),
                    rating,
                )
            })
            .collect()
    })
}

/// Shock percentages at two decimal places at most.
fn arb_shock_pct() -> impl Strategy<Value = Decimal> {
    prop::sample::select(vec![
        dec!(-50),
        dec!(-25),
        dec!(-10),
        dec!(-5.12),
        dec!(-5),
        dec!(0),
        dec!(2),
        dec!(5),
        dec!(10),
    ])
}

fn arb_shocks() -> impl Strategy<Value = ShockTable> {
    prop::collection::vec((arb_country(), arb_shock_pct()), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Output is always sorted ascending by portfolio id,
    // for any ordering of portfolios and loans.
    // ===================================================================
    #[test]
    fn output_always_sorted_by_portfolio_id(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
        shocks in arb_shocks(),
    ) {
        let results = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings());
        prop_assert!(
            results.windows(2).all(|w| w[0].portfolio_id < w[1].portfolio_id),
            "Results must be strictly ascending by portfolio id"
        );
    }

    // ===================================================================
    // INVARIANT 2: Loans referencing an unknown portfolio never surface.
    // No phantom portfolio result is ever produced.
    // ===================================================================
    #[test]
    fn orphaned_loans_never_produce_results(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
        shocks in arb_shocks(),
    ) {
        let known: HashSet<PortfolioId> = portfolios.iter().map(|p| p.id()).collect();
        let results = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings());
        prop_assert!(results.iter().all(|r| known.contains(&r.portfolio_id)));
    }

    // ===================================================================
    // INVARIANT 3: Loan counts cover exactly the loans whose portfolio
    // exists; outstanding/collateral totals match manual sums.
    // ===================================================================
    #[test]
    fn totals_match_manual_sums(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
        shocks in arb_shocks(),
    ) {
        let known: HashSet<PortfolioId> = portfolios.iter().map(|p| p.id()).collect();
        let counted: Vec<&Loan> = loans
            .iter()
            .filter(|l| known.contains(&l.portfolio_id()))
            .collect();

        let results = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings());

        let count: usize = results.iter().map(|r| r.loan_count).sum();
        prop_assert_eq!(count, counted.len());

        let outstanding: Decimal = results.iter().map(|r| r.total_outstanding).sum();
        let manual: Decimal = counted.iter().map(|l| l.outstanding_amount()).sum();
        prop_assert_eq!(outstanding, manual);

        let collateral: Decimal = results.iter().map(|r| r.total_collateral).sum();
        let manual: Decimal = counted.iter().map(|l| l.collateral_value()).sum();
        prop_assert_eq!(collateral, manual);
    }

    // ===================================================================
    // INVARIANT 4: Aggregation is additive. The expected loss of a
    // portfolio equals the sum of expected losses of each of its loans
    // computed in isolation.
    // ===================================================================
    #[test]
    fn expected_loss_is_additive_per_loan(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
        shocks in arb_shocks(),
    ) {
        let whole = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings());

        for result in &whole {
            let singleton_sum: Decimal = loans
                .iter()
                .filter(|l| l.portfolio_id() == result.portfolio_id)
                .map(|l| {
                    let one = StressTestCalculator::calculate(
                        &shocks,
                        &portfolios,
                        std::slice::from_ref(l),
                        &ratings(),
                    );
                    one[0].total_expected_loss
                })
                .sum();
            prop_assert_eq!(result.total_expected_loss, singleton_sum);
        }
    }

    // ===================================================================
    // INVARIANT 5: Loan input order does not change the output.
    // ===================================================================
    #[test]
    fn loan_order_does_not_change_results(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
        shocks in arb_shocks(),
    ) {
        let forward = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings());
        let mut reversed = loans.clone();
        reversed.reverse();
        let backward = StressTestCalculator::calculate(&shocks, &portfolios, &reversed, &ratings());
        prop_assert_eq!(forward, backward);
    }

    // ===================================================================
    // INVARIANT 6: A country absent from the shock table behaves exactly
    // like one explicitly mapped to 0.
    // ===================================================================
    #[test]
    fn absent_country_equals_explicit_zero(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
    ) {
        let empty = ShockTable::new();
        let zeros: ShockTable = ["GB", "US", "DE"]
            .iter()
            .map(|c| (CountryCode::new(*c), Decimal::ZERO))
            .collect();

        let implicit = StressTestCalculator::calculate(&empty, &portfolios, &loans, &ratings());
        let explicit = StressTestCalculator::calculate(&zeros, &portfolios, &loans, &ratings());
        prop_assert_eq!(implicit, explicit);
    }

    // ===================================================================
    // INVARIANT 7: Expected loss is monotone in the shock direction.
    // A harsher collateral haircut never decreases expected loss.
    // ===================================================================
    #[test]
    fn expected_loss_monotone_in_shock(
        portfolios in arb_portfolios(),
        loans in arb_loans(),
        (harsh, mild) in (arb_shock_pct(), arb_shock_pct())
            .prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) }),
    ) {
        let shock_of = |pct: Decimal| -> ShockTable {
            ["GB", "US", "DE"]
                .iter()
                .map(|c| (CountryCode::new(*c), pct))
                .collect()
        };

        let el_of = |shocks: &ShockTable| -> Decimal {
            StressTestCalculator::calculate(shocks, &portfolios, &loans, &ratings())
                .iter()
                .map(|r| r.total_expected_loss)
                .sum()
        };

        let el_harsh = el_of(&shock_of(harsh));
        let el_mild = el_of(&shock_of(mild));
        prop_assert!(
            el_harsh >= el_mild,
            "EL under {}% ({}) must be >= EL under {}% ({})",
            harsh, el_harsh, mild, el_mild
        );
    }

    // ===================================================================
    // INVARIANT 8: Zero-balance loans never contribute expected loss,
    // whatever their collateral or rating.
    // ===================================================================
    #[test]
    fn zero_balance_loans_contribute_nothing(
        portfolios in arb_portfolios(),
        collateral in 0u32..=2000,
        rating in arb_rating_code(),
        shocks in arb_shocks(),
    ) {
        let loans = vec![Loan::new(
            LoanId::new(1),
            PortfolioId::new(1),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from(collateral),
            rating,
        )];

        let results = StressTestCalculator::calculate(&shocks, &portfolios, &loans, &ratings());
        prop_assert_eq!(results.len(), 1);
        prop_assert_eq!(results[0].total_expected_loss, Decimal::ZERO);
        prop_assert_eq!(results[0].loan_count, 1);
    }
}
