//! Property-based tests for account summary math.
//!
//! - Balance equals the sum of movements
//! - Income minus outflow equals balance
//! - Interest floor is applied per deposit
//! - Out-of-range figures come back as `None` instead of panicking

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::summary::{
    INTEREST_FLOOR, checked_sum, deposit_interest, qualifying_interest, summarize, total_income,
    total_outflow_abs,
};

/// Strategy for signed movement amounts (-10,000.00 to 10,000.00, non-zero).
fn movement_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        (1i64..1_000_000i64).prop_map(|cents| Decimal::new(-cents, 2)),
    ]
}

/// Strategy for any representable decimal, including values near `Decimal::MAX`.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28u32)
        .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
}

/// Strategy for interest rates (0.1% to 5.0%).
fn interest_rate() -> impl Strategy<Value = Decimal> {
    (1i64..=50i64).prop_map(|tenths| Decimal::new(tenths, 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Income less outflow is the balance.
    #[test]
    fn prop_income_minus_outflow_is_balance(
        amounts in prop::collection::vec(movement_amount(), 0..30),
    ) {
        let balance = checked_sum(amounts.iter().copied()).unwrap();
        let income = total_income(&amounts).unwrap();
        let outflow = total_outflow_abs(&amounts).unwrap();
        prop_assert_eq!(income - outflow, balance);
        prop_assert!(outflow >= Decimal::ZERO);
    }

    /// Deposits whose interest is below the floor contribute nothing.
    #[test]
    fn prop_small_deposits_contribute_nothing(
        amounts in prop::collection::vec(movement_amount(), 0..20),
        small in (1i64..5_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        rate in interest_rate(),
    ) {
        prop_assume!(deposit_interest(small, rate).unwrap() < INTEREST_FLOOR);

        let mut with_small = amounts.clone();
        with_small.push(small);
        prop_assert_eq!(qualifying_interest(&with_small, rate), qualifying_interest(&amounts, rate));
    }

    /// Moving one deposit from below the floor to above it never lowers interest.
    #[test]
    fn prop_crossing_floor_is_monotonic(
        amounts in prop::collection::vec(movement_amount(), 0..20),
        rate in interest_rate(),
        bump in (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ) {
        // Largest deposit whose interest stays under the floor, and one past it
        let threshold = INTEREST_FLOOR * Decimal::ONE_HUNDRED / rate;
        let below = threshold - Decimal::new(1, 2);
        prop_assume!(below > Decimal::ZERO);
        let above = threshold + bump;

        let mut low = amounts.clone();
        low.push(below);
        let mut high = amounts;
        high.push(above);

        let low_interest = qualifying_interest(&low, rate).unwrap();
        let high_interest = qualifying_interest(&high, rate).unwrap();
        prop_assert!(deposit_interest(above, rate).unwrap() >= INTEREST_FLOOR);
        prop_assert!(high_interest > low_interest);
    }

    /// Qualifying interest never exceeds interest on all deposits.
    #[test]
    fn prop_interest_bounded_by_unfloored_total(
        amounts in prop::collection::vec(movement_amount(), 0..30),
        rate in interest_rate(),
    ) {
        let unfloored: Decimal = amounts
            .iter()
            .filter(|m| **m > Decimal::ZERO)
            .filter_map(|m| deposit_interest(*m, rate))
            .sum();
        prop_assert!(qualifying_interest(&amounts, rate).unwrap() <= unfloored);
    }

    /// Arbitrary magnitudes never panic; a summary either fits or is `None`.
    #[test]
    fn prop_summarize_is_total(
        amounts in prop::collection::vec(any_decimal(), 0..8),
        rate in interest_rate(),
    ) {
        let exact = amounts
            .iter()
            .try_fold(Decimal::ZERO, |total, m| total.checked_add(*m));
        match summarize(&amounts, rate) {
            Some(summary) => {
                prop_assert_eq!(Some(summary.balance), exact);
            }
            None => {
                prop_assert!(
                    exact.is_none()
                        || total_income(&amounts).is_none()
                        || total_outflow_abs(&amounts).is_none()
                        || qualifying_interest(&amounts, rate).is_none(),
                    "summary overflowed without any figure overflowing"
                );
            }
        }
    }
}
