//! Property-based tests for the ledger engine.
//!
//! - Transfers conserve money across the directory
//! - Rejected operations leave every account untouched
//! - Loan eligibility follows the 10% deposit rule

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::service::{LOAN_DEPOSIT_RATIO, LedgerEngine};
use crate::account::{AccountDirectory, Movement, NewAccount};

/// Strategy for signed movement amounts (-5,000.00 to 5,000.00, non-zero).
fn movement_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        (1i64..500_000i64).prop_map(|cents| Decimal::new(-cents, 2)),
    ]
}

/// Strategy for positive request amounts (0.01 to 20,000.00).
fn request_amount() -> impl Strategy<Value = Decimal> {
    (1i64..2_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn new_account(owner: &str, pin: u32, amounts: &[Decimal]) -> NewAccount {
    let now = Utc::now();
    NewAccount::new(owner, pin, Decimal::ONE)
        .with_movements(amounts.iter().map(|&a| Movement::new(a, now)))
}

/// Two accounts, `ab` (PIN 1111) logged in and `cd` (PIN 2222).
fn engine_with(sender: &[Decimal], receiver: &[Decimal]) -> LedgerEngine {
    let directory = AccountDirectory::initialize([
        new_account("Alice Brown", 1111, sender),
        new_account("Carl Dunn", 2222, receiver),
    ])
    .unwrap();
    let mut engine = LedgerEngine::new(directory);
    engine.authenticate("ab", "1111").unwrap();
    engine
}

fn balance(engine: &LedgerEngine, handle: &str) -> Decimal {
    engine
        .directory()
        .find_by_handle(handle)
        .and_then(|a| a.balance())
        .unwrap()
}

fn snapshot(engine: &LedgerEngine) -> Vec<Vec<Movement>> {
    engine
        .directory()
        .iter()
        .map(|a| a.movements().to_vec())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An accepted transfer moves exactly the amount and the total stays put.
    #[test]
    fn prop_transfer_conserves_money(
        sender in prop::collection::vec(movement_amount(), 0..15),
        receiver in prop::collection::vec(movement_amount(), 0..15),
        amount in request_amount(),
    ) {
        let mut engine = engine_with(&sender, &receiver);
        let total = engine.directory().total_balance();
        let sender_before = balance(&engine, "ab");
        let receiver_before = balance(&engine, "cd");

        let result = engine.transfer(&amount.to_string(), "cd");

        let sender_after = balance(&engine, "ab");
        let receiver_after = balance(&engine, "cd");
        prop_assert_eq!(engine.directory().total_balance(), total);

        if amount <= sender_before {
            let receipt = result.unwrap();
            prop_assert_eq!(receipt.sender_balance, sender_after);
            prop_assert_eq!(sender_after, sender_before - amount);
            prop_assert_eq!(receiver_after, receiver_before + amount);
        } else {
            prop_assert!(
                matches!(result, Err(LedgerError::InsufficientFunds { .. })),
                "Overdraft should be rejected, got: {:?}",
                result
            );
            prop_assert_eq!(sender_after, sender_before);
            prop_assert_eq!(receiver_after, receiver_before);
        }
    }

    /// Any rejected transfer leaves every movement list unchanged.
    #[test]
    fn prop_rejected_transfer_is_atomic(
        sender in prop::collection::vec(movement_amount(), 0..15),
        receiver in prop::collection::vec(movement_amount(), 0..15),
        amount in request_amount(),
        target in prop_oneof![Just("ab"), Just("zz"), Just("")],
    ) {
        let mut engine = engine_with(&sender, &receiver);
        let before = snapshot(&engine);

        prop_assert!(engine.transfer(&amount.to_string(), target).is_err());
        prop_assert_eq!(snapshot(&engine), before);
    }

    /// Non-positive amounts never pass validation.
    #[test]
    fn prop_non_positive_amount_rejected(
        sender in prop::collection::vec(movement_amount(), 0..15),
        cents in 0i64..1_000_000i64,
    ) {
        let mut engine = engine_with(&sender, &[]);
        let before = snapshot(&engine);
        let amount = Decimal::new(-cents, 2).to_string();

        let transfer = engine.transfer(&amount, "cd");
        prop_assert!(
            matches!(transfer, Err(LedgerError::Validation(_))),
            "Transfer of {} should fail validation, got: {:?}",
            amount,
            transfer
        );
        let loan = engine.request_loan(&amount);
        prop_assert!(
            matches!(loan, Err(LedgerError::Validation(_))),
            "Loan of {} should fail validation, got: {:?}",
            amount,
            loan
        );
        prop_assert_eq!(snapshot(&engine), before);
    }

    /// A loan is approved exactly when some movement reaches 10% of it.
    #[test]
    fn prop_loan_follows_deposit_rule(
        movements in prop::collection::vec(movement_amount(), 0..15),
        amount in request_amount(),
    ) {
        let mut engine = engine_with(&movements, &[]);
        let before = snapshot(&engine);
        let eligible = movements.iter().any(|&m| m >= amount * LOAN_DEPOSIT_RATIO);

        match engine.request_loan(&amount.to_string()) {
            Ok(approval) => {
                prop_assert!(eligible, "Loan of {} approved without a backing deposit", amount);
                prop_assert_eq!(snapshot(&engine), before);

                let credit = engine.apply_loan(&approval).unwrap();
                let account = engine.directory().find_by_handle("ab").unwrap();
                prop_assert_eq!(account.movements().len(), movements.len() + 1);
                prop_assert_eq!(Some(credit.balance), account.balance());
            }
            Err(err) => {
                prop_assert!(!eligible, "Eligible loan of {} rejected: {:?}", amount, err);
                prop_assert!(
                    matches!(err, LedgerError::LoanEligibility { .. }),
                    "Expected LoanEligibility, got: {:?}",
                    err
                );
                prop_assert_eq!(snapshot(&engine), before);
            }
        }
    }

    /// Amounts and dates stay paired through any sequence of operations.
    #[test]
    fn prop_operations_keep_history_ordered(
        amounts in prop::collection::vec(request_amount(), 1..10),
    ) {
        let mut engine = engine_with(&[Decimal::new(10_000, 0)], &[Decimal::new(10_000, 0)]);

        for amount in &amounts {
            let _ = engine.transfer(&amount.to_string(), "cd");
            if let Ok(approval) = engine.request_loan(&amount.to_string()) {
                engine.apply_loan(&approval).unwrap();
            }
        }

        for account in engine.directory().iter() {
            let dates: Vec<_> = account.dates().collect();
            prop_assert_eq!(dates.len(), account.amounts().count());
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
