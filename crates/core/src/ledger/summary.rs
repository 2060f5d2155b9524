//! Account summary calculations.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;
use crate::account::Account;

/// Interest earned on a single deposit only counts from this amount up.
pub const INTEREST_FLOOR: Decimal = Decimal::ONE;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Read-only figures shown alongside the movement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Sum of all movements.
    pub balance: Decimal,
    /// Sum of deposits.
    pub total_income: Decimal,
    /// Absolute value of the sum of withdrawals.
    pub total_outflow_abs: Decimal,
    /// Interest over deposits, counting only per-deposit amounts at or above the floor.
    pub qualifying_interest: Decimal,
}

/// Computes the summary for an account.
///
/// # Errors
///
/// Returns `LedgerError::Overflow` if a figure does not fit a `Decimal`.
pub fn compute_summary(account: &Account) -> Result<AccountSummary, LedgerError> {
    let amounts: Vec<Decimal> = account.amounts().collect();
    summarize(&amounts, account.interest_rate()).ok_or(LedgerError::Overflow(account.id()))
}

/// Summary of `amounts` after appending `amount`, without touching the account.
///
/// `None` means recording the movement would push a figure out of range.
pub(crate) fn summary_after(account: &Account, amount: Decimal) -> Option<AccountSummary> {
    let amounts: Vec<Decimal> = account.amounts().chain(std::iter::once(amount)).collect();
    summarize(&amounts, account.interest_rate())
}

/// All four figures over raw amounts, or `None` on overflow.
#[must_use]
pub fn summarize(amounts: &[Decimal], rate: Decimal) -> Option<AccountSummary> {
    Some(AccountSummary {
        balance: checked_sum(amounts.iter().copied())?,
        total_income: total_income(amounts)?,
        total_outflow_abs: total_outflow_abs(amounts)?,
        qualifying_interest: qualifying_interest(amounts, rate)?,
    })
}

/// Sum that stops at the first overflow.
#[must_use]
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Sum of positive movements.
#[must_use]
pub fn total_income(amounts: &[Decimal]) -> Option<Decimal> {
    checked_sum(amounts.iter().copied().filter(|m| *m > Decimal::ZERO))
}

/// Absolute value of the sum of negative movements.
#[must_use]
pub fn total_outflow_abs(amounts: &[Decimal]) -> Option<Decimal> {
    checked_sum(amounts.iter().copied().filter(|m| *m < Decimal::ZERO)).map(|sum| sum.abs())
}

/// Interest of a single deposit at `rate` percent.
#[must_use]
pub fn deposit_interest(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate)?.checked_div(PERCENT)
}

/// Sum of per-deposit interest, dropping each amount below `INTEREST_FLOOR`.
#[must_use]
pub fn qualifying_interest(amounts: &[Decimal], rate: Decimal) -> Option<Decimal> {
    amounts
        .iter()
        .filter(|m| **m > Decimal::ZERO)
        .try_fold(Decimal::ZERO, |total, m| {
            let interest = deposit_interest(*m, rate)?;
            if interest >= INTEREST_FLOOR {
                total.checked_add(interest)
            } else {
                Some(total)
            }
        })
}
