//! Movement history as the presentation layer shows it.
//!
//! Sorting is a pure display transform. Amounts and dates stay paired, and
//! the account's own history keeps its chronological order.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::Account;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Positive movement.
    Deposit,
    /// Negative movement.
    Withdrawal,
}

impl MovementKind {
    /// Classifies an amount. Zero counts as a withdrawal.
    #[must_use]
    pub fn of(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Self::Deposit
        } else {
            Self::Withdrawal
        }
    }

    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the movement list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementRow {
    /// 1-based chronological position in the account history.
    pub position: usize,
    /// Deposit or withdrawal.
    pub kind: MovementKind,
    /// Signed amount.
    pub amount: Decimal,
    /// When the movement was recorded.
    pub date: DateTime<Utc>,
}

impl MovementRow {
    /// Label for the row date relative to `now`.
    #[must_use]
    pub fn date_label(&self, now: DateTime<Utc>) -> MovementDateLabel {
        MovementDateLabel::new(self.date, now)
    }
}

/// Builds the movement list, oldest first, or ascending by amount when `sort` is set.
///
/// Equal amounts keep their chronological order.
#[must_use]
pub fn movement_rows(account: &Account, sort: bool) -> Vec<MovementRow> {
    let mut rows: Vec<MovementRow> = account
        .movements()
        .iter()
        .enumerate()
        .map(|(index, movement)| MovementRow {
            position: index + 1,
            kind: MovementKind::of(movement.amount),
            amount: movement.amount,
            date: movement.date,
        })
        .collect();

    if sort {
        rows.sort_by(|a, b| a.amount.cmp(&b.amount));
    }
    rows
}

/// Whole days between two instants, rounded to the nearest day.
#[must_use]
pub fn days_passed(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY / 2) / MILLIS_PER_DAY
}

/// Relative date shown next to a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementDateLabel {
    /// Same day.
    Today,
    /// One day ago.
    Yesterday,
    /// Two to seven days ago.
    DaysAgo(i64),
    /// Older than a week.
    On(NaiveDate),
}

impl MovementDateLabel {
    /// Picks the label for `date` as seen at `now`.
    #[must_use]
    pub fn new(date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match days_passed(date, now) {
            0 => Self::Today,
            1 => Self::Yesterday,
            days @ 2..=7 => Self::DaysAgo(days),
            _ => Self::On(date.date_naive()),
        }
    }
}

impl std::fmt::Display for MovementDateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Yesterday => f.write_str("Yesterday"),
            Self::DaysAgo(days) => write!(f, "{days} days ago"),
            Self::On(date) => write!(f, "{}", date.format("%d/%m/%Y")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use crate::account::{Movement, NewAccount};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn account() -> Account {
        let base = reference();
        let movements = [dec!(200), dec!(-400), dec!(3000), dec!(-400), dec!(70)]
            .into_iter()
            .enumerate()
            .map(|(i, amount)| Movement::new(amount, base + Duration::days(i as i64)));
        Account::open(NewAccount::new("Sarah Smith", 4444, dec!(1)).with_movements(movements))
            .unwrap()
    }

    #[test]
    fn test_rows_in_chronological_order() {
        let rows = movement_rows(&account(), false);
        let positions: Vec<usize> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        assert_eq!(rows[1].kind, MovementKind::Withdrawal);
        assert_eq!(rows[2].kind, MovementKind::Deposit);
    }

    #[test]
    fn test_sorted_rows_keep_dates_paired() {
        let account = account();
        let rows = movement_rows(&account, true);

        let amounts: Vec<Decimal> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec!(-400), dec!(-400), dec!(70), dec!(200), dec!(3000)]);

        // Stable: the earlier -400 stays first
        assert_eq!(rows[0].position, 2);
        assert_eq!(rows[1].position, 4);
        for row in &rows {
            assert_eq!(account.movements()[row.position - 1].date, row.date);
        }
    }

    #[test]
    fn test_sorting_does_not_mutate_account() {
        let account = account();
        let before: Vec<Decimal> = account.amounts().collect();
        let _ = movement_rows(&account, true);
        let after: Vec<Decimal> = account.amounts().collect();
        assert_eq!(before, after);
    }

    #[rstest]
    #[case(Duration::hours(3), 0)]
    #[case(Duration::hours(11), 0)]
    #[case(Duration::hours(13), 1)]
    #[case(Duration::days(1), 1)]
    #[case(Duration::days(5), 5)]
    #[case(-Duration::days(2), 2)]
    fn test_days_passed(#[case] offset: Duration, #[case] expected: i64) {
        let now = reference();
        assert_eq!(days_passed(now - offset, now), expected);
    }

    #[rstest]
    #[case(0, "Today")]
    #[case(1, "Yesterday")]
    #[case(4, "4 days ago")]
    #[case(7, "7 days ago")]
    #[case(8, "02/03/2026")]
    fn test_date_labels(#[case] days: i64, #[case] expected: &str) {
        let now = reference();
        let label = MovementDateLabel::new(now - Duration::days(days), now);
        assert_eq!(label.to_string(), expected);
    }
}
