//! Demo accounts the application starts with.

use bankist_shared::types::Currency;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::account::{AccountDirectory, DirectoryError, Movement, NewAccount};

struct DemoAccount {
    owner: &'static str,
    pin: u32,
    interest_rate: Decimal,
    currency: Currency,
    locale: &'static str,
    movements: &'static [i64],
}

const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        owner: "Jonas Schmedtmann",
        pin: 1111,
        interest_rate: Decimal::from_parts(12, 0, 0, false, 1), // 1.2
        currency: Currency::Eur,
        locale: "pt-PT",
        movements: &[200, 450, -400, 3000, -650, -130, 70, 1300],
    },
    DemoAccount {
        owner: "Jessica Davis",
        pin: 2222,
        interest_rate: Decimal::from_parts(15, 0, 0, false, 1), // 1.5
        currency: Currency::Usd,
        locale: "en-US",
        movements: &[5000, 3400, -150, -790, -3210, -1000, 8500, -30],
    },
    DemoAccount {
        owner: "Steven Thomas Williams",
        pin: 3333,
        interest_rate: Decimal::from_parts(7, 0, 0, false, 1), // 0.7
        currency: Currency::Gbp,
        locale: "en-GB",
        movements: &[200, -200, 340, -300, -20, 50, 400, -460],
    },
    DemoAccount {
        owner: "Sarah Smith",
        pin: 4444,
        interest_rate: Decimal::ONE,
        currency: Currency::Usd,
        locale: "en-US",
        movements: &[430, 1000, 700, 50, 90],
    },
];

/// The demo accounts, with the newest movement of each dated at `reference`
/// and every earlier one a day before the next.
#[must_use]
pub fn demo_accounts(reference: DateTime<Utc>) -> Vec<NewAccount> {
    DEMO_ACCOUNTS
        .iter()
        .map(|demo| {
            let newest = demo.movements.len();
            let movements = demo.movements.iter().enumerate().map(|(index, &amount)| {
                let days_back = i64::try_from(newest - 1 - index).unwrap_or(i64::MAX);
                Movement::new(Decimal::from(amount), reference - Duration::days(days_back))
            });

            NewAccount::new(demo.owner, demo.pin, demo.interest_rate)
                .with_currency(demo.currency, demo.locale)
                .with_movements(movements)
        })
        .collect()
}

/// A directory holding the demo accounts.
///
/// # Errors
///
/// Returns `DirectoryError` if the demo accounts collide, which they do not.
pub fn demo_directory(reference: DateTime<Utc>) -> Result<AccountDirectory, DirectoryError> {
    AccountDirectory::initialize(demo_accounts(reference))
}
