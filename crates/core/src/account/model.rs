//! The account record and its movement history.

use bankist_shared::types::{AccountId, Currency, Locale};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DirectoryError;
use super::handle::{Handle, derive_handle};
use crate::ledger::checked_sum;

/// A single signed transaction on an account.
///
/// Deposits are positive, withdrawals negative. Amount and date live in one
/// record so the history can never hold an amount without its timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    /// Signed amount.
    pub amount: Decimal,
    /// When the movement was recorded.
    pub date: DateTime<Utc>,
}

impl Movement {
    /// Creates a movement.
    #[must_use]
    pub const fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    /// Returns true for deposits.
    #[must_use]
    pub fn is_deposit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Input for opening an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Owner display name.
    pub owner: String,
    /// Numeric PIN.
    pub pin: u32,
    /// Interest rate in percent.
    pub interest_rate: Decimal,
    /// Display currency.
    pub currency: Currency,
    /// Display locale.
    pub locale: Locale,
    /// Opening history, oldest first.
    pub movements: Vec<Movement>,
}

impl NewAccount {
    /// Creates an input with no history, in the default currency and locale.
    #[must_use]
    pub fn new(owner: impl Into<String>, pin: u32, interest_rate: Decimal) -> Self {
        Self {
            owner: owner.into(),
            pin,
            interest_rate,
            currency: Currency::default(),
            locale: Locale::default(),
            movements: Vec::new(),
        }
    }

    /// Sets the display currency and locale.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency, locale: impl Into<Locale>) -> Self {
        self.currency = currency;
        self.locale = locale.into();
        self
    }

    /// Sets the opening history.
    #[must_use]
    pub fn with_movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements = movements.into_iter().collect();
        self
    }
}

/// A bank account.
///
/// The handle is derived once when the account is opened. Movements are
/// append-only and the balance is always recomputed from them.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: AccountId,
    owner: String,
    handle: Handle,
    #[serde(skip)]
    pin: u32,
    movements: Vec<Movement>,
    interest_rate: Decimal,
    currency: Currency,
    locale: Locale,
}

impl Account {
    /// Opens an account, deriving its handle from the owner name.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::EmptyOwner` if the owner has no initials.
    pub fn open(input: NewAccount) -> Result<Self, DirectoryError> {
        let handle = derive_handle(&input.owner);
        if handle.is_empty() {
            return Err(DirectoryError::EmptyOwner);
        }

        Ok(Self {
            id: AccountId::new(),
            owner: input.owner,
            handle,
            pin: input.pin,
            movements: input.movements,
            interest_rate: input.interest_rate,
            currency: input.currency,
            locale: input.locale,
        })
    }

    /// Returns the account ID.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the owner display name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the first word of the owner name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or_default()
    }

    /// Returns the login handle.
    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Returns true if `pin` equals the stored PIN.
    #[must_use]
    pub const fn pin_matches(&self, pin: u32) -> bool {
        self.pin == pin
    }

    /// Returns the movement history, oldest first.
    #[must_use]
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Returns the movement amounts, oldest first.
    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.movements.iter().map(|m| m.amount)
    }

    /// Returns the movement dates, index-aligned with `amounts`.
    pub fn dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|m| m.date)
    }

    /// Returns the interest rate in percent.
    #[must_use]
    pub const fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Returns the display currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the display locale.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Sum of all movements, or `None` if it does not fit a `Decimal`.
    #[must_use]
    pub fn balance(&self) -> Option<Decimal> {
        checked_sum(self.amounts())
    }

    /// Appends a movement.
    pub(crate) fn record(&mut self, amount: Decimal, at: DateTime<Utc>) {
        self.movements.push(Movement::new(amount, at));
    }
}
