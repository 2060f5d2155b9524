//! Ordered account collection with unique handles.

use bankist_shared::types::AccountId;
use rust_decimal::Decimal;

use super::error::DirectoryError;
use super::model::{Account, NewAccount};

/// Ordered collection of accounts. No two accounts share a handle.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory, deriving every handle exactly once.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DuplicateHandle` if two owners collapse to the
    /// same initials, or `DirectoryError::EmptyOwner` for a blank owner.
    pub fn initialize(accounts: impl IntoIterator<Item = NewAccount>) -> Result<Self, DirectoryError> {
        let mut directory = Self::new();
        for account in accounts {
            directory.insert(account)?;
        }
        Ok(directory)
    }

    /// Opens a new account at the end of the directory.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DuplicateHandle` if the handle is in use.
    pub fn insert(&mut self, input: NewAccount) -> Result<AccountId, DirectoryError> {
        let account = Account::open(input)?;
        if self.find_by_handle(account.handle().as_str()).is_some() {
            return Err(DirectoryError::DuplicateHandle(account.handle().clone()));
        }

        let id = account.id();
        self.accounts.push(account);
        Ok(id)
    }

    /// Looks up an account by handle.
    #[must_use]
    pub fn find_by_handle(&self, handle: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.handle().matches(handle))
    }

    /// Looks up an account by handle for mutation.
    pub fn find_by_handle_mut(&mut self, handle: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.handle().matches(handle))
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn find_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    /// Looks up an account by ID for mutation.
    pub fn find_by_id_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id() == id)
    }

    /// Removes the account with the given handle and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` if no account has the handle.
    pub fn remove_by_handle(&mut self, handle: &str) -> Result<Account, DirectoryError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.handle().matches(handle))
            .ok_or_else(|| DirectoryError::NotFound(handle.trim().to_string()))?;

        Ok(self.accounts.remove(index))
    }

    /// Borrows two distinct accounts mutably at once.
    ///
    /// Returns `None` if either ID is missing or both IDs are the same.
    pub(crate) fn pair_mut(
        &mut self,
        first: AccountId,
        second: AccountId,
    ) -> Option<(&mut Account, &mut Account)> {
        let i = self.accounts.iter().position(|a| a.id() == first)?;
        let j = self.accounts.iter().position(|a| a.id() == second)?;

        if i < j {
            let (left, right) = self.accounts.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else if j < i {
            let (left, right) = self.accounts.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        } else {
            None
        }
    }

    /// Iterates accounts in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the directory holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every account balance, or `None` on overflow.
    #[must_use]
    pub fn total_balance(&self) -> Option<Decimal> {
        self.accounts
            .iter()
            .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance()?))
    }
}
