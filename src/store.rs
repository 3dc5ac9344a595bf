//! In-memory account store.
//!
//! The store owns every account. Each account lives behind its own
//! `Mutex`, which is the guard the transfer engine takes before touching a
//! balance. The map itself only needs to be safe for concurrent lookups, so
//! it is a sharded `DashMap`: reads of different keys never contend and reads
//! of the same key share a read lock.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::{DashMap, mapref::entry::Entry};
use rust_decimal::Decimal;

use crate::{
    error::{AccountNotFound, SeedError},
    models::account::{Account, AccountId, AccountView},
    money::exact_add,
};

/// Shared handle to one account and its guard.
pub type SharedAccount = Arc<Mutex<Account>>;

/// Lookup contract the transfer engine needs from a store.
pub trait AccountStore: Send + Sync {
    /// Fetch the shared handle for `id`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` when no account has that id.
    fn get_account_by_id(&self, id: AccountId) -> Result<SharedAccount, AccountNotFound>;

    /// Read the current state of `id` under its guard.
    fn account_view(&self, id: AccountId) -> Result<AccountView, AccountNotFound> {
        let account = self.get_account_by_id(id)?;
        let guard = account.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.view())
    }
}

/// `DashMap`-backed account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, SharedAccount>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an initial account set.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::DuplicateAccount` if two accounts share an id.
    pub fn from_accounts<I>(accounts: I) -> Result<Self, SeedError>
    where
        I: IntoIterator<Item = Account>,
    {
        let store = Self::new();
        for account in accounts {
            store.insert(account)?;
        }
        tracing::info!(accounts = store.len(), "Account store seeded");
        Ok(store)
    }

    /// Add an account. Existing accounts are never replaced.
    pub fn insert(&self, account: Account) -> Result<(), SeedError> {
        match self.accounts.entry(account.id()) {
            Entry::Occupied(_) => Err(SeedError::DuplicateAccount(account.id())),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All account ids in ascending order.
    pub fn ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.accounts.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Views of every account, ascending by id.
    ///
    /// Each account is read under its own guard, one at a time. The result is
    /// a consistent ledger state only while no transfer is in flight.
    pub fn snapshot(&self) -> Vec<AccountView> {
        let handles: Vec<SharedAccount> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut views: Vec<AccountView> = handles
            .iter()
            .map(|account| {
                account
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .view()
            })
            .collect();
        views.sort_unstable_by_key(|view| view.id);
        views
    }

    /// Sum of all balances. Same consistency caveat as [`Self::snapshot`].
    ///
    /// Returns `None` when the sum leaves the decimal range or could only be
    /// represented rounded.
    pub fn total_balance(&self) -> Option<Decimal> {
        self.snapshot()
            .iter()
            .try_fold(Decimal::ZERO, |total, view| exact_add(total, view.balance))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get_account_by_id(&self, id: AccountId) -> Result<SharedAccount, AccountNotFound> {
        self.accounts
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(AccountNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn store() -> InMemoryAccountStore {
        InMemoryAccountStore::from_accounts([
            Account::new(AccountId(101), dec!(190.90)),
            Account::new(AccountId(100), dec!(300)),
            Account::new(AccountId(103), dec!(-99)),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_account_by_id() {
        let store = store();
        let account = store.get_account_by_id(AccountId(101)).unwrap();
        assert_eq!(account.lock().unwrap().balance(), dec!(190.90));
    }

    #[test]
    fn test_missing_account() {
        let err = store().get_account_by_id(AccountId(300)).unwrap_err();
        assert_eq!(err, AccountNotFound(AccountId(300)));
        assert_eq!(err.to_string(), "Account with id 300 not found");
    }

    #[test]
    fn test_lookups_share_the_same_account() {
        let store = store();
        let first = store.get_account_by_id(AccountId(100)).unwrap();
        let second = store.get_account_by_id(AccountId(100)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        first.lock().unwrap().credit(dec!(1));
        assert_eq!(
            store.account_view(AccountId(100)).unwrap().balance,
            dec!(301)
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = InMemoryAccountStore::from_accounts([
            Account::new(AccountId(100), dec!(1)),
            Account::new(AccountId(100), dec!(2)),
        ])
        .unwrap_err();
        assert!(matches!(err, SeedError::DuplicateAccount(AccountId(100))));
    }

    #[test]
    fn test_insert_does_not_replace() {
        let store = store();
        assert!(store.insert(Account::new(AccountId(100), dec!(0))).is_err());
        assert_eq!(
            store.account_view(AccountId(100)).unwrap().balance,
            dec!(300)
        );
    }

    #[test]
    fn test_ids_and_snapshot_are_sorted() {
        let store = store();
        assert_eq!(store.ids(), vec![AccountId(100), AccountId(101), AccountId(103)]);

        let ids: Vec<AccountId> = store.snapshot().into_iter().map(|view| view.id).collect();
        assert_eq!(ids, store.ids());
    }

    #[test]
    fn test_total_balance() {
        assert_eq!(store().total_balance(), Some(dec!(391.90)));
        assert!(InMemoryAccountStore::new().is_empty());
        assert_eq!(InMemoryAccountStore::new().total_balance(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_total_balance_out_of_range() {
        let store = InMemoryAccountStore::from_accounts([
            Account::new(AccountId(1), Decimal::MAX),
            Account::new(AccountId(2), Decimal::MAX),
        ])
        .unwrap();
        assert_eq!(store.total_balance(), None);
    }

    #[test]
    fn test_total_balance_not_rounded() {
        let store = InMemoryAccountStore::from_accounts([
            Account::new(AccountId(1), dec!(1000000000000000000000000000)),
            Account::new(AccountId(2), dec!(0.0000000001)),
        ])
        .unwrap();
        assert_eq!(store.total_balance(), None);
    }
}
