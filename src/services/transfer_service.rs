//! Transfer service - Core business logic for moving money between accounts.
//!
//! This service handles:
//! - Account resolution through the store
//! - Amount and same-account validation
//! - Per-account guard acquisition in ascending id order
//! - Balance checks and the debit/credit pair under both guards
//!
//! # Atomicity Guarantees
//!
//! Both guards are held from the balance checks until after the credit, so
//! any other transfer touching either account observes the pair either fully
//! updated or untouched. A rejected transfer never writes a balance.
//!
//! # Deadlock Freedom
//!
//! Guards are always taken lowest id first, whatever the transfer direction.
//! Two transfers A -> B and B -> A therefore contend for the same first guard
//! instead of each holding one and waiting for the other.

use std::sync::{Arc, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use crate::{
    error::{InvalidAmount, InvalidTransfer, TransferError},
    models::{
        account::{Account, AccountId},
        transfer::TransferRequest,
    },
    money::{exact_add, exact_sub},
    store::{AccountStore, InMemoryAccountStore, SharedAccount},
};

/// Orchestrates validated, atomic transfers over an [`AccountStore`].
///
/// The engine holds no account references between calls; each transfer
/// resolves both accounts afresh.
#[derive(Debug)]
pub struct TransferEngine<S = InMemoryAccountStore> {
    store: Arc<S>,
}

impl<S> Clone for TransferEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AccountStore> TransferEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Move `amount` from one account to another.
    ///
    /// # Process
    ///
    /// 1. Resolve source account
    /// 2. Resolve destination account
    /// 3. Check the amount is set and above zero
    /// 4. Reject transfers within one account
    /// 5. Lock both accounts, lowest id first
    /// 6. Reject a negative source balance
    /// 7. Reject a source balance below `amount`
    /// 8. Debit source, credit destination
    ///
    /// Steps 6 and 7 read the balance under the guards, so a concurrent
    /// debit of the source can never be missed.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: either id is unknown (source checked first)
    /// - `InvalidAmount`: amount missing or not positive
    /// - `InvalidTransfer`: same account, negative or insufficient balance,
    ///   a destination balance that would leave the decimal range, or a new
    ///   balance that could only be stored rounded
    pub fn transfer(
        &self,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Option<Decimal>,
    ) -> Result<(), TransferError> {
        let from_account = self.store.get_account_by_id(from_account_id)?;
        let to_account = self.store.get_account_by_id(to_account_id)?;

        let amount = check_amount(amount)?;

        if from_account_id == to_account_id {
            tracing::debug!(account = %from_account_id, "Rejected transfer within same account");
            return Err(InvalidTransfer::SameAccount.into());
        }

        let result = {
            let (mut from, mut to) =
                lock_pair(&from_account, &to_account, from_account_id, to_account_id);
            apply(&mut from, &mut to, amount)
        };

        match &result {
            Ok(()) => tracing::debug!(
                from = %from_account_id,
                to = %to_account_id,
                %amount,
                "Transfer completed"
            ),
            Err(e) => tracing::debug!(
                from = %from_account_id,
                to = %to_account_id,
                %amount,
                error = %e,
                "Transfer rejected"
            ),
        }

        result.map_err(TransferError::from)
    }

    /// Execute a deserialized [`TransferRequest`].
    pub fn submit(&self, request: &TransferRequest) -> Result<(), TransferError> {
        self.transfer(
            request.from_account_id,
            request.to_account_id,
            request.amount,
        )
    }
}

fn check_amount(amount: Option<Decimal>) -> Result<Decimal, InvalidAmount> {
    let amount = amount.ok_or(InvalidAmount::Missing)?;

    if amount <= Decimal::ZERO {
        return Err(InvalidAmount::NotPositive);
    }

    Ok(amount)
}

/// Lock two distinct accounts in ascending id order.
///
/// Guards are returned as `(from, to)` regardless of which was taken first.
/// Callers must have rejected `from_id == to_id` already, and each handle must
/// hold the account with the id it was resolved by.
fn lock_pair<'a>(
    from_account: &'a SharedAccount,
    to_account: &'a SharedAccount,
    from_id: AccountId,
    to_id: AccountId,
) -> (MutexGuard<'a, Account>, MutexGuard<'a, Account>) {
    debug_assert_ne!(from_id, to_id);

    let (from, to) = if from_id < to_id {
        let from = lock(from_account);
        let to = lock(to_account);
        (from, to)
    } else {
        let to = lock(to_account);
        let from = lock(from_account);
        (from, to)
    };

    debug_assert_eq!(from.id(), from_id, "store returned a different source account");
    debug_assert_eq!(to.id(), to_id, "store returned a different destination account");
    (from, to)
}

// Arithmetic under a guard is pre-checked and cannot panic, so a poisoned
// guard still protects a consistent balance.
fn lock(account: &SharedAccount) -> MutexGuard<'_, Account> {
    account.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Balance checks and mutation. Both guards must be held.
fn apply(from: &mut Account, to: &mut Account, amount: Decimal) -> Result<(), InvalidTransfer> {
    if from.balance() < Decimal::ZERO {
        return Err(InvalidTransfer::NegativeBalance);
    }

    if from.balance() < amount {
        return Err(InvalidTransfer::InsufficientBalance);
    }

    if to.balance().checked_add(amount).is_none() {
        return Err(InvalidTransfer::BalanceOverflow);
    }

    // Both halves must be exact or neither is written.
    if exact_sub(from.balance(), amount).is_none() || exact_add(to.balance(), amount).is_none() {
        return Err(InvalidTransfer::PrecisionLoss);
    }

    from.debit(amount);
    to.credit(amount);
    Ok(())
}
