//! Account data models.
//!
//! This module defines:
//! - `AccountId`: Stable identifier of an account
//! - `Account`: In-memory entity holding a balance
//! - `AccountView`: Read-only snapshot returned to callers

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier of an account.
///
/// Identifiers are totally ordered. The transfer engine relies on this
/// ordering to acquire account guards in a direction-independent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents an account held by the store.
///
/// # Balance
///
/// Balances are exact decimals, so `190.90 + 10.00` is `200.90` with no
/// floating-point drift.
///
/// A balance may be negative only if the account was created that way.
/// Transfers never push a balance below zero.
///
/// # Synchronization
///
/// `debit` and `credit` perform no validation and no locking. They are only
/// called by the transfer engine while it holds the account's guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account
    id: AccountId,

    /// Current balance
    balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, balance: Decimal) -> Self {
        Self { id, balance }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Subtract `amount` from the balance.
    pub fn debit(&mut self, amount: Decimal) -> &mut Self {
        self.balance -= amount;
        self
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: Decimal) -> &mut Self {
        self.balance += amount;
        self
    }

    /// Take a read-only snapshot of this account.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            balance: self.balance,
        }
    }
}

/// Snapshot of an account at the time it was read.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 100,
///   "balance": "290.00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_and_credit_are_exact() {
        let mut account = Account::new(AccountId(101), dec!(190.90));

        account.credit(dec!(10.6));
        assert_eq!(account.balance(), dec!(201.50));

        account.debit(dec!(0.50));
        assert_eq!(account.balance(), dec!(201.00));
    }

    #[test]
    fn test_debit_can_chain() {
        let mut account = Account::new(AccountId(100), dec!(300));
        account.debit(dec!(100)).debit(dec!(50)).credit(dec!(1));
        assert_eq!(account.balance(), dec!(151));
    }

    #[test]
    fn test_id_displays_as_bare_integer() {
        assert_eq!(AccountId(300).to_string(), "300");
    }

    #[test]
    fn test_view_serializes_balance_as_string() {
        let view = Account::new(AccountId(100), dec!(290.00)).view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 100, "balance": "290.00" }));
    }
}
