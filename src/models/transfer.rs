//! Transfer request model.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::account::AccountId;

/// Request to move money between two accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "from_account_id": 100,
///   "to_account_id": 101,
///   "amount": "10.00"
/// }
/// ```
///
/// A request without `amount` still deserializes. The engine rejects it with
/// `amount should be set` once both accounts have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferRequest {
    /// Account to transfer from (will decrease)
    pub from_account_id: AccountId,

    /// Account to transfer to (will increase)
    pub to_account_id: AccountId,

    /// Amount to transfer
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl TransferRequest {
    pub fn new(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }
}
