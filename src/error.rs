//! Error types for transfers and store seeding.
//!
//! Every failure is a distinct, inspectable kind. Callers branch on the
//! variant; the message text is fixed per variant and stable.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: the store has no account with the requested id
//! - **Amount Errors**: the amount is missing or not positive
//! - **Transfer Errors**: the transfer violates a business rule
//! - **Seed Errors**: the initial account set could not be loaded

use std::path::PathBuf;

use crate::models::account::AccountId;

/// No account with the given id exists in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Account with id {0} not found")]
pub struct AccountNotFound(pub AccountId);

/// The transfer amount is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAmount {
    /// No amount was supplied.
    #[error("amount should be set")]
    Missing,

    /// The amount is zero or negative.
    #[error("amount must be above zero")]
    NotPositive,
}

/// The transfer breaks a ledger rule.
///
/// None of these leave either balance modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTransfer {
    /// Source and destination are the same account.
    #[error("Transfer within same account is not allowed")]
    SameAccount,

    /// The source account is already overdrawn.
    #[error("User account balance is negative")]
    NegativeBalance,

    /// The source account holds less than the amount.
    #[error("User doesn't have sufficient balance for this transaction")]
    InsufficientBalance,

    /// Crediting the destination would exceed the decimal range.
    #[error("Destination balance would overflow")]
    BalanceOverflow,

    /// A new balance needs more significant digits than a decimal holds.
    #[error("Transfer amount cannot be applied without rounding")]
    PrecisionLoss,
}

/// Error returned by [`TransferEngine::transfer`].
///
/// Display is transparent, so `to_string()` yields the message of the
/// wrapped kind.
///
/// [`TransferEngine::transfer`]: crate::services::transfer_service::TransferEngine::transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    AccountNotFound(#[from] AccountNotFound),

    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmount),

    #[error(transparent)]
    InvalidTransfer(#[from] InvalidTransfer),
}

/// Failure while building the initial account set.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Seed file could not be read.
    #[error("Failed to read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not a valid JSON account list.
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two seed entries share an id.
    #[error("Account with id {0} already exists")]
    DuplicateAccount(AccountId),
}
