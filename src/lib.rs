//! In-memory money transfer ledger.
//!
//! Moves funds between accounts held in memory, enforcing validation rules
//! and keeping balances consistent under concurrent transfers.
//!
//! # Architecture
//!
//! - **Accounts**: plain values with unsynchronized `debit`/`credit`
//! - **Store**: `DashMap` of per-account `Mutex` guards
//! - **Engine**: validation pipeline plus ordered two-guard locking
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use money_transfer::{Account, AccountId, AccountStore, InMemoryAccountStore, TransferEngine};
//! use rust_decimal::Decimal;
//!
//! let store = InMemoryAccountStore::from_accounts([
//!     Account::new(AccountId(100), Decimal::new(30000, 2)),
//!     Account::new(AccountId(101), Decimal::new(19090, 2)),
//! ])
//! .unwrap();
//! let engine = TransferEngine::new(Arc::new(store));
//!
//! engine
//!     .transfer(AccountId(100), AccountId(101), Some(Decimal::new(1000, 2)))
//!     .unwrap();
//!
//! let to = engine.store().account_view(AccountId(101)).unwrap();
//! assert_eq!(to.balance, Decimal::new(20090, 2));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod seed;
pub mod services;
pub mod store;

pub use error::{AccountNotFound, InvalidAmount, InvalidTransfer, SeedError, TransferError};
pub use models::{
    account::{Account, AccountId, AccountView},
    transfer::TransferRequest,
};
pub use services::transfer_service::TransferEngine;
pub use store::{AccountStore, InMemoryAccountStore, SharedAccount};
