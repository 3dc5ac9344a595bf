//! Business logic services.
//!
//! Services hold the ledger rules and the locking discipline, separate from
//! the account data they operate on.

pub mod transfer_service;
