//! Data models for the in-memory ledger.

/// Account entity and snapshots
pub mod account;
/// Transfer request
pub mod transfer;
