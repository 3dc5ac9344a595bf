//! Money Transfer - Concurrent Simulation Entry Point
//!
//! Seeds an in-memory ledger, hammers it with concurrent transfers between
//! random accounts, and checks that no money was created or destroyed.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Load seed accounts (file or built-in set)
//! 3. Spawn worker threads issuing transfers
//! 4. Report outcomes and verify conservation

use std::{sync::Arc, thread};

use anyhow::{Context, bail};
use money_transfer::{
    AccountId, InMemoryAccountStore, InvalidTransfer, TransferEngine, TransferError, config, seed,
};
use rand::Rng;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Outcome counts for one worker, merged at the end.
#[derive(Debug, Default)]
struct Tally {
    completed: usize,
    insufficient_balance: usize,
    negative_balance: usize,
    same_account: usize,
    other: usize,
}

impl Tally {
    fn record(&mut self, result: Result<(), TransferError>) {
        match result {
            Ok(()) => self.completed += 1,
            Err(TransferError::InvalidTransfer(InvalidTransfer::InsufficientBalance)) => {
                self.insufficient_balance += 1
            }
            Err(TransferError::InvalidTransfer(InvalidTransfer::NegativeBalance)) => {
                self.negative_balance += 1
            }
            Err(TransferError::InvalidTransfer(InvalidTransfer::SameAccount)) => {
                self.same_account += 1
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unexpected transfer failure");
                self.other += 1
            }
        }
    }

    fn merge(mut self, other: Tally) -> Self {
        self.completed += other.completed;
        self.insufficient_balance += other.insufficient_balance;
        self.negative_balance += other.negative_balance;
        self.same_account += other.same_account;
        self.other += other.other;
        self
    }
}

fn run_worker(
    engine: &TransferEngine,
    ids: &[AccountId],
    transfers: usize,
    amount: Decimal,
) -> Tally {
    let mut rng = rand::rng();
    let mut tally = Tally::default();

    for _ in 0..transfers {
        let from = ids[rng.random_range(0..ids.len())];
        let to = ids[rng.random_range(0..ids.len())];
        tally.record(engine.transfer(from, to, Some(amount)));
    }

    tally
}

fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(
        workers = config.workers,
        transfers_per_worker = config.transfers_per_worker,
        amount = %config.transfer_amount,
        "Configuration loaded"
    );

    let accounts = match &config.seed_file {
        Some(path) => seed::load_accounts(path)?,
        None => seed::default_accounts(),
    };
    let store = Arc::new(InMemoryAccountStore::from_accounts(accounts)?);
    if store.is_empty() {
        bail!("No accounts to transfer between");
    }

    let ids = store.ids();
    let total_before = store
        .total_balance()
        .context("Seed balances do not sum to an exact decimal")?;
    let engine = TransferEngine::new(Arc::clone(&store));

    let tally = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.workers)
            .map(|_| {
                let engine = &engine;
                let ids = &ids;
                scope.spawn(move || {
                    run_worker(engine, ids, config.transfers_per_worker, config.transfer_amount)
                })
            })
            .collect();

        handles.into_iter().try_fold(Tally::default(), |acc, handle| {
            handle
                .join()
                .map(|tally| acc.merge(tally))
                .map_err(|_| anyhow::anyhow!("Transfer worker panicked"))
        })
    })
    .context("Simulation failed")?;

    tracing::info!(
        completed = tally.completed,
        insufficient_balance = tally.insufficient_balance,
        negative_balance = tally.negative_balance,
        same_account = tally.same_account,
        other = tally.other,
        "Simulation finished"
    );

    for view in store.snapshot() {
        tracing::info!(account = %view.id, balance = %view.balance, "Final balance");
    }

    let total_after = store.total_balance();
    if total_after != Some(total_before) {
        bail!("Conservation violated: total was {total_before}, now {total_after:?}");
    }
    tracing::info!(total = %total_before, "Total balance conserved");

    Ok(())
}
