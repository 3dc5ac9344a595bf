//! Simulation configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Simulation configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SEED_FILE` (optional): JSON account list; built-in accounts are used when unset
/// - `WORKERS` (optional): concurrent transfer threads, defaults to 10
/// - `TRANSFERS_PER_WORKER` (optional): transfers issued by each thread, defaults to 20
/// - `TRANSFER_AMOUNT` (optional): amount of every transfer, defaults to 1
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub seed_file: Option<PathBuf>,

    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_transfers_per_worker")]
    pub transfers_per_worker: usize,

    #[serde(default = "default_transfer_amount")]
    pub transfer_amount: Decimal,
}

fn default_workers() -> usize {
    10
}

fn default_transfers_per_worker() -> usize {
    20
}

fn default_transfer_amount() -> Decimal {
    Decimal::ONE
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed into its field type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Same as [`Self::from_env`] without touching the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.seed_file, None);
        assert_eq!(config.workers, 10);
        assert_eq!(config.transfers_per_worker, 20);
        assert_eq!(config.transfer_amount, dec!(1));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("SEED_FILE", "/tmp/accounts.json"),
            ("WORKERS", "4"),
            ("TRANSFERS_PER_WORKER", "100"),
            ("TRANSFER_AMOUNT", "2.50"),
        ]))
        .unwrap();

        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/accounts.json")));
        assert_eq!(config.workers, 4);
        assert_eq!(config.transfers_per_worker, 100);
        assert_eq!(config.transfer_amount, dec!(2.50));
    }

    #[test]
    fn test_invalid_number() {
        assert!(Config::from_vars(vars(&[("WORKERS", "many")])).is_err());
    }
}
