//! Initial account sets.
//!
//! A seed file is a JSON array of accounts. Balances are strings so their
//! scale survives parsing:
//!
//! ```json
//! [
//!   { "id": 100, "balance": "300.00" },
//!   { "id": 103, "balance": "-99" }
//! ]
//! ```

use std::path::Path;

use rust_decimal::Decimal;

use crate::{
    error::SeedError,
    models::account::{Account, AccountId},
};

/// Read accounts from a JSON seed file.
///
/// # Errors
///
/// - `Io`: the file cannot be read
/// - `Parse`: the content is not a JSON account list
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_accounts(&content)
}

/// Parse accounts from JSON seed content.
pub fn parse_accounts(content: &str) -> Result<Vec<Account>, SeedError> {
    Ok(serde_json::from_str(content)?)
}

/// Reference account set used when no seed file is configured.
///
/// Includes one already-overdrawn account.
pub fn default_accounts() -> Vec<Account> {
    vec![
        Account::new(AccountId(100), Decimal::new(300, 0)),
        Account::new(AccountId(101), Decimal::new(19090, 2)),
        Account::new(AccountId(102), Decimal::new(34053, 2)),
        Account::new(AccountId(103), Decimal::new(-99, 0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_accounts() {
        let accounts =
            parse_accounts(r#"[{ "id": 100, "balance": "300.00" }, { "id": 103, "balance": "-99" }]"#)
                .unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id(), AccountId(100));
        assert_eq!(accounts[0].balance(), dec!(300.00));
        assert_eq!(accounts[1].balance(), dec!(-99));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_accounts(r#"{ "id": 100 }"#),
            Err(SeedError::Parse(_))
        ));
    }

    #[test]
    fn test_load_accounts_from_file() {
        let path = std::env::temp_dir().join(format!("money_transfer_seed_{}.json", std::process::id()));
        std::fs::write(&path, r#"[{ "id": 7, "balance": "1.25" }]"#).unwrap();

        let accounts = load_accounts(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(accounts, vec![Account::new(AccountId(7), dec!(1.25))]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_accounts(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn test_default_accounts() {
        let total: Decimal = default_accounts().iter().map(Account::balance).sum();
        assert_eq!(total, dec!(732.43));
    }
}
