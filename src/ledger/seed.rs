//! Opening balances loaded at startup

use crate::domain::{AccountId, Money};

/// Accounts the ATM starts with: `0001` = 500, `0002` = 1000, `0003` = 750.
pub fn default_accounts() -> Vec<(AccountId, Money)> {
    [("0001", 50_000), ("0002", 100_000), ("0003", 75_000)]
        .into_iter()
        .map(|(id, minor)| (AccountId::from(id), Money::from_minor(minor)))
        .collect()
}
