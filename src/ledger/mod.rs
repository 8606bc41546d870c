//! Ledger
//!
//! Authoritative in-memory store of account balances. Every mutation runs
//! its checks and its writes under one write guard, so a rejected operation
//! changes nothing and a transfer is never observed half-applied.

mod seed;


use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{AccountId, LedgerError, LedgerResult, Money};

pub use seed::default_accounts;

/// Map of account identifier to balance.
///
/// The set of accounts is fixed at construction; balances never go below zero.
#[derive(Debug)]
pub struct Ledger {
    accounts: RwLock<HashMap<AccountId, Money>>,
}

impl Ledger {
    /// Open a ledger with the given accounts and opening balances.
    ///
    /// # Errors
    /// - `LedgerError::NegativeOpeningBalance` if any balance is below zero
    /// - `LedgerError::DuplicateAccount` if an identifier appears twice
    pub fn new<I, K>(accounts: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = (K, Money)>,
        K: Into<AccountId>,
    {
        let mut map = HashMap::new();
        for (id, balance) in accounts {
            let id = id.into();
            if balance.is_negative() {
                return Err(LedgerError::NegativeOpeningBalance {
                    account: id,
                    balance,
                });
            }
            if map.contains_key(&id) {
                return Err(LedgerError::DuplicateAccount(id));
            }
            map.insert(id, balance);
        }

        Ok(Self {
            accounts: RwLock::new(map),
        })
    }

    /// Ledger with the standard ATM accounts
    pub fn with_default_accounts() -> LedgerResult<Self> {
        Self::new(default_accounts())
    }

    /// Current balance of an account
    pub async fn inquire(&self, id: &AccountId) -> LedgerResult<Money> {
        let accounts = self.accounts.read().await;
        balance_of(&accounts, id)
    }

    /// Debit an account, returning the new balance
    pub async fn withdraw(&self, id: &AccountId, amount: Money) -> LedgerResult<Money> {
        ensure_positive(amount)?;

        let mut accounts = self.accounts.write().await;
        let available = balance_of(&accounts, id)?;
        if available < amount {
            return Err(LedgerError::insufficient_funds(amount, available));
        }

        let balance = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::Overflow(id.clone()))?;
        accounts.insert(id.clone(), balance);

        tracing::info!(account = %id, amount = %amount, balance = %balance, "Withdrawal applied");
        Ok(balance)
    }

    /// Credit an account, returning the new balance
    pub async fn deposit(&self, id: &AccountId, amount: Money) -> LedgerResult<Money> {
        ensure_positive(amount)?;

        let mut accounts = self.accounts.write().await;
        let balance = balance_of(&accounts, id)?
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(id.clone()))?;
        accounts.insert(id.clone(), balance);

        tracing::info!(account = %id, amount = %amount, balance = %balance, "Deposit applied");
        Ok(balance)
    }

    /// Move money between two accounts, returning the source's new balance.
    ///
    /// Checks run in order: amount, source exists, destination exists,
    /// distinct accounts, sufficient funds.
    pub async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Money,
    ) -> LedgerResult<Money> {
        ensure_positive(amount)?;

        let mut accounts = self.accounts.write().await;
        let available = balance_of(&accounts, from)?;
        let destination = balance_of(&accounts, to)?;

        if from == to {
            return Err(LedgerError::SameAccount);
        }
        if available < amount {
            return Err(LedgerError::insufficient_funds(amount, available));
        }

        let debited = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::Overflow(from.clone()))?;
        let credited = destination
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.clone()))?;

        accounts.insert(from.clone(), debited);
        accounts.insert(to.clone(), credited);

        tracing::info!(
            from = %from,
            to = %to,
            amount = %amount,
            balance = %debited,
            "Transfer applied"
        );
        Ok(debited)
    }

    /// Account identifiers in sorted order
    pub async fn accounts(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.accounts.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Consistent view of every balance, sorted by account
    pub async fn snapshot(&self) -> Vec<(AccountId, Money)> {
        let mut balances: Vec<(AccountId, Money)> = self
            .accounts
            .read()
            .await
            .iter()
            .map(|(id, balance)| (id.clone(), *balance))
            .collect();
        balances.sort();
        balances
    }

    /// Sum of all balances, or `None` if it does not fit in `Money`
    pub async fn total(&self) -> Option<Money> {
        self.accounts
            .read()
            .await
            .values()
            .try_fold(Money::ZERO, |sum, balance| sum.checked_add(*balance))
    }
}

fn ensure_positive(amount: Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

fn balance_of(accounts: &HashMap<AccountId, Money>, id: &AccountId) -> LedgerResult<Money> {
    accounts
        .get(id)
        .copied()
        .ok_or_else(|| LedgerError::account_not_found(id))
}
