//! Ledger Error Types
//!
//! Pure domain errors that don't depend on the HTTP layer.

use thiserror::Error;

use super::{AccountId, Money};

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Reasons a ledger operation is rejected.
///
/// A rejected operation never changes any balance. The display text is the
/// message shown to ATM clients; `details` carries the specifics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Operation amount is zero or negative
    #[error("Amount must be greater than zero")]
    InvalidAmount(Money),

    /// Identifier is not in the ledger
    #[error("Account not found")]
    AccountNotFound(AccountId),

    /// Debit exceeds the available balance
    #[error("Insufficient balance")]
    InsufficientFunds { required: Money, available: Money },

    /// Transfer source and destination are the same account
    #[error("Cannot transfer to the same account")]
    SameAccount,

    /// Resulting balance is not representable
    #[error("Amount is too large")]
    Overflow(AccountId),

    /// Seed data tried to open an account below zero
    #[error("Opening balance for account {account} is negative: {balance}")]
    NegativeOpeningBalance { account: AccountId, balance: Money },

    /// Seed data listed the same account twice
    #[error("Account {0} is listed more than once")]
    DuplicateAccount(AccountId),
}

impl LedgerError {
    pub fn insufficient_funds(required: Money, available: Money) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    pub fn account_not_found(id: &AccountId) -> Self {
        Self::AccountNotFound(id.clone())
    }

    /// Specifics of the rejection, kept out of the client-facing message
    pub fn details(&self) -> Option<String> {
        match self {
            Self::InvalidAmount(amount) => Some(format!("got {}", amount)),
            Self::AccountNotFound(id) | Self::Overflow(id) => Some(id.to_string()),
            Self::InsufficientFunds {
                required,
                available,
            } => Some(format!("required {}, available {}", required, available)),
            Self::SameAccount
            | Self::NegativeOpeningBalance { .. }
            | Self::DuplicateAccount(_) => None,
        }
    }
}
