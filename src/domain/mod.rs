//! Domain module
//!
//! Core domain types shared by the ledger and the HTTP layer.

pub mod account;
pub mod error;
pub mod money;

pub use account::AccountId;
pub use error::{LedgerError, LedgerResult};
pub use money::{AmountError, Money};
