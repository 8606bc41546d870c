//! atm_ledger Library
//!
//! In-memory ATM ledger with an HTTP API for balance inquiry, withdrawal,
//! deposit and transfer.

pub mod api;
pub mod config;
pub mod domain;
pub mod ledger;

mod error;

pub use config::{Config, LogFormat};
pub use domain::{AccountId, AmountError, LedgerError, LedgerResult, Money};
pub use error::{AppError, AppResult, ErrorResponse};
pub use ledger::Ledger;
