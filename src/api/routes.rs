//! API Routes
//!
//! HTTP endpoint definitions.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Money};
use crate::error::AppResult;
use crate::ledger::Ledger;

use super::payload::Payload;

/// Ledger shared by every request
pub type SharedLedger = Arc<Ledger>;

// =========================================================================
// Request/Response types
// =========================================================================

/// Body of withdraw and deposit requests
#[derive(Debug, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
}

/// Body of transfer requests
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "ToAccount", alias = "to_account")]
    pub to_account: String,
    #[serde(rename = "Amount", alias = "amount")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub message: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl OperationResponse {
    fn new(message: &'static str, balance: Money) -> Self {
        Self {
            message,
            balance: balance.to_decimal(),
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<SharedLedger> {
    Router::new()
        .route("/accounts/:account", get(get_balance))
        .route("/accounts/:account/withdraw", post(withdraw))
        .route("/accounts/:account/deposit", post(deposit))
        .route("/accounts/:account/transfer", post(transfer))
}

// =========================================================================
// GET /accounts/:account
// =========================================================================

async fn get_balance(
    State(ledger): State<SharedLedger>,
    Path(account): Path<String>,
) -> AppResult<Json<BalanceResponse>> {
    let balance = ledger.inquire(&AccountId::from(account)).await?;

    Ok(Json(BalanceResponse {
        balance: balance.to_decimal(),
    }))
}

// =========================================================================
// POST /accounts/:account/withdraw
// =========================================================================

async fn withdraw(
    State(ledger): State<SharedLedger>,
    Path(account): Path<String>,
    Payload(request): Payload<AmountRequest>,
) -> AppResult<Json<OperationResponse>> {
    let amount = Money::from_decimal(request.amount)?;
    let balance = ledger.withdraw(&AccountId::from(account), amount).await?;

    Ok(Json(OperationResponse::new("Withdrawal successful", balance)))
}

// =========================================================================
// POST /accounts/:account/deposit
// =========================================================================

async fn deposit(
    State(ledger): State<SharedLedger>,
    Path(account): Path<String>,
    Payload(request): Payload<AmountRequest>,
) -> AppResult<Json<OperationResponse>> {
    let amount = Money::from_decimal(request.amount)?;
    let balance = ledger.deposit(&AccountId::from(account), amount).await?;

    Ok(Json(OperationResponse::new("Deposit successful", balance)))
}

// =========================================================================
// POST /accounts/:account/transfer
// =========================================================================

async fn transfer(
    State(ledger): State<SharedLedger>,
    Path(account): Path<String>,
    Payload(request): Payload<TransferRequest>,
) -> AppResult<Json<OperationResponse>> {
    let amount = Money::from_decimal(request.amount)?;
    let from = AccountId::from(account);
    let to = AccountId::from(request.to_account);

    let balance = ledger.transfer(&from, &to, amount).await?;

    Ok(Json(OperationResponse::new("Transfer successful", balance)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_request_deserialize() {
        let json = r#"{"ToAccount": "0002", "Amount": 100.5}"#;

        let request: TransferRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.to_account, "0002");
        assert_eq!(request.amount, dec!(100.5));
    }

    #[test]
    fn test_transfer_request_snake_case_alias() {
        let json = r#"{"to_account": "0003", "amount": "20"}"#;

        let request: TransferRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.to_account, "0003");
        assert_eq!(request.amount, dec!(20));
    }

    #[test]
    fn test_operation_response_renders_number() {
        let response = OperationResponse::new("Deposit successful", Money::from_minor(105_050));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["message"], "Deposit successful");
        assert_eq!(json["balance"], 1050.5);
    }
}
