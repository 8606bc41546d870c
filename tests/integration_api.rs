//! API Integration Tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;

use atm_ledger::{api, AccountId, Ledger, Money};

mod common;

use common::{get, post_form, post_json, send, setup_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_balance() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, get("/v1/accounts/0001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "balance": 500.0 }));
}

#[tokio::test]
async fn test_get_balance_unknown_account() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, get("/v1/accounts/0009")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "account_not_found");
    assert_eq!(json["details"], "0009");
}

#[tokio::test]
async fn test_atm_scenario() {
    let (app, ledger) = setup_app();

    // 1. Withdraw 100 from 0001
    let (status, json) = send(&app, post_form("/v1/accounts/0001/withdraw", "amount=100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Withdrawal successful");
    assert_eq!(json["balance"], 400.0);

    // 2. Deposit 50 into 0002
    let (status, json) = send(&app, post_form("/v1/accounts/0002/deposit", "amount=50")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Deposit successful");
    assert_eq!(json["balance"], 1050.0);

    // 3. Transfer more than the balance
    let (status, json) = send(
        &app,
        post_json(
            "/v1/accounts/0001/transfer",
            json!({ "ToAccount": "0002", "Amount": 2000 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error_code"], "insufficient_balance");

    // 4. Transfer to an unknown account
    let (status, json) = send(
        &app,
        post_json(
            "/v1/accounts/0001/transfer",
            json!({ "ToAccount": "0003", "Amount": 100 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["details"], "0003");

    // 5. Balances unchanged by the rejected transfers
    assert_eq!(
        ledger.snapshot().await,
        vec![
            (AccountId::from("0001"), Money::from_minor(40_000)),
            (AccountId::from("0002"), Money::from_minor(105_000)),
        ]
    );
}

#[tokio::test]
async fn test_transfer_success() {
    let (app, _) = setup_app();

    let (status, json) = send(
        &app,
        post_json(
            "/v1/accounts/0002/transfer",
            json!({ "ToAccount": "0001", "Amount": "250.75" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Transfer successful");
    assert_eq!(json["balance"], 749.25);

    let (_, json) = send(&app, get("/v1/accounts/0001")).await;
    assert_eq!(json["balance"], 750.75);
}

#[tokio::test]
async fn test_transfer_form_body() {
    let (app, _) = setup_app();

    let (status, json) = send(
        &app,
        post_form("/v1/accounts/0001/transfer", "ToAccount=0002&Amount=10"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balance"], 490.0);
}

#[tokio::test]
async fn test_self_transfer_rejected() {
    let (app, ledger) = setup_app();

    let (status, json) = send(
        &app,
        post_json(
            "/v1/accounts/0001/transfer",
            json!({ "ToAccount": "0001", "Amount": 10 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "same_account_transfer");
    assert_eq!(
        ledger.inquire(&AccountId::from("0001")).await,
        Ok(Money::from_minor(50_000))
    );
}

#[tokio::test]
async fn test_invalid_amounts() {
    let (app, _) = setup_app();

    for body in ["amount=0", "amount=-5", "amount=1.005"] {
        let (status, json) = send(&app, post_form("/v1/accounts/0001/withdraw", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error_code"], "invalid_amount");
    }

    let (status, _) = send(
        &app,
        post_json("/v1/accounts/0001/deposit", json!({ "amount": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_requests() {
    let (app, ledger) = setup_app();
    let before = ledger.snapshot().await;

    let (status, json) = send(&app, post_form("/v1/accounts/0001/withdraw", "amount=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "malformed_request");

    let (status, _) = send(&app, post_form("/v1/accounts/0001/deposit", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json("/v1/accounts/0001/transfer", json!({ "Amount": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(ledger.snapshot().await, before);
}

#[tokio::test]
async fn test_withdraw_insufficient_and_unknown() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, post_form("/v1/accounts/0001/withdraw", "amount=500.01")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error_code"], "insufficient_balance");

    let (status, _) = send(&app, post_form("/v1/accounts/0007/deposit", "amount=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_correlation_id_echoed() {
    let (app, _) = setup_app();
    let id = uuid::Uuid::new_v4().to_string();

    let mut request = get("/v1/accounts/0001");
    request
        .headers_mut()
        .insert("x-correlation-id", id.parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-correlation-id").unwrap().to_str().unwrap(),
        id
    );
}

#[tokio::test]
async fn test_empty_form_body_falls_back_to_query() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, post_form("/v1/accounts/0001/withdraw?amount=100", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balance"], 400.0);
}

#[tokio::test]
async fn test_non_form_content_type_decoded_as_form() {
    let (app, _) = setup_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/accounts/0001/withdraw")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("amount=1"))
        .unwrap();

    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balance"], 499.0);
}

#[tokio::test]
async fn test_error_messages_use_atm_wording() {
    let (app, _) = setup_app();

    let (_, json) = send(&app, get("/v1/accounts/0009")).await;
    assert_eq!(json["error"], "Account not found");

    let (_, json) = send(&app, post_form("/v1/accounts/0001/withdraw", "amount=9999")).await;
    assert_eq!(json["error"], "Insufficient balance");
    assert_eq!(json["details"], "required 9999.00, available 500.00");

    let (_, json) = send(&app, post_form("/v1/accounts/0001/deposit", "amount=0")).await;
    assert_eq!(json["error"], "Amount must be greater than zero");

    let (_, json) = send(&app, post_form("/v1/accounts/0001/deposit", "amount=0.001")).await;
    assert_eq!(json["error"], "Amount must be greater than zero");
    assert_eq!(json["error_code"], "invalid_amount");
}

#[tokio::test]
async fn test_deposit_overflow_is_bad_request() {
    let ledger = Arc::new(Ledger::new([("0001", Money::from_minor(i64::MAX))]).unwrap());
    let app = api::build_app(Arc::clone(&ledger));

    let (status, json) = send(&app, post_form("/v1/accounts/0001/deposit", "amount=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "invalid_amount");
    assert_eq!(
        ledger.inquire(&AccountId::from("0001")).await,
        Ok(Money::from_minor(i64::MAX))
    );
}
