//! HTTP contract tests for the accounts endpoints

use accounts_service::{create_router, AccountsService, AppState};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bankline_core::Account;
use bankline_store::{AccountStore, InMemoryAccountStore, StoreError};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app(accounts: Vec<Account>) -> Router {
    let store = InMemoryAccountStore::new(accounts).unwrap();
    create_router(AppState::new(AccountsService::new(Arc::new(store))))
}

fn seeded() -> Router {
    app(vec![
        Account::new(1, "123456789", "Alice", Decimal::new(10050, 2)),
        Account::new(2, "123456790", "Alicia", Decimal::new(0, 2)).with_branch("Leeds"),
        Account::new(3, "123456791", "Bob", Decimal::new(99, 2)),
        Account::new(4, "123456792", "Mary Jones", Decimal::new(100, 0)),
    ])
}

/// Store whose every call fails as if the database were down
struct UnreachableStore;

#[async_trait]
impl AccountStore for UnreachableStore {
    async fn find_exact(&self, _number: &str) -> bankline_store::Result<Option<Account>> {
        Err(StoreError::Pool("connection refused".into()))
    }

    async fn find_by_owner_contains(&self, _fragment: &str) -> bankline_store::Result<Vec<Account>> {
        Err(StoreError::Pool("connection refused".into()))
    }

    async fn count(&self) -> bankline_store::Result<u64> {
        Err(StoreError::Pool("connection refused".into()))
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

fn store_down() -> Router {
    create_router(AppState::new(AccountsService::new(Arc::new(UnreachableStore))))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn account_by_number_is_returned_as_json() {
    let (status, body) = get(seeded(), "/accounts/123456789").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["number"], "123456789");
    assert_eq!(body["owner"], "Alice");
    assert_eq!(body["balance"], "100.50");
}

#[tokio::test]
async fn unknown_number_is_404() {
    let (status, body) = get(app(vec![]), "/accounts/000000000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["error"], "Account not found: 000000000");
}

#[tokio::test]
async fn owner_fragment_returns_matches_in_store_order() {
    let (status, body) = get(seeded(), "/accounts/owner/ali").await;

    assert_eq!(status, StatusCode::OK);
    let owners: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["owner"].as_str().unwrap())
        .collect();
    assert_eq!(owners, vec!["Alice", "Alicia"]);
    assert_eq!(body[1]["branch"], "Leeds");
}

#[tokio::test]
async fn owner_fragment_is_percent_decoded() {
    let (status, body) = get(seeded(), "/accounts/owner/mary%20j").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["number"], "123456792");
}

#[tokio::test]
async fn owner_fragment_without_matches_is_404() {
    let (status, body) = get(seeded(), "/accounts/owner/zzz").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Account not found: zzz");
}

#[tokio::test]
async fn other_verbs_are_rejected() {
    let response = seeded()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/accounts/123456789")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_and_ready_report_up() {
    let (status, body) = get(seeded(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
    assert_eq!(body["service_id"], "accounts-service");

    let (status, body) = get(seeded(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["dependencies"][0]["name"], "store:memory");
    assert_eq!(body["accounts"], 4);
}

#[tokio::test]
async fn store_failure_is_500_not_404() {
    for uri in ["/accounts/123456789", "/accounts/owner/ali"] {
        let (status, body) = get(store_down(), uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body["code"], 500);
        assert_eq!(body["error"], "Internal server error");
    }
}

#[tokio::test]
async fn ready_is_503_when_store_is_down() {
    let (status, body) = get(store_down(), "/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
    assert_eq!(body["dependencies"][0]["name"], "store:unreachable");
    assert_eq!(body["dependencies"][0]["available"], false);
    assert!(body["accounts"].is_null());

    let (status, body) = get(store_down(), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accounts"].is_null());
}

#[tokio::test]
async fn stats_report_account_count() {
    let (status, body) = get(seeded(), "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "memory");
    assert_eq!(body["accounts"], 4);
    assert_eq!(body["lookups"]["by_number"], 0);
}
