//! Discovery-aware client against a live server

use accounts_service::{create_router, AccountsClient, AccountsService, AppState, ClientError};
use bankline_core::{Account, DiscoveryMode, ServiceDiscovery};
use bankline_store::InMemoryAccountStore;
use rust_decimal::Decimal;
use std::sync::Arc;

async fn spawn_server(env_key: &str) {
    let store = InMemoryAccountStore::new(vec![
        Account::new(1, "123456789", "Alice", Decimal::new(10050, 2)),
        Account::new(2, "123456790", "Mary Jones", Decimal::new(0, 2)),
    ])
    .unwrap();
    let router = create_router(AppState::new(AccountsService::new(Arc::new(store))));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    std::env::set_var(env_key, format!("http://{}", addr));
}

fn client(service_name: &str) -> AccountsClient {
    AccountsClient::new(ServiceDiscovery::with_mode(DiscoveryMode::Environment, None), service_name)
}

#[tokio::test]
async fn client_resolves_service_by_name() {
    spawn_server("ACCOUNTS_CLIENT_LOOKUP_URL").await;
    let client = client("accounts-client-lookup");

    let found = client.by_number("123456789").await.unwrap().unwrap();
    assert_eq!(found.owner, "Alice");
    assert!(client.by_number("000000000").await.unwrap().is_none());
}

#[tokio::test]
async fn client_encodes_owner_fragment() {
    spawn_server("ACCOUNTS_CLIENT_OWNER_URL").await;
    let client = client("accounts-client-owner");

    let found = client.by_owner("mary j").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].number, "123456790");
    assert!(client.by_owner("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn unresolvable_service_is_an_error() {
    let client = client("accounts-client-nowhere");

    let err = client.by_number("123456789").await.unwrap_err();
    assert!(matches!(err, ClientError::Unresolved(name) if name == "accounts-client-nowhere"));
}
