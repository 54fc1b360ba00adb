//! Accounts Service REST API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bankline_core::{Account, DependencyStatus, HealthStatus, ReadinessStatus};
use serde::Serialize;
use std::time::Instant;

use crate::{AccountsService, MetricsSnapshot, Result};

pub const SERVICE_ID: &str = "accounts-service";

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountsService,
    pub started: Instant,
}

impl AppState {
    pub fn new(accounts: AccountsService) -> Self {
        Self {
            accounts,
            started: Instant::now(),
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            service_id: SERVICE_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.started.elapsed().as_secs(),
        }
    }

    pub async fn readiness(&self) -> ReadinessStatus {
        self.ready_report().await.status
    }

    /// Readiness plus the current account count when the store answers
    pub async fn ready_report(&self) -> ReadyReport {
        let started = Instant::now();
        let available = self.accounts.store_healthy().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let accounts = if available {
            self.accounts.account_count().await.ok()
        } else {
            None
        };

        ReadyReport {
            status: ReadinessStatus {
                ready: available,
                dependencies: vec![DependencyStatus {
                    name: format!("store:{}", self.accounts.store_backend()),
                    available,
                    latency_ms: Some(latency_ms),
                }],
            },
            accounts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadyReport {
    #[serde(flatten)]
    pub status: ReadinessStatus,
    pub accounts: Option<u64>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/stats", get(stats))
        // Lookups
        .route("/accounts/{account_number}", get(by_number))
        .route("/accounts/owner/{name}", get(by_owner))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health())
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyReport>) {
    let report = state.ready_report().await;
    let code = if report.status.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

#[derive(Serialize)]
struct StatsResponse {
    uptime_seconds: u64,
    store: &'static str,
    accounts: Option<u64>,
    lookups: MetricsSnapshot,
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let accounts = state.accounts.account_count().await.ok();

    Json(StatsResponse {
        uptime_seconds: state.started.elapsed().as_secs(),
        store: state.accounts.store_backend(),
        accounts,
        lookups: state.accounts.metrics().snapshot(),
    })
}

// Lookup endpoints

async fn by_number(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<Account>> {
    let account = state.accounts.by_number(&account_number).await?;
    Ok(Json(account))
}

async fn by_owner(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Account>>> {
    let accounts = state.accounts.by_owner(&name).await?;
    Ok(Json(accounts))
}
