//! Accounts Service client
//!
//! Used by peer services that resolve the accounts service by its logical
//! name instead of a fixed address.

use bankline_core::{Account, ServiceDiscovery};
use reqwest::{StatusCode, Url};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Service {0} could not be resolved")]
    Unresolved(String),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct AccountsClient {
    discovery: ServiceDiscovery,
    service_name: String,
    http: reqwest::Client,
}

impl AccountsClient {
    pub fn new(discovery: ServiceDiscovery, service_name: impl Into<String>) -> Self {
        Self {
            discovery,
            service_name: service_name.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Look up one account; `Ok(None)` when the service answers 404
    pub async fn by_number(&self, number: &str) -> Result<Option<Account>, ClientError> {
        let url = self.endpoint(&["accounts", number]).await?;
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }

    /// Look up accounts by owner fragment; empty when the service answers 404
    pub async fn by_owner(&self, fragment: &str) -> Result<Vec<Account>, ClientError> {
        let url = self.endpoint(&["accounts", "owner", fragment]).await?;
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        Ok(response.error_for_status()?.json().await?)
    }

    async fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let base = self
            .discovery
            .get_service_url(&self.service_name)
            .await
            .ok_or_else(|| ClientError::Unresolved(self.service_name.clone()))?;

        let mut url = Url::parse(&base).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(segments);

        debug!(%url, "Calling accounts service");
        Ok(url)
    }
}
