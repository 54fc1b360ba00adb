//! Configuration management for microservices

use crate::error::{BanklineError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub http_host: String,
    pub http_port: u16,
    /// Address other services should use to reach this one
    pub advertise_host: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "accounts-service".to_string()),
            http_host: lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            http_port: lookup("HTTP_PORT")
                .unwrap_or_else(|| "2222".to_string())
                .parse()
                .map_err(|e| BanklineError::Config(format!("Invalid HTTP_PORT: {}", e)))?,
            advertise_host: lookup("ADVERTISE_HOST").unwrap_or_else(|| "localhost".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
