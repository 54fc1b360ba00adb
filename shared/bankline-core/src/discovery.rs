//! Service Discovery Client
//!
//! Registers services with the registry and resolves peer endpoints via
//! Consul, environment variables, or Kubernetes DNS names.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

/// Service discovery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Use environment variables (default, for single-host setups)
    Environment,
    /// Use Consul for registration and lookup
    Consul,
    /// Use DNS-based discovery (Kubernetes)
    Dns,
}

/// Service Discovery Client
#[derive(Debug, Clone)]
pub struct ServiceDiscovery {
    mode: DiscoveryMode,
    consul_addr: Option<String>,
    http: reqwest::Client,
}

impl ServiceDiscovery {
    /// Create from `CONSUL_ENABLED` / `CONSUL_HTTP_ADDR`
    pub fn from_env() -> Self {
        let mode = if env::var("CONSUL_ENABLED")
            .unwrap_or_default()
            .to_lowercase()
            == "true"
        {
            DiscoveryMode::Consul
        } else {
            DiscoveryMode::Environment
        };

        let consul_addr = env::var("CONSUL_HTTP_ADDR").ok();

        info!(
            "Service discovery initialized: mode={:?}, consul={:?}",
            mode, consul_addr
        );

        Self::with_mode(mode, consul_addr)
    }

    /// Create with explicit mode
    pub fn with_mode(mode: DiscoveryMode, consul_addr: Option<String>) -> Self {
        Self {
            mode,
            consul_addr,
            http: reqwest::Client::new(),
        }
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    /// Get service base URL by logical name
    pub async fn get_service_url(&self, service_name: &str) -> Option<String> {
        match self.mode {
            DiscoveryMode::Environment => self.get_from_env(service_name),
            DiscoveryMode::Consul => self.get_from_consul(service_name).await,
            DiscoveryMode::Dns => Some(self.get_from_dns(service_name)),
        }
    }

    /// Get URL from environment variable
    fn get_from_env(&self, service_name: &str) -> Option<String> {
        // accounts-service -> ACCOUNTS_SERVICE_URL
        let env_key = format!(
            "{}_URL",
            service_name.to_uppercase().replace('-', "_")
        );
        env::var(&env_key).ok()
    }

    /// Get URL from the Consul catalog, falling back to the environment
    async fn get_from_consul(&self, service_name: &str) -> Option<String> {
        let Some(consul_addr) = self.consul_addr.as_ref() else {
            return self.get_from_env(service_name);
        };

        let url = format!(
            "http://{}/v1/catalog/service/{}",
            consul_addr, service_name
        );

        let services = match self.query_catalog(&url).await {
            Ok(services) => services,
            Err(e) => {
                warn!("Consul lookup for {} failed, using environment: {}", service_name, e);
                return self.get_from_env(service_name);
            }
        };

        match services.first() {
            Some(svc) => Some(format!("http://{}:{}", svc.service_address, svc.service_port)),
            None => {
                warn!("No {} instances in Consul catalog, using environment", service_name);
                self.get_from_env(service_name)
            }
        }
    }

    async fn query_catalog(&self, url: &str) -> reqwest::Result<Vec<ConsulService>> {
        self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Get URL from DNS (Kubernetes-style)
    fn get_from_dns(&self, service_name: &str) -> String {
        let namespace = env::var("KUBERNETES_NAMESPACE").unwrap_or_else(|_| "default".to_string());
        format!("http://{}.{}.svc.cluster.local", service_name, namespace)
    }

    /// Register a service instance with the registry.
    ///
    /// Returns the instance id to pass to [`deregister_service`](Self::deregister_service),
    /// or `None` when the current mode has no registry to talk to.
    pub async fn register_service(
        &self,
        name: &str,
        addr: &str,
        port: u16,
        health_path: &str,
    ) -> anyhow::Result<Option<String>> {
        if self.mode != DiscoveryMode::Consul {
            return Ok(None);
        }

        let consul_addr = self.consul_addr.as_ref()
            .ok_or_else(|| anyhow::anyhow!("Consul address not configured"))?;

        let registration = ConsulRegistration::new(name, addr, port, health_path);
        let id = registration.id.clone();
        let url = format!("http://{}/v1/agent/service/register", consul_addr);

        self.http
            .put(&url)
            .json(&registration)
            .send()
            .await?
            .error_for_status()?;

        info!(service = name, instance = %id, "Registered service with Consul");
        Ok(Some(id))
    }

    /// Deregister service on shutdown
    pub async fn deregister_service(&self, service_id: &str) -> anyhow::Result<()> {
        if let Some(consul_addr) = &self.consul_addr {
            let url = format!(
                "http://{}/v1/agent/service/deregister/{}",
                consul_addr, service_id
            );
            self.http.put(&url).send().await?.error_for_status()?;
            info!(instance = service_id, "Deregistered service from Consul");
        }
        Ok(())
    }
}

impl Default for ServiceDiscovery {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Deserialize)]
struct ConsulService {
    #[serde(rename = "ServiceAddress")]
    service_address: String,
    #[serde(rename = "ServicePort")]
    service_port: u16,
}

#[derive(Debug, Serialize)]
struct ConsulRegistration {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "Port")]
    port: u16,
    #[serde(rename = "Check")]
    check: ConsulCheck,
}

impl ConsulRegistration {
    fn new(name: &str, addr: &str, port: u16, health_path: &str) -> Self {
        Self {
            name: name.to_string(),
            id: format!("{}-{}", name, uuid::Uuid::new_v4()),
            address: addr.to_string(),
            port,
            check: ConsulCheck {
                http: format!("http://{}:{}{}", addr, port, health_path),
                interval: "10s".to_string(),
                timeout: "5s".to_string(),
                deregister_critical_service_after: "1m".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ConsulCheck {
    #[serde(rename = "HTTP")]
    http: String,
    #[serde(rename = "Interval")]
    interval: String,
    #[serde(rename = "Timeout")]
    timeout: String,
    #[serde(rename = "DeregisterCriticalServiceAfter")]
    deregister_critical_service_after: String,
}
