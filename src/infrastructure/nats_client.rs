// Copyright 2025 Cowboy AI, LLC.

//! NATS client for the key-value document store

use crate::errors::{DomainError, DomainResult};
use async_nats::jetstream::{self, Context as JetStreamContext};
use async_nats::{Client, ConnectOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Configuration for NATS client connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatsConfig {
    /// NATS server URL (e.g., "nats://localhost:4222")
    pub url: String,

    /// Optional username for authentication
    pub user: Option<String>,

    /// Optional password for authentication
    pub password: Option<String>,

    /// Whether TLS is required
    pub tls_required: bool,

    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Reconnect interval in seconds
    pub reconnect_interval_secs: u64,

    /// Maximum reconnect attempts (0 = infinite)
    pub max_reconnects: usize,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
            user: None,
            password: None,
            tls_required: false,
            connection_timeout_secs: 10,
            reconnect_interval_secs: 5,
            max_reconnects: 0,
        }
    }
}

impl NatsConfig {
    /// Reject settings that cannot produce a connection
    pub fn validate(&self) -> DomainResult<()> {
        if self.url.trim().is_empty() {
            return Err(DomainError::ConfigurationError(
                "NATS url cannot be empty".to_string(),
            ));
        }
        if self.user.is_some() != self.password.is_some() {
            return Err(DomainError::ConfigurationError(
                "NATS user and password must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

/// Long-lived NATS connection with its JetStream context
///
/// Created once at start-up and handed to the stores that need it.
#[derive(Debug, Clone)]
pub struct NatsClient {
    client: Client,
    jetstream: JetStreamContext,
    config: NatsConfig,
}

impl NatsClient {
    /// Connect to NATS server with the provided configuration
    pub async fn connect(config: NatsConfig) -> DomainResult<Self> {
        config.validate()?;

        let reconnect_interval = config.reconnect_interval_secs;
        let max_reconnects = config.max_reconnects;
        let mut options = ConnectOptions::new()
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .reconnect_delay_callback(move |attempts| {
                if max_reconnects > 0 && attempts >= max_reconnects {
                    Duration::from_secs(0)
                } else {
                    Duration::from_secs(reconnect_interval)
                }
            })
            .event_callback(|event| async move {
                match event {
                    async_nats::Event::Disconnected => warn!("NATS disconnected"),
                    async_nats::Event::Connected => info!("NATS connected"),
                    async_nats::Event::ClientError(err) => warn!(error = %err, "NATS client error"),
                    _ => {}
                }
            });

        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            options = options.user_and_password(user.clone(), password.clone());
        }

        if config.tls_required {
            options = options.require_tls(true);
        }

        let client = options.connect(&config.url).await.map_err(|e| {
            DomainError::ConnectionFailed(format!("Failed to connect to {}: {e}", config.url))
        })?;
        let jetstream = jetstream::new(client.clone());
        info!(url = %config.url, "connected to NATS");

        Ok(Self {
            client,
            jetstream,
            config,
        })
    }

    /// Get the underlying NATS client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the JetStream context
    pub fn jetstream(&self) -> &JetStreamContext {
        &self.jetstream
    }

    /// Get the configuration
    pub fn config(&self) -> &NatsConfig {
        &self.config
    }

    /// Check if the client is connected
    pub async fn is_connected(&self) -> bool {
        self.client.flush().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NatsConfig::default();
        assert_eq!(config.url, "nats://localhost:4222");
        assert_eq!(config.connection_timeout_secs, 10);
        assert_eq!(config.max_reconnects, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_auth() {
        let config = NatsConfig {
            user: Some("testuser".to_string()),
            password: Some("testpass".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let half_auth = NatsConfig {
            user: Some("testuser".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            half_auth.validate(),
            Err(DomainError::ConfigurationError(_))
        ));

        let no_url = NatsConfig {
            url: " ".to_string(),
            ..Default::default()
        };
        assert!(no_url.validate().is_err());
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_config_before_dialing() {
        let err = NatsClient::connect(NatsConfig {
            url: String::new(),
            ..Default::default()
        })
        .await
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::ConfigurationError("NATS url cannot be empty".to_string())
        );
    }
}
