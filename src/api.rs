//! Server API client for the device agent

use crate::config::AgentConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use foxtrack_shared::{timing, Invocation, LocationReport};
use std::time::Duration;
use tracing::debug;

/// Server operations available to the device agent
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Replace the device's full command set on the server
    async fn put_commands(&self, device_id: i64, command_ids: &[i64]) -> Result<()>;

    /// Report a location fix
    async fn post_location(&self, device_id: i64, report: &LocationReport) -> Result<()>;

    /// Fetch one pending invocation, if any
    async fn poll_invocation(&self, device_id: i64) -> Result<Option<Invocation>>;
}

/// HTTP implementation against the configured server
pub struct HttpAgentApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAgentApi {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timing::HTTP_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn put_commands(&self, device_id: i64, command_ids: &[i64]) -> Result<()> {
        let url = self.url(&format!("/device/{}/command", device_id));
        debug!("Sending command set {:?} to {}", command_ids, url);

        let response = self.client.put(&url).json(&command_ids).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Command registration rejected: {}", response.status()));
        }
        Ok(())
    }

    async fn post_location(&self, device_id: i64, report: &LocationReport) -> Result<()> {
        let url = self.url(&format!("/device/location/{}", device_id));

        let response = self.client.post(&url).json(report).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Location report rejected: {}", response.status()));
        }
        Ok(())
    }

    async fn poll_invocation(&self, device_id: i64) -> Result<Option<Invocation>> {
        let url = self.url(&format!("/device/{}/invocation", device_id));

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow!("Invocation poll failed: {}", response.status()));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(Invocation::from_slice(&body)?))
    }
}
