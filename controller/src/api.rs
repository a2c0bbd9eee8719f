//! HTTP client for the server endpoints the controller consumes

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use foxtrack_shared::{timing, CommandDescriptor, DeviceSummary, LoginRequest, LoginResponse};
use std::time::Duration;
use tracing::debug;

/// Server operations behind the operator dashboard
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Current session state: the logged-in email, or None
    async fn auth_check(&self) -> Result<Option<String>>;

    /// Exchange an identity assertion for a session; returns the email
    async fn login(&self, assertion: &str) -> Result<String>;

    /// End the current session
    async fn logout(&self) -> Result<()>;

    /// The sequence of per-device resource URLs
    async fn device_index(&self) -> Result<Vec<String>>;

    /// One device summary, by its resource URL
    async fn device(&self, url: &str) -> Result<DeviceSummary>;

    /// A device's available commands
    async fn device_commands(&self, device_id: i64) -> Result<Vec<CommandDescriptor>>;

    /// Execute one command server-side by POSTing its trigger URL
    async fn trigger(&self, url: &str) -> Result<()>;
}

/// `/auth/check` returns the bare email string; an empty body means there is
/// no session.
fn parse_auth_check(body: &str) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// HTTP implementation against the configured server
pub struct HttpDirectoryApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectoryApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timing::HTTP_TIMEOUT_MS))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("GET {} failed: {}", path, response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn auth_check(&self) -> Result<Option<String>> {
        let response = self.client.get(self.url("/auth/check")).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Auth check failed: {}", response.status()));
        }
        Ok(parse_auth_check(response.text().await?.trim()))
    }

    async fn login(&self, assertion: &str) -> Result<String> {
        let request = LoginRequest {
            assertion: assertion.to_string(),
        };

        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!("Login rejected: {}", response.status()));
        }

        let login: LoginResponse = response.json().await?;
        Ok(login.email)
    }

    async fn logout(&self) -> Result<()> {
        let response = self.client.get(self.url("/auth/logout")).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Logout failed: {}", response.status()));
        }
        Ok(())
    }

    async fn device_index(&self) -> Result<Vec<String>> {
        self.get_json("/device").await
    }

    async fn device(&self, url: &str) -> Result<DeviceSummary> {
        self.get_json(url).await
    }

    async fn device_commands(&self, device_id: i64) -> Result<Vec<CommandDescriptor>> {
        self.get_json(&format!("/device/{}/command", device_id)).await
    }

    async fn trigger(&self, url: &str) -> Result<()> {
        let full = self.url(url);
        debug!("POST {}", full);

        let response = self.client.post(&full).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Trigger {} failed: {}", url, response.status()));
        }
        Ok(())
    }
}
