//! Session view state for the operator dashboard

use crate::api::DirectoryApi;
use anyhow::Result;
use tracing::warn;

/// The two mutually exclusive dashboard states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    LoggedOut,
    LoggedIn { email: String },
}

impl SessionView {
    /// Resolve the current view from the server's session state
    pub async fn check(api: &dyn DirectoryApi) -> Result<Self> {
        Ok(match api.auth_check().await? {
            Some(email) => SessionView::LoggedIn { email },
            None => SessionView::LoggedOut,
        })
    }
}

/// Exchange an identity assertion for a session; returns the email
pub async fn login(api: &dyn DirectoryApi, assertion: &str) -> Result<String> {
    api.login(assertion).await
}

/// End the session. The view flips to logged-out regardless of the outcome.
pub async fn logout(api: &dyn DirectoryApi) -> SessionView {
    if let Err(e) = api.logout().await {
        warn!("Logout request failed: {}", e);
    }
    SessionView::LoggedOut
}
