//! Client configuration
//!
//! Endpoint, credentials and transport settings for the engine REST API.

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

use crate::error::ClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP basic-auth credentials.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the REST API, always ending in `/`.
    pub endpoint_url: Url,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the given engine REST endpoint, e.g.
    /// `http://localhost:8080/engine-rest`.
    pub fn new(endpoint: &str) -> crate::Result<Self> {
        Ok(Self {
            endpoint_url: parse_endpoint(endpoint)?,
            credentials: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        })
    }

    /// Create a config from environment variables
    ///
    /// - `CAMUNDA_URL` (required)
    /// - `CAMUNDA_USER` / `CAMUNDA_PASSWORD` (basic auth, both or neither)
    /// - `CAMUNDA_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint =
            lookup("CAMUNDA_URL").context("CAMUNDA_URL environment variable not set")?;
        let mut config = Self::new(&endpoint).context("CAMUNDA_URL is not a valid URL")?;

        match (lookup("CAMUNDA_USER"), lookup("CAMUNDA_PASSWORD")) {
            (Some(user), Some(password)) => {
                config.credentials = Some(Credentials::new(user, password));
            }
            (None, None) => {}
            _ => anyhow::bail!("CAMUNDA_USER and CAMUNDA_PASSWORD must be set together"),
        }

        if let Some(secs) = lookup("CAMUNDA_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("CAMUNDA_TIMEOUT_SECS must be an integer, got {secs:?}"))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!("camunda-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse the endpoint and make sure relative joins land beneath it
/// (`/engine-rest` + `message` must not become `/message`).
fn parse_endpoint(endpoint: &str) -> crate::Result<Url> {
    let mut url = Url::parse(endpoint.trim())
        .map_err(|e| ClientError::InvalidUrl(format!("{endpoint}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!(
            "{endpoint}: not a base URL"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
