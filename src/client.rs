//! Shared client context
//!
//! Owns the transport and the JSON encode/decode helpers every REST resource
//! goes through. Resources borrow it (`client.message()`), so they stay
//! stateless between calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use crate::message::MessageClient;
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use crate::Result;

#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client talking to the engine over HTTP
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client from `CAMUNDA_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        Ok(Self::new(config)?)
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Message correlation resource
    pub fn message(&self) -> MessageClient<'_> {
        MessageClient::new(self)
    }

    /// Serialize `body`, POST it, and turn non-2xx replies into
    /// `ClientError::Api`.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<RawResponse> {
        let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        tracing::debug!(path, bytes = payload.len(), "POST");

        let response = self.transport.post(path, query, payload).await?;
        tracing::debug!(path, status = response.status, "engine replied");

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(
                path,
                status = err.status,
                message = err.message.as_deref().unwrap_or(""),
                "engine rejected request"
            );
            return Err(ClientError::Api(err));
        }

        Ok(response)
    }

    /// Decode a successful reply's body into `T`
    pub fn read_json_response<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
        serde_json::from_slice(&response.body).map_err(ClientError::Decode)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
