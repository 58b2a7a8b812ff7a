//! Camunda REST client.
//!
//! `Client` is the shared context (base URL, credentials, JSON helpers) and
//! hands out per-resource views. The only resource exposed here is message
//! correlation:
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use camunda_client::{Client, ClientConfig, CorrelationKey, MessageCorrelationRequest};
//!
//! let client = Client::new(ClientConfig::new("http://localhost:8080/engine-rest")?)?;
//! let request = MessageCorrelationRequest::new("orderPaid")
//!     .with_business_key("B-1")
//!     .with_correlation_key("orderId", CorrelationKey::string("o-42"));
//! client.message().send_message(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod transport;
pub mod types;
pub mod variables;

pub use client::Client;
pub use config::{ClientConfig, Credentials};
pub use error::{ApiError, ClientError};
pub use message::{
    ExecutionResult, MessageClient, MessageCorrelationRequest, MessageCorrelationResult,
    ProcessDefinitionResult,
};
pub use transport::{RawResponse, ReqwestTransport, Transport};
pub use types::{Execution, Link, ProcessInstance};
pub use variables::{CorrelationKey, ValueInfo, Variable};

pub type Result<T> = std::result::Result<T, ClientError>;
