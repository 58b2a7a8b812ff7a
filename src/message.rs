//! Message correlation
//!
//! `POST /message` delivers a named message to waiting executions or to a
//! process definition with a matching message start event.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::types::{Execution, ProcessInstance};
use crate::variables::{CorrelationKey, Variable};
use crate::Result;

const MESSAGE_PATH: &str = "/message";

// ─── Request ──────────────────────────────────────────────────

/// Correlation instruction sent to the engine.
///
/// Unset optionals are left out of the JSON body entirely; the engine reads
/// an absent field as its default, so nothing is sent that was not asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCorrelationRequest {
    pub message_name: String,

    /// Only correlate to process instances with this business key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Only correlate to executions and definitions that belong to no tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub without_tenant_id: Option<bool>,

    /// Must not be combined with `tenant_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_instance_id: Option<String>,

    /// Matched against global process instance variables. Variables local to
    /// child executions are not considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_keys: Option<HashMap<String, CorrelationKey>>,

    /// Matched against variables of the waiting execution's own scope only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_correlation_keys: Option<HashMap<String, CorrelationKey>>,

    /// Set on the triggered process instance after delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_variables: Option<HashMap<String, Variable>>,

    /// Set on the triggered execution after delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_variables_local: Option<HashMap<String, Variable>>,

    /// `true` correlates to every matching execution plus one instantiable
    /// definition; otherwise exactly one entity must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,

    /// Ask the engine to return the correlation results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_enabled: Option<bool>,

    /// Include process variables in each returned result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_in_result_enabled: Option<bool>,
}

impl MessageCorrelationRequest {
    pub fn new(message_name: impl Into<String>) -> Self {
        Self {
            message_name: message_name.into(),
            ..Default::default()
        }
    }

    pub fn with_business_key(mut self, business_key: impl Into<String>) -> Self {
        self.business_key = Some(business_key.into());
        self
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn without_tenant_id(mut self) -> Self {
        self.without_tenant_id = Some(true);
        self
    }

    pub fn with_process_instance_id(mut self, id: impl Into<String>) -> Self {
        self.process_instance_id = Some(id.into());
        self
    }

    pub fn with_correlation_key(mut self, name: impl Into<String>, key: CorrelationKey) -> Self {
        self.correlation_keys
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), key);
        self
    }

    pub fn with_local_correlation_key(
        mut self,
        name: impl Into<String>,
        key: CorrelationKey,
    ) -> Self {
        self.local_correlation_keys
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), key);
        self
    }

    pub fn with_process_variable(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.process_variables
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), variable);
        self
    }

    pub fn with_process_variable_local(
        mut self,
        name: impl Into<String>,
        variable: Variable,
    ) -> Self {
        self.process_variables_local
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), variable);
        self
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = Some(all);
        self
    }

    pub fn with_result_enabled(mut self, enabled: bool) -> Self {
        self.result_enabled = Some(enabled);
        self
    }

    pub fn with_variables_in_result(mut self, enabled: bool) -> Self {
        self.variables_in_result_enabled = Some(enabled);
        self
    }

    fn wants_result(&self) -> bool {
        self.result_enabled == Some(true)
    }
}

// ─── Result ───────────────────────────────────────────────────

/// What a message was correlated to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resultType")]
pub enum MessageCorrelationResult {
    /// Message start event; a new process instance was started.
    ProcessDefinition(ProcessDefinitionResult),
    /// Intermediate catch event or receive task of a running execution.
    Execution(ExecutionResult),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinitionResult {
    #[serde(default)]
    pub process_instance: Option<ProcessInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, Variable>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub execution: Option<Execution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, Variable>>,
}

impl MessageCorrelationResult {
    /// Wire value of the `resultType` discriminator.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::ProcessDefinition(_) => "ProcessDefinition",
            Self::Execution(_) => "Execution",
        }
    }

    pub fn variables(&self) -> Option<&HashMap<String, Variable>> {
        match self {
            Self::ProcessDefinition(r) => r.variables.as_ref(),
            Self::Execution(r) => r.variables.as_ref(),
        }
    }
}

// ─── Resource ─────────────────────────────────────────────────

/// Message API, borrowed from a `Client`.
#[derive(Debug, Clone, Copy)]
pub struct MessageClient<'a> {
    client: &'a Client,
}

impl<'a> MessageClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Correlate a message.
    ///
    /// Returns `Some(results)` in engine order when the request set
    /// `result_enabled`, `None` otherwise. The reply body is only read in
    /// the first case.
    pub async fn send_message(
        &self,
        request: &MessageCorrelationRequest,
    ) -> Result<Option<Vec<MessageCorrelationResult>>> {
        tracing::debug!(
            message_name = %request.message_name,
            result_enabled = request.wants_result(),
            "correlating message"
        );

        let response = self.client.post_json(MESSAGE_PATH, &[], request).await?;
        if !request.wants_result() {
            return Ok(None);
        }

        let results: Vec<MessageCorrelationResult> = Client::read_json_response(&response)?;
        tracing::debug!(
            message_name = %request.message_name,
            results = results.len(),
            "message correlated"
        );
        Ok(Some(results))
    }

    /// Correlate a message and return what it was correlated to.
    pub async fn correlate(
        &self,
        request: MessageCorrelationRequest,
    ) -> Result<Vec<MessageCorrelationResult>> {
        let request = request.with_result_enabled(true);
        let results = self.send_message(&request).await?;
        Ok(results.unwrap_or_default())
    }
}
