//! Engine resource shapes returned alongside correlation results.
//!
//! Every field is optional: the engine omits or nulls fields depending on
//! version and resource state.

use serde::{Deserialize, Serialize};

/// Hypermedia link as returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub method: Option<String>,
    pub href: Option<String>,
    pub rel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub id: Option<String>,
    pub definition_id: Option<String>,
    pub business_key: Option<String>,
    pub case_instance_id: Option<String>,
    pub ended: Option<bool>,
    pub suspended: Option<bool>,
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: Option<String>,
    pub process_instance_id: Option<String>,
    pub ended: Option<bool>,
    pub tenant_id: Option<String>,
}
