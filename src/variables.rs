//! Typed variable values
//!
//! The engine transports every variable as `{"value": ..., "type": "..."}`.
//! Values are kept as open JSON; pairing a value with a matching type tag is
//! left to the caller and checked by the engine.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Key-value pair used for correlating running process instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationKey {
    pub value: Value,
    /// Engine value type, e.g. `String`, `Integer`.
    #[serde(rename = "type")]
    pub value_type: String,
}

impl CorrelationKey {
    pub fn new(value: impl Into<Value>, value_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            value_type: value_type.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value.into(), "String")
    }

    pub fn integer(value: i32) -> Self {
        Self::new(value, "Integer")
    }

    pub fn long(value: i64) -> Self {
        Self::new(value, "Long")
    }

    /// `None` for NaN and infinities, which JSON cannot carry.
    pub fn double(value: f64) -> Option<Self> {
        Number::from_f64(value).map(|n| Self::new(n, "Double"))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(value, "Boolean")
    }
}

/// A process variable as the engine serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub value: Value,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_info: Option<ValueInfo>,
}

impl Variable {
    pub fn new(value: impl Into<Value>, value_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            value_type: value_type.into(),
            value_info: None,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value.into(), "String")
    }

    pub fn integer(value: i32) -> Self {
        Self::new(value, "Integer")
    }

    pub fn long(value: i64) -> Self {
        Self::new(value, "Long")
    }

    /// `None` for NaN and infinities, which JSON cannot carry.
    pub fn double(value: f64) -> Option<Self> {
        Number::from_f64(value).map(|n| Self::new(n, "Double"))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(value, "Boolean")
    }

    /// Serialized JSON object variable (`type: Json`).
    pub fn json(value: Value) -> Self {
        Self::new(value.to_string(), "Json")
    }

    pub fn with_value_info(mut self, value_info: ValueInfo) -> Self {
        self.value_info = Some(value_info);
        self
    }
}

/// Extra type information for `Object`, `File` and transient variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialization_data_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<bool>,
}
