use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key under which the endpoint URL list is attached to a [`ResultEnvelope`].
pub const ENDPOINT_URLS_KEY: &str = "endpointURLs";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourcePath {
    pub resource_path: String,
    pub http_verb: String,
}

impl ApiResourcePath {
    pub fn new(resource_path: impl Into<String>, http_verb: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            http_verb: http_verb.into(),
        }
    }
}

/// A named gateway deployment target. `api_gateway_endpoint` carries the
/// HTTP and HTTPS bases joined by a comma, in that order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GatewayEnvironment {
    pub name: String,
    #[serde(rename = "type")]
    pub env_type: String,
    pub api_gateway_endpoint: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUrl {
    pub environment_name: String,
    pub environment_type: String,
    #[serde(rename = "environmentURLs")]
    pub environment_urls: BTreeMap<String, String>,
}

/// Response envelope surfaced to callers.
///
/// Only ever built on the success path; failures travel as
/// [`StoreApiError`](crate::error::StoreApiError) instead of `success: false`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    success: bool,
    message: String,
    payload: Vec<ApiResourcePath>,
    additional_properties: Map<String, Value>,
}

impl ResultEnvelope {
    pub fn success(payload: Vec<ApiResourcePath>) -> Self {
        Self {
            success: true,
            message: "success".to_string(),
            payload,
            additional_properties: Map::new(),
        }
    }

    pub fn with_additional_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional_properties.insert(key.into(), value);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> &[ApiResourcePath] {
        &self.payload
    }

    pub fn additional_property(&self, key: &str) -> Option<&Value> {
        self.additional_properties.get(key)
    }
}
