use serde::{Deserialize, Serialize};

use crate::model::{ApiSpecType, Credentials, Id, ParamMap, SpecFormat, SpecType};

/// An API exposed by an application: where to call it, how to authenticate
/// and, optionally, its machine-readable description.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_url: String,
    pub api_type: ApiSpecType,
    #[serde(default)]
    pub request_parameters: RequestParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec: Option<ApiSpec>,
}

/// Extra headers and query parameters sent with every call.
///
/// `None` means nothing was configured, `Some` of an empty map means the
/// producer explicitly configured none. Consumers merging with defaults
/// treat the two differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<ParamMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<ParamMap>,
}

/// Raw spec document attached to an API or event API
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApiSpec {
    #[serde(with = "crate::model::bytes", default)]
    pub data: Vec<u8>,
    #[serde(rename = "type")]
    pub spec_type: SpecType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SpecFormat>,
}

impl ApiDefinition {
    pub fn new(id: &str, name: &str, target_url: &str, api_type: ApiSpecType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            target_url: target_url.to_string(),
            api_type,
            request_parameters: RequestParameters::default(),
            credentials: None,
            api_spec: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_spec(mut self, spec: ApiSpec) -> Self {
        self.api_spec = Some(spec);
        self
    }
}

impl RequestParameters {
    /// True when neither headers nor query parameters were configured at all
    pub fn is_unset(&self) -> bool {
        self.headers.is_none() && self.query_parameters.is_none()
    }
}

impl ApiSpec {
    pub fn new(spec_type: SpecType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            spec_type,
            format: None,
        }
    }

    pub fn with_format(mut self, format: SpecFormat) -> Self {
        self.format = Some(format);
        self
    }
}
