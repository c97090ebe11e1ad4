use serde::{Deserialize, Serialize};

use crate::model::{ApiSpec, Id};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventApiDefinition {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Expected to be tagged `ASYNC_API` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec: Option<ApiSpec>,
}

impl EventApiDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            api_spec: None,
        }
    }

    pub fn with_spec(mut self, spec: ApiSpec) -> Self {
        self.api_spec = Some(spec);
        self
    }
}
