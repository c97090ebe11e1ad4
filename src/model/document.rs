use serde::{Deserialize, Serialize};

use crate::model::{DocumentFormat, Id};

/// Documentation page published alongside an application
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: Id,
    /// Back-reference to the owning application, checked on validation
    #[serde(default)]
    pub application_id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub format: DocumentFormat,
    /// Free-form classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(with = "crate::model::bytes", default)]
    pub data: Vec<u8>,
}

impl Document {
    pub fn markdown(id: &str, application_id: &str, title: &str, data: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.to_string(),
            application_id: application_id.to_string(),
            title: title.to_string(),
            display_name: title.to_string(),
            description: String::new(),
            format: DocumentFormat::Markdown,
            kind: None,
            data: data.into(),
        }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }
}
