use serde::{Deserialize, Serialize};

use crate::model::{ApiDefinition, Document, EventApiDefinition, Id, Labels};

/// One externally registered service together with everything it owns.
///
/// Equality ignores the order of `apis`, `event_apis` and `documents` and
/// is exact everywhere else, including blob bytes and label value order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub apis: Vec<ApiDefinition>,
    #[serde(default)]
    pub event_apis: Vec<EventApiDefinition>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Application {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            labels: Labels::new(),
            apis: Vec::new(),
            event_apis: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_label(mut self, key: &str, values: &[&str]) -> Self {
        self.labels.insert(
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn with_api(mut self, api: ApiDefinition) -> Self {
        self.apis.push(api);
        self
    }

    pub fn with_event_api(mut self, event_api: EventApiDefinition) -> Self {
        self.event_apis.push(event_api);
        self
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    pub fn get_api(&self, api_id: &str) -> Option<&ApiDefinition> {
        self.apis.iter().find(|api| api.id == api_id)
    }

    pub fn get_event_api(&self, event_api_id: &str) -> Option<&EventApiDefinition> {
        self.event_apis.iter().find(|api| api.id == event_api_id)
    }

    pub fn get_document(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == document_id)
    }
}

impl PartialEq for Application {
    fn eq(&self, other: &Self) -> bool {
        crate::logic::compare::equal(self, other)
    }
}

impl Eq for Application {}
