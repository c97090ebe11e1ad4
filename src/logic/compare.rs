use itertools::Itertools;
use sha2::{Digest, Sha256};

use crate::model::{
    ApiDefinition, ApiSpec, Application, Auth, Credentials, Document, EventApiDefinition, ParamMap,
};

/// Structural equality used to detect "no change" between two snapshots.
///
/// The owned collections are compared as multisets, so reordering APIs,
/// event APIs or documents does not matter. Everything else, including
/// label value order and blob bytes, must match exactly.
pub fn equal(left: &Application, right: &Application) -> bool {
    left.id == right.id
        && left.name == right.name
        && left.description == right.description
        && left.labels == right.labels
        && same_members(&left.apis, &right.apis)
        && same_members(&left.event_apis, &right.event_apis)
        && same_members(&left.documents, &right.documents)
}

fn same_members<T: Ord>(left: &[T], right: &[T]) -> bool {
    left.len() == right.len() && sorted_refs(left) == sorted_refs(right)
}

/// Children in their canonical order (by ID first, then content)
pub fn sorted_refs<T: Ord>(items: &[T]) -> Vec<&T> {
    items.iter().sorted().collect()
}

/// Hex SHA-256 over a canonical encoding of the application.
///
/// Applications that are [`equal`] have the same fingerprint. Every field is
/// length-prefixed so adjacent values can't run into each other.
pub fn fingerprint(application: &Application) -> String {
    let mut hasher = FieldHasher::new();

    hasher.field("id", application.id.as_bytes());
    hasher.field("name", application.name.as_bytes());
    hasher.optional("description", application.description.as_deref());
    hasher.param_map("labels", Some(&application.labels));

    hasher.count("apis", application.apis.len());
    for api in sorted_refs(&application.apis) {
        hasher.api(api);
    }
    hasher.count("eventApis", application.event_apis.len());
    for event_api in sorted_refs(&application.event_apis) {
        hasher.event_api(event_api);
    }
    hasher.count("documents", application.documents.len());
    for document in sorted_refs(&application.documents) {
        hasher.document(document);
    }

    hex::encode(hasher.inner.finalize())
}

struct FieldHasher {
    inner: Sha256,
}

impl FieldHasher {
    fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    fn field(&mut self, name: &str, value: &[u8]) {
        self.inner.update(format!("{}:{}:", name, value.len()));
        self.inner.update(value);
        self.inner.update(b"\n");
    }

    fn count(&mut self, name: &str, count: usize) {
        self.inner.update(format!("{}#{}\n", name, count));
    }

    fn optional(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.field(name, value.as_bytes()),
            None => self.inner.update(format!("{}!\n", name)),
        }
    }

    fn param_map(&mut self, name: &str, map: Option<&ParamMap>) {
        let Some(map) = map else {
            self.inner.update(format!("{}!\n", name));
            return;
        };
        self.count(name, map.len());
        for (key, values) in map {
            self.field("key", key.as_bytes());
            self.count("values", values.len());
            for value in values {
                self.field("value", value.as_bytes());
            }
        }
    }

    fn api(&mut self, api: &ApiDefinition) {
        self.field("api.id", api.id.as_bytes());
        self.field("api.name", api.name.as_bytes());
        self.field("api.description", api.description.as_bytes());
        self.field("api.targetUrl", api.target_url.as_bytes());
        self.field("api.apiType", api.api_type.to_string().as_bytes());
        self.param_map("api.headers", api.request_parameters.headers.as_ref());
        self.param_map("api.queryParameters", api.request_parameters.query_parameters.as_ref());
        match &api.credentials {
            Some(credentials) => self.credentials(credentials),
            None => self.inner.update(b"api.credentials!\n"),
        }
        self.spec("api.apiSpec", api.api_spec.as_ref());
    }

    fn credentials(&mut self, credentials: &Credentials) {
        self.field("auth", credentials.auth.method_name().as_bytes());
        match &credentials.auth {
            Auth::Oauth(oauth) => {
                self.field("oauth.url", oauth.url.as_bytes());
                self.field("oauth.clientId", oauth.client_id.as_bytes());
                self.field("oauth.clientSecret", oauth.client_secret.as_bytes());
            }
            Auth::Basic(basic) => {
                self.field("basic.username", basic.username.as_bytes());
                self.field("basic.password", basic.password.as_bytes());
            }
            Auth::None => {}
        }
        self.optional(
            "csrf.tokenEndpointUrl",
            credentials
                .csrf_info
                .as_ref()
                .map(|csrf| csrf.token_endpoint_url.as_str()),
        );
    }

    fn spec(&mut self, name: &str, spec: Option<&ApiSpec>) {
        let Some(spec) = spec else {
            self.inner.update(format!("{}!\n", name));
            return;
        };
        self.field(name, spec.spec_type.to_string().as_bytes());
        self.optional("format", spec.format.map(|f| f.to_string()).as_deref());
        self.field("data", &spec.data);
    }

    fn event_api(&mut self, event_api: &EventApiDefinition) {
        self.field("eventApi.id", event_api.id.as_bytes());
        self.field("eventApi.name", event_api.name.as_bytes());
        self.field("eventApi.description", event_api.description.as_bytes());
        self.spec("eventApi.apiSpec", event_api.api_spec.as_ref());
    }

    fn document(&mut self, document: &Document) {
        self.field("document.id", document.id.as_bytes());
        self.field("document.applicationId", document.application_id.as_bytes());
        self.field("document.title", document.title.as_bytes());
        self.field("document.displayName", document.display_name.as_bytes());
        self.field("document.description", document.description.as_bytes());
        self.field("document.format", document.format.to_string().as_bytes());
        self.optional("document.kind", document.kind.as_deref());
        self.field("document.data", &document.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiSpecType, SpecType};

    fn snapshot() -> Application {
        Application::new("app-1", "Billing")
            .with_label("region", &["eu", "us"])
            .with_api(ApiDefinition::new("api-1", "a", "https://x/a", ApiSpecType::OpenApi))
            .with_api(
                ApiDefinition::new("api-2", "b", "https://x/b", ApiSpecType::Odata)
                    .with_spec(ApiSpec::new(SpecType::Odata, "<edmx/>")),
            )
            .with_document(Document::markdown("doc-1", "app-1", "One", "1"))
            .with_document(Document::markdown("doc-2", "app-1", "Two", "2"))
    }

    #[test]
    fn test_equal_is_reflexive_and_symmetric() {
        let a = snapshot();
        let b = snapshot();
        assert!(equal(&a, &a));
        assert!(equal(&a, &b));
        assert!(equal(&b, &a));
        assert_eq!(a, b);
    }

    #[test]
    fn test_child_order_is_ignored() {
        let a = snapshot();
        let mut b = snapshot();
        b.apis.reverse();
        b.documents.reverse();

        assert!(equal(&a, &b));
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_label_value_order_matters() {
        let a = snapshot();
        let b = snapshot().with_label("region", &["us", "eu"]);

        assert!(!equal(&a, &b));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_spec_bytes_matter() {
        let a = snapshot();
        let mut b = snapshot();
        b.apis[1].api_spec.as_mut().unwrap().data = b"<edmx />".to_vec();

        assert!(!equal(&a, &b));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_absent_and_empty_headers_differ() {
        let a = snapshot();
        let mut b = snapshot();
        b.apis[0].request_parameters.headers = Some(ParamMap::new());

        assert!(!equal(&a, &b));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_duplicates_are_counted() {
        let a = snapshot().with_document(Document::markdown("doc-1", "app-1", "One", "1"));
        let b = snapshot().with_document(Document::markdown("doc-2", "app-1", "Two", "2"));

        assert!(!equal(&a, &b));
        assert!(!equal(&a, &snapshot()));
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let print = fingerprint(&snapshot());
        assert_eq!(print.len(), 64);
        assert!(print.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(print, fingerprint(&snapshot()));
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        let a = Application::new("app-1", "Billing").with_description("x");
        let b = Application::new("app-1", "Billingx");
        assert_ne!(fingerprint(&a), fingerprint(&b));

        let c = Application::new("app-1", "Billing").with_description("");
        let d = Application::new("app-1", "Billing");
        assert!(!equal(&c, &d));
        assert_ne!(fingerprint(&c), fingerprint(&d));
    }
}
