use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{
    ApiDefinition, ApiSpec, Application, Auth, Basic, Credentials, Document, EventApiDefinition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A required field is empty, missing or malformed
    StructuralViolation,
    /// Mutually exclusive sub-structures are both set
    ConflictingVariant,
    /// A spec tag does not belong to the owning definition's family
    TypeMismatch,
    /// Two siblings share an ID within one application
    DuplicateIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} at {path}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Dotted location of the offending field, e.g. `apis[api-1].targetUrl`
    pub path: String,
    pub message: String,
}

/// Every violation found in one application, in traversal order.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn summarize(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).join("; ")
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValidationErrorKind::StructuralViolation => write!(f, "structural violation"),
            ValidationErrorKind::ConflictingVariant => write!(f, "conflicting variant"),
            ValidationErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ValidationErrorKind::DuplicateIdentity => write!(f, "duplicate identity"),
        }
    }
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ValidationErrors {
    /// Returns `None` for an empty list so a caller can't hold an error
    /// with nothing in it
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    pub fn kinds(&self) -> Vec<ValidationErrorKind> {
        self.0.iter().map(|e| e.kind).collect()
    }

    /// Keep only the first violation
    pub fn truncate_to_first(mut self) -> Self {
        self.0.truncate(1);
        self
    }

    /// Add the violations of `other` after the existing ones
    pub fn append(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check every invariant of an application and its owned graph.
///
/// Pure and deterministic: the same input always yields the same errors in
/// the same order.
pub fn validate(application: &Application) -> Result<(), ValidationErrors> {
    let mut validator = Validator::default();
    validator.check_application(application);
    match ValidationErrors::from_vec(validator.errors) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

/// Like [`validate`] but stops at the first violation
pub fn validate_first(application: &Application) -> Result<(), ValidationError> {
    validate(application).map_err(|errors| errors.first().clone())
}

#[derive(Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    /// Violations collected so far
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn push(&mut self, kind: ValidationErrorKind, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(kind, path, message));
    }

    pub fn check_application(&mut self, application: &Application) {
        self.require_non_empty("id", &application.id);
        self.require_non_empty("name", &application.name);

        for key in application.labels.keys() {
            if key.trim().is_empty() {
                self.push(
                    ValidationErrorKind::StructuralViolation,
                    "labels",
                    "Label key must not be empty",
                );
            }
        }

        self.check_unique_ids("apis", application.apis.iter().map(|a| a.id.as_str()));
        self.check_unique_ids("eventApis", application.event_apis.iter().map(|a| a.id.as_str()));
        self.check_unique_ids("documents", application.documents.iter().map(|d| d.id.as_str()));

        for (index, api) in application.apis.iter().enumerate() {
            self.check_api(&child_path("apis", index, &api.id), api);
        }
        for (index, event_api) in application.event_apis.iter().enumerate() {
            self.check_event_api(&child_path("eventApis", index, &event_api.id), event_api);
        }
        for (index, document) in application.documents.iter().enumerate() {
            self.check_document(&child_path("documents", index, &document.id), document, &application.id);
        }
    }

    fn check_unique_ids<'a>(&mut self, collection: &str, ids: impl Iterator<Item = &'a str>) {
        // Empty IDs are reported per entity, not as duplicates of each other
        for id in ids.filter(|id| !id.is_empty()).duplicates() {
            self.push(
                ValidationErrorKind::DuplicateIdentity,
                format!("{}[{}]", collection, id),
                format!("ID '{}' is used by more than one entry in {}", id, collection),
            );
        }
    }

    fn check_api(&mut self, path: &str, api: &ApiDefinition) {
        self.require_non_empty(&format!("{}.id", path), &api.id);
        self.require_url(&format!("{}.targetUrl", path), &api.target_url);

        if let Some(credentials) = &api.credentials {
            self.check_credentials(&format!("{}.credentials", path), credentials);
        }

        if let Some(spec) = &api.api_spec {
            let spec_path = format!("{}.apiSpec", path);
            self.check_spec_data(&spec_path, spec);
            if spec.spec_type.as_api_type() != Some(api.api_type) {
                self.push(
                    ValidationErrorKind::TypeMismatch,
                    format!("{}.type", spec_path),
                    format!(
                        "Spec of type {} cannot describe an API of type {}",
                        spec.spec_type, api.api_type
                    ),
                );
            }
        }
    }

    fn check_credentials(&mut self, path: &str, credentials: &Credentials) {
        match &credentials.auth {
            Auth::Oauth(oauth) => {
                let oauth_path = format!("{}.oauth", path);
                self.require_url(&format!("{}.url", oauth_path), &oauth.url);
                self.require_non_empty(&format!("{}.clientId", oauth_path), &oauth.client_id);
                self.require_non_empty(&format!("{}.clientSecret", oauth_path), &oauth.client_secret);
            }
            Auth::Basic(basic) => self.check_basic(&format!("{}.basic", path), basic),
            Auth::None => {
                self.push(
                    ValidationErrorKind::StructuralViolation,
                    path,
                    "Credentials are present but set no auth method; omit them instead",
                );
            }
        }

        if let Some(csrf) = &credentials.csrf_info {
            self.require_url(
                &format!("{}.csrfInfo.tokenEndpointUrl", path),
                &csrf.token_endpoint_url,
            );
        }
    }

    pub(crate) fn check_basic(&mut self, path: &str, basic: &Basic) {
        self.require_non_empty(&format!("{}.username", path), &basic.username);
        self.require_non_empty(&format!("{}.password", path), &basic.password);
    }

    fn check_event_api(&mut self, path: &str, event_api: &EventApiDefinition) {
        self.require_non_empty(&format!("{}.id", path), &event_api.id);

        if let Some(spec) = &event_api.api_spec {
            let spec_path = format!("{}.apiSpec", path);
            self.check_spec_data(&spec_path, spec);
            if spec.spec_type.as_event_api_type().is_none() {
                self.push(
                    ValidationErrorKind::TypeMismatch,
                    format!("{}.type", spec_path),
                    format!("Spec of type {} cannot describe an event API", spec.spec_type),
                );
            }
        }
    }

    fn check_document(&mut self, path: &str, document: &Document, application_id: &str) {
        self.require_non_empty(&format!("{}.id", path), &document.id);

        if document.application_id != application_id {
            self.push(
                ValidationErrorKind::StructuralViolation,
                format!("{}.applicationId", path),
                format!(
                    "Document belongs to application '{}' but is owned by '{}'",
                    document.application_id, application_id
                ),
            );
        }
    }

    fn check_spec_data(&mut self, path: &str, spec: &ApiSpec) {
        if spec.data.is_empty() {
            self.push(
                ValidationErrorKind::StructuralViolation,
                format!("{}.data", path),
                "Spec is attached but carries no data",
            );
        }
    }

    fn require_non_empty(&mut self, path: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(
                ValidationErrorKind::StructuralViolation,
                path,
                "Required field is empty",
            );
            return false;
        }
        true
    }

    fn require_url(&mut self, path: &str, value: &str) {
        if !self.require_non_empty(path, value) {
            return;
        }
        match url::Url::parse(value) {
            Err(e) => self.push(
                ValidationErrorKind::StructuralViolation,
                path,
                format!("'{}' is not a valid absolute URL: {}", value, e),
            ),
            // mailto:, urn: and the like parse but can't be called
            Ok(parsed) if parsed.cannot_be_a_base() || parsed.host_str().map_or(true, str::is_empty) => {
                self.push(
                    ValidationErrorKind::StructuralViolation,
                    path,
                    format!("'{}' has no host to connect to", value),
                )
            }
            Ok(_) => {}
        }
    }
}

pub(crate) fn child_path(collection: &str, index: usize, id: &str) -> String {
    if id.is_empty() {
        format!("{}[#{}]", collection, index)
    } else {
        format!("{}[{}]", collection, id)
    }
}
