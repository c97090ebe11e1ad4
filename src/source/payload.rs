use serde::{Deserialize, Serialize};

use crate::logic::validate::{child_path, ValidationErrorKind, ValidationErrors, Validator};
use crate::model::{
    ApiDefinition, ApiSpec, ApiSpecType, Application, Auth, Basic, Credentials, CsrfInfo,
    Document, EventApiDefinition, Id, Labels, Oauth, RequestParameters,
};

/// Application as delivered by the management plane. Differs from
/// [`Application`] only in how credentials are shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub apis: Vec<ApiDefinitionPayload>,
    #[serde(default)]
    pub event_apis: Vec<EventApiDefinition>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinitionPayload {
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
    pub credentials: Option<CredentialsPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec: Option<ApiSpec>,
}

/// Credentials with OAuth and Basic as independent optional fields, the
/// way the management plane sends them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<Oauth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<Basic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_info: Option<CsrfInfo>,
}

impl ApplicationPayload {
    /// Convert into the typed model and validate it.
    ///
    /// Conversion problems (both auth methods set) and validation errors are
    /// reported together, conversion problems first.
    pub fn into_application(self) -> Result<Application, ValidationErrors> {
        let mut conversion = Validator::default();

        let apis: Vec<ApiDefinition> = self
            .apis
            .into_iter()
            .enumerate()
            .map(|(index, api)| {
                let path = child_path("apis", index, &api.id);
                api.into_definition(&path, &mut conversion)
            })
            .collect();

        let application = Application {
            id: self.id,
            name: self.name,
            description: self.description,
            labels: self.labels,
            apis,
            event_apis: self.event_apis,
            documents: self.documents,
        };

        let mut errors = conversion.into_errors();
        let mut validator = Validator::default();
        validator.check_application(&application);
        errors.extend(validator.into_errors());

        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(application),
        }
    }
}

impl ApiDefinitionPayload {
    fn into_definition(self, path: &str, conversion: &mut Validator) -> ApiDefinition {
        let credentials = self
            .credentials
            .map(|c| c.into_credentials(&format!("{}.credentials", path), conversion));

        ApiDefinition {
            id: self.id,
            name: self.name,
            description: self.description,
            target_url: self.target_url,
            api_type: self.api_type,
            request_parameters: self.request_parameters,
            credentials,
            api_spec: self.api_spec,
        }
    }
}

impl CredentialsPayload {
    fn into_credentials(self, path: &str, conversion: &mut Validator) -> Credentials {
        let auth = match (self.oauth, self.basic) {
            (Some(oauth), None) => Auth::Oauth(oauth),
            (None, Some(basic)) => Auth::Basic(basic),
            (None, None) => Auth::None,
            (Some(oauth), Some(basic)) => {
                conversion.push(
                    ValidationErrorKind::ConflictingVariant,
                    path,
                    "Both OAuth and Basic auth are set; exactly one is allowed",
                );
                // The Basic half is dropped here, so its fields are checked now.
                // The OAuth half goes through regular validation.
                conversion.check_basic(&format!("{}.basic", path), &basic);
                Auth::Oauth(oauth)
            }
        };

        Credentials {
            auth,
            csrf_info: self.csrf_info,
        }
    }
}

impl From<Application> for ApplicationPayload {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            name: application.name,
            description: application.description,
            labels: application.labels,
            apis: application.apis.into_iter().map(Into::into).collect(),
            event_apis: application.event_apis,
            documents: application.documents,
        }
    }
}

impl From<ApiDefinition> for ApiDefinitionPayload {
    fn from(api: ApiDefinition) -> Self {
        Self {
            id: api.id,
            name: api.name,
            description: api.description,
            target_url: api.target_url,
            api_type: api.api_type,
            request_parameters: api.request_parameters,
            credentials: api.credentials.map(Into::into),
            api_spec: api.api_spec,
        }
    }
}

impl From<Credentials> for CredentialsPayload {
    fn from(credentials: Credentials) -> Self {
        let (oauth, basic) = match credentials.auth {
            Auth::Oauth(oauth) => (Some(oauth), None),
            Auth::Basic(basic) => (None, Some(basic)),
            Auth::None => (None, None),
        };
        Self {
            oauth,
            basic,
            csrf_info: credentials.csrf_info,
        }
    }
}
