use serde::{Deserialize, Serialize};

/// Access configuration for an API. The auth method is a single variant so
/// a value holding both OAuth and Basic settings cannot be built; the
/// management-plane shape with two optional fields is converted at the
/// fetch boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub auth: Auth,
    /// Optional CSRF token fetch, usable with either auth method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_info: Option<CsrfInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Auth {
    Oauth(Oauth),
    Basic(Basic),
    /// Present only so an empty wrapper can be represented and rejected
    None,
}

/// Client-credentials token request settings
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Oauth {
    /// URL to OAuth token provider
    pub url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Basic {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsrfInfo {
    pub token_endpoint_url: String,
}

impl Credentials {
    pub fn oauth(url: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            auth: Auth::Oauth(Oauth {
                url: url.to_string(),
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            }),
            csrf_info: None,
        }
    }

    pub fn basic(username: &str, password: &str) -> Self {
        Self {
            auth: Auth::Basic(Basic {
                username: username.to_string(),
                password: password.to_string(),
            }),
            csrf_info: None,
        }
    }

    pub fn with_csrf(mut self, token_endpoint_url: &str) -> Self {
        self.csrf_info = Some(CsrfInfo {
            token_endpoint_url: token_endpoint_url.to_string(),
        });
        self
    }
}

impl Auth {
    pub fn method_name(&self) -> &'static str {
        match self {
            Auth::Oauth(_) => "oauth",
            Auth::Basic(_) => "basic",
            Auth::None => "none",
        }
    }
}

// Secrets stay out of logs and error messages
impl std::fmt::Debug for Oauth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oauth")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for Basic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Basic")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_variant_is_tagged() {
        let credentials = Credentials::basic("u", "p").with_csrf("https://x/csrf");
        let json = serde_json::to_value(&credentials).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "auth": {"method": "basic", "username": "u", "password": "p"},
                "csrfInfo": {"tokenEndpointUrl": "https://x/csrf"}
            })
        );

        let parsed: Credentials = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, credentials);
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let oauth = Credentials::oauth("https://x/token", "client", "s3cr3t");
        let basic = Credentials::basic("user", "hunter2");

        let rendered = format!("{:?} {:?}", oauth, basic);
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("client"));
        assert!(rendered.contains("user"));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Credentials::oauth("u", "c", "s").auth.method_name(), "oauth");
        assert_eq!(Credentials::basic("u", "p").auth.method_name(), "basic");
        assert_eq!(Auth::None.method_name(), "none");
    }
}
