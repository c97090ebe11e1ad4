use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Id = String;

/// Selection labels attached to an application. Keys are unordered, the
/// values under each key keep the order they were fetched in.
pub type Labels = BTreeMap<String, Vec<String>>;

/// Header or query parameter name mapped to its ordered values.
pub type ParamMap = BTreeMap<String, Vec<String>>;

/// Serialization family of a spec blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecFormat {
    Yaml,
    Json,
}

/// Kind of an API definition and of the specs usable with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiSpecType {
    Odata,
    OpenApi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventApiSpecType {
    AsyncApi,
}

/// Tag carried by an attached spec blob. Covers both the API and the
/// event API vocabularies so a mismatch can be reported instead of being
/// rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecType {
    Odata,
    OpenApi,
    AsyncApi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentFormat {
    Markdown,
}

impl SpecType {
    pub fn as_api_type(self) -> Option<ApiSpecType> {
        match self {
            SpecType::Odata => Some(ApiSpecType::Odata),
            SpecType::OpenApi => Some(ApiSpecType::OpenApi),
            SpecType::AsyncApi => None,
        }
    }

    pub fn as_event_api_type(self) -> Option<EventApiSpecType> {
        match self {
            SpecType::AsyncApi => Some(EventApiSpecType::AsyncApi),
            SpecType::Odata | SpecType::OpenApi => None,
        }
    }
}

impl From<ApiSpecType> for SpecType {
    fn from(value: ApiSpecType) -> Self {
        match value {
            ApiSpecType::Odata => SpecType::Odata,
            ApiSpecType::OpenApi => SpecType::OpenApi,
        }
    }
}

impl From<EventApiSpecType> for SpecType {
    fn from(value: EventApiSpecType) -> Self {
        match value {
            EventApiSpecType::AsyncApi => SpecType::AsyncApi,
        }
    }
}

impl std::fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SpecFormat::Yaml => write!(f, "YAML"),
            SpecFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for SpecFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YAML" => Ok(SpecFormat::Yaml),
            "JSON" => Ok(SpecFormat::Json),
            _ => Err(format!("Unknown spec format: {}", s)),
        }
    }
}

impl std::fmt::Display for ApiSpecType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", SpecType::from(*self))
    }
}

impl std::str::FromStr for ApiSpecType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<SpecType>()
            .ok()
            .and_then(SpecType::as_api_type)
            .ok_or_else(|| format!("Unknown API spec type: {}", s))
    }
}

impl std::fmt::Display for EventApiSpecType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", SpecType::from(*self))
    }
}

impl std::str::FromStr for EventApiSpecType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<SpecType>()
            .ok()
            .and_then(SpecType::as_event_api_type)
            .ok_or_else(|| format!("Unknown event API spec type: {}", s))
    }
}

impl std::fmt::Display for SpecType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SpecType::Odata => write!(f, "ODATA"),
            SpecType::OpenApi => write!(f, "OPEN_API"),
            SpecType::AsyncApi => write!(f, "ASYNC_API"),
        }
    }
}

impl std::str::FromStr for SpecType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ODATA" => Ok(SpecType::Odata),
            "OPEN_API" => Ok(SpecType::OpenApi),
            "ASYNC_API" => Ok(SpecType::AsyncApi),
            _ => Err(format!("Unknown spec type: {}", s)),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DocumentFormat::Markdown => write!(f, "MARKDOWN"),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKDOWN" => Ok(DocumentFormat::Markdown),
            _ => Err(format!("Unknown document format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling_matches_display() {
        assert_eq!(serde_json::to_string(&SpecType::OpenApi).unwrap(), "\"OPEN_API\"");
        assert_eq!(serde_json::to_string(&SpecType::AsyncApi).unwrap(), "\"ASYNC_API\"");
        assert_eq!(serde_json::to_string(&SpecFormat::Yaml).unwrap(), "\"YAML\"");
        assert_eq!(SpecType::OpenApi.to_string(), "OPEN_API");
        assert_eq!(ApiSpecType::Odata.to_string(), "ODATA");
        assert_eq!(EventApiSpecType::AsyncApi.to_string(), "ASYNC_API");
        assert_eq!(DocumentFormat::Markdown.to_string(), "MARKDOWN");
    }

    #[test]
    fn test_closed_vocabularies_reject_unknown_strings() {
        assert!("GRAPHQL".parse::<SpecType>().is_err());
        assert!("ASYNC_API".parse::<ApiSpecType>().is_err());
        assert!("OPEN_API".parse::<EventApiSpecType>().is_err());
        assert!("markdown".parse::<DocumentFormat>().is_err());
        assert!(serde_json::from_str::<ApiSpecType>("\"SOAP\"").is_err());

        assert_eq!("ODATA".parse::<ApiSpecType>(), Ok(ApiSpecType::Odata));
        assert_eq!("JSON".parse::<SpecFormat>(), Ok(SpecFormat::Json));
    }

    #[test]
    fn test_spec_type_families() {
        assert_eq!(SpecType::Odata.as_api_type(), Some(ApiSpecType::Odata));
        assert_eq!(SpecType::AsyncApi.as_api_type(), None);
        assert_eq!(SpecType::AsyncApi.as_event_api_type(), Some(EventApiSpecType::AsyncApi));
        assert_eq!(SpecType::OpenApi.as_event_api_type(), None);
        assert_eq!(SpecType::from(ApiSpecType::OpenApi), SpecType::OpenApi);
    }
}
