use anyhow::Result;

use crate::source::payload::ApplicationPayload;

/// One application as fetched, or the reason it could not be decoded.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Where the entry came from, for logs (file name and position, URL, ...)
    pub origin: String,
    pub payload: std::result::Result<ApplicationPayload, Undecodable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undecodable {
    /// ID if it could still be read from the raw entry
    pub id: Option<String>,
    pub reason: String,
}

/// Producer of application snapshots from the management plane.
///
/// An implementation fails as a whole only when the transport does;
/// entries that can't be decoded are returned as [`Undecodable`] so one
/// malformed application doesn't abort the batch.
#[async_trait::async_trait]
pub trait ApplicationSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Fetched>>;
}
