//! Fetch boundary: management-plane payloads, the source trait and the
//! batch step that turns fetched entries into validated applications.

pub mod file;
pub mod payload;
pub mod traits;

pub use file::FileSource;
pub use payload::{ApiDefinitionPayload, ApplicationPayload, CredentialsPayload};
pub use traits::{ApplicationSource, Fetched, Undecodable};

use std::collections::HashSet;

use crate::logic::{ValidationError, ValidationErrorKind, ValidationErrors};
use crate::model::Application;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Keep only the first violation per quarantined application
    pub fail_fast: bool,
}

/// An application left out of a batch, with everything wrong with it
#[derive(Debug, Clone, PartialEq)]
pub struct Quarantined {
    pub origin: String,
    pub application_id: Option<String>,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub accepted: Vec<Application>,
    pub quarantined: Vec<Quarantined>,
}

impl Batch {
    pub fn is_clean(&self) -> bool {
        self.quarantined.is_empty()
    }

    /// IDs still present in the inventory, accepted or quarantined.
    /// Quarantined entries whose ID couldn't be read are left out.
    pub fn inventory_ids(&self) -> Vec<&str> {
        self.accepted
            .iter()
            .map(|a| a.id.as_str())
            .chain(
                self.quarantined
                    .iter()
                    .filter_map(|q| q.application_id.as_deref()),
            )
            .collect()
    }
}

/// Validate every fetched entry, quarantining the bad ones.
///
/// Never fails as a whole. An application ID seen earlier in the batch,
/// whether that entry was accepted or not, quarantines the later occurrence.
pub fn collect_batch(fetched: Vec<Fetched>, options: ValidationOptions) -> Batch {
    let mut batch = Batch::default();
    let mut seen_ids = HashSet::new();

    for item in fetched {
        let (application_id, result) = match item.payload {
            Ok(payload) => {
                let id = Some(payload.id.clone()).filter(|id| !id.is_empty());
                (id, payload.into_application())
            }
            Err(undecodable) => (undecodable.id.clone(), Err(undecodable_errors(&undecodable))),
        };

        let result = match &application_id {
            Some(id) if !seen_ids.insert(id.clone()) => {
                let mut errors = duplicate_application(id);
                if let Err(own) = result {
                    errors.append(own);
                }
                Err(errors)
            }
            _ => result,
        };

        match result {
            Ok(application) => {
                log::debug!("Accepted application {} from {}", application.id, item.origin);
                batch.accepted.push(application);
            }
            Err(errors) => {
                let errors = if options.fail_fast {
                    errors.truncate_to_first()
                } else {
                    errors
                };
                log::warn!(
                    "Quarantined application {} from {}: {}",
                    application_id.as_deref().unwrap_or("<unknown>"),
                    item.origin,
                    errors
                );
                batch.quarantined.push(Quarantined {
                    origin: item.origin,
                    application_id,
                    errors,
                });
            }
        }
    }

    log::info!(
        "Validated batch: {} accepted, {} quarantined",
        batch.accepted.len(),
        batch.quarantined.len()
    );
    batch
}

/// Fetch from a source and validate the result
pub async fn fetch_batch<S: ApplicationSource + ?Sized>(
    source: &S,
    options: ValidationOptions,
) -> anyhow::Result<Batch> {
    let fetched = source.fetch().await?;
    Ok(collect_batch(fetched, options))
}

fn undecodable_errors(undecodable: &Undecodable) -> ValidationErrors {
    ValidationErrors::single(ValidationError::new(
        ValidationErrorKind::StructuralViolation,
        "",
        format!("Could not decode application: {}", undecodable.reason),
    ))
}

fn duplicate_application(id: &str) -> ValidationErrors {
    ValidationErrors::single(ValidationError::new(
        ValidationErrorKind::DuplicateIdentity,
        "id",
        format!("Application ID '{}' appears more than once in the batch", id),
    ))
}
