pub mod config;
pub mod logic;
pub mod model;
pub mod source;
pub mod store;

// Export logic types
pub use logic::{
    equal, fingerprint, index_by_key, sorted_keys, validate, validate_first, Keyed,
    ValidationError, ValidationErrorKind, ValidationErrors,
};

// Export all model types
pub use model::*;

// Export source and store types
pub use source::{collect_batch, fetch_batch, ApplicationSource, Batch, FileSource};
pub use store::{SnapshotCache, SnapshotStatus};
