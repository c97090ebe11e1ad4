pub mod compare;
pub mod keys;
pub mod validate;

pub use compare::{equal, fingerprint, sorted_refs};
pub use keys::{index_by_key, sorted_keys, Keyed};
pub use validate::*;
