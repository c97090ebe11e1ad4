use std::collections::BTreeMap;

use crate::model::{ApiDefinition, Application, Document, EventApiDefinition};

/// Stable identity used by a reconciler to pair a prior entity with its
/// successor. Keys are unique among siblings of a valid application.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Application {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ApiDefinition {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for EventApiDefinition {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Document {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Index entities by key, iterating in key order.
///
/// On duplicate keys the first entry wins; run validation first if that
/// matters.
pub fn index_by_key<T: Keyed>(items: &[T]) -> BTreeMap<&str, &T> {
    let mut index = BTreeMap::new();
    for item in items {
        index.entry(item.key()).or_insert(item);
    }
    index
}

/// Keys of the given entities in ascending order, without duplicates
pub fn sorted_keys<T: Keyed>(items: &[T]) -> Vec<&str> {
    index_by_key(items).into_keys().collect()
}
