use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::logic::{equal, fingerprint};
use crate::model::{Application, Id};

/// Last accepted snapshot of one application
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub application: Application,
    pub fingerprint: String,
    pub fetched_at: DateTime<Utc>,
}

/// How a newly observed snapshot relates to the cached one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    New,
    Unchanged,
    Changed,
}

/// In-memory record of the snapshots a reconciler last applied, keyed by
/// application ID. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    entries: Arc<RwLock<HashMap<Id, CachedSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `application` and report whether it differs from what was
    /// cached. An unchanged snapshot keeps its original `fetched_at`.
    pub fn observe(&self, application: Application) -> SnapshotStatus {
        let print = fingerprint(&application);
        let mut entries = self.entries.write();

        let status = match entries.get(&application.id) {
            None => SnapshotStatus::New,
            Some(cached) if cached.fingerprint == print && equal(&cached.application, &application) => {
                return SnapshotStatus::Unchanged;
            }
            Some(_) => SnapshotStatus::Changed,
        };

        log::debug!("Application {} is {:?} ({})", application.id, status, print);
        entries.insert(
            application.id.clone(),
            CachedSnapshot {
                application,
                fingerprint: print,
                fetched_at: Utc::now(),
            },
        );
        status
    }

    pub fn get(&self, id: &str) -> Option<CachedSnapshot> {
        self.entries.read().get(id).cloned()
    }

    /// Drop every application whose ID is not in `ids`, returning the
    /// removed IDs in ascending order
    pub fn retain_ids<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Vec<Id> {
        let keep: HashSet<&str> = ids.into_iter().collect();
        let mut entries = self.entries.write();

        let mut removed: Vec<Id> = entries
            .keys()
            .filter(|id| !keep.contains(id.as_str()))
            .cloned()
            .collect();
        removed.sort();

        for id in &removed {
            entries.remove(id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
