use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::source::payload::ApplicationPayload;
use crate::source::traits::{ApplicationSource, Fetched, Undecodable};

/// Reads application snapshots from `*.json` files in a directory.
///
/// Files are visited in name order. A file holds either a single
/// application object or an array of them.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn snapshot_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read snapshot directory {}", self.dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait::async_trait]
impl ApplicationSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Fetched>> {
        let mut fetched = Vec::new();

        for path in self.snapshot_files().await? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let contents = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;

            let items = decode_file(&name, &contents);
            log::debug!("Read {} application(s) from {}", items.len(), name);
            fetched.extend(items);
        }

        Ok(fetched)
    }
}

/// Split a file into entries and decode each one on its own
pub fn decode_file(name: &str, contents: &[u8]) -> Vec<Fetched> {
    let value: serde_json::Value = match serde_json::from_slice(contents) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Snapshot file {} is not valid JSON: {}", name, e);
            return vec![Fetched {
                origin: name.to_string(),
                payload: Err(Undecodable {
                    id: None,
                    reason: format!("Invalid JSON: {}", e),
                }),
            }];
        }
    };

    match value {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| decode_entry(format!("{}[{}]", name, index), entry))
            .collect(),
        entry => vec![decode_entry(name.to_string(), entry)],
    }
}

fn decode_entry(origin: String, entry: serde_json::Value) -> Fetched {
    let id = entry
        .get("id")
        .and_then(|id| id.as_str())
        .map(ToString::to_string);

    let payload = serde_json::from_value::<ApplicationPayload>(entry).map_err(|e| Undecodable {
        id,
        reason: e.to_string(),
    });

    Fetched { origin, payload }
}
