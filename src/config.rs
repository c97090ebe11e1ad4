use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::source::ValidationOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the snapshot files to check
    pub snapshot_dir: String,
    /// Directory holding the previously applied snapshot, if any
    pub previous_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub fail_fast: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: "snapshots".to_string(),
            previous_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file and
    /// `APPSYNC_`-prefixed environment variables, in that order
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        // APPSYNC_SOURCE__SNAPSHOT_DIR, APPSYNC_VALIDATION__FAIL_FAST, ...
        config = config.add_source(
            config::Environment::with_prefix("APPSYNC")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        PathBuf::from(&self.source.snapshot_dir)
    }

    pub fn previous_dir(&self) -> Option<PathBuf> {
        self.source
            .previous_dir
            .as_ref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            fail_fast: self.validation.fail_fast,
        }
    }
}
