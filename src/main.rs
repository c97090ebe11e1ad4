use appsync_model::config::AppConfig;
use appsync_model::source::{fetch_batch, FileSource};
use appsync_model::store::{SnapshotCache, SnapshotStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let options = config.validation_options();

    let source = FileSource::new(config.snapshot_dir());
    log::info!("Checking snapshots in {}", source.dir().display());
    let batch = fetch_batch(&source, options).await?;

    for quarantined in &batch.quarantined {
        for error in &quarantined.errors {
            println!(
                "INVALID {} ({}): {}",
                quarantined.application_id.as_deref().unwrap_or("<unknown>"),
                quarantined.origin,
                error
            );
        }
    }

    if let Some(previous_dir) = config.previous_dir() {
        let previous = fetch_batch(&FileSource::new(&previous_dir), options).await?;
        if !previous.is_clean() {
            log::warn!(
                "{} application(s) in the previous snapshot are invalid and were skipped",
                previous.quarantined.len()
            );
        }

        let cache = SnapshotCache::new();
        for application in previous.accepted {
            cache.observe(application);
        }

        let removed = cache.retain_ids(batch.inventory_ids());
        for application in &batch.accepted {
            let status = match cache.observe(application.clone()) {
                SnapshotStatus::New => "NEW",
                SnapshotStatus::Unchanged => "UNCHANGED",
                SnapshotStatus::Changed => "CHANGED",
            };
            println!("{} {}", status, application.id);
        }
        for id in removed {
            println!("REMOVED {}", id);
        }
    }

    println!(
        "{} valid, {} invalid",
        batch.accepted.len(),
        batch.quarantined.len()
    );

    if !batch.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}
