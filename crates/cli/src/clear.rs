use quicksearch_api::IndexLifecycle;
use quicksearch_core::{EngineHandle, SearchConfig, SearchEngine};
use std::path::PathBuf;
use tracing::info;

pub async fn run(
    source: Option<PathBuf>,
    config: SearchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(source) = source {
        let engine = EngineHandle::new(source.clone(), config);
        info!("Clearing snapshot for {}...", source.display());
        engine.clear_index().await?;
        println!("Snapshot cleared for {}", source.display());
    } else {
        info!("Clearing all snapshots at {}...", config.cache_dir.display());
        SearchEngine::clear_all_indices(&config.cache_dir)?;
        println!("All snapshots cleared.");
    }
    Ok(())
}
