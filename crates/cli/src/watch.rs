use quicksearch_api::IndexLifecycle;
use quicksearch_core::{EngineHandle, SearchConfig};
use std::path::PathBuf;
use tracing::info;

pub async fn run(source: PathBuf, config: SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = EngineHandle::new(source, config);
    let source = engine.engine().source().to_path_buf();

    info!("Initializing index for {}...", source.display());
    engine.engine().open().await?;
    info!("Initial indexing complete.");

    let watcher = engine.start_watch().await?;
    println!("Watching {}. Press Ctrl+C to stop.", source.display());

    tokio::signal::ctrl_c().await?;
    watcher.stop();
    info!("Watcher stopped.");

    Ok(())
}
