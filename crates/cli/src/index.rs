use quicksearch_api::{IndexLifecycle, SearchService};
use quicksearch_core::{EngineHandle, SearchConfig};
use std::path::PathBuf;
use tracing::info;

pub async fn run(source: PathBuf, config: SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = EngineHandle::new(source, config);
    let source = engine.engine().source().to_path_buf();

    info!("Indexing {}...", source.display());
    let start = std::time::Instant::now();
    engine.rebuild().await?;
    engine.save().await?;

    let stats = engine.get_stats().await?;
    println!("Indexed {} in {:?}", source.display(), start.elapsed());
    println!("Names:   {}", stats.name_count);
    println!("Entries: {}", stats.entry_count);
    println!("Nodes:   {}", stats.node_count);
    if stats.skipped_records > 0 {
        println!("Skipped: {} malformed records", stats.skipped_records);
    }
    println!("Snapshot: {}", engine.engine().index_path().display());

    Ok(())
}
