use quicksearch_core::ingest::json;
use quicksearch_core::{EngineHandle, SearchConfig};
use std::path::PathBuf;
use tracing::info;

pub async fn run(
    source: PathBuf,
    output: Option<PathBuf>,
    config: SearchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = EngineHandle::new(source, config);
    engine.engine().open().await?;

    let version = engine.index().await?;
    let records = version.index.to_records();
    let text = json::to_json(&records)?;

    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            info!("Exported {} records to {}", records.len(), path.display());
            println!("Exported {} records to {}", records.len(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
