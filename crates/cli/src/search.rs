use crate::shell::view;
use quicksearch_api::SearchService;
use quicksearch_core::{EngineHandle, SearchConfig};
use std::path::PathBuf;

pub async fn run(
    source: PathBuf,
    query: String,
    config: SearchConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = EngineHandle::new(source, config);
    engine.engine().open().await?;

    let groups = engine.search(&query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        println!("{}", view::render_groups(&groups));
    }
    Ok(())
}
