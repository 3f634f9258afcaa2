use std::path::PathBuf;

use cinematch_api::{
    config::Config,
    init_tracing,
    services::{ModelArtifact, RankingEngine, TableBuilder},
};

/// Generates the precomputed recommendation table from the model artifact.
///
/// Usage: `build-table [OUTPUT_PATH]`; paths default to `MODEL_PATH` and `TABLE_PATH`.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.table_path));

    let artifact = ModelArtifact::load(&config.model_path)?;
    let engine = RankingEngine::from_artifact(artifact);

    let table = TableBuilder::new(&engine).with_progress_bar().build();
    table.save(&output)?;

    tracing::info!(path = %output.display(), entries = table.len(), "Done");
    Ok(())
}
