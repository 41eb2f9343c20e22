use std::path::Path;

use anyhow::Context;
use dj_core::core::{group_by_dialogue, DialogueId};
use dj_export::{
    export_dataset, export_records_json, CsvSource, DatasetSource, ExportFilter, ExportSummary,
    RecordStore, SqliteRecordStore,
};

use crate::bootstrap::RuntimeConfig;

pub fn run_export(
    runtime: &RuntimeConfig,
    filter: &ExportFilter,
) -> Result<ExportSummary, anyhow::Error> {
    let source = runtime.input.open()?;
    let summary = export_dataset(source.as_ref(), filter, &runtime.target)?;
    Ok(summary)
}

/// Flat records JSON of the configured dataset.
pub fn render_records(runtime: &RuntimeConfig) -> Result<String, anyhow::Error> {
    let dataset = runtime.input.open()?.load()?;
    Ok(export_records_json(&dataset)?)
}

pub fn render_dialogue(
    runtime: &RuntimeConfig,
    dialogue: DialogueId,
) -> Result<String, anyhow::Error> {
    let dataset = runtime.input.open()?.load()?;
    let grouped = group_by_dialogue(&dataset);
    let records = grouped.lookup(dialogue)?;
    Ok(serde_json::to_string_pretty(records)?)
}

/// Appends the rows of a CSV file to a SQLite store, creating it if needed.
pub fn import_csv(csv_path: &Path, db_path: &Path) -> Result<usize, anyhow::Error> {
    let dataset = CsvSource::new(csv_path).load()?;
    let store = SqliteRecordStore::open(db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;
    let inserted = store.insert_dataset(&dataset)?;
    tracing::info!(
        csv = %csv_path.display(),
        db = %db_path.display(),
        rows = inserted,
        "imported csv rows"
    );
    Ok(inserted)
}
