use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use dj_core::core::{group_by_dialogue, Dataset, DialogueId, GroupedDataset};

use crate::error::ExportError;
use crate::source::DatasetSource;

pub const DEFAULT_OUTPUT_PATH: &str = "data/json_output1.json";

#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub dialogues: Option<Vec<DialogueId>>,
}

impl ExportFilter {
    /// Keeps the rows whose dialogue is selected, in their original order.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let Some(selected) = self.dialogues.as_deref() else {
            return dataset.clone();
        };

        dataset
            .iter()
            .filter(|record| selected.contains(&record.dialogue_id()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub path: PathBuf,
    /// Create missing parent directories instead of failing.
    pub create_dirs: bool,
}

impl Default for ExportTarget {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            create_dirs: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub dialogues: usize,
    pub records: usize,
    pub path: PathBuf,
}

/// Renders the grouped dataset as a JSON object keyed by dialogue id, with
/// two-space indentation.
pub fn export_to_json(grouped: &GroupedDataset) -> Result<String, ExportError> {
    let json = serde_json::to_string_pretty(grouped)?;
    Ok(json)
}

/// Flat array-of-rows rendering of an ungrouped dataset.
pub fn export_records_json(dataset: &Dataset) -> Result<String, ExportError> {
    let json = serde_json::to_string(dataset)?;
    Ok(json)
}

/// Creates or truncates `path` and writes `contents` to it. The handle is
/// closed before returning, on success and on failure.
pub fn write_json_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(())
}

pub fn write_grouped(target: &ExportTarget, grouped: &GroupedDataset) -> Result<(), ExportError> {
    let json = export_to_json(grouped)?;

    if target.create_dirs {
        if let Some(parent) = target.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ExportError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    write_json_file(&target.path, &json)
}

pub fn read_grouped_json(path: &Path) -> Result<GroupedDataset, ExportError> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grouped = serde_json::from_str(&content)?;
    Ok(grouped)
}

/// Load, filter, group and write in one pass.
pub fn export_dataset(
    source: &dyn DatasetSource,
    filter: &ExportFilter,
    target: &ExportTarget,
) -> Result<ExportSummary, ExportError> {
    let dataset = filter.apply(&source.load()?);
    tracing::info!(source = %source.describe(), records = dataset.len(), "dataset loaded");

    let grouped = group_by_dialogue(&dataset);
    for group in grouped.iter() {
        tracing::debug!(dialogue = %group.dialogue_id, turns = group.records.len(), "grouped dialogue");
    }

    write_grouped(target, &grouped)?;
    tracing::info!(
        path = %target.path.display(),
        dialogues = grouped.len(),
        "grouped dataset written"
    );

    Ok(ExportSummary {
        dialogues: grouped.len(),
        records: grouped.record_count(),
        path: target.path.clone(),
    })
}
