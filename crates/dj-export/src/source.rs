use std::fs::File;
use std::path::{Path, PathBuf};

use dj_core::core::{Dataset, DialogueId, Record};
use serde::Deserialize;

use crate::error::ExportError;

/// Anything that can hand over a complete, ordered dataset in one call.
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset, ExportError>;

    /// Short human-readable label used in log lines.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// SampleTable — built-in literal table
// ---------------------------------------------------------------------------

const SAMPLE_ROWS: [(i64, &str, &str); 10] = [
    (1, "aaa", "x"),
    (1, "bbb", "y"),
    (1, "ccc", "z"),
    (1, "ddd", "w"),
    (2, "aaa", "x"),
    (2, "bbb", "y"),
    (2, "ccc", "z"),
    (3, "aaa", "x"),
    (3, "bbb", "y"),
    (3, "ccc", "z"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleTable;

impl SampleTable {
    pub fn dataset() -> Dataset {
        SAMPLE_ROWS
            .iter()
            .map(|&(dialogue, question, answer)| Record::new(dialogue, question, answer))
            .collect()
    }
}

impl DatasetSource for SampleTable {
    fn load(&self) -> Result<Dataset, ExportError> {
        Ok(Self::dataset())
    }

    fn describe(&self) -> String {
        "built-in sample table".to_owned()
    }
}

// ---------------------------------------------------------------------------
// CsvSource — headered CSV file
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Dialogue")]
    dialogue_id: i64,
    #[serde(alias = "Q")]
    question: String,
    #[serde(alias = "A")]
    answer: String,
}

impl From<CsvRow> for Record {
    fn from(row: CsvRow) -> Self {
        Record::new(DialogueId::new(row.dialogue_id), row.question, row.answer)
    }
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvSource {
    fn load(&self) -> Result<Dataset, ExportError> {
        let file = File::open(&self.path).map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(file);

        let records = reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(Record::from))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(path = %self.path.display(), rows = records.len(), "loaded csv dataset");
        Ok(Dataset::new(records))
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn test_sample_table_matches_literal_rows() {
        let dataset = SampleTable.load().expect("load sample");

        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.records()[3], Record::new(1, "ddd", "w"));
        assert_eq!(dataset.records()[9], Record::new(3, "ccc", "z"));
        assert_eq!(SampleTable.describe(), "built-in sample table");
    }

    #[test]
    fn test_csv_source_reads_rows_in_order() {
        let file = write_csv("dialogue_id,question,answer\n4,hi,hello\n4,bye,later\n5,why,because\n");

        let dataset = CsvSource::new(file.path()).load().expect("load csv");

        assert_eq!(
            dataset.into_records(),
            vec![
                Record::new(4, "hi", "hello"),
                Record::new(4, "bye", "later"),
                Record::new(5, "why", "because"),
            ]
        );
    }

    #[test]
    fn test_csv_source_accepts_short_column_names() {
        let file = write_csv("Dialogue,Q,A\n1,aaa,x\n2,bbb,y\n");

        let dataset = CsvSource::new(file.path()).load().expect("load csv");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1], Record::new(2, "bbb", "y"));
    }

    #[test]
    fn test_csv_source_handles_quoted_commas() {
        let file = write_csv("dialogue_id,question,answer\n1,\"where, exactly?\",\"here, there\"\n");

        let dataset = CsvSource::new(file.path()).load().expect("load csv");

        assert_eq!(dataset.records()[0].question(), "where, exactly?");
        assert_eq!(dataset.records()[0].answer(), "here, there");
    }

    #[test]
    fn test_csv_source_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = CsvSource::new(dir.path().join("absent.csv"));

        let err = source.load().unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_csv_source_bad_dialogue_id() {
        let file = write_csv("dialogue_id,question,answer\nabc,q,a\n");

        let err = CsvSource::new(file.path()).load().unwrap_err();

        assert!(matches!(err, ExportError::Csv(_)));
    }
}
