use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dj_core::core::{Dataset, DialogueId, Record};
use rusqlite::{params, Connection, OpenFlags, Row};

use crate::error::ExportError;
use crate::source::DatasetSource;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS dialogue_turns (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    dialogue_id INTEGER NOT NULL,
    question TEXT NOT NULL,
    answer TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_dialogue_turns_dialogue ON dialogue_turns(dialogue_id);
"#;

pub trait RecordStore: Send + Sync {
    fn init(&self) -> Result<(), ExportError>;
    fn insert_record(&self, record: &Record) -> Result<(), ExportError>;
    /// Appends every record of `dataset` atomically, in dataset order.
    fn insert_dataset(&self, dataset: &Dataset) -> Result<usize, ExportError>;
    fn list_records(&self) -> Result<Vec<Record>, ExportError>;
    fn list_records_for_dialogue(
        &self,
        dialogue_id: DialogueId,
    ) -> Result<Vec<Record>, ExportError>;
    fn count_records(&self) -> Result<u64, ExportError>;
}

pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
    label: String,
}

impl SqliteRecordStore {
    pub fn new(path: &Path) -> Result<Self, ExportError> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            label: format!("sqlite database {}", path.display()),
        })
    }

    pub fn new_in_memory() -> Result<Self, ExportError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            label: "in-memory sqlite database".to_owned(),
        })
    }

    /// Opens `path` and makes sure the schema exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let store = Self::new(&path.into())?;
        store.init()?;
        Ok(store)
    }

    /// Opens an existing dialogue database read-only. The schema is checked,
    /// never created, so a foreign or empty file is rejected untouched.
    pub fn open_existing(path: &Path) -> Result<Self, ExportError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let not_dialogue_db = |reason: String| ExportError::NotDialogueDatabase {
            path: path.to_path_buf(),
            reason,
        };

        let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        if version != SCHEMA_VERSION {
            return Err(not_dialogue_db(format!(
                "schema version {version}, expected {SCHEMA_VERSION}"
            )));
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'dialogue_turns')",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(not_dialogue_db("no dialogue_turns table".to_owned()));
        }

        Ok(Self {
            conn: Mutex::new(conn),
            label: format!("sqlite database {}", path.display()),
        })
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("sqlite mutex poisoned")
    }
}

impl RecordStore for SqliteRecordStore {
    fn init(&self) -> Result<(), ExportError> {
        let conn = self.lock_conn();
        let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        conn.execute_batch(SCHEMA_SQL)?;
        if version < SCHEMA_VERSION {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn insert_record(&self, record: &Record) -> Result<(), ExportError> {
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO dialogue_turns (dialogue_id, question, answer) VALUES (?1, ?2, ?3)",
            params![
                record.dialogue_id().value(),
                record.question(),
                record.answer(),
            ],
        )?;
        Ok(())
    }

    fn insert_dataset(&self, dataset: &Dataset) -> Result<usize, ExportError> {
        let mut conn = self.lock_conn();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO dialogue_turns (dialogue_id, question, answer) VALUES (?1, ?2, ?3)",
            )?;
            for record in dataset {
                stmt.execute(params![
                    record.dialogue_id().value(),
                    record.question(),
                    record.answer(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(dataset.len())
    }

    fn list_records(&self) -> Result<Vec<Record>, ExportError> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(
            "SELECT dialogue_id, question, answer
             FROM dialogue_turns
             ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map([], record_from_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn list_records_for_dialogue(
        &self,
        dialogue_id: DialogueId,
    ) -> Result<Vec<Record>, ExportError> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(
            "SELECT dialogue_id, question, answer
             FROM dialogue_turns
             WHERE dialogue_id = ?1
             ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map(params![dialogue_id.value()], record_from_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn count_records(&self) -> Result<u64, ExportError> {
        let conn = self.lock_conn();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM dialogue_turns", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl DatasetSource for SqliteRecordStore {
    fn load(&self) -> Result<Dataset, ExportError> {
        let records = self.list_records()?;
        tracing::debug!(source = %self.label, rows = records.len(), "loaded sqlite dataset");
        Ok(Dataset::new(records))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let dialogue_id: i64 = row.get(0)?;
    let question: String = row.get(1)?;
    let answer: String = row.get(2)?;
    Ok(Record::new(DialogueId::new(dialogue_id), question, answer))
}
