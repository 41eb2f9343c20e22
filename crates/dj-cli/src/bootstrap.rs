use std::io::{Error as IoError, ErrorKind};
use std::path::PathBuf;

use anyhow::{bail, ensure};
use dj_export::{CsvSource, DatasetSource, ExportError, ExportTarget, SampleTable, SqliteRecordStore};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, InputKindConfig};

// ---------------------------------------------------------------------------
// InputSpec — where the dataset comes from
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSpec {
    Sample,
    Csv(PathBuf),
    Sqlite(PathBuf),
}

impl InputSpec {
    /// Builds the source. SQLite input is opened read-only; a missing file is
    /// reported instead of being created empty.
    pub fn open(&self) -> Result<Box<dyn DatasetSource>, ExportError> {
        match self {
            Self::Sample => Ok(Box::new(SampleTable)),
            Self::Csv(path) => Ok(Box::new(CsvSource::new(path.clone()))),
            Self::Sqlite(path) => {
                if !path.is_file() {
                    return Err(ExportError::Io {
                        path: path.clone(),
                        source: IoError::new(ErrorKind::NotFound, "database file not found"),
                    });
                }
                Ok(Box::new(SqliteRecordStore::open_existing(path)?))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

// ---------------------------------------------------------------------------
// RuntimeConfig — fully validated runtime configuration
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub input: InputSpec,
    pub target: ExportTarget,
    pub log_level: String,
    pub log_format: LogFormat,
}

// ---------------------------------------------------------------------------
// into_runtime — converts raw AppConfig into validated RuntimeConfig
// ---------------------------------------------------------------------------

pub fn into_runtime(config: AppConfig) -> Result<RuntimeConfig, anyhow::Error> {
    let input = match config.input.kind {
        InputKindConfig::Sample => InputSpec::Sample,
        InputKindConfig::Csv | InputKindConfig::Sqlite => {
            let Some(path) = config.input.path.filter(|p| !p.as_os_str().is_empty()) else {
                bail!("input.path is required for {:?} input", config.input.kind);
            };
            if config.input.kind == InputKindConfig::Csv {
                InputSpec::Csv(path)
            } else {
                InputSpec::Sqlite(path)
            }
        }
    };

    ensure!(
        !config.output.path.as_os_str().is_empty(),
        "output.path must not be empty"
    );

    let log_format = match config.logging.format.as_str() {
        "pretty" => LogFormat::Pretty,
        "json" => LogFormat::Json,
        other => bail!("unknown logging.format {other:?} (expected \"pretty\" or \"json\")"),
    };
    ensure!(
        EnvFilter::try_new(&config.logging.level).is_ok(),
        "invalid logging.level {:?}",
        config.logging.level
    );

    Ok(RuntimeConfig {
        input,
        target: ExportTarget {
            path: config.output.path,
            create_dirs: config.output.create_dirs,
        },
        log_level: config.logging.level,
        log_format,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
