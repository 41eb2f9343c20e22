use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a dialogue database: {reason}", path.display())]
    NotDialogueDatabase { path: PathBuf, reason: String },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExportError {
    /// True when the underlying failure is a filesystem error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Write { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io::{Error as IoError, ErrorKind};

    use super::*;

    #[test]
    fn test_display_write_error_includes_path() {
        let err = ExportError::Write {
            path: PathBuf::from("data/json_output1.json"),
            source: IoError::new(ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "failed to write data/json_output1.json");
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("No such file or directory")
        );
        assert!(err.is_io());
    }
}
