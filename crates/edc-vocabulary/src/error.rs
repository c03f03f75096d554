use std::path::PathBuf;

use edc_model::{ItemId, VocabularyKind};

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    #[error("{source_name} line {line}: {message}")]
    InvalidRow {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("{source_name}: duplicate item id {id} in {kind} vocabulary")]
    DuplicateItem {
        source_name: String,
        kind: VocabularyKind,
        id: ItemId,
    },
}

impl VocabularyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(source_name: &str, error: &csv::Error) -> Self {
        Self::Csv {
            source_name: source_name.to_string(),
            message: error.to_string(),
        }
    }
}
