//! Store error types.

use std::path::PathBuf;

use edc_model::SubjectIdentifier;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A subject with this identifier is already registered.
    #[error("subject {subject} is already registered")]
    DuplicateSubject { subject: SubjectIdentifier },

    /// The subject already has a death report.
    #[error("a death report already exists for subject {subject}")]
    DuplicateDeathReport { subject: SubjectIdentifier },

    /// The report refers to a subject that is not registered.
    #[error("subject {subject} is not registered")]
    UnknownSubject { subject: SubjectIdentifier },

    /// No death report exists for the subject.
    #[error("no death report exists for subject {subject}")]
    NoDeathReport { subject: SubjectIdentifier },

    /// File I/O error.
    #[error("failed to {operation} file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded or decoded.
    #[error("invalid store file {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot rows contradict each other.
    #[error("inconsistent store file {path}: subject {subject} {problem}")]
    InconsistentSnapshot {
        path: PathBuf,
        subject: SubjectIdentifier,
        problem: &'static str,
    },

    /// Snapshot written by a newer version.
    #[error("store file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
