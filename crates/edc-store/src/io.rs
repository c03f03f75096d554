//! Snapshot save and load.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use edc_model::{DeathReport, OffStudyRecord, RegisteredSubject, SubjectIdentifier};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::store::DeathReportStore;

/// Snapshot schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    schema_version: u32,
    subjects: Vec<&'a RegisteredSubject>,
    death_reports: Vec<&'a DeathReport>,
    off_study: Vec<&'a OffStudyRecord>,
}

#[derive(Deserialize)]
struct Snapshot {
    schema_version: u32,
    #[serde(default)]
    subjects: Vec<RegisteredSubject>,
    #[serde(default)]
    death_reports: Vec<DeathReport>,
    #[serde(default)]
    off_study: Vec<OffStudyRecord>,
}

impl DeathReportStore {
    /// Load a store from a snapshot file.
    ///
    /// Rows are checked against the same links the store enforces: unique
    /// subjects, one report per registered subject, and one off-study record
    /// per report.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;
        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
                path: path.to_path_buf(),
                source: e,
            })?;
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.schema_version,
                max_supported: CURRENT_SCHEMA_VERSION,
                path: path.to_path_buf(),
            });
        }

        let inconsistent =
            |subject: &SubjectIdentifier, problem: &'static str| StoreError::InconsistentSnapshot {
                path: path.to_path_buf(),
                subject: subject.clone(),
                problem,
            };

        let mut store = DeathReportStore::new();
        for subject in snapshot.subjects {
            store.register_subject(subject)?;
        }
        for report in snapshot.death_reports {
            let key = report.subject().clone();
            if !store.subjects.contains_key(&key) {
                return Err(StoreError::UnknownSubject { subject: key });
            }
            if store.reports.contains_key(&key) {
                return Err(StoreError::DuplicateDeathReport { subject: key });
            }
            store.reports.insert(key, report);
        }
        for record in snapshot.off_study {
            let key = record.registered_subject.clone();
            if !store.reports.contains_key(&key) {
                return Err(inconsistent(&key, "has an off-study record but no death report"));
            }
            if store.off_study.contains_key(&key) {
                return Err(inconsistent(&key, "has more than one off-study record"));
            }
            store.off_study.insert(key, record);
        }
        if let Some(key) = store
            .reports
            .keys()
            .find(|key| !store.off_study.contains_key(*key))
        {
            return Err(inconsistent(key, "has a death report but no off-study record"));
        }
        tracing::debug!(
            subjects = store.subjects.len(),
            death_reports = store.reports.len(),
            "loaded store from {}",
            path.display()
        );
        Ok(store)
    }

    /// Load a store, or start an empty one if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save the store as a snapshot file.
    ///
    /// Writes to a temp file first, then renames over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let snapshot = SnapshotRef {
            schema_version: CURRENT_SCHEMA_VERSION,
            subjects: self.subjects.values().collect(),
            death_reports: self.reports.values().collect(),
            off_study: self.off_study.values().collect(),
        };
        let bytes =
            serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, path).map_err(|e| StoreError::Io {
            operation: "rename",
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("saved store to {}", path.display());
        Ok(())
    }
}
