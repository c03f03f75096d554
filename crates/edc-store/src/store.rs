use std::collections::BTreeMap;

use edc_model::{
    Audited, DeathReport, DeathReportData, OffStudyRecord, RegisteredSubject, SubjectIdentifier,
};
use edc_validate::SubjectLookup;
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Registered subjects, their death reports, and derived off-study records.
#[derive(Debug, Clone, Default)]
pub struct DeathReportStore {
    pub(crate) subjects: BTreeMap<SubjectIdentifier, RegisteredSubject>,
    pub(crate) reports: BTreeMap<SubjectIdentifier, DeathReport>,
    pub(crate) off_study: BTreeMap<SubjectIdentifier, OffStudyRecord>,
}

impl DeathReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subject. Identifiers are unique.
    pub fn register_subject(&mut self, subject: RegisteredSubject) -> Result<&RegisteredSubject> {
        let key = subject.subject_identifier.clone();
        if self.subjects.contains_key(&key) {
            return Err(StoreError::DuplicateSubject { subject: key });
        }
        debug!("registered subject");
        Ok(self.subjects.entry(key).or_insert(subject))
    }

    pub fn subject(&self, identifier: &SubjectIdentifier) -> Option<&RegisteredSubject> {
        self.subjects.get(identifier)
    }

    pub fn subjects(&self) -> impl Iterator<Item = &RegisteredSubject> {
        self.subjects.values()
    }

    /// Store a new death report and take its subject off study.
    ///
    /// Fails if the subject is unknown or already has a report.
    pub fn create_death_report(&mut self, report: DeathReport) -> Result<&DeathReport> {
        let key = report.subject().clone();
        if !self.subjects.contains_key(&key) {
            return Err(StoreError::UnknownSubject { subject: key });
        }
        if self.reports.contains_key(&key) {
            return Err(StoreError::DuplicateDeathReport { subject: key });
        }

        let user = report.audit().user_created.clone();
        if let Some(record) = OffStudyRecord::from_source(&key, &report, &user) {
            self.off_study.insert(key.clone(), record);
        }
        info!(report_id = %report.id(), "created death report");
        Ok(self.reports.entry(key).or_insert(report))
    }

    /// Replace the data of an existing report, keeping its identity.
    pub fn update_death_report(
        &mut self,
        data: DeathReportData,
        user: &str,
    ) -> Result<&DeathReport> {
        let key = data.registered_subject.clone();
        let Some(report) = self.reports.get_mut(&key) else {
            return Err(StoreError::NoDeathReport { subject: key });
        };
        report.data = data;
        report.touch(user);

        if let Some(record) = self.off_study.get_mut(&key) {
            record.offstudy_date = report.data.death_date;
            record.touch(user);
        }
        info!(report_id = %report.id(), "updated death report");
        Ok(report)
    }

    /// Remove a subject's report and the off-study record it created.
    pub fn delete_death_report(&mut self, subject: &SubjectIdentifier) -> Result<DeathReport> {
        let report = self
            .reports
            .remove(subject)
            .ok_or_else(|| StoreError::NoDeathReport {
                subject: subject.clone(),
            })?;
        self.off_study.remove(subject);
        info!(report_id = %report.id(), "deleted death report");
        Ok(report)
    }

    pub fn death_report_for(&self, subject: &SubjectIdentifier) -> Option<&DeathReport> {
        self.reports.get(subject)
    }

    pub fn death_reports(&self) -> impl Iterator<Item = &DeathReport> {
        self.reports.values()
    }

    pub fn off_study_record(&self, subject: &SubjectIdentifier) -> Option<&OffStudyRecord> {
        self.off_study.get(subject)
    }
}

impl SubjectLookup for DeathReportStore {
    fn find_subject(&self, identifier: &SubjectIdentifier) -> Option<&RegisteredSubject> {
        self.subject(identifier)
    }
}
