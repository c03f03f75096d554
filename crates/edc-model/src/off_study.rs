//! Off-study capability: when and why a participant left the study.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditFields, Audited};
use crate::ids::SubjectIdentifier;

/// Records that take a participant off study.
pub trait OffStudy {
    /// Date from which the participant is off study.
    fn off_study_date(&self) -> Option<NaiveDate>;

    /// Short reason recorded for leaving the study.
    fn off_study_reason(&self) -> &str;

    /// Whether the participant is off study on the given date.
    fn is_off_study(&self, on: NaiveDate) -> bool {
        self.off_study_date().is_some_and(|date| date <= on)
    }
}

/// Standalone off-study record kept alongside the report that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffStudyRecord {
    pub registered_subject: SubjectIdentifier,
    pub offstudy_date: NaiveDate,
    pub reason: String,
    pub reason_other: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub audit: AuditFields,
}

impl OffStudyRecord {
    /// Build an off-study record from any record that reports an off-study date.
    ///
    /// Returns `None` when the source has no off-study date.
    pub fn from_source<T: OffStudy>(
        subject: &SubjectIdentifier,
        source: &T,
        user: &str,
    ) -> Option<Self> {
        let offstudy_date = source.off_study_date()?;
        Some(Self {
            registered_subject: subject.clone(),
            offstudy_date,
            reason: source.off_study_reason().to_string(),
            reason_other: None,
            comment: None,
            audit: AuditFields::new(user),
        })
    }
}

impl OffStudy for OffStudyRecord {
    fn off_study_date(&self) -> Option<NaiveDate> {
        Some(self.offstudy_date)
    }

    fn off_study_reason(&self) -> &str {
        &self.reason
    }
}

impl Audited for OffStudyRecord {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}
