//! The death report record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditFields, Audited};
use crate::enums::YesNo;
use crate::ids::{ItemId, SubjectIdentifier};
use crate::off_study::OffStudy;

/// Reason recorded when a death report takes a participant off study.
pub const OFF_STUDY_REASON_DEATH: &str = "death";

/// The reportable content of a death report, as accepted by the form.
///
/// Vocabulary fields hold the id of the selected list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathReportData {
    pub registered_subject: SubjectIdentifier,
    pub report_datetime: DateTime<Utc>,
    pub death_date: NaiveDate,
    /// Duration of the terminal illness in days.
    pub illness_duration: i64,
    pub perform_autopsy: YesNo,
    pub cause: ItemId,
    pub cause_other: Option<String>,
    pub cause_category: ItemId,
    pub cause_category_other: Option<String>,
    pub medical_responsibility: ItemId,
    pub diagnosis_code: ItemId,
    pub participant_hospitalized: YesNo,
    pub reason_hospitalized: Option<ItemId>,
    pub days_hospitalized: Option<i64>,
    pub comment: Option<String>,
}

/// A persisted death report: the reported data plus its audit trail.
///
/// One report exists per registered subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathReport {
    #[serde(flatten)]
    pub data: DeathReportData,
    pub audit: AuditFields,
}

impl DeathReport {
    pub fn new(data: DeathReportData, user: &str) -> Self {
        Self {
            data,
            audit: AuditFields::new(user),
        }
    }

    pub fn subject(&self) -> &SubjectIdentifier {
        &self.data.registered_subject
    }
}

impl Audited for DeathReport {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl OffStudy for DeathReport {
    fn off_study_date(&self) -> Option<NaiveDate> {
        Some(self.data.death_date)
    }

    fn off_study_reason(&self) -> &str {
        OFF_STUDY_REASON_DEATH
    }
}
