use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditFields, Audited};
use crate::ids::SubjectIdentifier;

/// A registered study participant.
///
/// Owned by the participant registry; a death report only reads the
/// registration date and date of birth from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredSubject {
    pub subject_identifier: SubjectIdentifier,
    #[serde(default)]
    pub registration_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub audit: AuditFields,
}

impl RegisteredSubject {
    pub fn new(subject_identifier: SubjectIdentifier) -> Self {
        Self {
            subject_identifier,
            registration_datetime: None,
            dob: None,
            first_name: None,
            initials: None,
            gender: None,
            subject_type: None,
            audit: AuditFields::default(),
        }
    }

    #[must_use]
    pub fn with_registration_datetime(mut self, value: DateTime<Utc>) -> Self {
        self.registration_datetime = Some(value);
        self
    }

    #[must_use]
    pub fn with_dob(mut self, value: NaiveDate) -> Self {
        self.dob = Some(value);
        self
    }

    /// Calendar date of registration, if registered.
    pub fn registration_date(&self) -> Option<NaiveDate> {
        self.registration_datetime
            .map(|datetime| datetime.date_naive())
    }
}

impl Audited for RegisteredSubject {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}
