#![allow(dead_code)]

use chrono::{Duration, Utc};
use serde_json::Value;

use edc_model::{RegisteredSubject, SubjectIdentifier, VocabularyKind, VocabularyRegistry};
use edc_validate::FormData;
use edc_vocabulary::load_default_registry;

pub const SUBJECT: &str = "066-1200001-3";

pub struct Fixture {
    pub vocabularies: VocabularyRegistry,
    pub subject: RegisteredSubject,
}

impl Fixture {
    pub fn new() -> Self {
        let now = Utc::now();
        let subject = RegisteredSubject::new(SubjectIdentifier::new(SUBJECT).unwrap())
            .with_registration_datetime(now - Duration::weeks(3))
            .with_dob(now.date_naive() - Duration::days(365 * 30));
        Self {
            vocabularies: load_default_registry().unwrap(),
            subject,
        }
    }

    pub fn first_id(&self, kind: VocabularyKind) -> u32 {
        self.vocabularies
            .list(kind)
            .and_then(|list| list.first())
            .map(|item| item.id.get())
            .unwrap()
    }

    pub fn other_id(&self, kind: VocabularyKind) -> u32 {
        self.vocabularies
            .list(kind)
            .and_then(|list| list.items().iter().find(|item| item.is_other()))
            .map(|item| item.id.get())
            .unwrap()
    }

    /// A complete, valid submission for a hospitalized participant.
    pub fn valid_data(&self) -> FormData {
        let now = Utc::now();
        FormData::new()
            .with("comment", Value::Null)
            .with("death_date", now.date_naive().to_string())
            .with("illness_duration", 1)
            .with("perform_autopsy", "No")
            .with("cause", self.first_id(VocabularyKind::Cause))
            .with("cause_category", self.first_id(VocabularyKind::CauseCategory))
            .with("cause_category_other", Value::Null)
            .with("cause_other", Value::Null)
            .with(
                "medical_responsibility",
                self.first_id(VocabularyKind::MedicalResponsibility),
            )
            .with("diagnosis_code", self.first_id(VocabularyKind::DiagnosisCode))
            .with("participant_hospitalized", "Yes")
            .with(
                "reason_hospitalized",
                self.first_id(VocabularyKind::ReasonHospitalized),
            )
            .with("days_hospitalized", 3)
            .with("registered_subject", SUBJECT)
            .with("report_datetime", now.to_rfc3339())
    }
}
