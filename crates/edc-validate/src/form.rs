//! The death report form.
//!
//! The form cleans each submitted field, then checks the cross-field rules
//! over whatever cleaned successfully. Field errors are keyed by field name;
//! rule violations are reported under [`NON_FIELD_ERRORS`].

use std::cell::OnceCell;
use std::collections::BTreeMap;

use edc_model::{
    DeathReport, DeathReportData, RegisteredSubject, SubjectIdentifier, VocabularyKind,
    VocabularyRegistry,
};
use tracing::{debug, info_span};

use crate::checks::{RuleInput, run_all};
use crate::clean::{
    Cleaner, INVALID_CHOICE, parse_date, parse_datetime, parse_integer, parse_item, parse_text,
    parse_yes_no,
};
use crate::errors::{FormErrors, NON_FIELD_ERRORS};
use crate::form_data::FormData;

/// Resolves the participant a submission refers to.
pub trait SubjectLookup {
    fn find_subject(&self, identifier: &SubjectIdentifier) -> Option<&RegisteredSubject>;
}

impl SubjectLookup for BTreeMap<SubjectIdentifier, RegisteredSubject> {
    fn find_subject(&self, identifier: &SubjectIdentifier) -> Option<&RegisteredSubject> {
        self.get(identifier)
    }
}

impl SubjectLookup for Vec<RegisteredSubject> {
    fn find_subject(&self, identifier: &SubjectIdentifier) -> Option<&RegisteredSubject> {
        self.iter()
            .find(|subject| &subject.subject_identifier == identifier)
    }
}

impl SubjectLookup for RegisteredSubject {
    fn find_subject(&self, identifier: &SubjectIdentifier) -> Option<&RegisteredSubject> {
        (&self.subject_identifier == identifier).then_some(self)
    }
}

#[derive(Debug)]
struct Outcome {
    errors: FormErrors,
    cleaned: Option<DeathReportData>,
}

/// A bound death report form.
///
/// Validation runs once, on first access to the result.
pub struct DeathReportForm<'a> {
    data: FormData,
    vocabularies: &'a VocabularyRegistry,
    subjects: &'a dyn SubjectLookup,
    outcome: OnceCell<Outcome>,
}

impl<'a> DeathReportForm<'a> {
    pub fn new(
        data: FormData,
        vocabularies: &'a VocabularyRegistry,
        subjects: &'a dyn SubjectLookup,
    ) -> Self {
        Self {
            data,
            vocabularies,
            subjects,
            outcome: OnceCell::new(),
        }
    }

    /// Submitted values.
    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// All errors, field and non-field.
    pub fn errors(&self) -> &FormErrors {
        &self.outcome().errors
    }

    /// Rule violations not tied to a single field.
    pub fn non_field_errors(&self) -> &[String] {
        self.errors().non_field_errors()
    }

    /// The typed values, when the form is valid.
    pub fn cleaned_data(&self) -> Option<&DeathReportData> {
        self.outcome().cleaned.as_ref()
    }

    /// Build a new record from a valid form.
    pub fn to_report(&self, user: &str) -> Result<DeathReport, FormErrors> {
        match self.cleaned_data() {
            Some(data) => Ok(DeathReport::new(data.clone(), user)),
            None => Err(self.errors().clone()),
        }
    }

    fn outcome(&self) -> &Outcome {
        self.outcome.get_or_init(|| self.full_clean())
    }

    fn full_clean(&self) -> Outcome {
        let span = info_span!("death_report_form");
        let _guard = span.enter();

        let mut errors = FormErrors::new();
        let vocab = self.vocabularies;
        let mut cleaner = Cleaner::new(&self.data, &mut errors);

        let subject = cleaner.required("registered_subject", |value| {
            let identifier = parse_text(value)
                .and_then(|text| SubjectIdentifier::new(text).map_err(|e| e.to_string()))
                .map_err(|_| INVALID_CHOICE.to_string())?;
            self.subjects
                .find_subject(&identifier)
                .ok_or_else(|| INVALID_CHOICE.to_string())
        });
        let report_datetime = cleaner.required("report_datetime", parse_datetime);
        let death_date = cleaner.required("death_date", parse_date);
        let illness_duration = cleaner.required("illness_duration", parse_integer);
        let perform_autopsy = cleaner.required("perform_autopsy", parse_yes_no);
        let cause = cleaner.required("cause", |value| {
            parse_item(vocab, VocabularyKind::Cause, value)
        });
        let cause_other = cleaner.optional("cause_other", parse_text);
        let cause_category = cleaner.required("cause_category", |value| {
            parse_item(vocab, VocabularyKind::CauseCategory, value)
        });
        let cause_category_other = cleaner.optional("cause_category_other", parse_text);
        let medical_responsibility = cleaner.required("medical_responsibility", |value| {
            parse_item(vocab, VocabularyKind::MedicalResponsibility, value)
        });
        let diagnosis_code = cleaner.required("diagnosis_code", |value| {
            parse_item(vocab, VocabularyKind::DiagnosisCode, value)
        });
        let participant_hospitalized =
            cleaner.required("participant_hospitalized", parse_yes_no);
        let reason_hospitalized = cleaner.optional("reason_hospitalized", |value| {
            parse_item(vocab, VocabularyKind::ReasonHospitalized, value)
        });
        let days_hospitalized = cleaner.optional("days_hospitalized", parse_integer);
        let comment = cleaner.optional("comment", parse_text);

        let input = RuleInput {
            subject,
            death_date,
            participant_hospitalized,
            reason_hospitalized: reason_hospitalized.map(|item| item.id),
            days_hospitalized,
            cause,
            cause_other: cause_other.as_deref(),
            cause_category,
            cause_category_other: cause_category_other.as_deref(),
        };
        for issue in run_all(&input) {
            errors.add(NON_FIELD_ERRORS, issue.message());
        }

        debug!(
            errors = errors.len(),
            non_field_errors = errors.non_field_errors().len(),
            "death report form cleaned"
        );

        if !errors.is_empty() {
            return Outcome {
                errors,
                cleaned: None,
            };
        }

        // Every required field cleaned, so each of these is present.
        let cleaned = match (
            subject,
            report_datetime,
            death_date,
            illness_duration,
            perform_autopsy,
            cause,
            cause_category,
            medical_responsibility,
            diagnosis_code,
            participant_hospitalized,
        ) {
            (
                Some(subject),
                Some(report_datetime),
                Some(death_date),
                Some(illness_duration),
                Some(perform_autopsy),
                Some(cause),
                Some(cause_category),
                Some(medical_responsibility),
                Some(diagnosis_code),
                Some(participant_hospitalized),
            ) => Some(DeathReportData {
                registered_subject: subject.subject_identifier.clone(),
                report_datetime,
                death_date,
                illness_duration,
                perform_autopsy,
                cause: cause.id,
                cause_other,
                cause_category: cause_category.id,
                cause_category_other,
                medical_responsibility: medical_responsibility.id,
                diagnosis_code: diagnosis_code.id,
                participant_hospitalized,
                reason_hospitalized: reason_hospitalized.map(|item| item.id),
                days_hospitalized,
                comment,
            }),
            _ => None,
        };
        Outcome { errors, cleaned }
    }
}
