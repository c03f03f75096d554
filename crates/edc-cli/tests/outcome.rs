use chrono::{NaiveDate, TimeZone, Utc};
use insta::assert_json_snapshot;

use edc_cli::ValidationOutcome;
use edc_cli::summary::errors_table;
use edc_model::{RegisteredSubject, SubjectIdentifier, VocabularyRegistry};
use edc_validate::{DeathReportForm, FormData};
use edc_vocabulary::load_default_registry;

const SUBJECT: &str = "066-1200001-3";

fn subject() -> RegisteredSubject {
    RegisteredSubject::new(SubjectIdentifier::new(SUBJECT).unwrap())
        .with_registration_datetime(Utc.with_ymd_and_hms(2020, 1, 15, 9, 30, 0).unwrap())
        .with_dob(NaiveDate::from_ymd_opt(1980, 5, 1).unwrap())
}

fn submission() -> FormData {
    FormData::new()
        .with("registered_subject", SUBJECT)
        .with("report_datetime", "2024-03-02T10:00:00Z")
        .with("death_date", "2024-03-01")
        .with("illness_duration", 5)
        .with("perform_autopsy", "maybe")
        .with("cause_category", 1)
        .with("medical_responsibility", 1)
        .with("diagnosis_code", 1)
        .with("participant_hospitalized", "No")
        .with("days_hospitalized", 3)
}

fn outcome_for(data: FormData, vocabularies: &VocabularyRegistry) -> ValidationOutcome {
    let subject = subject();
    let form = DeathReportForm::new(data, vocabularies, &subject);
    ValidationOutcome::from_form(&form)
}

#[test]
fn rejected_submission_outcome() {
    let vocabularies = load_default_registry().unwrap();
    let outcome = outcome_for(submission(), &vocabularies);

    assert!(!outcome.valid);
    assert_json_snapshot!(outcome, @r#"
    {
      "subject": "066-1200001-3",
      "valid": false,
      "errors": {
        "__all__": [
          "If the participant was not hospitalized, do not indicate for how many days."
        ],
        "cause": [
          "This field is required."
        ],
        "perform_autopsy": [
          "Select a valid choice. maybe is not one of the available choices."
        ]
      }
    }
    "#);
}

#[test]
fn accepted_submission_has_no_errors() {
    let vocabularies = load_default_registry().unwrap();
    let data = submission()
        .with("perform_autopsy", "No")
        .with("cause", 1)
        .with("days_hospitalized", serde_json::Value::Null);
    let outcome = outcome_for(data, &vocabularies);

    assert!(outcome.valid);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.subject.as_deref(), Some(SUBJECT));
}

#[test]
fn missing_subject_is_reported_as_required() {
    let vocabularies = load_default_registry().unwrap();
    let mut data = submission();
    data.remove("registered_subject");
    let outcome = outcome_for(data, &vocabularies);

    assert_eq!(outcome.subject, None);
    assert_eq!(
        outcome.errors.get("registered_subject"),
        ["This field is required."]
    );
}

#[test]
fn error_table_lists_form_errors_first() {
    let vocabularies = load_default_registry().unwrap();
    let outcome = outcome_for(submission(), &vocabularies);
    let mut table = errors_table(&outcome);
    table.force_no_tty();
    let rendered = table.to_string();

    let form_row = rendered.find("(form)").unwrap();
    let cause_row = rendered.find("cause").unwrap();
    let autopsy_row = rendered.find("perform_autopsy").unwrap();
    assert!(form_row < cause_row);
    assert!(cause_row < autopsy_row);
    assert!(rendered.contains("This field is required."));
}
