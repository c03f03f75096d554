use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use edc_model::{
    Audited, DeathReport, DeathReportData, ItemId, OffStudy, RegisteredSubject,
    SubjectIdentifier, YesNo,
};
use edc_store::{DeathReportStore, StoreError};
use edc_validate::SubjectLookup;

fn subject_id(value: &str) -> SubjectIdentifier {
    SubjectIdentifier::new(value).unwrap()
}

fn subject(value: &str) -> RegisteredSubject {
    RegisteredSubject::new(subject_id(value))
        .with_registration_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap())
        .with_dob(NaiveDate::from_ymd_opt(1985, 2, 11).unwrap())
}

fn report_data(value: &str) -> DeathReportData {
    DeathReportData {
        registered_subject: subject_id(value),
        report_datetime: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
        death_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        illness_duration: 2,
        perform_autopsy: YesNo::No,
        cause: ItemId::new(1),
        cause_other: None,
        cause_category: ItemId::new(1),
        cause_category_other: None,
        medical_responsibility: ItemId::new(1),
        diagnosis_code: ItemId::new(1),
        participant_hospitalized: YesNo::No,
        reason_hospitalized: None,
        days_hospitalized: None,
        comment: Some("Died at home".to_string()),
    }
}

fn store_with_subject(value: &str) -> DeathReportStore {
    let mut store = DeathReportStore::new();
    store.register_subject(subject(value)).unwrap();
    store
}

#[test]
fn second_death_report_for_subject_is_rejected() {
    let mut store = store_with_subject("066-1");
    store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap();

    let mut other = report_data("066-1");
    other.death_date = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
    let err = store
        .create_death_report(DeathReport::new(other, "clinician"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateDeathReport { .. }));
    assert_eq!(store.death_reports().count(), 1);
}

#[test]
fn report_for_unregistered_subject_is_rejected() {
    let mut store = DeathReportStore::new();
    let err = store
        .create_death_report(DeathReport::new(report_data("066-404"), "clinician"))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownSubject { .. }));
}

#[test]
fn duplicate_subject_is_rejected() {
    let mut store = store_with_subject("066-1");
    let err = store.register_subject(subject("066-1")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSubject { .. }));
}

#[test]
fn creating_report_takes_subject_off_study() {
    let mut store = store_with_subject("066-1");
    store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap();
    let record = store.off_study_record(&subject_id("066-1")).unwrap();
    assert_eq!(record.reason, "death");
    assert!(record.is_off_study(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
}

#[test]
fn update_keeps_identity_and_moves_off_study_date() {
    let mut store = store_with_subject("066-1");
    let id = store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap()
        .id();

    let mut data = report_data("066-1");
    data.death_date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
    let updated = store.update_death_report(data, "monitor").unwrap();
    assert_eq!(updated.id(), id);
    assert_eq!(updated.audit().user_created, "clinician");
    assert_eq!(updated.audit().user_modified, "monitor");

    let record = store.off_study_record(&subject_id("066-1")).unwrap();
    assert_eq!(record.offstudy_date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
}

#[test]
fn update_without_report_fails() {
    let mut store = store_with_subject("066-1");
    let err = store
        .update_death_report(report_data("066-1"), "monitor")
        .unwrap_err();
    assert!(matches!(err, StoreError::NoDeathReport { .. }));
}

#[test]
fn delete_allows_new_report() {
    let mut store = store_with_subject("066-1");
    store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap();
    store.delete_death_report(&subject_id("066-1")).unwrap();
    assert!(store.off_study_record(&subject_id("066-1")).is_none());
    store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap();
}

#[test]
fn store_resolves_subjects_for_forms() {
    let store = store_with_subject("066-1");
    assert!(store.find_subject(&subject_id("066-1")).is_some());
    assert!(store.find_subject(&subject_id("066-2")).is_none());
}

#[test]
fn snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut store = store_with_subject("066-1");
    store.register_subject(subject("066-2")).unwrap();
    store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap();
    store.save(&path).unwrap();

    let loaded = DeathReportStore::load(&path).unwrap();
    assert_eq!(loaded.subjects().count(), 2);
    assert_eq!(
        loaded.death_report_for(&subject_id("066-1")),
        store.death_report_for(&subject_id("066-1"))
    );
    assert!(loaded.off_study_record(&subject_id("066-1")).is_some());
    assert!(!dir.path().join("nested").join("store.json.tmp").exists());
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, r#"{"schema_version": 99}"#).unwrap();
    let err = DeathReportStore::load(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UnsupportedVersion { found: 99, max_supported: 1, .. }
    ));
}

#[test]
fn missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = DeathReportStore::load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(store.subjects().count(), 0);
}

/// Save a store with one report, let `edit` change the JSON, and load it back.
fn load_edited_snapshot(
    edit: impl FnOnce(&mut serde_json::Value),
) -> Result<DeathReportStore, StoreError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mut store = store_with_subject("066-1");
    store
        .create_death_report(DeathReport::new(report_data("066-1"), "clinician"))
        .unwrap();
    store.save(&path).unwrap();

    let mut snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    edit(&mut snapshot);
    fs::write(&path, snapshot.to_string()).unwrap();
    DeathReportStore::load(&path)
}

#[test]
fn snapshot_with_two_reports_for_one_subject_is_rejected() {
    let err = load_edited_snapshot(|snapshot| {
        let reports = snapshot["death_reports"].as_array_mut().unwrap();
        let mut second = reports[0].clone();
        second["death_date"] = "2024-02-20".into();
        reports.push(second);
    })
    .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateDeathReport { .. }));
}

#[test]
fn snapshot_report_for_unregistered_subject_is_rejected() {
    let err = load_edited_snapshot(|snapshot| {
        snapshot["death_reports"][0]["registered_subject"] = "GHOST".into();
        snapshot["off_study"][0]["registered_subject"] = "GHOST".into();
    })
    .unwrap_err();
    assert!(matches!(err, StoreError::UnknownSubject { subject } if subject.as_str() == "GHOST"));
}

#[test]
fn snapshot_report_without_off_study_record_is_rejected() {
    let err = load_edited_snapshot(|snapshot| {
        snapshot["off_study"] = serde_json::json!([]);
    })
    .unwrap_err();
    assert!(matches!(
        err,
        StoreError::InconsistentSnapshot { problem, .. }
            if problem.contains("no off-study record")
    ));
}

#[test]
fn snapshot_with_duplicate_subject_is_rejected() {
    let err = load_edited_snapshot(|snapshot| {
        let subjects = snapshot["subjects"].as_array_mut().unwrap();
        let copy = subjects[0].clone();
        subjects.push(copy);
    })
    .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSubject { .. }));
}
