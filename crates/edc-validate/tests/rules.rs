//! Property tests for the cross-field rules on typed reports.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use edc_model::{
    DeathReportData, ItemId, ListItem, RegisteredSubject, SubjectIdentifier, VocabularyKind,
    VocabularyList, VocabularyRegistry, YesNo,
};
use edc_validate::{Issue, validate_death_report};

const OTHER_CAUSE: u32 = 9;

fn registry() -> VocabularyRegistry {
    let mut registry = VocabularyRegistry::new();
    for kind in VocabularyKind::ALL {
        let mut list = VocabularyList::new(kind);
        list.add_item(ListItem::new(1, "Tuberculosis", 10)).unwrap();
        list.add_item(ListItem::new(OTHER_CAUSE, "Other, specify", 90))
            .unwrap();
        registry.add_list(list);
    }
    registry
}

fn registration() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 6, 1).unwrap()
}

fn subject() -> RegisteredSubject {
    RegisteredSubject::new(SubjectIdentifier::new("066-1").unwrap())
        .with_registration_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap())
        .with_dob(dob())
}

fn valid_report() -> DeathReportData {
    DeathReportData {
        registered_subject: SubjectIdentifier::new("066-1").unwrap(),
        report_datetime: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
        death_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        illness_duration: 5,
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
        comment: None,
    }
}

fn messages(report: &DeathReportData) -> Vec<&'static str> {
    validate_death_report(report, &subject(), &registry())
        .iter()
        .map(Issue::message)
        .collect()
}

#[test]
fn valid_report_has_no_issues() {
    assert!(messages(&valid_report()).is_empty());
}

#[test]
fn registration_day_counts_by_calendar_date() {
    // Registered at 08:00; dying the same day is allowed.
    let mut report = valid_report();
    report.death_date = registration();
    assert!(messages(&report).is_empty());
}

proptest! {
    #[test]
    fn death_before_registration_is_rejected(days_before in 1i64..5000) {
        let mut report = valid_report();
        report.death_date = registration() - Duration::days(days_before);
        prop_assert!(messages(&report).contains(&"Death date cannot be before date registered"));
    }

    #[test]
    fn death_before_birth_is_rejected(days_before in 1i64..5000) {
        let mut report = valid_report();
        report.death_date = dob() - Duration::days(days_before);
        prop_assert!(messages(&report).contains(&"Death date cannot be before date of birth"));
    }

    #[test]
    fn days_without_hospitalization_are_rejected(days in any::<i64>()) {
        let mut report = valid_report();
        report.days_hospitalized = Some(days);
        prop_assert_eq!(
            messages(&report),
            vec!["If the participant was not hospitalized, do not indicate for how many days."]
        );
    }

    #[test]
    fn non_positive_days_with_hospitalization_are_rejected(
        days in prop::option::of(i64::MIN..=0)
    ) {
        let mut report = valid_report();
        report.participant_hospitalized = YesNo::Yes;
        report.reason_hospitalized = Some(ItemId::new(1));
        report.days_hospitalized = days;
        prop_assert_eq!(
            messages(&report),
            vec!["If the participant was hospitalized, indicate for how many days."]
        );
    }

    #[test]
    fn positive_days_with_reason_are_accepted(days in 1i64..=365) {
        let mut report = valid_report();
        report.participant_hospitalized = YesNo::Yes;
        report.reason_hospitalized = Some(ItemId::new(1));
        report.days_hospitalized = Some(days);
        prop_assert!(messages(&report).is_empty());
    }

    #[test]
    fn hospitalization_without_reason_is_rejected(days in 1i64..=365) {
        let mut report = valid_report();
        report.participant_hospitalized = YesNo::Yes;
        report.days_hospitalized = Some(days);
        prop_assert_eq!(
            messages(&report),
            vec!["If the participant was hospitalized, indicate the primary reason."]
        );
    }

    #[test]
    fn other_cause_needs_specification(specified in "[ \t]{0,3}|[a-z][a-z ]{0,20}") {
        let mut report = valid_report();
        report.cause = ItemId::new(OTHER_CAUSE);
        report.cause_other = Some(specified.clone());
        let rejected = messages(&report)
            .contains(&"You wrote 'other' for the cause of death. Please specify.");
        prop_assert_eq!(rejected, specified.trim().is_empty());
    }
}
