use edc_model::{DeathReportData, RegisteredSubject, VocabularyKind, VocabularyRegistry};

use crate::checks::{RuleInput, run_all};
use crate::issue::Issue;

/// Check a complete death report against the cross-field rules.
///
/// `subject` is the participant the report belongs to. Vocabulary items
/// that cannot be resolved in `registry` are treated as not "other".
pub fn validate_death_report(
    data: &DeathReportData,
    subject: &RegisteredSubject,
    registry: &VocabularyRegistry,
) -> Vec<Issue> {
    let input = RuleInput {
        subject: Some(subject),
        death_date: Some(data.death_date),
        participant_hospitalized: Some(data.participant_hospitalized),
        reason_hospitalized: data.reason_hospitalized,
        days_hospitalized: data.days_hospitalized,
        cause: registry.resolve(VocabularyKind::Cause, data.cause),
        cause_other: data.cause_other.as_deref(),
        cause_category: registry.resolve(VocabularyKind::CauseCategory, data.cause_category),
        cause_category_other: data.cause_category_other.as_deref(),
    };
    run_all(&input)
}
