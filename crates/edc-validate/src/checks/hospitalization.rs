//! Hospitalization details must match the hospitalized answer.
//!
//! When hospitalized, zero days counts as not answered. A days value that
//! failed cleaning reaches these checks as `None`: it still counts as missing
//! when hospitalized, and only carries its field error when not.

use edc_model::YesNo;

use super::RuleInput;
use crate::issue::Issue;

pub(super) fn check(input: &RuleInput<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    match input.participant_hospitalized {
        Some(YesNo::No) => {
            if let Some(days) = input.days_hospitalized {
                issues.push(Issue::DaysHospitalizedNotApplicable { days });
            }
            if input.reason_hospitalized.is_some() {
                issues.push(Issue::ReasonHospitalizedNotApplicable);
            }
        }
        Some(YesNo::Yes) => {
            if input.days_hospitalized.is_none_or(|days| days <= 0) {
                issues.push(Issue::DaysHospitalizedMissing {
                    days: input.days_hospitalized,
                });
            }
            if input.reason_hospitalized.is_none() {
                issues.push(Issue::ReasonHospitalizedMissing);
            }
        }
        None => {}
    }
    issues
}
