//! Death report rule violations.
//!
//! Each variant carries only the data needed to describe it. The messages
//! are shown to the submitter verbatim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A violated cross-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Date checks
    /// Death date precedes the participant's registration date
    DeathBeforeRegistration {
        death_date: NaiveDate,
        registration_date: NaiveDate,
    },
    /// Death date precedes the participant's date of birth
    DeathBeforeBirth {
        death_date: NaiveDate,
        dob: NaiveDate,
    },

    // Hospitalization checks
    /// Days hospitalized given although the participant was not hospitalized
    DaysHospitalizedNotApplicable { days: i64 },
    /// Reason given although the participant was not hospitalized
    ReasonHospitalizedNotApplicable,
    /// Hospitalized, but no positive number of days
    DaysHospitalizedMissing { days: Option<i64> },
    /// Hospitalized, but no primary reason
    ReasonHospitalizedMissing,

    // Free-text override checks
    /// Cause of death is an "other" item without a specification
    CauseOtherMissing { cause: String },
    /// Cause category is an "other" item without a specification
    CauseCategoryOtherMissing { category: String },
}

impl Issue {
    /// Message shown to the submitter.
    pub fn message(&self) -> &'static str {
        match self {
            Issue::DeathBeforeRegistration { .. } => "Death date cannot be before date registered",
            Issue::DeathBeforeBirth { .. } => "Death date cannot be before date of birth",
            Issue::DaysHospitalizedNotApplicable { .. } => {
                "If the participant was not hospitalized, do not indicate for how many days."
            }
            Issue::ReasonHospitalizedNotApplicable => {
                "If the participant was not hospitalized, do not indicate the primary reason."
            }
            Issue::DaysHospitalizedMissing { .. } => {
                "If the participant was hospitalized, indicate for how many days."
            }
            Issue::ReasonHospitalizedMissing => {
                "If the participant was hospitalized, indicate the primary reason."
            }
            Issue::CauseOtherMissing { .. } => {
                "You wrote 'other' for the cause of death. Please specify."
            }
            Issue::CauseCategoryOtherMissing { .. } => {
                "You wrote 'other' for the cause category. Please specify."
            }
        }
    }

    /// Form field the violation is about.
    pub fn field(&self) -> &'static str {
        match self {
            Issue::DeathBeforeRegistration { .. } | Issue::DeathBeforeBirth { .. } => {
                "death_date"
            }
            Issue::DaysHospitalizedNotApplicable { .. } | Issue::DaysHospitalizedMissing { .. } => {
                "days_hospitalized"
            }
            Issue::ReasonHospitalizedNotApplicable | Issue::ReasonHospitalizedMissing => {
                "reason_hospitalized"
            }
            Issue::CauseOtherMissing { .. } => "cause_other",
            Issue::CauseCategoryOtherMissing { .. } => "cause_category_other",
        }
    }

    /// Stable rule name for logs and reports.
    pub fn rule(&self) -> &'static str {
        match self {
            Issue::DeathBeforeRegistration { .. } => "death_before_registration",
            Issue::DeathBeforeBirth { .. } => "death_before_birth",
            Issue::DaysHospitalizedNotApplicable { .. } => "days_hospitalized_not_applicable",
            Issue::ReasonHospitalizedNotApplicable => "reason_hospitalized_not_applicable",
            Issue::DaysHospitalizedMissing { .. } => "days_hospitalized_missing",
            Issue::ReasonHospitalizedMissing => "reason_hospitalized_missing",
            Issue::CauseOtherMissing { .. } => "cause_other_missing",
            Issue::CauseCategoryOtherMissing { .. } => "cause_category_other_missing",
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
