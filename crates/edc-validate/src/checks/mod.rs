//! Cross-field rule checks.
//!
//! Each module checks one group of rules. Every rule runs, so all
//! violations are reported together; a rule whose inputs are missing is
//! skipped.

mod dates;
mod hospitalization;
mod other_specify;

use chrono::NaiveDate;
use edc_model::{ItemId, ListItem, RegisteredSubject, YesNo};
use tracing::debug;

use crate::issue::Issue;

/// Values the rules read, each `None` when not available.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RuleInput<'a> {
    pub subject: Option<&'a RegisteredSubject>,
    pub death_date: Option<NaiveDate>,
    pub participant_hospitalized: Option<YesNo>,
    pub reason_hospitalized: Option<ItemId>,
    pub days_hospitalized: Option<i64>,
    pub cause: Option<&'a ListItem>,
    pub cause_other: Option<&'a str>,
    pub cause_category: Option<&'a ListItem>,
    pub cause_category_other: Option<&'a str>,
}

/// Run all rule checks.
pub(crate) fn run_all(input: &RuleInput<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Death date against registration and birth
    issues.extend(dates::check(input));

    // 2. Hospitalization details
    issues.extend(hospitalization::check(input));

    // 3. Free-text override for "other" selections
    issues.extend(other_specify::check(input));

    for issue in &issues {
        debug!(rule = issue.rule(), field = issue.field(), "death report rule violated");
    }
    issues
}

/// Text that is absent or whitespace-only.
fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|value| value.trim().is_empty())
}
