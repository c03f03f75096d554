//! "Other" selections need a free-text specification.

use super::{RuleInput, is_blank};
use crate::issue::Issue;

pub(super) fn check(input: &RuleInput<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(cause) = input.cause
        && cause.is_other()
        && is_blank(input.cause_other)
    {
        issues.push(Issue::CauseOtherMissing {
            cause: cause.name.clone(),
        });
    }

    if let Some(category) = input.cause_category
        && category.is_other()
        && is_blank(input.cause_category_other)
    {
        issues.push(Issue::CauseCategoryOtherMissing {
            category: category.name.clone(),
        });
    }

    issues
}
