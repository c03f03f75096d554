//! Death date must not precede registration or birth.

use super::RuleInput;
use crate::issue::Issue;

pub(super) fn check(input: &RuleInput<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    let (Some(death_date), Some(subject)) = (input.death_date, input.subject) else {
        return issues;
    };

    if let Some(registration_date) = subject.registration_date()
        && death_date < registration_date
    {
        issues.push(Issue::DeathBeforeRegistration {
            death_date,
            registration_date,
        });
    }

    if let Some(dob) = subject.dob
        && death_date < dob
    {
        issues.push(Issue::DeathBeforeBirth { death_date, dob });
    }

    issues
}
