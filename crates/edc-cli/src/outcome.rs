use serde::Serialize;

use edc_validate::{DeathReportForm, FormErrors};

/// Result of validating one submission, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    /// Submitted subject identifier, if any.
    pub subject: Option<String>,
    pub valid: bool,
    pub errors: FormErrors,
}

impl ValidationOutcome {
    pub fn from_form(form: &DeathReportForm<'_>) -> Self {
        let subject = form
            .data()
            .value("registered_subject")
            .map(|value| match value.as_str() {
                Some(text) => text.trim().to_string(),
                None => value.to_string(),
            });
        Self {
            subject,
            valid: form.is_valid(),
            errors: form.errors().clone(),
        }
    }
}
