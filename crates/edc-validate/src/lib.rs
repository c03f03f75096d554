//! Death report form validation.
//!
//! [`DeathReportForm`] is the request-time entry point: it cleans the raw
//! submitted values and reports every problem in one pass.
//! [`validate_death_report`] applies the same cross-field rules to an
//! already-typed [`edc_model::DeathReportData`].

mod checks;
pub mod clean;
pub mod errors;
pub mod form;
pub mod form_data;
pub mod issue;
mod validator;

pub use errors::{FormErrors, NON_FIELD_ERRORS};
pub use form::{DeathReportForm, SubjectLookup};
pub use form_data::FormData;
pub use issue::Issue;
pub use validator::validate_death_report;
