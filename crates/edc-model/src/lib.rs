//! Record types for the death report module.
//!
//! A [`DeathReport`] is composed from independent capabilities rather than a
//! single base type: [`AuditFields`] supplies the audit trail, [`OffStudy`]
//! reports when the participant left the study, and the vocabulary types
//! provide the ordered lookup lists the report references.

pub mod audit;
pub mod death_report;
pub mod enums;
pub mod error;
pub mod ids;
pub mod off_study;
pub mod subject;
pub mod vocabulary;

pub use audit::{AuditFields, Audited};
pub use death_report::{DeathReport, DeathReportData};
pub use enums::{VocabularyKind, YesNo};
pub use error::{ModelError, Result};
pub use ids::{ItemId, SubjectIdentifier};
pub use off_study::{OffStudy, OffStudyRecord};
pub use subject::RegisteredSubject;
pub use vocabulary::{ListItem, VocabularyList, VocabularyRegistry};
