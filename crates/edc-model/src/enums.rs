//! Type-safe enumerations for death report fields.
//!
//! Submitted forms carry these as strings; parsing them once keeps the
//! validation rules free of string comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Answer to a yes/no question such as "was the participant hospitalized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Returns the stored choice value.
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = ModelError;

    /// Parse a choice value (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "YES" => Ok(YesNo::Yes),
            "NO" => Ok(YesNo::No),
            _ => Err(ModelError::InvalidYesNo(s.to_string())),
        }
    }
}

/// The controlled vocabularies referenced by a death report.
///
/// Each kind names the form field that references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyKind {
    Cause,
    CauseCategory,
    DiagnosisCode,
    MedicalResponsibility,
    ReasonHospitalized,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 5] = [
        VocabularyKind::Cause,
        VocabularyKind::CauseCategory,
        VocabularyKind::DiagnosisCode,
        VocabularyKind::MedicalResponsibility,
        VocabularyKind::ReasonHospitalized,
    ];

    /// Field name on the death report (also the vocabulary file stem).
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyKind::Cause => "cause",
            VocabularyKind::CauseCategory => "cause_category",
            VocabularyKind::DiagnosisCode => "diagnosis_code",
            VocabularyKind::MedicalResponsibility => "medical_responsibility",
            VocabularyKind::ReasonHospitalized => "reason_hospitalized",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            VocabularyKind::Cause => "Cause of death",
            VocabularyKind::CauseCategory => "Cause category",
            VocabularyKind::DiagnosisCode => "Diagnosis code",
            VocabularyKind::MedicalResponsibility => "Medical responsibility",
            VocabularyKind::ReasonHospitalized => "Reason hospitalized",
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VocabularyKind {
    type Err = ModelError;

    /// Parse a kind from its field name; hyphens and case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        VocabularyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownVocabulary(s.to_string()))
    }
}
