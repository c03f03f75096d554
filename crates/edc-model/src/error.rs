use thiserror::Error;

use crate::enums::VocabularyKind;
use crate::ids::ItemId;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid subject identifier: {0:?}")]
    InvalidSubjectIdentifier(String),
    #[error("invalid yes/no value: {0:?}")]
    InvalidYesNo(String),
    #[error("unknown vocabulary: {0:?}")]
    UnknownVocabulary(String),
    #[error("duplicate item id {id} in {kind} vocabulary")]
    DuplicateItem { kind: VocabularyKind, id: ItemId },
}

pub type Result<T> = std::result::Result<T, ModelError>;
