#![deny(unsafe_code)]

//! Controlled vocabulary loading.
//!
//! The default lists ship embedded in the crate; a directory of
//! `<kind>.csv` files can replace any of them.

mod csv_utils;
pub mod error;
pub mod loader;

pub use crate::error::VocabularyError;
pub use crate::loader::{
    VOCABULARY_ENV_VAR, load_default_registry, load_registry_dir, load_vocabulary_csv,
    parse_vocabulary_csv,
};
