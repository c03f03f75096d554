//! Storage for registered subjects and their death reports.
//!
//! The store enforces the one-to-one link between a subject and a death
//! report and keeps the matching off-study record alongside each report.
//!
//! # File Format
//!
//! Stores are saved as a JSON snapshot:
//!
//! ```text
//! {
//!   "schema_version": 1,
//!   "subjects": [...],
//!   "death_reports": [...],
//!   "off_study": [...]
//! }
//! ```
//!
//! Saves are atomic (temp file + rename).

mod error;
mod io;
mod store;

pub use error::{Result, StoreError};
pub use io::CURRENT_SCHEMA_VERSION;
pub use store::DeathReportStore;
