//! Library side of the `edc-death-report` binary: logging, settings and
//! output rendering.

pub mod config;
pub mod logging;
pub mod outcome;
pub mod summary;

pub use outcome::ValidationOutcome;
