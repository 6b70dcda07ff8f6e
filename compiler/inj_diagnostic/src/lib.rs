//! Diagnostic system for rich error reporting.
//!
//! Every problem the validator reports becomes a [`Diagnostic`]:
//! - Error codes for searchability (`inj explain E3001`)
//! - Clear messages (what went wrong)
//! - Primary label (where it went wrong, possibly in another file)
//! - Secondary labels (related locations)
//! - Suggestions (how to fix)

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity, SourceInfo};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
