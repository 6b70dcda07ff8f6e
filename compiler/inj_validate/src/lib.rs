//! Static validation of dependency-injection configurations.
//!
//! Given a [`Program`], the validator proves that every builder
//! configuration can construct what it registers:
//!
//! - every constructor dependency of a registered class is bound by the
//!   builder or a configuration it extends
//! - provider classes produce types assignable to what consumers expect
//! - no token or `(event, listener)` pair is bound twice
//! - `extends` never forms a cycle
//!
//! Problems are returned as [`ValidationError`] values and turned into
//! host diagnostics by [`convert_to_diagnostics`].
//!
//! # Components
//!
//! - [`token`]: token identity
//! - [`config`]: configuration analyzer
//! - [`dependency`]: dependency analyzer
//! - [`engine`]: resolution and checking
//! - [`adapter`]: diagnostic conversion

pub mod adapter;
pub mod config;
pub mod dependency;
pub mod engine;
mod error;
mod options;
pub mod token;

pub use adapter::{convert_to_diagnostics, RULE};
pub use engine::Validator;
pub use error::{Location, RelatedLocation, ValidationError, ValidationErrorKind};
pub use options::ValidatorConfig;

use inj_types::Program;

/// Validate every configuration in `program`.
pub fn validate(program: &Program, config: &ValidatorConfig) -> Vec<ValidationError> {
    Validator::new(program, *config).run()
}
