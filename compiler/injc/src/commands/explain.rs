//! The `explain` command: documentation for diagnostic codes.

use inj_diagnostic::{ErrorCode, ErrorDocs};

use super::CliError;

/// The documentation for a code such as `E3001`.
pub fn explain_error(code_str: &str) -> Result<&'static str, CliError> {
    let code = code_str
        .parse::<ErrorCode>()
        .map_err(|()| CliError::UnknownCode(code_str.to_owned()))?;
    ErrorDocs::get(code).ok_or_else(|| CliError::NoDocs(code.as_str().to_owned()))
}
