//! Validator settings supplied by the host.

/// Settings for one validation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Log progress at `info` instead of `debug`.
    pub verbose: bool,
}

impl ValidatorConfig {
    pub fn verbose() -> Self {
        ValidatorConfig { verbose: true }
    }
}
