//! Failures of a `flowfield` invocation and the process status each one maps to.
//!
//! Clap reports bad flags itself with status 2 before any command runs. Past
//! that point every failure is a [`CliError`]; `main` prints it (as JSON with
//! `--json`) and exits with [`CliError::exit_code`].

use flowfield_core::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The animation rejected its canvas or parameters.
    #[error("{0}")]
    Effect(FlowError),
    /// A PNG or output directory could not be written.
    #[error("{0}")]
    Io(String),
    /// A flag value could not be interpreted (color, `--params` JSON).
    #[error("{0}")]
    Input(String),
    /// The JSON report could not be produced.
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub const EFFECT_STATUS: i32 = 10;
    pub const IO_STATUS: i32 = 11;
    pub const INPUT_STATUS: i32 = 12;
    pub const SERIALIZATION_STATUS: i32 = 13;

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Effect(_) => Self::EFFECT_STATUS,
            CliError::Io(_) => Self::IO_STATUS,
            CliError::Input(_) => Self::INPUT_STATUS,
            CliError::Serialization(_) => Self::SERIALIZATION_STATUS,
        }
    }
}

impl From<FlowError> for CliError {
    /// Snapshot write failures and unparsable colors surface through the core
    /// error type but belong to the I/O and input statuses.
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Io(msg) => CliError::Io(msg),
            FlowError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Effect(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
