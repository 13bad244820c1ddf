use std::fmt;

/// Errors raised by the pipeline simulation engine.
///
/// Parameter problems surface when a distribution, stage, market record or
/// parameter set is constructed. Once construction succeeds nothing
/// downstream re-validates it.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Malformed distribution, stage, market or pipeline field
    InvalidParameter { parameter: String, reason: String },
    /// Distribution family name not recognised
    UnsupportedKind(String),
    /// Bad direct argument to an operation (simulation count, rate, delay)
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
    /// Aggregation requested over a results table with no rows
    EmptyInput,
}

impl SimError {
    pub(crate) fn invalid_parameter(
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SimError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter { parameter, reason } => {
                write!(f, "invalid parameter `{parameter}`: {reason}")
            }
            SimError::UnsupportedKind(kind) => {
                write!(f, "unsupported distribution kind `{kind}`")
            }
            SimError::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{argument}`: {reason}")
            }
            SimError::EmptyInput => write!(f, "cannot aggregate an empty results table"),
        }
    }
}

impl std::error::Error for SimError {}

pub type Result<T> = std::result::Result<T, SimError>;
