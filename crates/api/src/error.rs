//! Error handling for the codesig ecosystem

use core::fmt;

/// The top-level error type shared across the codesig crates
///
/// Lower layers carry their own richer error enums and convert into this
/// type at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter failed validation
    InvalidParameter {
        /// Context in which the parameter was rejected
        context: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// A buffer or vector had the wrong length
    InvalidLength {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// An operation ran out of its configured attempt budget
    AttemptsExhausted {
        /// Operation that gave up
        context: &'static str,
        /// Number of attempts made
        attempts: usize,
    },

    /// Fallback for other errors
    Other {
        /// Operation that failed
        context: &'static str,
        /// Detailed error message
        message: String,
    },
}

/// Result type for codesig operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { context, message } => {
                write!(f, "Invalid parameter in {}: {}", context, message)
            }
            Error::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::AttemptsExhausted { context, attempts } => {
                write!(f, "{} gave up after {} attempts", context, attempts)
            }
            Error::Other { context, message } => {
                write!(f, "Error in {}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Other {
            context: "I/O operation",
            message: e.to_string(),
        }
    }
}
