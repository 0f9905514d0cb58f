//! Error handling for the mathematical engines

use core::fmt;

use codesig_api::Error as CoreError;

/// The error type for field, polynomial, and matrix construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Field extension degree outside the primitive-polynomial table
    UnsupportedFieldSize {
        /// Requested extension degree
        m: usize,
    },

    /// BCH error-correction capability below 1
    InvalidDistance {
        /// Requested capability t
        t: usize,
    },

    /// Generator polynomial degree reached or exceeded the block length
    DegreeTooLarge {
        /// Offending degree (or 2t when the designed distance itself is
        /// out of range)
        degree: usize,
        /// Block length n
        n: usize,
    },

    /// Matrix operands with incompatible shapes
    DimensionMismatch {
        /// Operation that was attempted
        operation: &'static str,
        /// Shape of the left operand (rows, cols)
        left: (usize, usize),
        /// Shape of the right operand (rows, cols)
        right: (usize, usize),
    },

    /// Systematic-form reduction could not find a pivot.
    ///
    /// Signals a singular parity-check construction; the caller should
    /// rebuild with fresh randomness rather than continue.
    SingularPivot {
        /// Pivot column that had no usable row
        column: usize,
    },

    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },
}

/// Result type for the mathematical engines
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFieldSize { m } => {
                write!(f, "Unsupported field size m={} (supported: 1..=15)", m)
            }
            Error::InvalidDistance { t } => {
                write!(f, "Invalid error-correction capability t={} (t >= 1 required)", t)
            }
            Error::DegreeTooLarge { degree, n } => {
                write!(
                    f,
                    "Generator polynomial degree {} too large for block length {}",
                    degree, n
                )
            }
            Error::DimensionMismatch {
                operation,
                left,
                right,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {}: {}x{} vs {}x{}",
                    operation, left.0, left.1, right.0, right.1
                )
            }
            Error::SingularPivot { column } => {
                write!(f, "No pivot available for column {}: matrix is singular", column)
            }
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::DimensionMismatch {
                operation,
                left,
                right,
            } => CoreError::Other {
                context: operation,
                message: format!(
                    "dimension mismatch: {}x{} vs {}x{}",
                    left.0, left.1, right.0, right.1
                ),
            },
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: name,
                message: reason.to_string(),
            },
            other => CoreError::Other {
                context: "algorithms",
                message: other.to_string(),
            },
        }
    }
}
