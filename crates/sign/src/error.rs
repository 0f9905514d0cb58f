//! Error types for the signature crate

use core::fmt;

use codesig_algorithms::error::Error as AlgoError;
use codesig_api::Error as ApiError;

/// Errors that can occur during key generation, signing, or verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A code descriptor violates n > k or n > d
    ParameterInfeasible {
        /// Which matrix the descriptor belongs to
        matrix: &'static str,
        /// Block length
        n: usize,
        /// Dimension
        k: usize,
        /// Minimum distance
        d: usize,
    },

    /// An input had an unexpected dimension
    DimensionMismatch {
        /// What was being measured
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The configured weight threshold exceeds the block length, so the
    /// rejection loop could never terminate
    InfeasibleDistance {
        /// Required signature weight
        required: usize,
        /// Block length of the master code
        n: usize,
    },

    /// The rejection loop ran out of its attempt budget
    ExceededAttempts {
        /// Number of salts tried
        attempts: usize,
    },

    /// Key generation failed
    KeyGeneration {
        /// Stage that failed (which matrix was being built)
        stage: &'static str,
        details: String,
    },

    /// The key store could not persist an artifact
    Store {
        operation: &'static str,
        details: String,
    },

    /// Error bubbled up from the mathematical engines
    Algorithm(AlgoError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParameterInfeasible { matrix, n, k, d } => {
                write!(
                    f,
                    "Infeasible parameters for {}: n={}, k={}, d={} (need n > k and n > d)",
                    matrix, n, k, d
                )
            }
            Error::DimensionMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Dimension mismatch for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::InfeasibleDistance { required, n } => {
                write!(
                    f,
                    "Required signature weight {} exceeds block length {}",
                    required, n
                )
            }
            Error::ExceededAttempts { attempts } => {
                write!(f, "Signing gave up after {} rejected salts", attempts)
            }
            Error::KeyGeneration { stage, details } => {
                write!(f, "Key generation failed at {}: {}", stage, details)
            }
            Error::Store { operation, details } => {
                write!(f, "Key store {} failed: {}", operation, details)
            }
            Error::Algorithm(inner) => write!(f, "{}", inner),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Algorithm(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<AlgoError> for Error {
    fn from(err: AlgoError) -> Self {
        Error::Algorithm(err)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::ParameterInfeasible { matrix, n, k, d } => ApiError::InvalidParameter {
                context: matrix,
                message: format!("n={}, k={}, d={} (need n > k and n > d)", n, k, d),
            },
            Error::DimensionMismatch {
                context,
                expected,
                actual,
            } => ApiError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::ExceededAttempts { attempts } => ApiError::AttemptsExhausted {
                context: "signing rejection loop",
                attempts,
            },
            other => ApiError::Other {
                context: "codesig-sign",
                message: other.to_string(),
            },
        }
    }
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;
