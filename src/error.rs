use std::fmt;

use failure::{Error, Fail};

/// Classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The id does not refer to a stored puppy.
    NotFound = 0,
    /// The puppy was rejected by validation.
    InvalidInput = 1,
    /// Stored bytes could not be turned back into a puppy.
    InternalDataError = 2,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ErrorCode::NotFound => "not found",
            ErrorCode::InvalidInput => "invalid input",
            ErrorCode::InternalDataError => "internal data error",
        };
        write!(f, "{}", s)
    }
}

/// Error returned by every [`PuppyStorer`](crate::PuppyStorer) operation.
///
/// Carries a code for callers to branch on, a message naming the operation
/// and id, and optionally the lower-level failure that caused it.
#[derive(Debug)]
pub struct StoreError {
    code: ErrorCode,
    message: String,
    cause: Option<Error>,
}

impl StoreError {
    /// Error without an underlying cause.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> StoreError {
        StoreError {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Error wrapping the failure that caused it.
    pub fn with_cause(
        code: ErrorCode,
        cause: impl Into<Error>,
        message: impl Into<String>,
    ) -> StoreError {
        StoreError {
            code,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub(crate) fn not_found(op: &str, id: u32) -> StoreError {
        StoreError::new(
            ErrorCode::NotFound,
            format!("{} failed, no puppy found with id {}", op, id),
        )
    }

    pub(crate) fn invalid_input(op: &str, id: u32) -> StoreError {
        StoreError::new(
            ErrorCode::InvalidInput,
            format!("{} failed for puppy with id {}, value must not be < 0", op, id),
        )
    }

    pub(crate) fn corrupt(id: u32, cause: impl Into<Error>) -> StoreError {
        StoreError::with_cause(
            ErrorCode::InternalDataError,
            cause,
            format!(
                "Read failed, error retrieving corrupt data from db for puppy id {}",
                id
            ),
        )
    }

    /// The error classification.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable description of what failed.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// `Fail` is implemented by hand because the cause is optional, which
// `#[derive(Fail)]` cannot express.
impl Fail for StoreError {
    fn cause(&self) -> Option<&dyn Fail> {
        self.cause.as_ref().map(Error::as_fail)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
