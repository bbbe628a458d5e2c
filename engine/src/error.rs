//! Error types for the circulation engine.

use crate::BookId;
use thiserror::Error;

/// All possible errors from the circulation engine.
///
/// None of these abort the caller: every public operation hands them back
/// as the `Err` side of a [`Result`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    // Precondition errors
    #[error("borrower name required")]
    BorrowerRequired,

    #[error("loan period of {0} days is out of range")]
    LoanPeriodOutOfRange(u32),

    // State errors
    #[error("book {0} not found in library")]
    BookNotFound(BookId),

    #[error("book {0} is not available")]
    NotAvailable(BookId),

    #[error("book {0} is not currently borrowed")]
    NotBorrowed(BookId),

    #[error("cannot modify a borrowed book: {0}")]
    BorrowedBookLocked(BookId),
}

impl Error {
    /// Whether this error came from validating a new book's fields.
    ///
    /// Everything else is a precondition on the current circulation state
    /// or on the arguments of a lending call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingField(_))
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::MissingField("title");
        assert_eq!(err.to_string(), "missing required field: title");

        let err = Error::BookNotFound(7);
        assert_eq!(err.to_string(), "book 7 not found in library");

        let err = Error::NotBorrowed(3);
        assert_eq!(err.to_string(), "book 3 is not currently borrowed");

        let err = Error::BorrowedBookLocked(2);
        assert_eq!(err.to_string(), "cannot modify a borrowed book: 2");
    }

    #[test]
    fn validation_classification() {
        assert!(Error::MissingField("isbn").is_validation());
        assert!(!Error::BorrowerRequired.is_validation());
        assert!(!Error::LoanPeriodOutOfRange(9).is_validation());
        assert!(!Error::NotAvailable(1).is_validation());
        assert!(!Error::BookNotFound(1).is_validation());
    }
}
