//! Quote persistence with SQLx.
//!
//! Provides:
//! - Connection pool management via [`create_pool`]
//! - The [`QuoteStore`] boundary with a PostgreSQL and an in-memory implementation
//! - Embedded migrations via [`Database::migrate`]
//!
//! # Example
//!
//! ```ignore
//! use quote_db::{create_pool, Database, DbConfig};
//!
//! let pool = create_pool(&DbConfig::from_url("postgres://localhost/quotes")).await?;
//! let db = Database::new(pool);
//! db.migrate().await?;
//!
//! let existing = db.quotes.find_by_email("ram@example.com").await?;
//! ```

#![expect(clippy::doc_markdown, reason = "SQLx capitalization is intentional")]

mod models;
mod repository;

use quote_core::AppError;

/// Unique constraint guarding `life_insurance_quotes.email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "life_insurance_quotes_email_key";
/// Unique constraint guarding `life_insurance_quotes.phone`.
pub const PHONE_UNIQUE_CONSTRAINT: &str = "life_insurance_quotes_phone_key";

// =============================================================================
// Internal helpers
// =============================================================================

/// Database error wrapper for ergonomic error conversion.
///
/// Wraps `sqlx::Error` so repository methods can use `?`. Unique violations
/// on the quote table become `AppError::Conflict`; everything else is
/// `AppError::Unavailable`.
#[derive(Debug)]
struct DbError(sqlx::Error);

impl From<sqlx::Error> for DbError {
    #[inline]
    fn from(e: sqlx::Error) -> Self {
        Self(e)
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match &e.0 {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                let constraint = db.constraint().unwrap_or_default();
                if constraint == PHONE_UNIQUE_CONSTRAINT
                    || (constraint != EMAIL_UNIQUE_CONSTRAINT && db.message().contains("phone"))
                {
                    Self::already_exists("Phone number")
                } else {
                    Self::already_exists("Email")
                }
            }
            other => Self::Unavailable(other.to_string()),
        }
    }
}

// =============================================================================
// Public exports
// =============================================================================

pub use models::{CreateQuoteParams, Quote};
pub use repository::{
    Database, DbConfig, InMemoryQuoteStore, QuoteRepository, QuoteStore, create_pool,
};

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct UniqueViolation {
        constraint: Option<&'static str>,
        message: &'static str,
    }

    impl fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for UniqueViolation {}

    impl DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    fn convert(constraint: Option<&'static str>, message: &'static str) -> AppError {
        DbError(sqlx::Error::Database(Box::new(UniqueViolation {
            constraint,
            message,
        })))
        .into()
    }

    #[test]
    fn email_constraint_maps_to_email_conflict() {
        let err = convert(Some(EMAIL_UNIQUE_CONSTRAINT), "duplicate key value");
        assert_eq!(err.to_string(), "Email already exists.");
    }

    #[test]
    fn phone_constraint_maps_to_phone_conflict() {
        let err = convert(Some(PHONE_UNIQUE_CONSTRAINT), "duplicate key value");
        assert_eq!(err.to_string(), "Phone number already exists.");
    }

    #[test]
    fn unnamed_constraint_falls_back_to_message() {
        let err = convert(None, "duplicate key value violates unique constraint on phone");
        assert_eq!(err.to_string(), "Phone number already exists.");
    }

    #[test]
    fn other_errors_are_unavailable() {
        let err: AppError = DbError(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, AppError::Unavailable(_)));
    }
}
