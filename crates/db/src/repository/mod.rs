//! Quote store boundary and its implementations.
//!
//! # Error Handling
//!
//! All store methods return `Result<T, AppError>` where errors are:
//! - `AppError::Conflict` - email or phone already stored (unique constraint)
//! - `AppError::Unavailable` - Database connection or query failures

mod config;
mod in_memory;
mod quote;

use async_trait::async_trait;
use quote_core::AppError;
use sqlx::postgres::PgPool;
use tracing::info;

pub use config::{DbConfig, create_pool};
pub use in_memory::InMemoryQuoteStore;
pub use quote::QuoteRepository;

use crate::{CreateQuoteParams, Quote};

/// Persistence boundary for quote requests.
///
/// Records are created once; there is no update or delete.
#[async_trait]
pub trait QuoteStore: Send + Sync + std::fmt::Debug {
    /// Find the quote stored under a canonical email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Quote>, AppError>;

    /// Find the quote stored under a digits-only phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Quote>, AppError>;

    /// Insert a quote. A duplicate email or phone yields `AppError::Conflict`.
    async fn create(&self, params: CreateQuoteParams<'_>) -> Result<Quote, AppError>;

    /// Returns `true` when the store can serve requests.
    async fn health_check(&self) -> bool;
}

/// Combined database context.
#[derive(Debug, Clone)]
pub struct Database {
    pub quotes: QuoteRepository,
    pool: PgPool,
}

impl Database {
    /// Creates a new database context with all repositories.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            quotes: QuoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Unavailable(format!("Database migration failed: {e}")))?;
        info!("Database migrations applied");
        Ok(())
    }
}
