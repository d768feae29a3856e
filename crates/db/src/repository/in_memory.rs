//! In-memory quote store for tests and local runs without a database.

use async_trait::async_trait;
use chrono::Utc;
use quote_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::QuoteStore;
use crate::{CreateQuoteParams, Quote};

/// Quote store kept in process memory.
///
/// Enforces the same email/phone uniqueness as the table constraints, checked
/// under the write lock so concurrent inserts cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    quotes: RwLock<Vec<Quote>>,
}

impl InMemoryQuoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored quotes.
    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Quote>, AppError> {
        let quotes = self.quotes.read().await;
        Ok(quotes.iter().find(|q| q.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Quote>, AppError> {
        let quotes = self.quotes.read().await;
        Ok(quotes.iter().find(|q| q.phone == phone).cloned())
    }

    async fn create(&self, params: CreateQuoteParams<'_>) -> Result<Quote, AppError> {
        let mut quotes = self.quotes.write().await;
        if quotes.iter().any(|q| q.email == params.email) {
            return Err(AppError::already_exists("Email"));
        }
        if quotes.iter().any(|q| q.phone == params.phone) {
            return Err(AppError::already_exists("Phone number"));
        }

        let quote = params.into_quote(Uuid::new_v4(), Utc::now());
        quotes.push(quote.clone());
        Ok(quote)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
