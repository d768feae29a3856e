//! PostgreSQL repository for `life_insurance_quotes`.

use async_trait::async_trait;
use quote_core::AppError;
use sqlx::postgres::PgPool;
use tracing::debug;

use super::QuoteStore;
use crate::{CreateQuoteParams, DbError, Quote};

/// Quote repository backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteStore for QuoteRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            r"
            SELECT id, first_name, last_name, district, phone, date_of_birth,
                   gender, email, coverage_amount, created_at
              FROM life_insurance_quotes
             WHERE email = $1
             LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError)?;
        Ok(quote)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            r"
            SELECT id, first_name, last_name, district, phone, date_of_birth,
                   gender, email, coverage_amount, created_at
              FROM life_insurance_quotes
             WHERE phone = $1
             LIMIT 1
            ",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError)?;
        Ok(quote)
    }

    async fn create(&self, params: CreateQuoteParams<'_>) -> Result<Quote, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            r"
            INSERT INTO life_insurance_quotes
                   (first_name, last_name, district, phone, date_of_birth,
                    gender, email, coverage_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, district, phone, date_of_birth,
                      gender, email, coverage_amount, created_at
            ",
        )
        .bind(params.first_name)
        .bind(params.last_name)
        .bind(params.district)
        .bind(params.phone)
        .bind(params.date_of_birth)
        .bind(params.gender)
        .bind(params.email)
        .bind(params.coverage_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError)?;

        debug!(quote_id = %quote.id, "Quote inserted");
        Ok(quote)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
