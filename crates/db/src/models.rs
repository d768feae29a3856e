//! Database models for the `life_insurance_quotes` table.

use chrono::{DateTime, Utc};
use quote_core::ValidatedQuote;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored quote request. Rows are never updated after insert.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub district: String,
    /// Digits only.
    pub phone: String,
    /// Birth year.
    pub date_of_birth: i32,
    pub gender: String,
    pub email: String,
    pub coverage_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Parameters for inserting a quote. Borrows from the validated submission.
#[derive(Debug, Clone, Copy)]
pub struct CreateQuoteParams<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub district: &'a str,
    pub phone: &'a str,
    pub date_of_birth: i32,
    pub gender: &'a str,
    pub email: &'a str,
    pub coverage_amount: i64,
}

impl<'a> From<&'a ValidatedQuote> for CreateQuoteParams<'a> {
    fn from(quote: &'a ValidatedQuote) -> Self {
        Self {
            first_name: &quote.first_name,
            last_name: &quote.last_name,
            district: quote.district,
            phone: &quote.phone.digits,
            date_of_birth: quote.date_of_birth,
            gender: quote.gender.as_str(),
            email: &quote.email,
            coverage_amount: quote.coverage_amount,
        }
    }
}

impl CreateQuoteParams<'_> {
    /// Build the row the store would return, stamped with `id` and `created_at`.
    #[must_use]
    pub fn into_quote(self, id: Uuid, created_at: DateTime<Utc>) -> Quote {
        Quote {
            id,
            first_name: self.first_name.to_owned(),
            last_name: self.last_name.to_owned(),
            district: self.district.to_owned(),
            phone: self.phone.to_owned(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.to_owned(),
            email: self.email.to_owned(),
            coverage_amount: self.coverage_amount,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_serializes_in_camel_case() {
        let params = CreateQuoteParams {
            first_name: "Sita",
            last_name: "Karki",
            district: "Kaski",
            phone: "9812345678",
            date_of_birth: 1994,
            gender: "female",
            email: "sita@example.com",
            coverage_amount: 500_000,
        };
        let quote = params.into_quote(Uuid::nil(), DateTime::<Utc>::UNIX_EPOCH);
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["firstName"], "Sita");
        assert_eq!(json["dateOfBirth"], 1994);
        assert_eq!(json["coverageAmount"], 500_000);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("first_name").is_none());
    }
}
