//! Quote submission payload and the stateless checks run before any store
//! access: presence of required fields, then per-field format rules.

use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::districts::find_district;
use crate::error::AppError;
use crate::str_ext::{OptionStrExt, StrExt};
use crate::validation::{
    Field, NormalizedPhone, ValidationRules, normalize_phone, validate_email, validate_name,
};

/// Coverage used when the payload leaves it out.
pub const DEFAULT_COVERAGE: i64 = 500_000;

/// Earliest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields.";

/// Gender options offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Female, Self::Male, Self::Other];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            "other" => Ok(Self::Other),
            other => Err(format!("Unknown gender: {other}")),
        }
    }
}

/// Raw `POST /quotes` body.
///
/// Every field accepts a JSON string or number; `null` and missing keys both
/// read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub coverage_amount: Option<String>,
}

/// Deserialize an optional string that may arrive as a JSON number.
pub fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// A submission that passed presence and format checks, in stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuote {
    pub first_name: String,
    pub last_name: String,
    pub district: &'static str,
    pub phone: NormalizedPhone,
    pub date_of_birth: i32,
    pub gender: Gender,
    pub email: String,
    pub coverage_amount: i64,
}

/// Run the presence gate, then the format gate, on a submission.
///
/// The first failing check wins. `current_year` bounds the birth year.
pub fn validate_submission(
    rules: &ValidationRules,
    submission: &QuoteSubmission,
    current_year: i32,
) -> Result<ValidatedQuote, AppError> {
    let (
        Some(first_name),
        Some(last_name),
        Some(district),
        Some(phone),
        Some(birth_year),
        Some(gender),
        Some(email),
    ) = (
        submission.first_name.non_blank(),
        submission.last_name.non_blank(),
        submission.district.non_blank(),
        submission.phone.non_blank(),
        submission.date_of_birth.non_blank(),
        submission.gender.non_blank(),
        submission.email.non_blank(),
    )
    else {
        return Err(AppError::invalid(MISSING_FIELDS_MESSAGE));
    };

    let first_name = validate_name(&rules.name, Field::FirstName.label(), first_name)?;
    let last_name = validate_name(&rules.name, Field::LastName.label(), last_name)?;
    let email = validate_email(&rules.email, email)?;
    let phone = normalize_phone(&rules.phone, phone)?;

    let district =
        find_district(district).ok_or_else(|| AppError::invalid("Please select a valid district."))?;
    let date_of_birth = parse_birth_year(birth_year, current_year)?;
    let gender = gender
        .parse::<Gender>()
        .map_err(|_| AppError::invalid("Please select a valid gender."))?;
    let coverage_amount = parse_coverage(submission.coverage_amount.as_deref())?;

    Ok(ValidatedQuote {
        first_name,
        last_name,
        district,
        phone,
        date_of_birth,
        gender,
        email,
        coverage_amount,
    })
}

/// Parse a birth year within `MIN_BIRTH_YEAR..=current_year`.
pub fn parse_birth_year(raw: &str, current_year: i32) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (MIN_BIRTH_YEAR..=current_year).contains(year))
        .ok_or_else(|| {
            AppError::invalid(format!(
                "Year of birth must be between {MIN_BIRTH_YEAR} and {current_year}."
            ))
        })
}

/// Parse the coverage amount; blank or zero falls back to [`DEFAULT_COVERAGE`].
pub fn parse_coverage(raw: Option<&str>) -> Result<i64, AppError> {
    let Some(raw) = raw.and_then(<str as StrExt>::non_blank) else {
        return Ok(DEFAULT_COVERAGE);
    };

    let amount = match raw.parse::<i64>() {
        Ok(amount) => Some(amount),
        Err(_) => whole_number(raw),
    };

    match amount {
        Some(0) => Ok(DEFAULT_COVERAGE),
        Some(amount) if amount > 0 => Ok(amount),
        _ => Err(AppError::invalid(
            "Coverage amount must be a positive whole number.",
        )),
    }
}

/// Accept float spellings of whole numbers such as `500000.0`.
#[allow(clippy::cast_possible_truncation)]
fn whole_number(raw: &str) -> Option<i64> {
    let value = raw.parse::<f64>().ok()?;
    let in_range = value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15;
    in_range.then(|| value as i64)
}
