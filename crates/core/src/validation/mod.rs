//! Field validation shared by the API and the client.
//!
//! One rule set is applied everywhere: live validation (`POST /validate`),
//! quote submission and the client form all go through [`validate_field`] or
//! the per-field functions it dispatches to. Rules come from
//! [`ValidationRules`], which can be loaded from YAML.

mod email;
mod name;
mod phone;
mod rules;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use email::validate_email;
pub use name::validate_name;
pub use phone::{NormalizedPhone, PhoneKind, normalize_phone};
pub use rules::{EmailRules, NameRules, PhoneRules, RulesError, Script, ValidationRules};

/// A value refused by a validator, with a user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Rejection {
    reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Fields that can be validated individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "midName")]
    MiddleName,
    #[serde(rename = "lastName")]
    LastName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
}

impl Field {
    /// Wire name used in requests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::MiddleName => "midName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Label used in user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::MiddleName => "Middle name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a field name outside [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported field: {0}")]
pub struct UnsupportedField(pub String);

impl FromStr for Field {
    type Err = UnsupportedField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(Self::FirstName),
            "midName" => Ok(Self::MiddleName),
            "lastName" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(UnsupportedField(other.to_string())),
        }
    }
}

/// Successful single-field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub normalized: String,
    /// Set only for [`Field::Phone`].
    pub phone_kind: Option<PhoneKind>,
}

/// Why a single-field validation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The value broke a rule; the message is meant for the user.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// The caller asked for a field that has no validator.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedField),
}

/// Validate `raw` as the field named `field`.
pub fn validate_field(
    rules: &ValidationRules,
    field: &str,
    raw: &str,
) -> Result<Accepted, FieldError> {
    let field: Field = field.parse()?;
    let accepted = match field {
        Field::FirstName | Field::MiddleName | Field::LastName => Accepted {
            normalized: validate_name(&rules.name, field.label(), raw)?,
            phone_kind: None,
        },
        Field::Email => Accepted {
            normalized: validate_email(&rules.email, raw)?,
            phone_kind: None,
        },
        Field::Phone => {
            let phone = normalize_phone(&rules.phone, raw)?;
            Accepted {
                normalized: phone.digits,
                phone_kind: Some(phone.kind),
            }
        }
    };
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_field_name() {
        let rules = ValidationRules::default();

        let name = validate_field(&rules, "lastName", " Sharma ").unwrap();
        assert_eq!(name.normalized, "Sharma");
        assert_eq!(name.phone_kind, None);

        let phone = validate_field(&rules, "phone", "014123456").unwrap();
        assert_eq!(phone.phone_kind, Some(PhoneKind::Landline));

        let email = validate_field(&rules, "email", "Ram@Example.com").unwrap();
        assert_eq!(email.normalized, "ram@example.com");
    }

    #[test]
    fn middle_name_uses_its_own_label() {
        let err = validate_field(&ValidationRules::default(), "midName", "K").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Middle name must be at least 2 characters long."
        );
    }

    #[test]
    fn phone_reason_is_propagated_verbatim() {
        let err = validate_field(&ValidationRules::default(), "phone", "123").unwrap_err();
        assert_eq!(
            err,
            FieldError::Rejected(Rejection::new("Phone number is too short."))
        );
    }

    #[test]
    fn unknown_field_is_distinct_from_rejection() {
        let err = validate_field(&ValidationRules::default(), "nickname", "Ram").unwrap_err();
        assert_eq!(
            err,
            FieldError::Unsupported(UnsupportedField("nickname".into()))
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let rules = ValidationRules::default();
        for (field, value) in [("firstName", "Ram"), ("email", "bad"), ("phone", "9812345678")] {
            assert_eq!(
                validate_field(&rules, field, value),
                validate_field(&rules, field, value)
            );
        }
    }

    #[test]
    fn field_round_trips_through_wire_name() {
        for field in [
            Field::FirstName,
            Field::MiddleName,
            Field::LastName,
            Field::Email,
            Field::Phone,
        ] {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }
}
