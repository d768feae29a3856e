//! Phone number normalization and mobile/landline classification.
//!
//! Accepted shapes, after every non-digit is stripped:
//!
//! | Digits | Shape | Kind |
//! |--------|-------|------|
//! | 10 | starts with a configured mobile prefix (`97`, `98`) | mobile |
//! | 7–8 | local number, must not start with the trunk prefix | landline |
//! | 9 | trunk prefix + non-zero area code + local number (`014123456`) | landline |
//!
//! Anything shorter than `min_digits` or longer than `max_digits` is rejected
//! before the shape checks run.

use serde::{Deserialize, Serialize};

use super::Rejection;
use super::rules::PhoneRules;

const MOBILE_DIGITS: usize = 10;
const TRUNK_LANDLINE_DIGITS: usize = 9;

/// Phone number category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneKind {
    #[default]
    Mobile,
    Landline,
}

impl PhoneKind {
    /// Maximum number of digits the entry mask allows for this kind.
    #[must_use]
    pub const fn max_input_len(self) -> usize {
        match self {
            Self::Mobile => MOBILE_DIGITS,
            Self::Landline => TRUNK_LANDLINE_DIGITS,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Landline => "landline",
        }
    }
}

impl std::fmt::Display for PhoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phone number reduced to digits and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhone {
    pub digits: String,
    pub kind: PhoneKind,
}

/// Strip non-digits from `raw` and classify the result.
pub fn normalize_phone(rules: &PhoneRules, raw: &str) -> Result<NormalizedPhone, Rejection> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let len = digits.len();

    if len < rules.min_digits {
        return Err(Rejection::new("Phone number is too short."));
    }
    if len > rules.max_digits {
        return Err(Rejection::new("Phone number is too long."));
    }

    let kind = match len {
        MOBILE_DIGITS => {
            if !rules
                .mobile_prefixes
                .iter()
                .any(|prefix| digits.starts_with(prefix.as_str()))
            {
                return Err(Rejection::new(format!(
                    "Mobile number should start with {}.",
                    rules.prefix_hint()
                )));
            }
            PhoneKind::Mobile
        }
        7 | 8 => {
            if digits.starts_with(rules.trunk_prefix.as_str()) {
                return Err(Rejection::new("Invalid phone number format."));
            }
            PhoneKind::Landline
        }
        TRUNK_LANDLINE_DIGITS => {
            let area_code = digits
                .strip_prefix(rules.trunk_prefix.as_str())
                .filter(|rest| !rest.starts_with('0'));
            if area_code.is_none() {
                return Err(Rejection::new("Invalid phone number format."));
            }
            PhoneKind::Landline
        }
        _ => return Err(Rejection::new("Invalid phone number length.")),
    };

    Ok(NormalizedPhone { digits, kind })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn normalize(raw: &str) -> Result<NormalizedPhone, Rejection> {
        normalize_phone(&PhoneRules::default(), raw)
    }

    #[rstest]
    #[case("9812345678", "9812345678", PhoneKind::Mobile)]
    #[case("9712345678", "9712345678", PhoneKind::Mobile)]
    #[case("+98-1234-5678", "9812345678", PhoneKind::Mobile)]
    #[case("014123456", "014123456", PhoneKind::Landline)]
    #[case("01-4123456", "014123456", PhoneKind::Landline)]
    #[case("4123456", "4123456", PhoneKind::Landline)]
    #[case("(1) 4123456", "14123456", PhoneKind::Landline)]
    fn accepts(#[case] raw: &str, #[case] digits: &str, #[case] kind: PhoneKind) {
        assert_eq!(
            normalize(raw).unwrap(),
            NormalizedPhone {
                digits: digits.to_string(),
                kind
            }
        );
    }

    #[rstest]
    #[case("123", "Phone number is too short.")]
    #[case("98-12", "Phone number is too short.")]
    #[case("1234567890123456", "Phone number is too long.")]
    #[case("9612345678", "Mobile number should start with 97 or 98.")]
    #[case("0123456", "Invalid phone number format.")]
    #[case("01234567", "Invalid phone number format.")]
    #[case("004123456", "Invalid phone number format.")]
    #[case("914123456", "Invalid phone number format.")]
    #[case("98123456789", "Invalid phone number length.")]
    fn rejects_with_message(#[case] raw: &str, #[case] message: &str) {
        assert_eq!(normalize(raw).unwrap_err().to_string(), message);
    }

    #[test]
    fn configured_prefixes_change_mobile_acceptance() {
        let rules = PhoneRules {
            mobile_prefixes: vec!["96".into()],
            ..PhoneRules::default()
        };
        assert_eq!(
            normalize_phone(&rules, "9612345678").unwrap().kind,
            PhoneKind::Mobile
        );
        assert_eq!(
            normalize_phone(&rules, "9812345678")
                .unwrap_err()
                .to_string(),
            "Mobile number should start with 96."
        );
    }

    #[test]
    fn input_mask_lengths() {
        assert_eq!(PhoneKind::Mobile.max_input_len(), 10);
        assert_eq!(PhoneKind::Landline.max_input_len(), 9);
    }
}
