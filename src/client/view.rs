//! Typed render configuration for the quote form inputs.

use quote_core::validation::PhoneRules;
use quote_core::{DISTRICTS, Gender, PhoneKind};

use super::form::FormField;

/// Single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldConfig {
    pub field: FormField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input_type: &'static str,
    pub required: bool,
    /// Inclusive numeric bounds for `number` inputs.
    pub range: Option<(i32, i32)>,
}

impl TextFieldConfig {
    const fn text(field: FormField, placeholder: &'static str) -> Self {
        Self {
            field,
            label: field.label(),
            placeholder,
            input_type: "text",
            required: true,
            range: None,
        }
    }

    #[must_use]
    pub const fn first_name() -> Self {
        Self::text(FormField::FirstName, "John")
    }

    #[must_use]
    pub const fn last_name() -> Self {
        Self::text(FormField::LastName, "Smith")
    }

    #[must_use]
    pub const fn email() -> Self {
        Self {
            input_type: "email",
            ..Self::text(FormField::Email, "john@example.com")
        }
    }

    #[must_use]
    pub const fn year_of_birth(current_year: i32) -> Self {
        Self {
            input_type: "number",
            range: Some((quote_core::submission::MIN_BIRTH_YEAR, current_year)),
            ..Self::text(FormField::DateOfBirth, "e.g. 1995")
        }
    }
}

/// Drop-down with a blank "Select ..." entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFieldConfig {
    pub field: FormField,
    pub label: &'static str,
    pub prompt: String,
    pub options: Vec<&'static str>,
}

impl SelectFieldConfig {
    #[must_use]
    pub fn district() -> Self {
        let label = FormField::District.label();
        Self {
            field: FormField::District,
            label,
            prompt: format!("Select {}", label.to_lowercase()),
            options: DISTRICTS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioGroupConfig {
    pub field: FormField,
    pub label: &'static str,
    pub options: Vec<RadioOption>,
}

impl RadioGroupConfig {
    #[must_use]
    pub fn gender() -> Self {
        Self {
            field: FormField::Gender,
            label: FormField::Gender.label(),
            options: Gender::ALL
                .into_iter()
                .map(|g| RadioOption {
                    label: g.label(),
                    value: g.as_str(),
                })
                .collect(),
        }
    }
}

/// Phone input; placeholder, mask length and help text follow the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneFieldConfig {
    pub label: &'static str,
    pub kind: PhoneKind,
    pub placeholder: &'static str,
    pub max_length: usize,
    pub help: String,
    pub toggle_label: &'static str,
}

impl PhoneFieldConfig {
    #[must_use]
    pub fn new(kind: PhoneKind, rules: &PhoneRules) -> Self {
        let (placeholder, help) = match kind {
            PhoneKind::Mobile => (
                "e.g. 9812345678",
                format!(
                    "Enter a valid Nepali mobile number starting with {} (10 digits)",
                    rules.prefix_hint()
                ),
            ),
            PhoneKind::Landline => (
                "e.g. 014123456",
                format!(
                    "Enter a valid Nepali landline number: 7-8 digit local number, \
                     or 9 digits with area code starting with {}",
                    rules.trunk_prefix
                ),
            ),
        };
        Self {
            label: FormField::Phone.label(),
            kind,
            placeholder,
            max_length: kind.max_input_len(),
            help,
            toggle_label: "This is a landline number",
        }
    }
}

#[cfg(test)]
mod tests {
    use quote_core::validation::normalize_phone;

    use super::*;

    #[test]
    fn year_input_is_bounded() {
        let config = TextFieldConfig::year_of_birth(2026);
        assert_eq!(config.range, Some((1900, 2026)));
        assert_eq!(config.placeholder, "e.g. 1995");
        assert_eq!(config.label, "Year of Birth");
    }

    #[test]
    fn district_select_lists_every_district() {
        let config = SelectFieldConfig::district();
        assert_eq!(config.prompt, "Select district");
        assert_eq!(config.options.len(), 77);
    }

    #[test]
    fn gender_radio_uses_wire_values() {
        let values: Vec<_> = RadioGroupConfig::gender()
            .options
            .iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, ["female", "male", "other"]);
    }

    #[test]
    fn phone_config_follows_kind() {
        let rules = PhoneRules::default();
        let mobile = PhoneFieldConfig::new(PhoneKind::Mobile, &rules);
        let landline = PhoneFieldConfig::new(PhoneKind::Landline, &rules);

        assert_eq!(mobile.placeholder, "e.g. 9812345678");
        assert_eq!(mobile.max_length, 10);
        assert!(mobile.help.contains(&rules.prefix_hint()));
        assert_eq!(landline.placeholder, "e.g. 014123456");
        assert_eq!(landline.max_length, 9);
    }

    #[test]
    fn phone_hints_agree_with_normalizer() {
        let rules = PhoneRules::default();
        for kind in [PhoneKind::Mobile, PhoneKind::Landline] {
            let config = PhoneFieldConfig::new(kind, &rules);
            let example = config.placeholder.trim_start_matches("e.g. ");
            let normalized = normalize_phone(&rules, example).unwrap();
            assert_eq!(normalized.kind, kind);
            assert!(example.len() <= config.max_length);
        }

        let help = PhoneFieldConfig::new(PhoneKind::Landline, &rules).help;
        assert!(help.contains("7-8 digit local number"));
        assert!(help.contains("9 digits with area code starting with 0"));
        // Local numbers carry no trunk prefix; the 9-digit form requires it.
        assert_eq!(normalize_phone(&rules, "4123456").unwrap().kind, PhoneKind::Landline);
        assert_eq!(normalize_phone(&rules, "44123456").unwrap().kind, PhoneKind::Landline);
        assert!(normalize_phone(&rules, "0123456").is_err());
        assert!(normalize_phone(&rules, "01234567").is_err());
    }
}
