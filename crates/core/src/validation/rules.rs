//! Validation rule configuration.
//!
//! Every bound, list and script used by the field validators lives here so a
//! deployment can localize them with a YAML file instead of a code change.
//! Keys missing from the file keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Writing systems accepted in personal names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Basic Latin plus Latin-1 and Latin Extended-A letters.
    ///
    /// Each script covers letters and combining marks only; digits and
    /// punctuation from the same blocks are excluded.
    Latin,
    Cyrillic,
    Devanagari,
    Cjk,
}

impl Script {
    /// Returns `true` if `c` belongs to this script's accepted range.
    #[must_use]
    pub const fn contains(self, c: char) -> bool {
        match self {
            // Latin-1 minus the `×` and `÷` signs.
            Self::Latin => matches!(
                c,
                'a'..='z'
                    | 'A'..='Z'
                    | '\u{00C0}'..='\u{00D6}'
                    | '\u{00D8}'..='\u{00F6}'
                    | '\u{00F8}'..='\u{017F}'
            ),
            // Without the `҂` thousands sign.
            Self::Cyrillic => matches!(c, '\u{0400}'..='\u{0481}' | '\u{0483}'..='\u{04FF}'),
            // Without danda punctuation and Devanagari digits.
            Self::Devanagari => matches!(c, '\u{0900}'..='\u{0963}' | '\u{0970}'..='\u{097F}'),
            Self::Cjk => matches!(c, '\u{4E00}'..='\u{9FFF}'),
        }
    }
}

/// Rules for first, middle and last names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameRules {
    pub min_length: usize,
    pub max_length: usize,
    /// Longest allowed run of one repeated character.
    pub max_repeated: usize,
    pub scripts: Vec<Script>,
    /// Placeholder tokens rejected when the name equals or contains them.
    pub denylist: Vec<String>,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            min_length: 2,
            max_length: 30,
            max_repeated: 4,
            scripts: vec![Script::Latin, Script::Cyrillic, Script::Devanagari, Script::Cjk],
            denylist: [
                "test",
                "admin",
                "null",
                "undefined",
                "anonymous",
                "user",
                "name",
                "firstname",
                "lastname",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl NameRules {
    /// Returns `true` if `c` is in any configured script.
    #[must_use]
    pub fn allows(&self, c: char) -> bool {
        self.scripts.iter().any(|script| script.contains(c))
    }
}

/// Rules for email addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailRules {
    pub max_length: usize,
}

impl Default for EmailRules {
    fn default() -> Self {
        Self { max_length: 254 }
    }
}

/// Rules for phone numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhoneRules {
    pub min_digits: usize,
    pub max_digits: usize,
    /// Leading digits accepted for 10-digit mobile numbers.
    pub mobile_prefixes: Vec<String>,
    /// National trunk prefix written before a landline area code.
    pub trunk_prefix: String,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            min_digits: 7,
            max_digits: 15,
            mobile_prefixes: vec!["97".to_string(), "98".to_string()],
            trunk_prefix: "0".to_string(),
        }
    }
}

impl PhoneRules {
    /// Human-readable prefix list, e.g. `97 or 98`.
    #[must_use]
    pub fn prefix_hint(&self) -> String {
        match self.mobile_prefixes.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [head @ .., last] => format!("{} or {last}", head.join(", ")),
        }
    }
}

/// Complete validation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationRules {
    pub name: NameRules,
    pub email: EmailRules,
    pub phone: PhoneRules,
}

/// Errors raised while loading validation rules.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read validation rules from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse validation rules: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
    #[error("Invalid validation rules: {0}")]
    Invalid(&'static str),
}

impl ValidationRules {
    /// Parse rules from YAML, filling unspecified keys with defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_yaml_ng::from_str(yaml)?;
        rules.normalized().validated()
    }

    /// Read and parse a YAML rules file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    fn normalized(mut self) -> Self {
        for word in &mut self.name.denylist {
            *word = word.trim().to_lowercase();
        }
        self.name.denylist.retain(|word| !word.is_empty());
        for prefix in &mut self.phone.mobile_prefixes {
            *prefix = prefix.trim().to_string();
        }
        self
    }

    fn validated(self) -> Result<Self, RulesError> {
        let name = &self.name;
        if name.min_length == 0 || name.min_length > name.max_length {
            return Err(RulesError::Invalid(
                "name.min_length must be between 1 and name.max_length",
            ));
        }
        if name.max_repeated == 0 {
            return Err(RulesError::Invalid("name.max_repeated must be > 0"));
        }
        if name.scripts.is_empty() {
            return Err(RulesError::Invalid("name.scripts must not be empty"));
        }
        if self.email.max_length == 0 {
            return Err(RulesError::Invalid("email.max_length must be > 0"));
        }

        let phone = &self.phone;
        if phone.min_digits == 0 || phone.min_digits > phone.max_digits {
            return Err(RulesError::Invalid(
                "phone.min_digits must be between 1 and phone.max_digits",
            ));
        }
        let all_digits = |s: &String| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if phone.mobile_prefixes.is_empty() || !phone.mobile_prefixes.iter().all(all_digits) {
            return Err(RulesError::Invalid(
                "phone.mobile_prefixes must be a non-empty list of digit strings",
            ));
        }
        if !all_digits(&phone.trunk_prefix) {
            return Err(RulesError::Invalid("phone.trunk_prefix must be digits"));
        }
        Ok(self)
    }
}
