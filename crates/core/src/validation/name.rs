//! Personal-name validation.

use super::Rejection;
use super::rules::NameRules;
use crate::str_ext::StrExt;

/// Validate a personal name and return its normalized form.
///
/// `label` is used in messages ("First name must be ...").
pub fn validate_name(rules: &NameRules, label: &str, raw: &str) -> Result<String, Rejection> {
    let name = raw.collapse_whitespace();
    let length = name.chars().count();

    if length < rules.min_length {
        return Err(Rejection::new(format!(
            "{label} must be at least {} characters long.",
            rules.min_length
        )));
    }
    if length > rules.max_length {
        return Err(Rejection::new(format!(
            "{label} must be at most {} characters long.",
            rules.max_length
        )));
    }
    if !name.chars().all(|c| rules.allows(c)) {
        return Err(Rejection::new(format!(
            "{label} must contain only alphabetical characters \
             (no numbers, spaces, or special characters)."
        )));
    }
    if !name.chars().any(|c| rules.allows(c)) {
        return Err(Rejection::new(format!(
            "{label} must contain valid alphabetical characters."
        )));
    }
    if longest_run(&name) > rules.max_repeated {
        return Err(Rejection::new(format!(
            "{label} contains too many repeated characters."
        )));
    }

    let lower = name.to_lowercase();
    if rules.denylist.iter().any(|word| lower.contains(word.as_str())) {
        return Err(Rejection::new(format!(
            "Please enter a valid {}.",
            label.to_lowercase()
        )));
    }

    Ok(name)
}

/// Length of the longest run of one repeated character.
fn longest_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for c in s.chars() {
        if Some(c) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        longest = longest.max(current);
    }
    longest
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn check(raw: &str) -> Result<String, Rejection> {
        validate_name(&NameRules::default(), "First name", raw)
    }

    #[rstest]
    #[case("Ram", "Ram")]
    #[case("  Sita ", "Sita")]
    #[case("José", "José")]
    #[case("Дмитрий", "Дмитрий")]
    #[case("राम", "राम")]
    #[case("王伟", "王伟")]
    #[case("Aaaab", "Aaaab")]
    #[case("Čapek", "Čapek")]
    #[case("Łukasz", "Łukasz")]
    #[case("Ğül", "Ğül")]
    #[case("Алёна", "Алёна")]
    #[case("Їжак", "Їжак")]
    fn accepts(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(check(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("R", "First name must be at least 2 characters long.")]
    #[case("Abcdefghijklmnopqrstuvwxyzabcde", "First name must be at most 30 characters long.")]
    #[case("aaaaa", "First name contains too many repeated characters.")]
    #[case("admin", "Please enter a valid first name.")]
    #[case("Testa", "Please enter a valid first name.")]
    #[case("Superuser", "Please enter a valid first name.")]
    fn rejects_with_message(#[case] raw: &str, #[case] message: &str) {
        assert_eq!(check(raw).unwrap_err().to_string(), message);
    }

    #[rstest]
    #[case("R2D2")]
    #[case("O'Brien")]
    #[case("Mary Ann")]
    #[case("Ram!")]
    #[case("Ram×")]
    #[case("Sita÷")]
    #[case("Ram¿")]
    #[case("Ivan҂")]
    #[case("राम१")]
    #[case("राम।")]
    fn rejects_non_alphabetic(#[case] raw: &str) {
        assert!(
            check(raw)
                .unwrap_err()
                .to_string()
                .contains("only alphabetical characters")
        );
    }

    #[test]
    fn longest_run_counts_consecutive_chars() {
        assert_eq!(longest_run(""), 0);
        assert_eq!(longest_run("abc"), 1);
        assert_eq!(longest_run("abbbc"), 3);
        assert_eq!(longest_run("ééééé"), 5);
    }

    #[test]
    fn custom_rules_apply() {
        let rules = NameRules {
            min_length: 3,
            denylist: vec!["guest".into()],
            ..NameRules::default()
        };
        assert!(validate_name(&rules, "Last name", "Al").is_err());
        assert!(validate_name(&rules, "Last name", "Admin").is_ok());
        assert_eq!(
            validate_name(&rules, "Last name", "Guestly")
                .unwrap_err()
                .to_string(),
            "Please enter a valid last name."
        );
    }

    fn has_long_run(s: &str) -> bool {
        longest_run(s) > 4
    }

    proptest! {
        // Consonant-only names can never contain a denylisted token.
        #[test]
        fn consonant_names_are_accepted(name in "[bcdfghjklmnpqrstvwxzBCDFGHJKLMNPQRSTVWXZ]{2,30}") {
            prop_assume!(!has_long_run(&name));
            prop_assert_eq!(check(&name).unwrap(), name);
        }

        #[test]
        fn names_with_digits_or_symbols_are_rejected(
            head in "[bcdfghjk]{1,10}",
            junk in "[0-9!@#$%^&*_+=?.,×÷¿¡§©°±¶।०-९-]",
            tail in "[bcdfghjk]{1,10}",
        ) {
            let name = format!("{head}{junk}{tail}");
            prop_assert!(check(&name).is_err());
        }
    }
}
