//! Extension traits for loosely-typed request strings.
//!
//! Form payloads arrive with optional, possibly blank, string fields. These
//! helpers give them empty-as-none semantics.

/// Extension trait for `str` to handle blank-as-none semantics.
pub trait StrExt {
    /// Returns the trimmed slice if it is non-blank, `None` otherwise.
    fn non_blank(&self) -> Option<&str>;

    /// Collapses every run of whitespace to a single space and trims the ends.
    #[must_use]
    fn collapse_whitespace(&self) -> String;
}

impl StrExt for str {
    #[inline]
    fn non_blank(&self) -> Option<&str> {
        let trimmed = self.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    fn collapse_whitespace(&self) -> String {
        self.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Extension trait for `Option<String>` fields.
pub trait OptionStrExt {
    /// Returns the trimmed inner value when present and non-blank.
    fn non_blank(&self) -> Option<&str>;
}

impl OptionStrExt for Option<String> {
    #[inline]
    fn non_blank(&self) -> Option<&str> {
        self.as_deref().and_then(<str as StrExt>::non_blank)
    }
}
