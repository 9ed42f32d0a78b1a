//! Label resolution from language-tagged translation lists.
//!
//! Preferred language first, then the first entry, then a sentinel.
//! Never fails: missing labels are a display concern, not an error.

use crate::model::Translation;

/// Language used when the caller has no preference.
pub const DEFAULT_LANGUAGE: &str = "enUs";

/// Shown when no usable translation exists.
pub const MISSING_LABEL: &str = "N/A";

/// Pick the best label for `preferred` from `translations`.
pub fn resolve<'a>(translations: &'a [Translation], preferred: &str) -> &'a str {
    let chosen = translations
        .iter()
        .find(|t| t.language_code == preferred)
        .or_else(|| translations.first());

    match chosen {
        Some(t) if !t.value.is_empty() => &t.value,
        _ => MISSING_LABEL,
    }
}

/// `resolve` with [`DEFAULT_LANGUAGE`].
pub fn resolve_default(translations: &[Translation]) -> &str {
    resolve(translations, DEFAULT_LANGUAGE)
}
