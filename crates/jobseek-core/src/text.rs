//! Free-text helpers used by the filter engine and facet extraction.
//!
//! Comparison is tolerant: both sides are normalized and the check is
//! substring containment, not equality, so "Bangalore, IN" matches a
//! filter of "bangalore".

/// Lowercases, trims, and collapses internal whitespace runs to one space.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if the normalized haystack contains the normalized needle.
#[must_use]
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turns a `snake_case` value into its display form, e.g.
/// `"full_stack_developer"` → `"Full Stack Developer"`.
#[must_use]
pub fn title_case_words(s: &str) -> String {
    s.split('_')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize("Bangalore"), "bangalore");
    }

    #[test]
    fn normalize_trims_and_collapses_whitespace() {
        assert_eq!(normalize("  Bangalore,  India "), "bangalore, india");
    }

    #[test]
    fn normalize_collapses_tabs_and_newlines() {
        assert_eq!(normalize("full\t \ntime"), "full time");
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn containment_is_case_and_whitespace_tolerant() {
        assert!(contains_normalized("  Bangalore,  India ", "bangalore"));
        assert!(contains_normalized("Acme Corp", "ACME"));
        assert!(!contains_normalized("Acme Corp", "globex"));
    }

    #[test]
    fn containment_of_empty_needle_is_vacuously_true() {
        assert!(contains_normalized("anything", ""));
    }

    #[test]
    fn capitalize_first_basic() {
        assert_eq!(capitalize_first("bangalore"), "Bangalore");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("x"), "X");
    }

    #[test]
    fn title_case_words_splits_underscores() {
        assert_eq!(title_case_words("full_stack_developer"), "Full Stack Developer");
        assert_eq!(title_case_words("gardening"), "Gardening");
        assert_eq!(title_case_words("elderly_care"), "Elderly Care");
    }
}
