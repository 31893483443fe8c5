//! URL slug derivation from project names.

use chrono::Utc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Derive a URL-safe slug from a display name: lowercase, diacritics
/// folded away (NFD decomposition with combining marks removed),
/// whitespace runs collapsed to a single hyphen, anything else that is
/// not a word character or hyphen dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_whitespace() {
            pending_hyphen = !slug.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    slug
}

/// Append a 6-digit uniqueness suffix derived from the current
/// timestamp's trailing digits.
///
/// Used when the base slug already exists. There is deliberately no
/// retry loop: a second collision within the same millisecond window is
/// an accepted edge case, backstopped by the database's unique index.
pub fn with_unique_suffix(base: &str) -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let suffix = &millis[millis.len().saturating_sub(6)..];
    format!("{base}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_czech_diacritics_are_folded() {
        assert_eq!(slugify("Svatba Nováků 2025"), "svatba-novaku-2025");
        assert_eq!(slugify("Žluťoučký kůň"), "zlutoucky-kun");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("Test   Foo"), "test-foo");
        assert_eq!(slugify("  padded  name  "), "padded-name");
    }

    #[test]
    fn test_special_characters_are_dropped() {
        assert_eq!(slugify("Anna & Tomáš!"), "anna-tomas");
        assert_eq!(slugify("50/50 (test)"), "5050-test");
    }

    #[test]
    fn test_existing_hyphens_survive() {
        assert_eq!(slugify("Black-and-White"), "black-and-white");
    }

    #[test]
    fn test_unique_suffix_shape() {
        let slug = with_unique_suffix("svatba-novaku-2025");
        let (base, suffix) = slug.rsplit_once('-').expect("has suffix");
        assert_eq!(base, "svatba-novaku-2025");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
