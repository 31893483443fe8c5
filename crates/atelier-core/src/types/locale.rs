//! Supported site locales and locale negotiation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Czech (the site default).
    Cs,
    /// English.
    En,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Locale; 2] = [Locale::Cs, Locale::En];

    /// The two-letter path prefix for this locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Cs => "cs",
            Locale::En => "en",
        }
    }

    /// Whether the given URL path already carries a locale prefix.
    pub fn path_has_locale(path: &str) -> bool {
        Self::ALL.iter().any(|locale| {
            let prefix = locale.as_str();
            path == format!("/{prefix}")
                || path.starts_with(&format!("/{prefix}/"))
        })
    }

    /// Resolve the locale for a request: explicit cookie first, then the
    /// first `Accept-Language` tag, then the configured default.
    pub fn negotiate(
        cookie: Option<&str>,
        accept_language: Option<&str>,
        default: Locale,
    ) -> Locale {
        if let Some(value) = cookie {
            if let Ok(locale) = value.parse() {
                return locale;
            }
        }

        if let Some(header) = accept_language {
            let preferred = header
                .split(',')
                .next()
                .unwrap_or("")
                .split('-')
                .next()
                .unwrap_or("")
                .trim();
            if let Ok(locale) = preferred.parse() {
                return locale;
            }
        }

        default
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cs" => Ok(Locale::Cs),
            "en" => Ok(Locale::En),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_wins_over_header() {
        let locale = Locale::negotiate(Some("en"), Some("cs,en;q=0.8"), Locale::Cs);
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn test_header_first_tag_used() {
        let locale = Locale::negotiate(None, Some("en-GB,en;q=0.9,cs;q=0.8"), Locale::Cs);
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn test_unknown_values_fall_back_to_default() {
        let locale = Locale::negotiate(Some("de"), Some("de-DE,fr;q=0.9"), Locale::Cs);
        assert_eq!(locale, Locale::Cs);
    }

    #[test]
    fn test_path_has_locale() {
        assert!(Locale::path_has_locale("/cs"));
        assert!(Locale::path_has_locale("/en/gallery/abc"));
        assert!(!Locale::path_has_locale("/gallery/abc"));
        assert!(!Locale::path_has_locale("/csx/projects"));
    }
}
