//! Locale routing configuration.

use serde::{Deserialize, Serialize};

use crate::types::locale::Locale;

/// Settings for locale-prefixed routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale used when neither cookie nor Accept-Language resolves.
    #[serde(default = "default_locale")]
    pub default_locale: Locale,
    /// Name of the cookie carrying a user-chosen locale.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_locale() -> Locale {
    Locale::Cs
}

fn default_cookie_name() -> String {
    "locale".to_string()
}
