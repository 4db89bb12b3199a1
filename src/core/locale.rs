//! Locale classifier.
//!
//! Decides whether a fragment of text contains content written in the
//! script of the configured locale.

use std::{fmt, str::FromStr, sync::LazyLock};

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CJK_IDEOGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{4E00}-\x{9FFF}\x{3400}-\x{4DBF}\x{F900}-\x{FAFF}\x{20000}-\x{2FA1F}]")
        .unwrap()
});

static LATIN_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").unwrap());

static FRENCH_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zÀÂÆÇÉÈÊËÎÏÔŒÙÛÜŸàâæçéèêëîïôœùûüÿ]").unwrap());

static SPANISH_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zÁÉÍÓÚÑÜáéíóúñü]").unwrap());

/// Source-text locale whose script marks a string as translatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
    Fr,
    Es,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Es => "es",
        }
    }

    /// Returns a locale for a configured code, or `None` for codes without a script test.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh" => Some(Locale::Zh),
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    /// Checks if `text` contains at least one character of this locale's script.
    pub fn matches(&self, text: &str) -> bool {
        let script = match self {
            Locale::Zh => &*CJK_IDEOGRAPH,
            Locale::En => &*LATIN_LETTER,
            Locale::Fr => &*FRENCH_LETTER,
            Locale::Es => &*SPANISH_LETTER,
        };
        script.is_match(text)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s).ok_or_else(|| format!("unsupported locale: \"{}\"", s))
    }
}

/// Checks if the text holds translatable content for the locale code.
///
/// Returns false for empty or whitespace-only text and for locale codes
/// without a script test.
///
/// # Examples
///
/// ```
/// use i18nify::core::should_translate;
///
/// assert!(should_translate("你好", "zh"));
/// assert!(!should_translate("hello", "zh"));
/// assert!(should_translate("hello", "en"));
/// assert!(!should_translate("123", "en"));
/// assert!(!should_translate("hello", "de"));
/// ```
pub fn should_translate(text: &str, locale: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    Locale::from_code(locale).is_some_and(|locale| locale.matches(text))
}
