//! Translation key generation.
//!
//! Keys have the shape `<prefix>.<8 lowercase hex chars>`. The hex fragment is
//! the head of a fresh random 128-bit identifier, which leaves 32 bits of
//! entropy per key. No uniqueness check happens here: the registry refuses
//! duplicate keys and the caller draws again (see `TranslationRegistry::try_insert`).

use std::{fmt::Write as _, path::Path};

use crate::error::Result;

/// Prefix used when nothing better can be derived from the file name.
pub const DEFAULT_KEY_PREFIX: &str = "i18n";

/// Number of hex characters kept from the random identifier.
pub const KEY_HEX_LEN: usize = 8;

/// Generate a fresh key for `prefix`.
pub fn generate_key(prefix: &str) -> Result<String> {
    let mut id = [0u8; 16];
    getrandom::getrandom(&mut id)?;
    // 4 bytes give the 8 hex chars.
    let mut key = String::with_capacity(prefix.len() + 1 + KEY_HEX_LEN);
    key.push_str(prefix);
    key.push('.');
    for byte in &id[..KEY_HEX_LEN / 2] {
        let _ = write!(key, "{:02x}", byte);
    }
    Ok(key)
}

/// Derive a key prefix from a source file's stem.
///
/// `src/components/UserCard.tsx` gives `UserCard`; characters outside
/// `[A-Za-z0-9_-]` are dropped and an empty result falls back to
/// [`DEFAULT_KEY_PREFIX`].
pub fn prefix_for_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    // `index.tsx` says nothing, use the directory instead.
    let stem = if stem == "index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    } else {
        stem
    };
    let cleaned: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        DEFAULT_KEY_PREFIX.to_string()
    } else {
        cleaned
    }
}

/// Checks that `key` is `<prefix>.` followed by exactly 8 lowercase hex chars.
pub fn is_generated_key(key: &str, prefix: &str) -> bool {
    let Some(rest) = key
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return false;
    };
    rest.len() == KEY_HEX_LEN
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
