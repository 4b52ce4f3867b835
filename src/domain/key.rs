//! Private key newtype that never prints its contents.

use std::fmt;

use serde::Deserialize;

/// Raw private key material for one funding wallet.
///
/// The inner String is private; `Debug` and `Display` render a masked form so
/// keys cannot leak through logs or error messages.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct SecretKey(String);

impl SecretKey {
    /// Wrap raw key material. Surrounding whitespace is dropped.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// Expose the raw key for signing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short masked rendering, safe for logs.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len().max(3));
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for SecretKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn debug_and_display_hide_key() {
        let key = SecretKey::from(KEY);
        let debug = format!("{key:?}");
        let display = key.to_string();

        assert!(!debug.contains("a69102937d"));
        assert!(!display.contains("a69102937d"));
        assert_eq!(display, "0x4c08…2318");
    }

    #[test]
    fn short_keys_are_fully_masked() {
        assert_eq!(SecretKey::from("abc").masked(), "***");
        assert_eq!(SecretKey::from("").masked(), "***");
    }

    #[test]
    fn new_trims_whitespace() {
        let key = SecretKey::new(format!("  {KEY}\n"));
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn deserializes_from_json_string_list() {
        let keys: Vec<SecretKey> = serde_json::from_str(&format!("[\"{KEY}\"]")).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].expose(), KEY);
    }
}
