//! Pix key format validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// The key schemes accepted by the Pix directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyScheme {
    /// Individual tax ID: exactly 11 digits.
    Cpf,
    /// Company tax ID: exactly 14 digits.
    Cnpj,
    /// `+`, a 1-3 digit country code, then 10-11 digits.
    Phone,
    Email,
    /// Random key: 32 lowercase hex characters.
    Evp,
}

struct Pattern {
    scheme: KeyScheme,
    regex: Regex,
}

static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    [
        (KeyScheme::Cpf, r"^[0-9]{11}$"),
        (KeyScheme::Cnpj, r"^[0-9]{14}$"),
        (KeyScheme::Phone, r"^\+[0-9]{1,3}[0-9]{10,11}$"),
        (KeyScheme::Email, r"^[^@\s]+@[^@\s]+\.[^@\s]+$"),
        (KeyScheme::Evp, r"^[0-9a-f]{32}$"),
    ]
    .into_iter()
    .map(|(scheme, pattern)| Pattern {
        scheme,
        regex: Regex::new(pattern).expect("key patterns are valid regexes"),
    })
    .collect()
});

impl KeyScheme {
    /// Returns the first scheme whose pattern fully matches `key`.
    pub fn detect(key: &str) -> Option<KeyScheme> {
        PATTERNS
            .iter()
            .find(|p| p.regex.is_match(key))
            .map(|p| p.scheme)
    }

    /// Short lowercase name, as used in the Pix directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyScheme::Cpf => "cpf",
            KeyScheme::Cnpj => "cnpj",
            KeyScheme::Phone => "phone",
            KeyScheme::Email => "email",
            KeyScheme::Evp => "evp",
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true iff `key` fully matches at least one accepted key scheme.
pub fn is_valid_key(key: &str) -> bool {
    KeyScheme::detect(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_scheme() {
        assert_eq!(KeyScheme::detect("12345678901"), Some(KeyScheme::Cpf));
        assert_eq!(KeyScheme::detect("12345678000195"), Some(KeyScheme::Cnpj));
        assert_eq!(KeyScheme::detect("+5511987654321"), Some(KeyScheme::Phone));
        assert_eq!(KeyScheme::detect("+551198765432"), Some(KeyScheme::Phone));
        assert_eq!(KeyScheme::detect("ana@example.com"), Some(KeyScheme::Email));
        assert_eq!(
            KeyScheme::detect("0123456789abcdef0123456789abcdef"),
            Some(KeyScheme::Evp)
        );
    }

    #[test]
    fn test_rejects_malformed_keys() {
        for key in [
            "",
            "123ABC",
            "772384558",
            "123456789012",
            "1234567890123",
            "123456789012345",
            "5511987654321",
            "+5511987",
            "+551198765432100",
            "+55 11987654321",
            "ana@example",
            "ana.example.com",
            "@example.com",
            "0123456789ABCDEF0123456789ABCDEF",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
        ] {
            assert!(!is_valid_key(key), "{key:?} should be rejected");
        }
    }

    #[test]
    fn test_match_is_full_string() {
        assert!(!is_valid_key(" 12345678901"));
        assert!(!is_valid_key("12345678901\n"));
        assert!(!is_valid_key("x12345678901"));
    }

    #[test]
    fn test_email_rejects_whitespace() {
        assert!(!is_valid_key("ana@example.com\n"));
        assert!(!is_valid_key("ana @example.com"));
        assert!(!is_valid_key("ana@exam ple.com"));
        assert!(!is_valid_key("ana@example.\tcom"));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are Unicode decimal digits but not valid CPF characters.
        assert!(!is_valid_key("١٢٣٤٥٦٧٨٩٠١"));
    }
}
