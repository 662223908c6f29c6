//! Grammar Schema Types
//!
//! Field grammars as plain tagged data. Each variant carries everything
//! needed to judge a value: its alphabet, positional rules, length bound
//! and paste rule.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static LETTERS_PASTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñ ]+$").unwrap());

static USERNAME_PASTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9Ññ][A-Za-z0-9._Ññ]*[A-Za-z0-9Ññ]$").unwrap());

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[._]{2}").unwrap());

static DOCUMENT_PASTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());

/// Accented letters accepted on top of ASCII letters
const EXTRA_LETTERS: &str = "ÁÉÍÓÚáéíóúÑñ";

/// Identity of a grammar-backed form field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    Name,
    Username,
    DocumentNumber,
    PhonePrefix,
    PhoneNumber,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Username,
        FieldId::DocumentNumber,
        FieldId::PhonePrefix,
        FieldId::PhoneNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Username => "username",
            FieldId::DocumentNumber => "document-number",
            FieldId::PhonePrefix => "phone-prefix",
            FieldId::PhoneNumber => "phone-number",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an accepted paste lands in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteMode {
    /// Pasted text is added after the current value
    Append,
    /// Pasted text becomes the whole value
    Replace,
}

/// A field grammar (matches the `grammar` table of a profile file)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Grammar {
    /// Latin letters, accented vowels, ñ/Ñ and space
    Letters,
    /// Letters, digits, `.` and `_` with separator placement rules
    Username,
    /// Digits, never starting with `0`
    DocumentNumber,
    /// A fixed literal typed one character at a time
    PhonePrefix {
        #[serde(default = "default_prefix_literal")]
        literal: String,
    },
    /// A fixed-length run of digits with a mandatory leading digit
    PhoneNumber {
        #[serde(default = "default_leading_digit")]
        leading_digit: char,
        #[serde(default = "default_phone_length")]
        length: usize,
    },
}

fn default_prefix_literal() -> String {
    "+57".to_string()
}

fn default_leading_digit() -> char {
    '3'
}

fn default_phone_length() -> usize {
    10
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || EXTRA_LETTERS.contains(c)
}

fn is_username_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == 'ñ' || c == 'Ñ'
}

fn is_separator(c: char) -> bool {
    c == '.' || c == '_'
}

impl Grammar {
    /// Default `+57` phone prefix grammar
    pub fn phone_prefix() -> Self {
        Grammar::PhonePrefix {
            literal: default_prefix_literal(),
        }
    }

    /// Default 10-digit phone number grammar starting with `3`
    pub fn phone_number() -> Self {
        Grammar::PhoneNumber {
            leading_digit: default_leading_digit(),
            length: default_phone_length(),
        }
    }

    /// Kind name as written in profile files
    pub fn kind(&self) -> &'static str {
        match self {
            Grammar::Letters => "letters",
            Grammar::Username => "username",
            Grammar::DocumentNumber => "document-number",
            Grammar::PhonePrefix { .. } => "phone-prefix",
            Grammar::PhoneNumber { .. } => "phone-number",
        }
    }

    /// Upper bound on value length in characters, if any
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Grammar::PhonePrefix { literal } => Some(literal.chars().count()),
            Grammar::PhoneNumber { length, .. } => Some(*length),
            Grammar::Letters | Grammar::Username | Grammar::DocumentNumber => None,
        }
    }

    pub fn paste_mode(&self) -> PasteMode {
        match self {
            Grammar::Letters | Grammar::Username => PasteMode::Append,
            Grammar::DocumentNumber | Grammar::PhonePrefix { .. } | Grammar::PhoneNumber { .. } => {
                PasteMode::Replace
            }
        }
    }

    /// Check that a grammar read from a profile is usable
    pub fn check(&self) -> Result<(), String> {
        match self {
            Grammar::PhonePrefix { literal } if literal.is_empty() => {
                Err("phone-prefix literal must not be empty".to_string())
            }
            Grammar::PhoneNumber { leading_digit, .. } if !leading_digit.is_ascii_digit() => Err(
                format!("phone-number leading digit '{leading_digit}' is not a digit"),
            ),
            Grammar::PhoneNumber { length, .. } if *length == 0 => {
                Err("phone-number length must be at least 1".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Whether `c` may be appended when the value already holds `position` characters
    pub fn allows_char(&self, c: char, position: usize) -> bool {
        match self {
            Grammar::Letters => is_letter(c) || c == ' ',
            Grammar::Username => is_username_alnum(c) || (is_separator(c) && position > 0),
            Grammar::DocumentNumber => c.is_ascii_digit() && !(position == 0 && c == '0'),
            Grammar::PhonePrefix { literal } => literal.chars().nth(position) == Some(c),
            Grammar::PhoneNumber { leading_digit, .. } => {
                c.is_ascii_digit() && (position > 0 || c == *leading_digit)
            }
        }
    }

    /// Whether the tail of `candidate` forms a forbidden run
    pub fn breaks_run_rule(&self, candidate: &str) -> bool {
        match self {
            Grammar::Username => candidate.ends_with("..") || candidate.ends_with("__"),
            _ => false,
        }
    }

    /// Whether `value` can still grow into a complete value
    pub fn accepts_prefix(&self, value: &str) -> bool {
        let within_bound = self
            .max_len()
            .is_none_or(|max| value.chars().count() <= max);

        within_bound
            && value
                .chars()
                .enumerate()
                .all(|(position, c)| self.allows_char(c, position))
            && !(matches!(self, Grammar::Username)
                && (value.contains("..") || value.contains("__")))
    }

    /// Whether `value` is an acceptable final value for submission
    pub fn accepts_complete(&self, value: &str) -> bool {
        if value.is_empty() || !self.accepts_prefix(value) {
            return false;
        }

        match self {
            Grammar::Username => !value.ends_with(is_separator),
            Grammar::PhonePrefix { literal } => value == literal,
            Grammar::PhoneNumber { length, .. } => value.chars().count() == *length,
            Grammar::Letters => !value.trim().is_empty(),
            Grammar::DocumentNumber => true,
        }
    }

    /// Text actually considered for a paste.
    ///
    /// Phone numbers are commonly copied with stray whitespace around them,
    /// so that grammar trims before matching.
    pub fn normalize_paste<'a>(&self, pasted: &'a str) -> &'a str {
        match self {
            Grammar::PhoneNumber { .. } => pasted.trim(),
            _ => pasted,
        }
    }

    /// Whole-string paste predicate
    pub fn accepts_paste(&self, text: &str) -> bool {
        match self {
            Grammar::Letters => LETTERS_PASTE.is_match(text),
            Grammar::Username => USERNAME_PASTE.is_match(text) && !SEPARATOR_RUN.is_match(text),
            Grammar::DocumentNumber => DOCUMENT_PASTE.is_match(text),
            Grammar::PhonePrefix { literal } => text == literal,
            Grammar::PhoneNumber {
                leading_digit,
                length,
            } => {
                text.chars().count() == *length
                    && text.starts_with(*leading_digit)
                    && text.chars().all(|c| c.is_ascii_digit())
            }
        }
    }
}
