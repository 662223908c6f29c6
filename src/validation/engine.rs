//! Validation Engine
//!
//! Keystroke and paste evaluation against a field grammar, plus the
//! diagnostic types used when a whole form is checked.
//!
//! Evaluation is append-only: a keystroke always lands after the current
//! value, so the position of the new character is the current length.

use crate::grammar::{Grammar, PasteMode};

/// Result of evaluating a proposed insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The insertion is legal; carries the value the field should take
    Accept(String),
    /// The insertion is discarded and the field keeps its value
    Reject,
}

impl Outcome {
    pub fn is_accept(&self) -> bool {
        matches!(self, Outcome::Accept(_))
    }

    /// New value on accept
    pub fn value(&self) -> Option<&str> {
        match self {
            Outcome::Accept(value) => Some(value),
            Outcome::Reject => None,
        }
    }
}

/// Evaluate a single character appended to `current`
pub fn evaluate_keystroke(grammar: &Grammar, current: &str, ch: char) -> Outcome {
    let position = current.chars().count();

    if !grammar.allows_char(ch, position) {
        return Outcome::Reject;
    }

    let mut candidate = String::with_capacity(current.len() + ch.len_utf8());
    candidate.push_str(current);
    candidate.push(ch);

    if grammar.breaks_run_rule(&candidate) {
        return Outcome::Reject;
    }

    if grammar.max_len().is_some_and(|max| position + 1 > max) {
        return Outcome::Reject;
    }

    Outcome::Accept(candidate)
}

/// Evaluate a paste as a unit.
///
/// The pasted text must satisfy the grammar's whole-string paste rule on its
/// own. On accept it is either appended to `current` or replaces it,
/// depending on the grammar's [`PasteMode`].
pub fn evaluate_paste(grammar: &Grammar, current: &str, pasted: &str) -> Outcome {
    let text = grammar.normalize_paste(pasted);

    if !grammar.accepts_paste(text) {
        return Outcome::Reject;
    }

    match grammar.paste_mode() {
        PasteMode::Append => Outcome::Accept(format!("{current}{text}")),
        PasteMode::Replace => Outcome::Accept(text.to_string()),
    }
}

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found while checking a submitted form
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

/// Result of checking a form
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            field: field.to_string(),
            message,
            severity: Severity::Error,
        });
    }

    pub fn add_warning(&mut self, field: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            field: field.to_string(),
            message,
            severity: Severity::Warning,
        });
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_all(grammar: &Grammar, keys: &str) -> String {
        keys.chars().fold(String::new(), |value, ch| {
            match evaluate_keystroke(grammar, &value, ch) {
                Outcome::Accept(next) => next,
                Outcome::Reject => value,
            }
        })
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.add_warning("organization", "Test warning".to_string());
        assert!(result.is_valid()); // Warnings don't make it invalid

        result.add_error("username", "Test error".to_string());
        assert!(!result.is_valid()); // Errors make it invalid
        assert_eq!(result.errors().count(), 1);
    }

    #[test]
    fn test_outcome_accessors() {
        let accepted = Outcome::Accept("ab".to_string());
        assert!(accepted.is_accept());
        assert_eq!(accepted.value(), Some("ab"));
        assert!(!Outcome::Reject.is_accept());
        assert_eq!(Outcome::Reject.value(), None);
    }

    #[test]
    fn test_keystroke_position_counts_chars_not_bytes() {
        // "ñ" is two bytes; the prefix literal must still line up by character
        let grammar = Grammar::PhonePrefix {
            literal: "ñ+".to_string(),
        };
        assert_eq!(
            evaluate_keystroke(&grammar, "ñ", '+'),
            Outcome::Accept("ñ+".to_string())
        );
    }

    #[test]
    fn test_letters_typing() {
        assert_eq!(type_all(&Grammar::Letters, "José 3Ñú_ñez"), "José Ñúñez");
    }

    #[test]
    fn test_username_typing() {
        assert_eq!(type_all(&Grammar::Username, "._ju..an__p é"), "ju.an_p");
    }

    #[test]
    fn test_phone_number_typing_stops_at_bound() {
        assert_eq!(
            type_all(&Grammar::phone_number(), "a13001234567999"),
            "3001234567"
        );
    }

    #[test]
    fn test_paste_append_and_replace() {
        assert_eq!(
            evaluate_paste(&Grammar::Letters, "Ana ", "María"),
            Outcome::Accept("Ana María".to_string())
        );
        assert_eq!(
            evaluate_paste(&Grammar::Username, "ana.", "maria9"),
            Outcome::Accept("ana.maria9".to_string())
        );
        assert_eq!(
            evaluate_paste(&Grammar::DocumentNumber, "99", "1234"),
            Outcome::Accept("1234".to_string())
        );
        assert_eq!(
            evaluate_paste(&Grammar::phone_prefix(), "+5", "+57"),
            Outcome::Accept("+57".to_string())
        );
    }

    #[test]
    fn test_phone_number_paste_is_trimmed() {
        assert_eq!(
            evaluate_paste(&Grammar::phone_number(), "", " 3001234567 "),
            Outcome::Accept("3001234567".to_string())
        );
    }

    #[test]
    fn test_empty_paste_is_rejected() {
        for grammar in [
            Grammar::Letters,
            Grammar::Username,
            Grammar::DocumentNumber,
            Grammar::phone_prefix(),
            Grammar::phone_number(),
        ] {
            assert_eq!(evaluate_paste(&grammar, "", ""), Outcome::Reject);
        }
    }
}
