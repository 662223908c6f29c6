//! Field State
//!
//! A field's value only changes through accepted evaluations.

use crate::grammar::{FieldId, Grammar};

use super::engine::{evaluate_keystroke, evaluate_paste, Outcome};

/// A form field guarded by its grammar
#[derive(Debug, Clone)]
pub struct Field<'g> {
    id: FieldId,
    grammar: &'g Grammar,
    value: String,
}

impl<'g> Field<'g> {
    pub fn new(id: FieldId, grammar: &'g Grammar) -> Self {
        Self {
            id,
            grammar,
            value: String::new(),
        }
    }

    /// Start from an existing value, which must already be a valid prefix
    pub fn with_value(id: FieldId, grammar: &'g Grammar, value: &str) -> Option<Self> {
        grammar.accepts_prefix(value).then(|| Self {
            id,
            grammar,
            value: value.to_string(),
        })
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply a keystroke; returns whether it was accepted
    pub fn keystroke(&mut self, ch: char) -> bool {
        let outcome = evaluate_keystroke(self.grammar, &self.value, ch);
        self.apply(outcome, || format!("keystroke {ch:?}"))
    }

    /// Apply a paste; returns whether it was accepted
    pub fn paste(&mut self, text: &str) -> bool {
        let outcome = evaluate_paste(self.grammar, &self.value, text);
        self.apply(outcome, || format!("paste {text:?}"))
    }

    /// Remove the last character. Deletion is never vetoed.
    pub fn backspace(&mut self) -> Option<char> {
        self.value.pop()
    }

    /// Whether the value is acceptable for submission
    pub fn is_complete(&self) -> bool {
        self.grammar.accepts_complete(&self.value)
    }

    fn apply(&mut self, outcome: Outcome, describe: impl FnOnce() -> String) -> bool {
        match outcome {
            Outcome::Accept(value) => {
                self.value = value;
                true
            }
            Outcome::Reject => {
                log::trace!(
                    "Rejected {} on field '{}' (value {:?})",
                    describe(),
                    self.id,
                    self.value
                );
                false
            }
        }
    }
}
