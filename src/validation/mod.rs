//! Validation Engine
//!
//! Incremental keystroke/paste validation, kept apart from profile loading
//! and form submission.

pub mod engine;
pub mod field;

pub use engine::{evaluate_keystroke, evaluate_paste, Diagnostic, Outcome, Severity};
pub use field::Field;

// Re-export common types
pub use engine::ValidationResult;
