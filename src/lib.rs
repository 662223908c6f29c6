//! Field Grammar
//!
//! Incremental validation for registration-form fields: every keystroke and
//! every paste is checked against the field's grammar before it may change
//! the field's value.
//!
//! This library provides:
//! - Grammar definitions and TOML-defined profiles
//! - Keystroke and paste evaluation
//! - Final form checks and record assembly
//! - Configuration management

pub mod cli;
pub mod config;
pub mod grammar;
pub mod submission;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use grammar::{FieldId, Grammar, GrammarRegistry, PasteMode, Profile};
pub use submission::{prepare_registration, Registration, RegistrationForm};
pub use validation::{evaluate_keystroke, evaluate_paste, Field, Outcome, ValidationResult};
