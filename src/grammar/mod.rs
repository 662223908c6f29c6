//! Field Grammars
//!
//! Grammar definitions, the profiles that bind them to fields, and the
//! registry that selects the active profile.

pub mod profile;
pub mod registry;
pub mod schema;

pub use profile::Profile;
pub use registry::GrammarRegistry;
pub use schema::{FieldId, Grammar, PasteMode};
