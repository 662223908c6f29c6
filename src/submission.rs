//! Registration Submission
//!
//! Final checks on a filled-in form and assembly of the record handed to
//! whatever performs the actual registration call.

use serde::{Deserialize, Serialize};

use crate::grammar::{FieldId, GrammarRegistry};
use crate::validation::ValidationResult;

/// Raw form contents as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    pub phone_prefix: String,
    pub phone_number: String,
    pub document_type: String,
    pub document_number: String,
}

/// Normalized record ready for submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub password: String,
    pub country_code: String,
    pub phone_number: String,
    pub document_type: String,
    pub document_number: String,
    pub organization: String,
}

impl RegistrationForm {
    /// Value of a grammar-backed field, trimmed
    pub fn field_value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => self.name.trim(),
            FieldId::Username => self.username.trim(),
            FieldId::DocumentNumber => self.document_number.trim(),
            FieldId::PhonePrefix => self.phone_prefix.trim(),
            FieldId::PhoneNumber => self.phone_number.trim(),
        }
    }
}

fn incomplete_message(field: FieldId, value: &str) -> String {
    if value.is_empty() {
        return format!("Field '{field}' is required");
    }

    match field {
        FieldId::Username if value.ends_with(['.', '_']) => {
            "Username must not end with '.' or '_'".to_string()
        }
        _ => format!("'{value}' is not a valid {field}"),
    }
}

/// Check a form against the active profile and build the record.
///
/// A password mismatch is reported alone; the remaining checks only run
/// once both passwords agree. Warnings are logged and do not block the
/// registration.
pub fn prepare_registration(
    form: &RegistrationForm,
    organization: &str,
    registry: &GrammarRegistry,
) -> Result<Registration, ValidationResult> {
    let mut result = ValidationResult::new();

    if form.password != form.password_confirmation {
        result.add_error("password", "Passwords do not match".to_string());
        return Err(result);
    }
    if form.password.is_empty() {
        result.add_error("password", "Field 'password' is required".to_string());
    }

    for field in FieldId::ALL {
        let value = form.field_value(field);
        match registry.grammar_for(field) {
            Some(grammar) => {
                if !grammar.accepts_complete(value) {
                    result.add_error(field.as_str(), incomplete_message(field, value));
                }
            }
            None => result.add_error(
                field.as_str(),
                format!("No grammar for field '{field}' in the active profile"),
            ),
        }
    }

    let document_type = form.document_type.trim().to_uppercase();
    if document_type.is_empty() {
        result.add_error(
            "document-type",
            "Field 'document-type' is required".to_string(),
        );
    }

    let organization = organization.trim();
    if organization.is_empty() {
        result.add_warning("organization", "No organization selected".to_string());
    }

    if !result.is_valid() {
        return Err(result);
    }

    for warning in &result.diagnostics {
        log::warn!("{}: {}", warning.field, warning.message);
    }

    Ok(Registration {
        name: form.field_value(FieldId::Name).to_string(),
        username: form.field_value(FieldId::Username).to_string(),
        password: form.password.clone(),
        country_code: form.field_value(FieldId::PhonePrefix).to_string(),
        phone_number: form.field_value(FieldId::PhoneNumber).to_string(),
        document_type,
        document_number: form.field_value(FieldId::DocumentNumber).to_string(),
        organization: organization.to_string(),
    })
}
