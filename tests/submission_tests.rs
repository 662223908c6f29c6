//! Form submission checks, driven through the JSON form file the CLI reads
use std::fs;

use field_grammar::cli::execute;
use field_grammar::config::Command;
use field_grammar::validation::Severity;
use field_grammar::{prepare_registration, GrammarRegistry, RegistrationForm};
use tempfile::NamedTempFile;

const VALID_FORM: &str = r#"{
    "name": "María Núñez",
    "username": "maria.nunez_2",
    "password": "Secreta#1",
    "password_confirmation": "Secreta#1",
    "phone_prefix": "+57",
    "phone_number": " 3001234567 ",
    "document_type": "cc",
    "document_number": "52123456"
}"#;

fn write_form(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp file");
    fs::write(file.path(), content).expect("write form");
    file
}

#[test]
fn test_submit_valid_form_prints_record() {
    let file = write_form(VALID_FORM);
    let registry = GrammarRegistry::with_default_profile();
    let command = Command::Submit {
        form: file.path().to_path_buf(),
        organization: "Fundación Andina".to_string(),
    };

    let mut out = Vec::new();
    execute(&command, &registry, &mut out).expect("valid form");

    let record: serde_json::Value = serde_json::from_slice(&out).expect("json output");
    assert_eq!(record["country_code"], "+57");
    assert_eq!(record["phone_number"], "3001234567");
    assert_eq!(record["document_type"], "CC");
    assert_eq!(record["organization"], "Fundación Andina");
    assert!(record.get("password_confirmation").is_none());
}

#[test]
fn test_submit_invalid_form_lists_errors() {
    let form = VALID_FORM
        .replace("\"+57\"", "\"+5\"")
        .replace("\"52123456\"", "\"\"");
    let file = write_form(&form);
    let registry = GrammarRegistry::with_default_profile();
    let command = Command::Submit {
        form: file.path().to_path_buf(),
        organization: String::new(),
    };

    let mut out = Vec::new();
    let err = execute(&command, &registry, &mut out).unwrap_err();
    assert!(err.to_string().contains("2 error(s)"));

    let output = String::from_utf8(out).expect("utf8");
    assert!(output.contains("Error phone-prefix: '+5' is not a valid phone-prefix"));
    assert!(output.contains("Error document-number: Field 'document-number' is required"));
    assert!(output.contains("Warning organization: No organization selected"));
}

#[test]
fn test_submit_rejects_malformed_json() {
    let file = write_form("{ not json");
    let registry = GrammarRegistry::with_default_profile();
    let command = Command::Submit {
        form: file.path().to_path_buf(),
        organization: String::new(),
    };

    assert!(execute(&command, &registry, &mut Vec::<u8>::new()).is_err());
}

#[test]
fn test_every_field_reported_for_empty_form() {
    let registry = GrammarRegistry::with_default_profile();
    let result = prepare_registration(&RegistrationForm::default(), "Org", &registry).unwrap_err();

    let fields: Vec<&str> = result.errors().map(|d| d.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "password",
            "name",
            "username",
            "document-number",
            "phone-prefix",
            "phone-number",
            "document-type"
        ]
    );
    assert!(result.diagnostics.iter().all(|d| d.severity == Severity::Error));
}
