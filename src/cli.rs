//! Command-line driver
//!
//! Wires configuration, logging and the grammar registry, then runs one
//! command against the active profile.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Write};

use crate::config::{Command, Config};
use crate::grammar::{FieldId, GrammarRegistry};
use crate::submission::{prepare_registration, RegistrationForm};
use crate::validation::Field;

/// Entry point for the `field-grammar` binary
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let registry = build_registry(&config)?;
    let stdout = io::stdout();
    execute(&config.command, &registry, &mut stdout.lock())
}

/// Build the registry: embedded profile, then each profile directory, then
/// activate the configured profile
pub fn build_registry(config: &Config) -> Result<GrammarRegistry> {
    let mut registry = GrammarRegistry::new();
    registry.add_embedded_default_profile();

    for dir in &config.profile_dirs {
        let loaded = registry.load_profile_dir(dir)?;
        if loaded > 0 {
            log::info!("Loaded {} profile(s) from {}", loaded, dir.display());
        }
    }

    let name = config.effective_profile();
    if !registry.set_active_profile(name) {
        bail!(
            "Unknown profile '{}' (available: {})",
            name,
            registry.list_profiles().join(", ")
        );
    }

    Ok(registry)
}

/// Run a single command, writing its report to `out`
pub fn execute(command: &Command, registry: &GrammarRegistry, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Type { field, text } => {
            let grammar = registry
                .grammar_for(*field)
                .with_context(|| format!("No grammar for field '{field}'"))?;
            let mut state = Field::new(*field, grammar);

            for ch in text.chars() {
                if state.keystroke(ch) {
                    writeln!(out, "{ch:?} accept -> {:?}", state.value())?;
                } else {
                    writeln!(out, "{ch:?} reject")?;
                }
            }
            writeln!(
                out,
                "value: {:?} ({})",
                state.value(),
                if state.is_complete() { "complete" } else { "incomplete" }
            )?;
        }
        Command::Paste {
            field,
            text,
            current,
        } => {
            let grammar = registry
                .grammar_for(*field)
                .with_context(|| format!("No grammar for field '{field}'"))?;
            let Some(mut state) = Field::with_value(*field, grammar, current) else {
                bail!("{current:?} is not a valid starting value for '{field}'");
            };

            if state.paste(text) {
                writeln!(out, "accept -> {:?}", state.value())?;
            } else {
                writeln!(out, "reject, value stays {:?}", state.value())?;
            }
        }
        Command::Submit { form, organization } => {
            let content = fs::read_to_string(form)
                .with_context(|| format!("Failed to read form {}", form.display()))?;
            let form: RegistrationForm =
                serde_json::from_str(&content).context("Form is not valid JSON")?;

            match prepare_registration(&form, organization, registry) {
                Ok(registration) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&registration)?)?;
                }
                Err(result) => {
                    for diagnostic in &result.diagnostics {
                        writeln!(
                            out,
                            "{:?} {}: {}",
                            diagnostic.severity, diagnostic.field, diagnostic.message
                        )?;
                    }
                    bail!(
                        "Registration rejected with {} error(s)",
                        result.errors().count()
                    );
                }
            }
        }
        Command::Profiles => {
            let active = registry.get_active_profile();
            for name in registry.list_profiles() {
                let is_active = active.is_some_and(|p| p.name == name);
                let marker = if is_active { "*" } else { " " };
                writeln!(out, "{marker} {name}")?;
            }

            if let Some(profile) = active {
                for field in FieldId::ALL {
                    if let Some(grammar) = profile.grammar(field) {
                        writeln!(out, "  {field}: {}", grammar.kind())?;
                    }
                }
            }
        }
    }

    Ok(())
}
