//! Grammar Profiles
//!
//! A profile binds every form field to a grammar. Profiles are written as
//! `*.field-profile.toml` files.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

use super::schema::{FieldId, Grammar};

/// Root profile file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileFile {
    pub profile: ProfileMeta,
    pub fields: Vec<FieldDef>,
}

/// Profile metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// One `[[fields]]` entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldDef {
    pub id: FieldId,
    pub grammar: Grammar,
}

/// Runtime profile (optimized for lookups)
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub grammars: HashMap<FieldId, Grammar>,
}

impl Profile {
    /// Parse and check a profile from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ProfileFile = toml::from_str(content).context("invalid profile TOML")?;
        Profile::try_from(file)
    }

    pub fn grammar(&self, field: FieldId) -> Option<&Grammar> {
        self.grammars.get(&field)
    }
}

impl TryFrom<ProfileFile> for Profile {
    type Error = anyhow::Error;

    fn try_from(file: ProfileFile) -> Result<Self> {
        let name = file.profile.name;
        let mut grammars = HashMap::new();

        for field in file.fields {
            if let Err(e) = field.grammar.check() {
                bail!("profile '{}', field '{}': {}", name, field.id, e);
            }
            if grammars.insert(field.id, field.grammar).is_some() {
                bail!("profile '{}' defines field '{}' twice", name, field.id);
            }
        }

        let missing: Vec<&str> = FieldId::ALL
            .iter()
            .filter(|id| !grammars.contains_key(id))
            .map(|id| id.as_str())
            .collect();
        if !missing.is_empty() {
            bail!(
                "profile '{}' is missing fields: {}",
                name,
                missing.join(", ")
            );
        }

        Ok(Self {
            name,
            version: file.profile.version,
            description: file.profile.description,
            grammars,
        })
    }
}
