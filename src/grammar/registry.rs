//! Grammar Registry
//!
//! In-memory set of profiles with one active profile.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::profile::Profile;
use super::schema::{FieldId, Grammar};

/// File suffix that marks a profile file inside a profile directory
pub const PROFILE_SUFFIX: &str = ".field-profile.toml";

/// Name of the profile compiled into the crate
pub const DEFAULT_PROFILE: &str = "colombia";

/// In-memory profile registry
#[derive(Debug, Clone)]
pub struct GrammarRegistry {
    profiles: HashMap<String, Profile>,
    active_profile: Option<String>,
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
            active_profile: None,
        }
    }

    /// Registry holding only the embedded default profile, already active
    pub fn with_default_profile() -> Self {
        let mut registry = Self::new();
        registry.add_embedded_default_profile();
        registry.set_active_profile(DEFAULT_PROFILE);
        registry
    }

    /// Add a profile, replacing any profile with the same name
    pub fn add_profile(&mut self, profile: Profile) {
        if self.profiles.contains_key(&profile.name) {
            log::debug!("Replacing profile '{}'", profile.name);
        }
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Set the active profile
    pub fn set_active_profile(&mut self, name: &str) -> bool {
        if self.profiles.contains_key(name) {
            self.active_profile = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Get the currently active profile
    pub fn get_active_profile(&self) -> Option<&Profile> {
        self.active_profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    /// List all available profiles, sorted by name
    pub fn list_profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Grammar for a field in the active profile
    pub fn grammar_for(&self, field: FieldId) -> Option<&Grammar> {
        self.get_active_profile()?.grammar(field)
    }

    /// Add the profile compiled into the crate
    pub fn add_embedded_default_profile(&mut self) {
        let embedded_toml = include_str!("../../resources/profiles/colombia.field-profile.toml");

        match Profile::from_toml(embedded_toml) {
            Ok(profile) => self.add_profile(profile),
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded default profile: {:#}. Using minimal fallback.",
                    e
                );
                self.add_minimal_default_profile();
            }
        }
    }

    /// Fallback used when the embedded TOML cannot be parsed
    fn add_minimal_default_profile(&mut self) {
        let grammars = HashMap::from([
            (FieldId::Name, Grammar::Letters),
            (FieldId::Username, Grammar::Username),
            (FieldId::DocumentNumber, Grammar::DocumentNumber),
            (FieldId::PhonePrefix, Grammar::phone_prefix()),
            (FieldId::PhoneNumber, Grammar::phone_number()),
        ]);

        self.add_profile(Profile {
            name: DEFAULT_PROFILE.to_string(),
            version: Some("minimal-fallback".to_string()),
            description: Some("Minimal fallback profile".to_string()),
            grammars,
        });
    }

    /// Load one profile file and return its name
    pub fn load_profile_file(&mut self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let profile = Profile::from_toml(&content)
            .with_context(|| format!("Failed to load profile file {}", path.display()))?;

        let name = profile.name.clone();
        log::info!("Loaded profile '{}' from {}", name, path.display());
        self.add_profile(profile);
        Ok(name)
    }

    /// Load every profile file in `dir`.
    ///
    /// A missing directory loads nothing. Broken files are skipped with a
    /// warning so one bad file does not hide the others. Returns the number
    /// of profiles loaded.
    pub fn load_profile_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            log::debug!("Profile directory {} does not exist", dir.display());
            return Ok(0);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read profile directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(PROFILE_SUFFIX))
            })
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_profile_file(&path) {
                Ok(_) => loaded += 1,
                Err(e) => log::warn!("Skipping profile: {:#}", e),
            }
        }

        Ok(loaded)
    }
}
