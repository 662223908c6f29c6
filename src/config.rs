//! Configuration management for the field-grammar tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Profile directory configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::grammar::FieldId;

/// Command-line arguments for the field-grammar tool
#[derive(Debug, Parser)]
#[command(name = "field-grammar")]
#[command(about = "Check keystrokes, pastes and registration forms against field grammars")]
#[command(version)]
pub struct Args {
    /// Explicitly specify the grammar profile to use
    #[arg(long, global = true, help = "Grammar profile to use (e.g., 'colombia')")]
    pub profile: Option<String>,

    /// Custom profile directory to search for profile files
    #[arg(long, global = true, help = "Directory containing *.field-profile.toml files")]
    pub profile_dir: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// What to run
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Replay text as keystrokes into an empty field
    Type {
        #[arg(value_enum)]
        field: FieldId,
        text: String,
    },
    /// Paste text into a field
    Paste {
        #[arg(value_enum)]
        field: FieldId,
        text: String,
        /// Value the field holds before the paste
        #[arg(long, default_value = "")]
        current: String,
    },
    /// Check a registration form stored as JSON
    Submit {
        form: PathBuf,
        #[arg(long, default_value = "")]
        organization: String,
    },
    /// List available profiles
    Profiles,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile name explicitly set via command line
    pub cli_profile: Option<String>,
    /// Profile directories to search, in load order
    pub profile_dirs: Vec<PathBuf>,
    /// Log level
    pub log_level: String,
    pub command: Command,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut profile_dirs = Vec::new();

        // User config directory first so an explicit directory can override it
        if let Some(config_dir) = dirs::config_dir() {
            profile_dirs.push(config_dir.join("field-grammar").join("profiles"));
        }

        if let Some(custom_dir) = args.profile_dir {
            profile_dirs.push(custom_dir);
        }

        Ok(Config {
            cli_profile: args.profile,
            profile_dirs,
            log_level: args.log_level,
            command: args.command,
        })
    }

    /// Profile to activate, falling back to the embedded default
    pub fn effective_profile(&self) -> &str {
        self.cli_profile
            .as_deref()
            .unwrap_or(crate::grammar::registry::DEFAULT_PROFILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_command() {
        let args = Args::try_parse_from(["field-grammar", "type", "phone-prefix", "+57"])
            .expect("parse args");
        let config = Config::from_args(args).expect("config");

        assert_eq!(
            config.command,
            Command::Type {
                field: FieldId::PhonePrefix,
                text: "+57".to_string()
            }
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.effective_profile(), "colombia");
    }

    #[test]
    fn test_custom_profile_dir_is_last() {
        let args = Args::try_parse_from([
            "field-grammar",
            "--profile",
            "mexico",
            "--profile-dir",
            "/tmp/profiles",
            "profiles",
        ])
        .expect("parse args");
        let config = Config::from_args(args).expect("config");

        assert_eq!(config.effective_profile(), "mexico");
        assert_eq!(
            config.profile_dirs.last(),
            Some(&PathBuf::from("/tmp/profiles"))
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Args::try_parse_from(["field-grammar", "type", "email", "x"]).is_err());
    }
}
