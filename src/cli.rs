//! Command-line interface module for dirsort.
//!
//! This module handles:
//! - Argument parsing
//! - Configuration loading
//! - Organization orchestration and the final summary

use crate::config::{CategoryConfig, ConfigError, resolve_config_path};
use crate::file_category::ExtensionLookup;
use crate::file_organizer::{
    ConflictPolicy, FileOrganizer, OrganizeError, OrganizeOptions, RunReport,
};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Sort the files of a directory into category folders by extension.
///
/// The mapping from categories to extensions is read from a JSON or TOML
/// file (`categories.json` by default). Sub-directories are left alone and
/// files without an extension stay where they are.
#[derive(Parser, Debug)]
#[command(name = "dirsort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory whose files should be organized
    #[arg(required_unless_present = "init_config")]
    pub target: Option<PathBuf>,

    /// Path to the category mapping (JSON, or TOML when ending in .toml)
    #[arg(short, long, env = "DIRSORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write a starter mapping to the config path and exit
    #[arg(long, conflicts_with_all = ["target", "dry_run", "overwrite"])]
    pub init_config: bool,

    /// Show what would be moved without touching anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Replace files that already exist in the category folder
    #[arg(long)]
    pub overwrite: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Turns parsed arguments into the command to execute.
    pub fn command(&self) -> OrganizeCommand {
        match &self.target {
            Some(target) if !self.init_config => OrganizeCommand::Organize {
                target: target.clone(),
                options: OrganizeOptions {
                    conflict: if self.overwrite {
                        ConflictPolicy::Overwrite
                    } else {
                        ConflictPolicy::Skip
                    },
                    dry_run: self.dry_run,
                },
            },
            _ => OrganizeCommand::InitConfig,
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone)]
pub enum OrganizeCommand {
    /// Organize files in a directory.
    Organize {
        target: PathBuf,
        options: OrganizeOptions,
    },
    /// Write the starter category mapping.
    InitConfig,
}

/// Fatal errors for a run. Per-file problems never show up here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Organize(#[from] OrganizeError),
}

/// Runs the CLI application with the given command.
///
/// # Errors
///
/// Returns a `RunError` when the configuration cannot be loaded or the
/// target directory is invalid. Skipped files are not errors.
pub fn run_cli(command: OrganizeCommand, config_path: Option<&Path>) -> Result<(), RunError> {
    match command {
        OrganizeCommand::Organize { target, options } => {
            let report = organize_directory(&target, config_path, options)?;
            OutputFormatter::summary_table(&report, options.dry_run);
            Ok(())
        }
        OrganizeCommand::InitConfig => {
            let path = resolve_config_path(config_path);
            CategoryConfig::starter().write_new(&path)?;
            info!("Wrote starter category mapping to {}", path.display());
            OutputFormatter::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

/// Loads the category mapping, then runs one organization pass.
///
/// This function:
/// 1. Loads and validates the configuration
/// 2. Builds the extension lookup
/// 3. Validates the target directory
/// 4. Moves every file into its category folder
///
/// Both loading and validation happen before any file is touched.
///
/// # Errors
///
/// Returns `RunError::Config` for a missing or malformed configuration and
/// `RunError::Organize` for an invalid or unreadable target directory.
pub fn organize_directory(
    target: &Path,
    config_path: Option<&Path>,
    options: OrganizeOptions,
) -> Result<RunReport, RunError> {
    let config = CategoryConfig::load(config_path)?;
    let lookup = ExtensionLookup::from_config(&config);
    info!(
        "Loaded {} categories covering {} extensions",
        config.categories.len(),
        lookup.len()
    );

    let organizer = FileOrganizer::new(target, &lookup, options)?;
    info!("Organizing directory: {}", organizer.target().display());
    Ok(organizer.run()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_defaults_to_skip_policy() {
        let cli = Cli::parse_from(["dirsort", "/tmp/somewhere"]);
        match cli.command() {
            OrganizeCommand::Organize { target, options } => {
                assert_eq!(target, PathBuf::from("/tmp/somewhere"));
                assert_eq!(options.conflict, ConflictPolicy::Skip);
                assert!(!options.dry_run);
            }
            OrganizeCommand::InitConfig => panic!("expected organize command"),
        }
    }

    #[test]
    fn test_command_flags() {
        let cli = Cli::parse_from(["dirsort", "dir", "--overwrite", "-n", "-c", "map.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("map.toml")));
        match cli.command() {
            OrganizeCommand::Organize { options, .. } => {
                assert_eq!(options.conflict, ConflictPolicy::Overwrite);
                assert!(options.dry_run);
            }
            OrganizeCommand::InitConfig => panic!("expected organize command"),
        }
    }

    #[test]
    fn test_init_config_needs_no_target() {
        let cli = Cli::parse_from(["dirsort", "--init-config"]);
        assert!(matches!(cli.command(), OrganizeCommand::InitConfig));
    }

    #[test]
    fn test_target_is_required() {
        assert!(Cli::try_parse_from(["dirsort"]).is_err());
    }
}
