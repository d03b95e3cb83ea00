//! dirsort - sort a directory's files into category folders
//!
//! This library loads a category-to-extension mapping from a JSON or TOML
//! document, turns it into an extension lookup, and moves each file of a
//! directory into the sub-folder of its category.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod logging;
pub mod output;

pub use config::{CategoryConfig, CategoryRule, ConfigError};
pub use file_category::{ExtensionLookup, OTHER_CATEGORY, extension_of};
pub use file_organizer::{
    ConflictPolicy, FileOrganizer, MoveError, OrganizeError, OrganizeOptions, RunReport,
};

pub use cli::{OrganizeCommand, RunError, organize_directory, run_cli};
