//! Category mapping configuration.
//!
//! This module loads the mapping from category names to file extensions
//! that drives the organizer. The mapping lives in a JSON (or TOML) document
//! with a single recognized top-level field:
//!
//! ```json
//! {
//!   "categories": {
//!     "Images": [".jpg", ".jpeg", ".png"],
//!     "Documents": [".pdf", ".txt"]
//!   }
//! }
//! ```
//!
//! The order of categories in the document is preserved, which matters when
//! the same extension is listed twice (see [`crate::file_category::ExtensionLookup`]).

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory and in the user config dir.
pub const CONFIG_FILE_NAME: &str = "categories.json";

/// Errors that can occur while loading or writing the category mapping.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file exists at the expected location.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The document could not be parsed or violates the mapping rules.
    #[error("Malformed configuration {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Any other IO failure while reading or writing the file.
    #[error("IO error on configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `--init-config` refuses to replace an existing file.
    #[error("Configuration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// A single category and the extensions that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Category name, also used as the destination folder name.
    pub name: String,
    /// Extensions including the leading dot, e.g. `".jpg"`.
    pub extensions: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// The category mapping as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(
        default,
        deserialize_with = "ordered_categories",
        serialize_with = "serialize_categories"
    )]
    pub categories: Vec<CategoryRule>,
}

impl CategoryConfig {
    /// Locate and load the configuration.
    ///
    /// Resolution order:
    /// 1. `config_path`, when given
    /// 2. `categories.json` in the current directory
    /// 3. `~/.config/dirsort/categories.json`
    ///
    /// Unlike a missing field inside the document, a missing file is an
    /// error: the organizer never runs on a mapping nobody asked for.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when no candidate file exists, and
    /// whatever [`CategoryConfig::load_from_file`] returns otherwise.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = resolve_config_path(config_path);
        Self::load_from_file(&path)
    }

    /// Load and validate configuration from a specific file.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::Malformed` if parsing or validation fails and
    /// `ConfigError::Io` if the file cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let malformed = |reason: String| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let config: Self = if is_toml(path) {
            toml::from_str(&content).map_err(|e| malformed(e.to_string()))?
        } else {
            serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?
        };

        config.validate().map_err(malformed)?;
        tracing::debug!(
            path = %path.display(),
            categories = config.categories.len(),
            "Loaded category mapping"
        );
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    fn validate(&self) -> Result<(), String> {
        for rule in &self.categories {
            let name = rule.name.as_str();
            if name.trim().is_empty() {
                return Err("category name must not be empty".to_string());
            }
            if name == "." || name == ".." || name.contains(['/', '\\']) {
                return Err(format!(
                    "category name '{}' cannot be used as a folder name",
                    name
                ));
            }
            for ext in &rule.extensions {
                if !ext.starts_with('.') || ext.len() < 2 {
                    return Err(format!(
                        "extension '{}' in category '{}' must start with '.' followed by at least one character",
                        ext, name
                    ));
                }
                if ext[1..].contains('.') {
                    return Err(format!(
                        "extension '{}' in category '{}' has more than one '.'; only the last segment of a file name is matched",
                        ext, name
                    ));
                }
                if ext.contains(['/', '\\']) {
                    return Err(format!(
                        "extension '{}' in category '{}' contains a path separator",
                        ext, name
                    ));
                }
            }
        }
        Ok(())
    }

    /// The starter mapping written by `dirsort --init-config`.
    ///
    /// This is never used as a fallback when a configuration is missing.
    pub fn starter() -> Self {
        Self {
            categories: vec![
                CategoryRule::new(
                    "Images",
                    &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp", ".svg"],
                ),
                CategoryRule::new(
                    "Documents",
                    &[
                        ".pdf", ".docx", ".doc", ".xlsx", ".xls", ".pptx", ".ppt", ".txt", ".rtf",
                        ".odt",
                    ],
                ),
                CategoryRule::new("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz"]),
                CategoryRule::new("Audio", &[".mp3", ".wav", ".aac", ".flac", ".ogg"]),
                CategoryRule::new("Video", &[".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv"]),
                CategoryRule::new("Scripts", &[".py", ".js", ".sh", ".bat"]),
                CategoryRule::new("Executables", &[".exe", ".msi", ".dmg"]),
            ],
        }
    }

    /// Write this mapping to `path`, refusing to replace an existing file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` if `path` exists and
    /// `ConfigError::Io` if the file cannot be written.
    pub fn write_new(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        let content = if is_toml(path) {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, content).map_err(io_error)
    }
}

/// Pick the configuration file to use, without checking that it exists.
///
/// An explicit path always wins. Otherwise the local file is preferred, then
/// the one in the home directory; when neither exists the local path is
/// returned so the resulting `NotFound` names it.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    if let Some(path) = config_path {
        return path.to_path_buf();
    }

    let local_config = PathBuf::from(CONFIG_FILE_NAME);
    if local_config.exists() {
        return local_config;
    }

    if let Ok(home) = std::env::var("HOME") {
        let home_config = PathBuf::from(home)
            .join(".config")
            .join("dirsort")
            .join(CONFIG_FILE_NAME);
        if home_config.exists() {
            return home_config;
        }
    }

    local_config
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Deserialize the `categories` map into a list, keeping document order.
fn ordered_categories<'de, D>(deserializer: D) -> Result<Vec<CategoryRule>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<CategoryRule>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of category names to lists of extensions")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rules = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, extensions)) = map.next_entry::<String, Vec<String>>()? {
                rules.push(CategoryRule { name, extensions });
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(CategoriesVisitor)
}

fn serialize_categories<S>(rules: &[CategoryRule], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(rules.iter().map(|rule| (&rule.name, &rule.extensions)))
}
