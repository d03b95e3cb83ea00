/// Extension-based categorization.
///
/// This module turns a [`CategoryConfig`] into a lookup from normalized file
/// extension to category name, and extracts extensions from file names.
///
/// # Examples
///
/// ```
/// use dirsort::config::{CategoryConfig, CategoryRule};
/// use dirsort::file_category::ExtensionLookup;
///
/// let config = CategoryConfig {
///     categories: vec![CategoryRule::new("Images", &[".jpg", ".PNG"])],
/// };
/// let lookup = ExtensionLookup::from_config(&config);
/// assert_eq!(lookup.category_for(".png"), "Images");
/// assert_eq!(lookup.category_for(".xyz"), "Other");
/// ```
use crate::config::CategoryConfig;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Category assigned to files whose extension is not in the mapping.
pub const OTHER_CATEGORY: &str = "Other";

/// Maps normalized (lower-cased, dot-prefixed) extensions to category names.
///
/// Built once from the configuration and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExtensionLookup {
    extension_map: HashMap<String, String>,
}

impl ExtensionLookup {
    /// Invert the category mapping.
    ///
    /// When an extension is listed under more than one category, the first
    /// category in document order keeps it and each later listing is
    /// reported with a warning.
    pub fn from_config(config: &CategoryConfig) -> Self {
        let mut extension_map = HashMap::new();

        for rule in &config.categories {
            for ext in &rule.extensions {
                match extension_map.entry(ext.to_lowercase()) {
                    Entry::Vacant(slot) => {
                        slot.insert(rule.name.clone());
                    }
                    Entry::Occupied(existing) if existing.get() != &rule.name => {
                        tracing::warn!(
                            extension = %existing.key(),
                            kept = %existing.get(),
                            ignored = %rule.name,
                            "Extension listed under several categories, keeping the first"
                        );
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        Self { extension_map }
    }

    /// Returns the mapped category for an extension, if any.
    ///
    /// The extension is expected with its leading dot; case is ignored.
    pub fn get(&self, ext: &str) -> Option<&str> {
        self.extension_map
            .get(&ext.to_lowercase())
            .map(String::as_str)
    }

    /// Returns the category for an extension, falling back to [`OTHER_CATEGORY`].
    pub fn category_for(&self, ext: &str) -> &str {
        self.get(ext).unwrap_or(OTHER_CATEGORY)
    }

    pub fn len(&self) -> usize {
        self.extension_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extension_map.is_empty()
    }
}

/// Extracts the lower-cased extension of a file name, including the dot.
///
/// The extension runs from the last `.` to the end of the name, so a name
/// ending in a bare `.` has the extension `"."`. Leading dots of hidden files
/// do not start an extension.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::extension_of;
///
/// assert_eq!(extension_of("photo.JPG").as_deref(), Some(".jpg"));
/// assert_eq!(extension_of("archive.tar.gz").as_deref(), Some(".gz"));
/// assert_eq!(extension_of("trailing.").as_deref(), Some("."));
/// assert_eq!(extension_of("notes"), None);
/// assert_eq!(extension_of(".bashrc"), None);
/// ```
pub fn extension_of(file_name: &str) -> Option<String> {
    let stem = file_name.trim_start_matches('.');
    let dot = stem.rfind('.')?;
    Some(stem[dot..].to_lowercase())
}
