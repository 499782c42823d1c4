//! File categorization by extension.
//!
//! A [`CategoryTable`] is an ordered list of categories, each claiming a set
//! of file extensions. Category names double as destination folder names.
//! The table is built once per run, from the standard set or from
//! configuration, then derived into an [`ExtensionIndex`] for constant-time
//! lookups.
//!
//! # Examples
//!
//! ```
//! use sortdir::category::{CategoryTable, Decision, SkipReason};
//!
//! let index = CategoryTable::standard().index();
//! assert_eq!(index.classify("report.pdf"), Decision::Move("Documents".to_string()));
//! assert_eq!(index.classify("photo.JPG"), Decision::Move("Images".to_string()));
//! assert_eq!(index.classify("mystery.xyz"), Decision::Move("Other".to_string()));
//! assert_eq!(index.classify("README"), Decision::Skip(SkipReason::NoExtension));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the catch-all category for files whose extension no rule claims.
pub const OTHER_CATEGORY: &str = "Other";

/// The built-in category table.
///
/// Order is significant: an extension listed under two categories belongs to
/// the first-listed one in the derived index (e.g. `sh` resolves to
/// Executables, not Scripts).
const STANDARD_TABLE: &[(&str, &[&str])] = &[
    (
        "Documents",
        &["pdf", "doc", "docx", "odt", "rtf", "tex", "txt", "wpd", "pages"],
    ),
    ("Spreadsheets", &["xls", "xlsx", "xlsm", "ods", "csv"]),
    ("Presentations", &["ppt", "pptx", "odp", "key"]),
    (
        "Images",
        &[
            "png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "tiff", "ico", "heic",
        ],
    ),
    (
        "Videos",
        &[
            "mp4", "mov", "avi", "flv", "wmv", "mkv", "webm", "m4v", "mpg", "mpeg", "3gp",
        ],
    ),
    (
        "Audio",
        &[
            "mp3", "wav", "flac", "aac", "ogg", "wma", "m4a", "aiff", "mid", "midi",
        ],
    ),
    ("Archives", &["zip", "rar", "7z", "tar", "gz", "bz2", "iso"]),
    (
        "Executables",
        &["exe", "msi", "bat", "sh", "app", "apk", "dmg"],
    ),
    (
        "Code",
        &[
            "py", "js", "html", "css", "java", "cpp", "c", "h", "php", "swift", "json", "xml",
            "sql", "rb", "go", "kt", "ts",
        ],
    ),
    (
        "Design",
        &["ai", "ps", "eps", "xd", "fig", "indd", "cdr", "sketch"],
    ),
    ("Ebooks", &["epub", "mobi", "azw", "azw3", "fb2"]),
    ("Fonts", &["ttf", "otf", "woff", "woff2", "eot"]),
    ("System", &["dll", "sys", "ini", "cfg"]),
    ("Torrents", &["torrent"]),
    ("Logs", &["log", "txtlog"]),
    ("Temp Files", &["tmp", "bak", "old"]),
    (
        "Config Files",
        &["yml", "yaml", "toml", "env", "conf", "properties"],
    ),
    (
        "Game Files",
        &["unitypackage", "asset", "prefab", "material"],
    ),
    ("CAD Files", &["stl", "obj", "fbx", "dae", "3ds"]),
    ("Scripts", &["sh", "bat", "ps1", "cmd"]),
    ("Database", &["db", "sqlite", "mdb", "accdb"]),
    ("Web Files", &["html", "css", "js", "php", "xml"]),
    (OTHER_CATEGORY, &[]),
];

/// One category of the table: a folder name and the extensions it claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// The category name, used as the destination subfolder name.
    pub name: String,
    /// Extensions claimed by this category (lowercase, no leading dot).
    pub extensions: Vec<String>,
}

/// Ordered mapping from category names to the extensions they claim.
///
/// The order of the rules matters: when two categories claim the same
/// extension, the first-registered one keeps it in the derived
/// [`ExtensionIndex`].
#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Returns the built-in table covering common file types.
    pub fn standard() -> Self {
        let rules = STANDARD_TABLE
            .iter()
            .map(|(name, extensions)| CategoryRule {
                name: (*name).to_string(),
                extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Builds a table from explicit rules, preserving their order.
    ///
    /// Extensions are normalized on the way in: lowercased, leading dot
    /// stripped, empty entries discarded.
    pub fn from_rules(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                name: rule.name,
                extensions: rule
                    .extensions
                    .iter()
                    .map(|ext| normalize_extension(ext))
                    .filter(|ext| !ext.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// The category rules in registration order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Derives the inverse extension-to-category index.
    ///
    /// Extensions claimed by more than one category resolve to the
    /// first-registered one.
    pub fn index(&self) -> ExtensionIndex {
        let mut by_extension = HashMap::new();
        for rule in &self.rules {
            for ext in &rule.extensions {
                by_extension
                    .entry(ext.clone())
                    .or_insert_with(|| rule.name.clone());
            }
        }
        ExtensionIndex { by_extension }
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Inverse lookup from extension to category name.
///
/// Built once per run by [`CategoryTable::index`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ExtensionIndex {
    by_extension: HashMap<String, String>,
}

impl ExtensionIndex {
    /// Looks up the category claiming `ext`, case-insensitively.
    ///
    /// Returns `None` for extensions no category claims; [`classify`] resolves
    /// those to [`OTHER_CATEGORY`] instead.
    ///
    /// [`classify`]: Self::classify
    pub fn category_for(&self, ext: &str) -> Option<&str> {
        self.by_extension
            .get(&ext.to_lowercase())
            .map(String::as_str)
    }

    /// Decides what to do with a file of the given name.
    ///
    /// The extension is the text after the last `.` in the name. A name
    /// without one is skipped; a name with an unrecognized one goes to
    /// "Other". Any string is acceptable input.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::category::{CategoryTable, Decision, SkipReason};
    ///
    /// let index = CategoryTable::standard().index();
    /// assert_eq!(index.classify("song.mp3"), Decision::Move("Audio".to_string()));
    /// assert_eq!(index.classify("archive."), Decision::Skip(SkipReason::NoExtension));
    /// ```
    pub fn classify(&self, file_name: &str) -> Decision {
        match extension_of(file_name) {
            None => Decision::Skip(SkipReason::NoExtension),
            Some(ext) => {
                let category = self.category_for(ext).unwrap_or(OTHER_CATEGORY).to_string();
                Decision::Move(category)
            }
        }
    }

    /// Number of distinct extensions in the index.
    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    /// True when the index maps no extensions at all.
    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

/// Outcome of classifying a single file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Move the file into the named category folder.
    Move(String),
    /// Leave the file where it is.
    Skip(SkipReason),
}

/// Why a file is left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The name carries no extension to classify by.
    NoExtension,
}

impl SkipReason {
    /// Human-readable reason, as written to the run log.
    pub fn describe(self) -> &'static str {
        match self {
            SkipReason::NoExtension => "no extension",
        }
    }
}

/// Extracts the extension of a file name: the text after the last `.`.
///
/// Returns `None` when there is no dot or nothing follows it, so `"README"`
/// and `"archive."` have no extension while `".bashrc"` yields `"bashrc"`.
pub fn extension_of(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}
