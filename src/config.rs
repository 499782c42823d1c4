//! Configuration loading: custom category tables and exclusion rules.
//!
//! Configuration is optional. When present it is a TOML file that can replace
//! the standard category table and keep selected files out of a run entirely,
//! by exact name, glob pattern, extension, or regex:
//!
//! ```toml
//! [[categories]]
//! name = "Paperwork"
//! extensions = ["pdf", "docx", "txt"]
//!
//! [[categories]]
//! name = "Pictures"
//! extensions = ["png", "jpg", "jpeg"]
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["crdownload"]
//! regex = []
//! ```
//!
//! Category order in the file is preserved: when two categories claim the
//! same extension, the one listed first wins. Leaving `[[categories]]` out
//! keeps the standard table.

use crate::category::{CategoryRule, CategoryTable};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration file looked for in the current directory.
const LOCAL_CONFIG_FILE: &str = ".sortdirrc.toml";

/// Errors raised while loading a configuration file or compiling its rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// No file at an explicitly requested configuration path.
    NotFound(PathBuf),
    /// The file is not valid TOML or does not match the expected shape.
    Parse(String),
    /// An exclusion glob failed to compile.
    BadGlob {
        /// The offending pattern as written.
        pattern: String,
        /// What the glob parser rejected about it.
        reason: String,
    },
    /// An exclusion regex failed to compile.
    BadRegex {
        /// The offending pattern as written.
        pattern: String,
        /// What the regex parser rejected about it.
        reason: String,
    },
    /// The file exists but could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Parse(reason) => write!(f, "Invalid configuration: {}", reason),
            ConfigError::BadGlob { pattern, reason } => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, reason)
            }
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(reason) => write!(f, "Could not read configuration: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration: an optional custom category table plus
/// exclusion rules for the scanner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeConfig {
    /// Custom category rules; an empty list selects the standard table.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,

    /// The `[filters]` section.
    #[serde(default)]
    pub filters: Filters,
}

/// The `[filters]` configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filters {
    /// Rules that keep files out of a run.
    #[serde(default)]
    pub exclude: ExclusionRules,
}

/// Exclusion rules as written in the configuration file, one list per
/// matching strategy. All lists default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExclusionRules {
    /// Exact file names, e.g. `"Thumbs.db"`.
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the whole path, e.g. `"*.part"`.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions, with or without the leading dot, matched
    /// case-insensitively.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regexes matched against the bare file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl OrganizeConfig {
    /// Loads the configuration for a run.
    ///
    /// With an explicit path, only that file is consulted and it must load
    /// cleanly. Otherwise the first existing candidate wins:
    /// `./.sortdirrc.toml`, then `~/.config/sortdir/config.toml`, then the
    /// built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::from_file(path);
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Candidate locations for implicit discovery, in priority order.
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Ok(home) = env::var("HOME") {
            paths.push(Path::new(&home).join(".config/sortdir/config.toml"));
        }
        paths
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The category table this configuration selects: the custom rules when
    /// any are present, the standard table otherwise.
    pub fn category_table(&self) -> CategoryTable {
        if self.categories.is_empty() {
            CategoryTable::standard()
        } else {
            CategoryTable::from_rules(self.categories.clone())
        }
    }

    /// Compiles the exclusion rules for the scanner.
    ///
    /// # Errors
    ///
    /// Fails on the first glob or regex that does not compile.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::from_rules(self.filters.exclude)
    }
}

/// Exclusion rules in matchable form, every pattern parsed exactly once.
pub struct CompiledFilters {
    names: HashSet<String>,
    extensions: HashSet<String>,
    globs: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledFilters {
    fn from_rules(rules: ExclusionRules) -> Result<Self, ConfigError> {
        Ok(Self {
            globs: compile_globs(&rules.patterns)?,
            regexes: compile_regexes(&rules.regex)?,
            names: rules.filenames.into_iter().collect(),
            extensions: rules
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        })
    }

    /// Whether any exclusion rule matches this file.
    ///
    /// File names are matched exactly and by regex, extensions
    /// case-insensitively, globs against the whole path.
    pub fn excludes(&self, file_path: &Path) -> bool {
        let name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if self.names.contains(name.as_ref()) {
            return true;
        }

        let extension_matched = file_path
            .extension()
            .is_some_and(|ext| self.extensions.contains(&ext.to_string_lossy().to_lowercase()));

        extension_matched
            || self.globs.iter().any(|glob| glob.matches_path(file_path))
            || self.regexes.iter().any(|regex| regex.is_match(&name))
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| ConfigError::BadGlob {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn compile_regexes(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ConfigError::BadRegex {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}
