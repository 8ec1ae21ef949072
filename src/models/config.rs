//! Configuration model for Helium
//!
//! Loaded from `config.toml` (global and per-project) and merged by the
//! config service.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::diagnostic::DiagnosticSeverity;

/// Helium configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeliumConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub artifacts: ArtifactConfig,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Workspace layout conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Extension of DSL source files (without the dot)
    #[serde(default = "defaults::extension")]
    pub extension: String,

    /// Directory name marking the model subtree
    #[serde(default = "defaults::model_dir")]
    pub model_dir: String,

    /// Extra roots to index besides the project root
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Paths skipped by `check`
    #[serde(default = "default_ignored_paths")]
    pub ignored_paths: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            extension: defaults::extension(),
            model_dir: defaults::model_dir(),
            roots: Vec::new(),
            ignored_paths: default_ignored_paths(),
        }
    }
}

fn default_ignored_paths() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        ".helium".to_string(),
    ]
}

/// Lint overrides applied on top of the rules artifact
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintConfig {
    /// Rule ids to disable
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Per-rule severity overrides
    #[serde(default)]
    pub severity: BTreeMap<String, DiagnosticSeverity>,
}

/// Locations of generated artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "defaults::rules_path")]
    pub rules: PathBuf,

    #[serde(default = "defaults::bifs_path")]
    pub bifs: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            rules: defaults::rules_path(),
            bifs: defaults::bifs_path(),
        }
    }
}

/// Which syntax parser backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParserBackend {
    /// No generated parser installed
    #[default]
    None,
    /// Built-in delimiter balance checker
    Delimiters,
}

impl std::str::FromStr for ParserBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "delimiters" | "builtin" => Ok(Self::Delimiters),
            _ => Err(format!("Unknown parser backend: '{}'. Valid: none, delimiters", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParserConfig {
    #[serde(default)]
    pub backend: ParserBackend,
}

/// File scanning limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "defaults::max_file_size_mb")]
    pub max_file_size_mb: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: defaults::max_file_size_mb(),
        }
    }
}

impl SearchConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        if self.max_file_size_mb == 0 {
            u64::MAX
        } else {
            self.max_file_size_mb as u64 * 1024 * 1024
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: defaults::format(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Workspace
    pub fn extension() -> String {
        "mez".to_string()
    }
    pub fn model_dir() -> String {
        "model".to_string()
    }

    // Artifacts
    pub fn rules_path() -> PathBuf {
        PathBuf::from("generated/rules/dsl-rules.json")
    }
    pub fn bifs_path() -> PathBuf {
        PathBuf::from("generated/bifs/bif-metadata.json")
    }

    // Search
    pub fn max_file_size_mb() -> u32 {
        5
    }

    // Output
    pub fn format() -> String {
        "json".to_string()
    }
}
