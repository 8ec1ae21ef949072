//! Generated artifact loading
//!
//! Rules and built-in function metadata are read once at startup. Any
//! failure falls back (built-in rules, empty catalog) and the fallback
//! reason is kept on the result so the CLI can report it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ArtifactError;
use crate::models::completion::BifCatalog;
use crate::models::config::HeliumConfig;
use crate::models::rule::RuleSet;

/// Where a loaded artifact came from
#[derive(Debug)]
pub enum ArtifactOrigin {
    File(PathBuf),
    Fallback(ArtifactError),
}

impl ArtifactOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl Serialize for ArtifactOrigin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::File(path) => serializer.serialize_str(&path.display().to_string()),
            Self::Fallback(err) => serializer.serialize_str(&format!("fallback ({})", err)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: ArtifactOrigin,
}

/// Loads artifacts relative to a project root
pub struct ArtifactLoader {
    root: PathBuf,
}

impl ArtifactLoader {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    async fn read(path: &Path) -> Result<String, ArtifactError> {
        tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ArtifactError::Missing(path.to_path_buf())
            } else {
                ArtifactError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    async fn try_rules(path: &Path) -> Result<RuleSet, ArtifactError> {
        let content = Self::read(path).await?;
        RuleSet::from_json(&content)
            .map_err(|source| ArtifactError::Malformed {
                path: path.to_path_buf(),
                source,
            })?
            .ok_or_else(|| ArtifactError::Empty {
                path: path.to_path_buf(),
            })
    }

    /// Load the rules artifact, falling back to the built-in rule set
    pub async fn load_rules(&self, path: &Path) -> Loaded<RuleSet> {
        let path = self.resolve(path);
        match Self::try_rules(&path).await {
            Ok(rules) => {
                info!("Loaded {} lint rules from {}", rules.len(), path.display());
                Loaded {
                    value: rules,
                    origin: ArtifactOrigin::File(path),
                }
            }
            Err(err) => {
                match &err {
                    ArtifactError::Missing(_) => debug!("{}; using built-in rules", err),
                    _ => warn!("{}; using built-in rules", err),
                }
                Loaded {
                    value: RuleSet::defaults(),
                    origin: ArtifactOrigin::Fallback(err),
                }
            }
        }
    }

    async fn try_bifs(path: &Path) -> Result<BifCatalog, ArtifactError> {
        let content = Self::read(path).await?;
        BifCatalog::from_json(&content).map_err(|source| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load built-in function metadata, falling back to an empty catalog
    pub async fn load_bifs(&self, path: &Path) -> Loaded<BifCatalog> {
        let path = self.resolve(path);
        match Self::try_bifs(&path).await {
            Ok(catalog) => {
                info!("Loaded {} built-in functions from {}", catalog.len(), path.display());
                Loaded {
                    value: catalog,
                    origin: ArtifactOrigin::File(path),
                }
            }
            Err(err) => {
                match &err {
                    ArtifactError::Missing(_) => debug!("{}; no built-in completions", err),
                    _ => warn!("{}; no built-in completions", err),
                }
                Loaded {
                    value: BifCatalog::default(),
                    origin: ArtifactOrigin::Fallback(err),
                }
            }
        }
    }

    /// Rules with config disables and severity overrides applied
    pub async fn load_configured_rules(&self, config: &HeliumConfig) -> Loaded<RuleSet> {
        let Loaded { value, origin } = self.load_rules(&config.artifacts.rules).await;
        let value = value
            .without(&config.lint.disabled)
            .with_severities(&config.lint.severity);
        Loaded { value, origin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diagnostic::DiagnosticSeverity;
    use crate::models::rule::{DOT_NOTATION_LIMIT, NAMING_CONVENTIONS, NO_VAR_IN_ELSE};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_rules_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let loader = ArtifactLoader::new(temp.path());
        let loaded = loader.load_rules(Path::new("generated/rules/dsl-rules.json")).await;
        assert_eq!(loaded.value, RuleSet::defaults());
        assert!(matches!(
            loaded.origin,
            ArtifactOrigin::Fallback(ArtifactError::Missing(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_and_empty_rules_fall_back() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.json", "{ not json");
        write(temp.path(), "empty.json", r#"{"rules": {}}"#);
        let loader = ArtifactLoader::new(temp.path());

        let bad = loader.load_rules(Path::new("bad.json")).await;
        assert!(matches!(
            bad.origin,
            ArtifactOrigin::Fallback(ArtifactError::Malformed { .. })
        ));
        assert_eq!(bad.value.len(), 4);

        let empty = loader.load_rules(Path::new("empty.json")).await;
        assert!(matches!(
            empty.origin,
            ArtifactOrigin::Fallback(ArtifactError::Empty { .. })
        ));
    }

    #[tokio::test]
    async fn test_rules_from_artifact() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "rules.json",
            r#"{"rules": {"no-var-in-else": {"severity": "warning", "message": "No vars in else"}}}"#,
        );
        let loader = ArtifactLoader::new(temp.path());
        let loaded = loader.load_rules(Path::new("rules.json")).await;

        assert!(!loaded.origin.is_fallback());
        assert_eq!(loaded.value.len(), 1);
        assert_eq!(
            loaded.value.severity_of(NO_VAR_IN_ELSE),
            Some(DiagnosticSeverity::Warning)
        );
        assert!(!loaded.value.is_enabled(DOT_NOTATION_LIMIT));
    }

    #[tokio::test]
    async fn test_configured_rules_apply_overrides() {
        let temp = TempDir::new().unwrap();
        let mut config = HeliumConfig::default();
        config.lint.disabled.push(NAMING_CONVENTIONS.to_string());
        config
            .lint
            .severity
            .insert(DOT_NOTATION_LIMIT.to_string(), DiagnosticSeverity::Error);

        let loader = ArtifactLoader::new(temp.path());
        let loaded = loader.load_configured_rules(&config).await;
        assert!(!loaded.value.is_enabled(NAMING_CONVENTIONS));
        assert_eq!(
            loaded.value.severity_of(DOT_NOTATION_LIMIT),
            Some(DiagnosticSeverity::Error)
        );
    }

    #[tokio::test]
    async fn test_bifs() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "bifs.json",
            r#"{"namespaces": {"String": [{"name": "join", "signature": "join(list, sep)"}]}}"#,
        );
        let loader = ArtifactLoader::new(temp.path());

        let loaded = loader.load_bifs(Path::new("bifs.json")).await;
        assert_eq!(loaded.value.len(), 1);

        let missing = loader.load_bifs(Path::new("nope.json")).await;
        assert!(missing.value.is_empty());
        assert!(missing.origin.is_fallback());
    }
}
