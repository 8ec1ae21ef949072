//! Configuration service for Helium

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ConfigError;
use crate::models::config::HeliumConfig;

#[async_trait]
pub trait ConfigService: Send + Sync {
    async fn load(&self, global_only: bool) -> Result<HeliumConfig, ConfigError>;
    fn config_path(&self, global: bool) -> PathBuf;
    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError>;
}

pub struct DefaultConfigService {
    root: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/helium/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("helium")
            .join("config.toml")
    }

    fn project_config_path(&self) -> PathBuf {
        self.root.join(".helium").join("config.toml")
    }

    async fn load_from_path(path: &Path) -> Result<Option<HeliumConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(path).await?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    async fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let config = HeliumConfig::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigService for DefaultConfigService {
    async fn load(&self, global_only: bool) -> Result<HeliumConfig, ConfigError> {
        let global = Self::load_from_path(&Self::global_config_path())
            .await?
            .unwrap_or_default();
        if global_only {
            return Ok(global);
        }

        let config = match Self::load_from_path(&self.project_config_path()).await? {
            Some(project) => merge_config(global, project),
            None => global,
        };
        apply_env_overrides(config)
    }

    fn config_path(&self, global: bool) -> PathBuf {
        if global {
            Self::global_config_path()
        } else {
            self.project_config_path()
        }
    }

    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!(
                    "Config already exists: {}. Use --force to overwrite.",
                    path.display()
                ),
            });
        }

        Self::write_default_config(&path).await?;
        Ok(path)
    }
}

/// Project settings win; lint lists and severity maps accumulate
fn merge_config(base: HeliumConfig, overlay: HeliumConfig) -> HeliumConfig {
    let mut disabled = base.lint.disabled;
    for id in overlay.lint.disabled {
        if !disabled.contains(&id) {
            disabled.push(id);
        }
    }
    let mut severity = base.lint.severity;
    severity.extend(overlay.lint.severity);

    HeliumConfig {
        workspace: crate::models::config::WorkspaceConfig {
            roots: if overlay.workspace.roots.is_empty() {
                base.workspace.roots
            } else {
                overlay.workspace.roots
            },
            ..overlay.workspace
        },
        lint: crate::models::config::LintConfig { disabled, severity },
        artifacts: overlay.artifacts,
        parser: overlay.parser,
        search: overlay.search,
        output: overlay.output,
    }
}

fn apply_env_overrides(mut config: HeliumConfig) -> Result<HeliumConfig, ConfigError> {
    if let Ok(val) = std::env::var("HELIUM_PARSER") {
        config.parser.backend = val.parse().map_err(|message| ConfigError::InvalidValue {
            key: "HELIUM_PARSER".to_string(),
            message,
        })?;
    }
    if let Ok(val) = std::env::var("HELIUM_MODEL_DIR")
        && !val.is_empty()
    {
        config.workspace.model_dir = val;
    }
    if let Ok(val) = std::env::var("HELIUM_MAX_FILE_SIZE_MB")
        && let Ok(limit) = val.parse()
    {
        config.search.max_file_size_mb = limit;
    }
    if let Ok(val) = std::env::var("HELIUM_OUTPUT_FORMAT") {
        config.output.format = val;
    }
    Ok(config)
}
