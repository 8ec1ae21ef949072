//! Application container for Helium

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::cli::OutputContext;
use crate::config;
use crate::models::config::HeliumConfig;
use crate::services::artifacts::{ArtifactLoader, ArtifactOrigin};
use crate::services::config::{ConfigService, DefaultConfigService};
use crate::services::session::Session;
use crate::services::syntax::parser_for;
use crate::services::workspace::{IndexReport, IndexSettings};

/// Where the rules and built-in metadata were loaded from
#[derive(Debug, Serialize)]
pub struct ArtifactStatus {
    pub rules: ArtifactOrigin,
    pub bifs: ArtifactOrigin,
}

pub struct App {
    root: PathBuf,
    pub(crate) output: OutputContext,
    pub(crate) config_service: Arc<dyn ConfigService>,
    pub(crate) config: HeliumConfig,
    pub(crate) session: Session,
    pub(crate) artifacts: ArtifactStatus,
}

impl App {
    pub async fn new(format: Option<&str>) -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;

        tracing::debug!("Initializing Helium at {:?}", root);

        let config_service = Arc::new(DefaultConfigService::new(&root));
        let config = match config_service.load(false).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using default configuration", e);
                HeliumConfig::default()
            }
        };
        config::init(&config);

        let output = OutputContext::new(root.clone())
            .with_format(format.unwrap_or(config.output.format.as_str()));

        let loader = ArtifactLoader::new(&root);
        let rules = loader.load_configured_rules(&config).await;
        let bifs = loader.load_bifs(&config.artifacts.bifs).await;

        let session = Session::new(
            rules.value,
            &bifs.value,
            parser_for(config.parser.backend),
            IndexSettings::from(&config),
        );

        tracing::info!(
            "Helium initialized (parser: {}, rules: {})",
            session.parser_name(),
            session.rules().len()
        );

        Ok(Self {
            root,
            output,
            config_service,
            config,
            session,
            artifacts: ArtifactStatus {
                rules: rules.origin,
                bifs: bifs.origin,
            },
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &HeliumConfig {
        &self.config
    }

    /// Project root plus configured extra roots
    pub fn index_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![self.root.clone()];
        for extra in &self.config.workspace.roots {
            let path = if extra.is_absolute() {
                extra.clone()
            } else {
                self.root.join(extra)
            };
            if !roots.contains(&path) {
                roots.push(path);
            }
        }
        roots
    }

    /// Build the workspace index over [`Self::index_roots`]
    pub fn index_workspace(&mut self) -> IndexReport {
        let roots = self.index_roots();
        self.session.initialize(&roots)
    }
}
