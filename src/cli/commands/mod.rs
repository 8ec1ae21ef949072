//! Command implementations for Helium
//!
//! Each command is implemented in its own module.

pub mod check;
pub mod complete;
pub mod config;
pub mod definition;
pub mod index;
pub mod init;
pub mod rules;
pub mod symbols;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::infra::uri::path_to_uri;

/// A source file read for a single command
pub(crate) struct SourceDocument {
    pub path: PathBuf,
    pub uri: String,
    pub text: String,
}

impl SourceDocument {
    pub async fn read(root: &Path, file: &Path) -> Result<Self> {
        let path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            root.join(file)
        };
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let uri = path_to_uri(&path)
            .with_context(|| format!("Cannot build a file URI for {}", path.display()))?;
        Ok(Self { path, uri, text })
    }
}
