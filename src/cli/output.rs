//! Output formatting for CLI commands

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::infra::uri::uri_to_path;

/// JSON layout of command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// `compact` selects single-line JSON; anything else is pretty
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("compact") {
            Self::Compact
        } else {
            Self::Pretty
        }
    }
}

/// Output context shared by every command
#[derive(Debug, Clone)]
pub struct OutputContext {
    /// Project root for relative path calculation
    root: PathBuf,
    format: OutputFormat,
}

impl OutputContext {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = OutputFormat::parse(format);
        self
    }

    /// Convert an absolute path to relative (if within project root)
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }

    /// Relative path for a file URI; other URIs are returned unchanged
    pub fn display_uri(&self, uri: &str) -> String {
        uri_to_path(uri)
            .map(|path| self.relative_path(&path))
            .unwrap_or_else(|| uri.to_string())
    }

    /// Print a successful response with data fields at the top level
    pub fn print_success_flat<T: Serialize>(&self, data: T) {
        let mut response = serde_json::to_value(data).unwrap_or(serde_json::json!({}));
        if let Some(obj) = response.as_object_mut() {
            obj.insert("success".to_string(), serde_json::json!(true));
        }
        self.print_json(&response);
    }

    pub fn print_error(&self, message: &str) {
        let response = serde_json::json!({
            "success": false,
            "error": message
        });
        self.print_json(&response);
    }

    fn print_json(&self, value: &serde_json::Value) {
        let rendered = match self.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        };
        match rendered {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize output: {e}"),
        }
    }
}
