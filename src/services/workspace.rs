//! Workspace index of object definitions
//!
//! Maps object type names to the file and position that declares them.
//! Only files with the DSL extension under a model directory are indexed.
//! When a name is declared more than once, a persistent declaration beats a
//! plain one and otherwise the first one scanned wins.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::IndexError;
use crate::infra::decl::object_decls;
use crate::infra::lexer::significant;
use crate::infra::uri::{path_to_uri, uri_to_path};
use crate::models::config::HeliumConfig;
use crate::models::lsp::Location;
use crate::models::symbol::{ObjectDefinition, is_primitive_type};

/// Which files the index considers
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub extension: String,
    pub model_dir: String,
    pub max_file_size_bytes: u64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            extension: "mez".to_string(),
            model_dir: "model".to_string(),
            max_file_size_bytes: crate::config::max_file_size_bytes(),
        }
    }
}

impl From<&HeliumConfig> for IndexSettings {
    fn from(config: &HeliumConfig) -> Self {
        Self {
            extension: config.workspace.extension.clone(),
            model_dir: config.workspace.model_dir.clone(),
            max_file_size_bytes: config.search.max_file_size_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    NotFileUri,
    NotDslFile,
    OutsideModelTree,
    TooLarge { size: u64, limit: u64 },
}

/// Result of scanning one file
#[derive(Debug)]
pub enum ScanOutcome {
    Indexed { definitions: usize },
    Skipped(SkipReason),
    Failed(IndexError),
}

impl ScanOutcome {
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed { .. })
    }
}

#[derive(Debug)]
pub struct FileScan {
    pub path: PathBuf,
    pub outcome: ScanOutcome,
}

/// Per-file outcomes of a full initialization
#[derive(Debug, Default)]
pub struct IndexReport {
    pub files: Vec<FileScan>,
    pub walk_errors: Vec<IndexError>,
}

impl IndexReport {
    pub fn indexed_files(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_indexed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &IndexError)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            ScanOutcome::Failed(err) => Some((f.path.as_path(), err)),
            _ => None,
        })
    }
}

/// Debug view of the index
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub roots: Vec<PathBuf>,
    pub object_count: usize,
    pub objects: Vec<String>,
}

pub struct WorkspaceIndex {
    settings: IndexSettings,
    roots: Vec<PathBuf>,
    definitions: HashMap<String, ObjectDefinition>,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

impl WorkspaceIndex {
    pub fn new(settings: IndexSettings) -> Self {
        Self {
            settings,
            roots: Vec::new(),
            definitions: HashMap::new(),
        }
    }

    /// Clear the index and scan every root
    ///
    /// Missing roots and unreadable files are recorded in the report and
    /// never abort the scan.
    pub fn initialize(&mut self, roots: &[PathBuf]) -> IndexReport {
        self.definitions.clear();
        self.roots = roots
            .iter()
            .map(|root| std::path::absolute(root).unwrap_or_else(|_| root.clone()))
            .collect();

        let mut report = IndexReport::default();
        let roots = self.roots.clone();
        for root in &roots {
            let walker = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !is_hidden(e));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        let path = err.path().unwrap_or(root.as_path()).to_path_buf();
                        debug!("Skipping {}: {}", path.display(), err);
                        report.walk_errors.push(IndexError::Walk {
                            path,
                            message: err.to_string(),
                        });
                        continue;
                    }
                };
                if !entry.file_type().is_file() || !self.has_extension(entry.path()) {
                    continue;
                }

                let path = entry.path().to_path_buf();
                let outcome = if self.in_model_tree(&path) {
                    self.scan_path(&path)
                } else {
                    ScanOutcome::Skipped(SkipReason::OutsideModelTree)
                };
                if let ScanOutcome::Failed(err) = &outcome {
                    warn!("{}", err);
                }
                report.files.push(FileScan { path, outcome });
            }
        }

        info!(
            "Index initialized. Found {} object definitions in {} files",
            self.definitions.len(),
            report.indexed_files()
        );
        report
    }

    /// Rescan one file from disk, replacing its previous definitions
    pub fn update_file(&mut self, uri: &str) -> ScanOutcome {
        let Some(path) = uri_to_path(uri) else {
            return ScanOutcome::Skipped(SkipReason::NotFileUri);
        };
        if let Some(reason) = self.skip_reason(&path) {
            return ScanOutcome::Skipped(reason);
        }
        self.remove_path(&path);
        self.scan_path(&path)
    }

    /// Reindex one file from in-memory text
    pub fn update_text(&mut self, uri: &str, text: &str) -> ScanOutcome {
        let Some(path) = uri_to_path(uri) else {
            return ScanOutcome::Skipped(SkipReason::NotFileUri);
        };
        if let Some(reason) = self.skip_reason(&path) {
            return ScanOutcome::Skipped(reason);
        }
        self.remove_path(&path);
        let Some(uri) = path_to_uri(&path) else {
            return ScanOutcome::Skipped(SkipReason::NotFileUri);
        };
        ScanOutcome::Indexed {
            definitions: self.index_text(&uri, text),
        }
    }

    /// Drop every definition that came from `uri`. Returns how many.
    pub fn remove_file(&mut self, uri: &str) -> usize {
        uri_to_path(uri).map_or(0, |path| self.remove_path(&path))
    }

    pub fn lookup(&self, name: &str) -> Option<&ObjectDefinition> {
        self.definitions.get(name)
    }

    pub fn location(&self, name: &str) -> Option<Location> {
        self.lookup(name).map(ObjectDefinition::location)
    }

    /// Non-primitive names with an indexed definition
    pub fn is_user_defined_type(&self, name: &str) -> bool {
        !is_primitive_type(name) && self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions sorted by name
    pub fn definitions(&self) -> Vec<&ObjectDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn summary(&self) -> IndexSummary {
        let objects = self.definitions().into_iter().map(|d| d.name.clone()).collect();
        IndexSummary {
            roots: self.roots.clone(),
            object_count: self.definitions.len(),
            objects,
        }
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.settings.extension)
    }

    /// Any path segment equal to the model directory name
    fn in_model_tree(&self, path: &Path) -> bool {
        path.components().any(|c| match c {
            Component::Normal(name) => name.to_str() == Some(self.settings.model_dir.as_str()),
            _ => false,
        })
    }

    fn skip_reason(&self, path: &Path) -> Option<SkipReason> {
        if !self.has_extension(path) {
            Some(SkipReason::NotDslFile)
        } else if !self.in_model_tree(path) {
            Some(SkipReason::OutsideModelTree)
        } else {
            None
        }
    }

    fn remove_path(&mut self, path: &Path) -> usize {
        let Some(uri) = path_to_uri(path) else {
            return 0;
        };
        let before = self.definitions.len();
        self.definitions.retain(|_, def| def.uri != uri);
        before - self.definitions.len()
    }

    fn scan_path(&mut self, path: &Path) -> ScanOutcome {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > self.settings.max_file_size_bytes => {
                return ScanOutcome::Skipped(SkipReason::TooLarge {
                    size: meta.len(),
                    limit: self.settings.max_file_size_bytes,
                });
            }
            Ok(_) => {}
            Err(source) => {
                return ScanOutcome::Failed(IndexError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) => {
                return ScanOutcome::Failed(IndexError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let Some(uri) = path_to_uri(path) else {
            return ScanOutcome::Failed(IndexError::InvalidUri(path.display().to_string()));
        };
        ScanOutcome::Indexed {
            definitions: self.index_text(&uri, &text),
        }
    }

    fn index_text(&mut self, uri: &str, text: &str) -> usize {
        let tokens = significant(text);
        let mut count = 0;
        for decl in object_decls(&tokens) {
            let def = ObjectDefinition {
                name: decl.name_tok.text.to_string(),
                uri: uri.to_string(),
                line: decl.line,
                character: decl.name_tok.column,
                is_persistent: decl.is_persistent,
            };
            debug!(
                "Indexed {}object {} at {}:{}",
                if def.is_persistent { "persistent " } else { "" },
                def.name,
                uri,
                def.line + 1
            );
            if self.insert(def) {
                count += 1;
            }
        }
        count
    }

    /// Insert unless a stronger definition exists. Returns whether stored.
    fn insert(&mut self, def: ObjectDefinition) -> bool {
        match self.definitions.get(&def.name) {
            Some(existing) if existing.is_persistent || !def.is_persistent => false,
            _ => {
                self.definitions.insert(def.name.clone(), def);
                true
            }
        }
    }
}
