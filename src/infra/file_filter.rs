//! DSL source discovery for batch checks
//!
//! Uses the `ignore` crate (from ripgrep) so `.gitignore`, `.helium/ignore`
//! and configured path patterns all exclude files from `helium check`.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Source filter configuration
#[derive(Debug, Clone)]
pub struct SourceFilterConfig {
    pub root: PathBuf,
    /// DSL file extension without the dot
    pub extension: String,
    /// Directory names skipped anywhere in the tree
    pub ignored_paths: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for SourceFilterConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            extension: "mez".to_string(),
            ignored_paths: Vec::new(),
            respect_gitignore: true,
        }
    }
}

/// Filter selecting DSL sources under a root
pub struct SourceFilter {
    config: SourceFilterConfig,
    helium_ignore: Option<Gitignore>,
}

impl SourceFilter {
    pub fn new(config: SourceFilterConfig) -> Self {
        let helium_ignore = Self::load_helium_ignore(&config.root);
        Self {
            config,
            helium_ignore,
        }
    }

    /// Load `.helium/ignore` (gitignore syntax)
    fn load_helium_ignore(root: &Path) -> Option<Gitignore> {
        let ignore_path = root.join(".helium").join("ignore");
        if !ignore_path.exists() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&ignore_path) {
            tracing::warn!("Failed to parse .helium/ignore: {}", err);
        }

        builder.build().ok()
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.config.root).unwrap_or(path);

        let skipped_dir = relative.components().any(|component| match component {
            Component::Normal(name) => name.to_str().is_some_and(|name| {
                name.starts_with('.') || self.config.ignored_paths.iter().any(|p| p == name)
            }),
            _ => false,
        });
        if skipped_dir {
            return true;
        }

        if let Some(ref ignore) = self.helium_ignore
            && relative.is_relative()
        {
            return ignore
                .matched_path_or_any_parents(relative, path.is_dir())
                .is_ignore();
        }

        false
    }

    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.config.extension)
    }

    fn walk_builder(&self) -> WalkBuilder {
        let mut builder = WalkBuilder::new(&self.config.root);
        builder
            .hidden(true)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder
    }

    /// All DSL source files under the root, in path order
    pub fn discover_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in self.walk_builder().build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !self.has_extension(path) {
                continue;
            }
            if !self.is_ignored(path) {
                files.push(path.to_path_buf());
            }
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn filter_for(root: &Path, ignored: &[&str]) -> SourceFilter {
        SourceFilter::new(SourceFilterConfig {
            root: root.to_path_buf(),
            ignored_paths: ignored.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_discovers_only_dsl_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("model/sales")).unwrap();
        fs::write(root.join("model/sales/Order.mez"), "object Order {}").unwrap();
        fs::write(root.join("model/README.md"), "docs").unwrap();
        fs::write(root.join("Main.mez"), "unit Main").unwrap();

        let files = filter_for(root, &[]).discover_files();
        assert_eq!(
            files,
            vec![root.join("Main.mez"), root.join("model/sales/Order.mez")]
        );
    }

    #[test]
    fn test_ignored_paths_and_gitignore() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(".gitignore"), "scratch/\n").unwrap();
        for dir in ["scratch", "node_modules", "model", ".hidden"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("A.mez"), "unit A").unwrap();
        }

        let files = filter_for(root, &["node_modules"]).discover_files();
        assert_eq!(files, vec![root.join("model/A.mez")]);
    }

    #[test]
    fn test_helium_ignore() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join(".helium")).unwrap();
        fs::write(root.join(".helium/ignore"), "Legacy*.mez\n").unwrap();
        fs::write(root.join("Current.mez"), "").unwrap();
        fs::write(root.join("LegacyOrder.mez"), "").unwrap();

        let filter = filter_for(root, &[]);
        assert!(!filter.is_ignored(&root.join("Current.mez")));
        assert!(filter.is_ignored(&root.join("LegacyOrder.mez")));
    }
}
