//! Screenshot discovery in the source directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SourceConfig;

/// Finds screenshot files in the source directory.
pub struct ScreenshotDiscovery {
    config: SourceConfig,
    name_filter: Option<String>,
}

impl ScreenshotDiscovery {
    /// Create a new discovery instance.
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            name_filter: None,
        }
    }

    /// Restrict discovery to file names containing the given pattern.
    pub fn with_name_filter(mut self, filter: Option<String>) -> Self {
        self.name_filter = filter;
        self
    }

    /// Find all screenshots directly inside `dir`, sorted lexicographically
    /// by file name.
    ///
    /// Returns an empty list if the directory does not exist. The scan is
    /// flat: screenshots land in the source directory itself, not in
    /// subdirectories.
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| self.is_screenshot(p))
            .collect();

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        files
    }

    /// Check whether a path looks like a screenshot we should review.
    fn is_screenshot(&self, path: &Path) -> bool {
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.to_lowercase() == ext_lower)
            })
            .unwrap_or(false);
        if !supported {
            return false;
        }

        match &self.name_filter {
            Some(filter) => path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.contains(filter.as_str()))
                .unwrap_or(false),
            None => true,
        }
    }
}
