use std::path::{Path, PathBuf};

/// Default data directory (relative to current working directory)
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Subdirectory paths relative to the data directory
pub const REPORTS_DIR: &str = "reports";
pub const LOGS_DIR: &str = "logs";

/// Helper struct to manage data paths
#[derive(Clone, Debug)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths instance with the given root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root data directory
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Get the reports directory (default location for emitted spreadsheets)
    pub fn reports(&self) -> PathBuf {
        self.root.join(REPORTS_DIR)
    }

    /// Get the logs directory
    pub fn logs(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Ensure all directories exist
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.reports())?;
        std::fs::create_dir_all(self.logs())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdirectories_live_under_root() {
        let paths = DataPaths::new("/tmp/equiweight-test");

        assert!(paths.reports().starts_with(paths.root()));
        assert!(paths.logs().starts_with(paths.root()));
        assert!(paths.reports().ends_with(REPORTS_DIR));
    }
}
