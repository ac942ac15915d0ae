//! [`TestWorkspace`], a temporary tracwiki working directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Name of the state file inside a working directory.
pub const STATE_FILE: &str = ".trac_config";

/// A temporary working directory with helpers for page files.
///
/// # Example
///
/// ```rust,no_run
/// use tracwiki_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_page("WikiStart", "= Hello =");
/// ws.assert_page_eq("WikiStart", "= Hello =");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn page_path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    pub fn state_path(&self) -> PathBuf {
        self.root().join(STATE_FILE)
    }

    /// Write a page file, creating parent directories for nested names.
    pub fn write_page(&self, name: &str, content: &str) {
        let path = self.page_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_page: failed to write {}: {e}", path.display()));
    }

    pub fn read_page(&self, name: &str) -> String {
        let path = self.page_path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("read_page: failed to read {}: {e}", path.display()))
    }

    pub fn remove_page(&self, name: &str) {
        fs::remove_file(self.page_path(name)).unwrap();
    }

    /// Write raw text as the state file.
    pub fn write_state(&self, content: &str) {
        fs::write(self.state_path(), content).unwrap();
    }

    pub fn read_state(&self) -> String {
        fs::read_to_string(self.state_path()).unwrap()
    }

    /// Assert that the page file holds exactly `content`.
    ///
    /// # Panics
    /// Panics with a descriptive message if the file is missing or differs.
    pub fn assert_page_eq(&self, name: &str, content: &str) {
        let actual = self.read_page(name);
        assert_eq!(
            actual, content,
            "Page file {} does not hold the expected content",
            name
        );
    }

    /// Assert that no file exists for `name`.
    ///
    /// # Panics
    /// Panics if the file exists.
    pub fn assert_page_absent(&self, name: &str) {
        let path = self.page_path(name);
        assert!(
            !path.exists(),
            "Expected page file NOT to exist: {}",
            path.display()
        );
    }
}
