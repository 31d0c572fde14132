//! On-disk manuscript fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway project directory with a manuscript layout.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct ManuscriptFixture {
    dir: TempDir,
    manuscript_dir: PathBuf,
}

impl Default for ManuscriptFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ManuscriptFixture {
    /// An empty project using the default `manuscript/` directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_manuscript_dir("manuscript")
    }

    /// An empty project whose manuscript lives under `manuscript_dir`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn with_manuscript_dir(manuscript_dir: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create fixture directory");
        let manuscript_dir = dir.path().join(manuscript_dir);
        Self {
            dir,
            manuscript_dir,
        }
    }

    fn write(self, sub: &str, file_name: &str, content: &str) -> Self {
        let target = self.manuscript_dir.join(sub);
        fs::create_dir_all(&target).expect("failed to create fixture subdirectory");
        fs::write(target.join(file_name), content).expect("failed to write fixture file");
        self
    }

    /// Adds a file under `chapters/`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn chapter(self, file_name: &str, content: &str) -> Self {
        self.write("chapters", file_name, content)
    }

    /// Adds a file under `characters/`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn character(self, file_name: &str, content: &str) -> Self {
        self.write("characters", file_name, content)
    }

    /// The project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Reads a root-relative file written by a check.
    ///
    /// # Panics
    ///
    /// Panics if the file does not exist or is not UTF-8.
    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).expect("failed to read fixture output")
    }
}
