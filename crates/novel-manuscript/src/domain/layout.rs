//! On-disk manuscript layout.

use std::path::PathBuf;

/// Default manuscript subdirectory under the project root.
pub const DEFAULT_MANUSCRIPT_DIR: &str = "manuscript";

/// Default report directory under the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Where a project keeps its chapters, characters, and reports.
///
/// All `*_dir` values are relative to `root` and use forward slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManuscriptLayout {
    /// Project root.
    pub root: PathBuf,
    /// Manuscript subdirectory holding `chapters/` and `characters/`.
    pub manuscript_dir: String,
    /// Report output directory.
    pub output_dir: String,
}

fn clean_relative(dir: &str) -> String {
    dir.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn join_relative(dir: &str, leaf: &str) -> String {
    if dir.is_empty() {
        leaf.to_owned()
    } else {
        format!("{dir}/{leaf}")
    }
}

impl ManuscriptLayout {
    /// Layout with the default conventions under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manuscript_dir: DEFAULT_MANUSCRIPT_DIR.to_owned(),
            output_dir: DEFAULT_OUTPUT_DIR.to_owned(),
        }
    }

    /// Overrides the manuscript subdirectory when `dir` is given.
    #[must_use]
    pub fn with_manuscript_dir(mut self, dir: Option<&str>) -> Self {
        if let Some(dir) = dir {
            self.manuscript_dir = clean_relative(dir);
        }
        self
    }

    /// Overrides the report directory when `dir` is given.
    #[must_use]
    pub fn with_output_dir(mut self, dir: Option<&str>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = clean_relative(dir);
        }
        self
    }

    /// Root-relative chapters directory.
    #[must_use]
    pub fn chapters_dir(&self) -> String {
        join_relative(&self.manuscript_dir, "chapters")
    }

    /// Root-relative characters directory.
    #[must_use]
    pub fn characters_dir(&self) -> String {
        join_relative(&self.manuscript_dir, "characters")
    }

    /// Root-relative path of a report file.
    #[must_use]
    pub fn report_file(&self, file_name: &str) -> String {
        join_relative(&self.output_dir, file_name)
    }

    /// Resolves a root-relative path against the root.
    #[must_use]
    pub fn absolute(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Whether the root directory exists.
    #[must_use]
    pub fn root_exists(&self) -> bool {
        self.root.is_dir()
    }
}
