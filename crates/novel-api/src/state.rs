//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use novel_core::clock::Clock;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to time checks.
    pub clock: Arc<dyn Clock>,
    /// Project root used when a request omits `rootDir`.
    pub root_dir: PathBuf,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            clock,
            root_dir: root_dir.into(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("root_dir", &self.root_dir)
            .finish_non_exhaustive()
    }
}
