//! Scope selection: which chapters a check runs over.

use novel_core::diagnostic::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};

use super::chapter::Chapter;

/// The chapters a check should analyze.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// Every successfully loaded chapter.
    #[default]
    All,
    /// A single chapter by id.
    Chapter {
        /// The chapter to analyze.
        chapter_id: String,
    },
}

/// Chapters selected by a [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
    /// In-scope chapters, in load order.
    pub chapters: Vec<Chapter>,
    /// Set when a named chapter could not be found.
    pub notice: Option<Diagnostic>,
}

impl Scope {
    /// Whether this scope spans the whole manuscript.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Narrows `chapters` to this scope.
    ///
    /// A chapter id that matches nothing yields an empty selection and a
    /// `scope_not_found` notice rather than an error.
    #[must_use]
    pub fn select(&self, chapters: Vec<Chapter>) -> Selected {
        match self {
            Self::All => Selected {
                chapters,
                notice: None,
            },
            Self::Chapter { chapter_id } => {
                let wanted = chapter_id.trim();
                let chapters: Vec<Chapter> = chapters
                    .into_iter()
                    .filter(|c| c.chapter_id == wanted)
                    .collect();
                let notice = chapters.is_empty().then(|| {
                    Diagnostic::new(
                        DiagnosticKind::ScopeNotFound,
                        format!("no loaded chapter has chapter_id `{wanted}`"),
                    )
                });
                Selected { chapters, notice }
            }
        }
    }

    /// Scope narrowed to one chapter.
    #[must_use]
    pub fn chapter(chapter_id: impl Into<String>) -> Self {
        Self::Chapter {
            chapter_id: chapter_id.into(),
        }
    }
}

/// A hint for re-running `check` on a single chapter.
#[must_use]
pub fn chapter_repro(check: &str, chapter_id: &str) -> String {
    format!(r#"rerun the {check} check with scope {{"kind":"chapter","chapter_id":"{chapter_id}"}}"#)
}
