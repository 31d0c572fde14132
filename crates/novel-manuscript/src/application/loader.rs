//! Manuscript loading.
//!
//! Reads chapter and character documents from disk. Every per-file failure
//! is recorded as a diagnostic and the file is skipped; nothing here aborts
//! the batch.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use novel_core::diagnostic::{Diagnostic, DiagnosticKind};
use novel_core::error::EngineError;
use tracing::{debug, warn};

use crate::domain::chapter::Chapter;
use crate::domain::character::Character;
use crate::domain::layout::ManuscriptLayout;
use crate::domain::scope::Scope;

/// Everything loaded for one run.
#[derive(Debug, Clone, Default)]
pub struct Manuscript {
    /// Chapters in stable load order.
    pub chapters: Vec<Chapter>,
    /// Characters indexed by id.
    pub characters: BTreeMap<String, Character>,
    /// Loader notices.
    pub diagnostics: Vec<Diagnostic>,
}

/// A manuscript narrowed to a scope.
#[derive(Debug, Clone, Default)]
pub struct ScopedManuscript {
    /// In-scope chapters in load order.
    pub chapters: Vec<Chapter>,
    /// Characters indexed by id.
    pub characters: BTreeMap<String, Character>,
    /// Loader and scope notices.
    pub diagnostics: Vec<Diagnostic>,
}

impl ScopedManuscript {
    /// Whether a named chapter scope matched nothing.
    #[must_use]
    pub fn scope_missed(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::ScopeNotFound)
    }
}

/// Markdown files directly inside `dir`, sorted by file name.
fn markdown_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_markdown = Path::new(&name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if is_markdown {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn read_document(layout: &ManuscriptLayout, relative: &str) -> Result<String, EngineError> {
    fs::read_to_string(layout.absolute(relative)).map_err(|source| EngineError::Io {
        path: relative.to_owned(),
        source,
    })
}

fn record(diagnostics: &mut Vec<Diagnostic>, err: &EngineError) {
    warn!(error = %err, "skipping document");
    diagnostics.push(Diagnostic::from(err));
}

/// Loads every chapter under the layout's chapters directory.
///
/// A missing directory yields a `missing_directory` notice and no chapters.
pub fn load_chapters(layout: &ManuscriptLayout, diagnostics: &mut Vec<Diagnostic>) -> Vec<Chapter> {
    let dir = layout.chapters_dir();
    let names = match markdown_files(&layout.absolute(&dir)) {
        Ok(names) => names,
        Err(err) => {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                DiagnosticKind::MissingDirectory
            } else {
                DiagnosticKind::ReadError
            };
            warn!(dir = %dir, error = %err, "cannot list chapters");
            diagnostics.push(
                Diagnostic::new(kind, format!("cannot list chapters: {err}")).in_file(dir, None),
            );
            return Vec::new();
        }
    };

    let mut chapters: Vec<Chapter> = Vec::with_capacity(names.len());
    for name in names {
        let relative = format!("{dir}/{name}");
        let parsed = read_document(layout, &relative)
            .and_then(|source| Chapter::parse(&relative, chapters.len(), &source));
        match parsed {
            Ok(chapter) => {
                if let Some(first) = chapters.iter().find(|c| c.chapter_id == chapter.chapter_id) {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::DuplicateId,
                            format!(
                                "chapter_id `{}` already declared by {}",
                                chapter.chapter_id, first.path
                            ),
                        )
                        .in_file(relative, Some(chapter.field_line("chapter_id"))),
                    );
                    continue;
                }
                debug!(path = %relative, scenes = chapter.scenes.len(), "loaded chapter");
                chapters.push(chapter);
            }
            Err(err) => record(diagnostics, &err),
        }
    }
    chapters
}

/// Loads every character under the layout's characters directory.
///
/// Characters are optional: a missing directory is not reported.
pub fn load_characters(
    layout: &ManuscriptLayout,
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<String, Character> {
    let dir = layout.characters_dir();
    let names = match markdown_files(&layout.absolute(&dir)) {
        Ok(names) => names,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            warn!(dir = %dir, error = %err, "cannot list characters");
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::ReadError,
                    format!("cannot list characters: {err}"),
                )
                .in_file(dir, None),
            );
            return BTreeMap::new();
        }
    };

    let mut characters: BTreeMap<String, Character> = BTreeMap::new();
    for name in names {
        let relative = format!("{dir}/{name}");
        let parsed =
            read_document(layout, &relative).and_then(|source| Character::parse(&relative, &source));
        match parsed {
            Ok(character) => {
                if let Some(first) = characters.get(&character.id) {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::DuplicateId,
                            format!(
                                "character id `{}` already declared by {}",
                                character.id, first.path
                            ),
                        )
                        .in_file(relative, None),
                    );
                    continue;
                }
                debug!(path = %relative, id = %character.id, "loaded character");
                characters.insert(character.id.clone(), character);
            }
            Err(err) => record(diagnostics, &err),
        }
    }
    characters
}

/// Loads chapters and characters for `layout`.
#[must_use]
pub fn load_manuscript(layout: &ManuscriptLayout) -> Manuscript {
    let mut diagnostics = Vec::new();
    if !layout.root_exists() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::MissingDirectory,
            format!("project root {} does not exist", layout.root.display()),
        ));
        return Manuscript {
            diagnostics,
            ..Manuscript::default()
        };
    }

    let chapters = load_chapters(layout, &mut diagnostics);
    let characters = load_characters(layout, &mut diagnostics);
    Manuscript {
        chapters,
        characters,
        diagnostics,
    }
}

/// Loads the manuscript and narrows it to `scope`.
#[must_use]
pub fn load_scoped(layout: &ManuscriptLayout, scope: &Scope) -> ScopedManuscript {
    let Manuscript {
        chapters,
        characters,
        mut diagnostics,
    } = load_manuscript(layout);

    let selected = scope.select(chapters);
    diagnostics.extend(selected.notice);

    ScopedManuscript {
        chapters: selected.chapters,
        characters,
        diagnostics,
    }
}
