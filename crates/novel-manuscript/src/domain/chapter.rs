//! Chapter documents: header records, scenes, and structure beats.

use std::collections::{BTreeMap, BTreeSet};

use novel_core::error::EngineError;
use serde::Deserialize;
use serde_yaml::Value;

use super::header::{HeaderLines, ItemLines, decode_error, split_document};

/// The only chapter header schema this engine reads.
pub const CHAPTER_SCHEMA: u64 = 1;

/// Chapter header as written on disk.
#[derive(Debug, Deserialize)]
struct ChapterHeader {
    #[serde(default)]
    schema: Option<u64>,
    chapter_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    scenes: Vec<SceneEntry>,
    #[serde(default)]
    structure: Option<StructureEntry>,
    #[serde(default)]
    characters: Vec<String>,
    #[serde(default)]
    threads_opened: Vec<String>,
    #[serde(default)]
    threads_advanced: Vec<String>,
    #[serde(default)]
    threads_closed: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SceneEntry {
    #[serde(default)]
    scene_id: Option<Value>,
    #[serde(default)]
    objective: Option<Value>,
    #[serde(default)]
    conflict: Option<Value>,
    #[serde(default)]
    outcome: Option<Value>,
    #[serde(default)]
    hook: Option<Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct StructureEntry {
    #[serde(default)]
    act: Option<u32>,
    #[serde(default)]
    beat_id: Option<String>,
    #[serde(default)]
    beat_goal: Option<String>,
}

/// One scene inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Declared scene identifier.
    pub scene_id: Option<String>,
    /// What the viewpoint character wants.
    pub objective: Option<String>,
    /// What stands in the way.
    pub conflict: Option<String>,
    /// How the scene ends.
    pub outcome: Option<String>,
    /// Closing hook.
    pub hook: Option<String>,
    /// Position of the scene within its chapter.
    pub index: usize,
    /// Non-blank fields beyond the well-known ones.
    extra_present: BTreeSet<String>,
    lines: ItemLines,
}

fn non_blank(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl Scene {
    /// Whether `field` is present and non-blank.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "scene_id" => non_blank(self.scene_id.as_ref()),
            "objective" => non_blank(self.objective.as_ref()),
            "conflict" => non_blank(self.conflict.as_ref()),
            "outcome" => non_blank(self.outcome.as_ref()),
            "hook" => non_blank(self.hook.as_ref()),
            other => self.extra_present.contains(other),
        }
    }

    /// Line where the scene's list item starts.
    #[must_use]
    pub fn line(&self) -> usize {
        self.lines.line
    }

    /// Line of `field` within the scene, falling back to the scene line.
    #[must_use]
    pub fn field_line(&self, field: &str) -> usize {
        self.lines.field(field)
    }

    /// A label for messages: the scene id, or its position.
    #[must_use]
    pub fn label(&self) -> String {
        match self.scene_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => format!("#{}", self.index + 1),
        }
    }
}

/// A chapter's structural beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureBeat {
    /// Act number.
    pub act: Option<u32>,
    /// Beat identifier.
    pub beat_id: Option<String>,
    /// What the beat must achieve.
    pub beat_goal: Option<String>,
}

/// Thread ids touched by a chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadChanges {
    /// Threads introduced here.
    pub opened: Vec<String>,
    /// Threads developed here.
    pub advanced: Vec<String>,
    /// Threads resolved here.
    pub closed: Vec<String>,
}

/// One parsed chapter file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Declared chapter identity.
    pub chapter_id: String,
    /// Declared title, or the chapter id when absent.
    pub title: String,
    /// Root-relative source path with forward slashes.
    pub path: String,
    /// Position in the stable load order.
    pub ordinal: usize,
    /// Scenes in declaration order.
    pub scenes: Vec<Scene>,
    /// Structural beat, when declared.
    pub structure: Option<StructureBeat>,
    /// Referenced character ids.
    pub characters: Vec<String>,
    /// Thread state lists.
    pub threads: ThreadChanges,
    /// Prose after the header.
    pub body: String,
    /// 1-based line where `body` starts.
    pub body_start_line: usize,
    lines: HeaderLines,
}

fn scalar_text(
    path: &str,
    line: usize,
    field: &str,
    value: Option<Value>,
) -> Result<Option<String>, EngineError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(EngineError::InvalidHeader {
            path: path.to_owned(),
            line,
            message: format!("`{field}` must be a scalar"),
        }),
    }
}

fn value_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        _ => true,
    }
}

fn build_scene(
    path: &str,
    index: usize,
    entry: SceneEntry,
    lines: ItemLines,
) -> Result<Scene, EngineError> {
    let text = |field: &str, value| scalar_text(path, lines.field(field), field, value);
    Ok(Scene {
        scene_id: text("scene_id", entry.scene_id)?,
        objective: text("objective", entry.objective)?,
        conflict: text("conflict", entry.conflict)?,
        outcome: text("outcome", entry.outcome)?,
        hook: text("hook", entry.hook)?,
        index,
        extra_present: entry
            .extra
            .iter()
            .filter(|(_, value)| value_present(value))
            .map(|(key, _)| key.clone())
            .collect(),
        lines,
    })
}

impl Chapter {
    /// Parses one chapter document.
    ///
    /// # Errors
    ///
    /// Returns a header error when the document has no header, the header is
    /// not valid YAML of the expected shape, declares an unsupported schema,
    /// or has a blank `chapter_id`.
    pub fn parse(path: &str, ordinal: usize, source: &str) -> Result<Self, EngineError> {
        let split = split_document(path, source)?;
        if split.yaml.trim().is_empty() {
            return Err(EngineError::InvalidHeader {
                path: path.to_owned(),
                line: 1,
                message: "header is empty".to_owned(),
            });
        }
        let header: ChapterHeader = serde_yaml::from_str(split.yaml)
            .map_err(|e| decode_error(path, split.yaml_start_line, &e))?;
        let lines = HeaderLines::index(split.yaml, split.yaml_start_line);

        if let Some(found) = header.schema.filter(|v| *v != CHAPTER_SCHEMA) {
            return Err(EngineError::UnsupportedSchema {
                path: path.to_owned(),
                found,
            });
        }

        let chapter_id = header.chapter_id.trim().to_owned();
        if chapter_id.is_empty() {
            return Err(EngineError::InvalidHeader {
                path: path.to_owned(),
                line: lines.field("chapter_id").unwrap_or(1),
                message: "`chapter_id` must not be blank".to_owned(),
            });
        }

        let scene_lines = lines.items("scenes");
        let fallback_line = lines.field("scenes").unwrap_or(1);
        let scenes = header
            .scenes
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let item = scene_lines
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| ItemLines::at(fallback_line));
                build_scene(path, index, entry, item)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: header
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| chapter_id.clone()),
            chapter_id,
            path: path.to_owned(),
            ordinal,
            scenes,
            structure: header.structure.map(|s| StructureBeat {
                act: s.act,
                beat_id: s
                    .beat_id
                    .map(|id| id.trim().to_owned())
                    .filter(|id| !id.is_empty()),
                beat_goal: s.beat_goal,
            }),
            characters: header.characters,
            threads: ThreadChanges {
                opened: header.threads_opened,
                advanced: header.threads_advanced,
                closed: header.threads_closed,
            },
            body: split.body.to_owned(),
            body_start_line: split.body_start_line,
            lines,
        })
    }

    /// Line of a header field (`key` or `parent.key`), falling back to the
    /// header's opening line.
    #[must_use]
    pub fn field_line(&self, key: &str) -> usize {
        self.lines.field(key).unwrap_or(1)
    }

    /// The beat id, when the chapter declares one.
    #[must_use]
    pub fn beat_id(&self) -> Option<&str> {
        self.structure.as_ref().and_then(|s| s.beat_id.as_deref())
    }
}
