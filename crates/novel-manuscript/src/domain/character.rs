//! Character documents.

use novel_core::error::EngineError;
use serde::Deserialize;

use super::header::{HeaderLines, decode_error, split_document};

/// The only character header schema this engine reads.
pub const CHARACTER_SCHEMA: u64 = 1;

#[derive(Debug, Deserialize)]
struct CharacterHeader {
    #[serde(default)]
    schema: Option<u64>,
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    voice: VoiceEntry,
}

#[derive(Debug, Default, Deserialize)]
struct VoiceEntry {
    #[serde(default)]
    catchphrases: Vec<String>,
}

/// One parsed character file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Identity referenced by chapters.
    pub id: String,
    /// Display name, or the id when absent.
    pub name: String,
    /// Root-relative source path with forward slashes.
    pub path: String,
    /// Declared catchphrases, blanks removed, in declaration order.
    pub catchphrases: Vec<String>,
    /// Line of `voice.catchphrases`, or of `voice`, or 1.
    pub catchphrases_line: usize,
}

impl Character {
    /// Parses one character document.
    ///
    /// # Errors
    ///
    /// Returns a header error when the header is absent, undecodable,
    /// declares an unsupported schema, or has a blank `id`.
    pub fn parse(path: &str, source: &str) -> Result<Self, EngineError> {
        let split = split_document(path, source)?;
        if split.yaml.trim().is_empty() {
            return Err(EngineError::InvalidHeader {
                path: path.to_owned(),
                line: 1,
                message: "header is empty".to_owned(),
            });
        }
        let header: CharacterHeader = serde_yaml::from_str(split.yaml)
            .map_err(|e| decode_error(path, split.yaml_start_line, &e))?;
        let lines = HeaderLines::index(split.yaml, split.yaml_start_line);

        if let Some(found) = header.schema.filter(|v| *v != CHARACTER_SCHEMA) {
            return Err(EngineError::UnsupportedSchema {
                path: path.to_owned(),
                found,
            });
        }

        let id = header.id.trim().to_owned();
        if id.is_empty() {
            return Err(EngineError::InvalidHeader {
                path: path.to_owned(),
                line: lines.field("id").unwrap_or(1),
                message: "`id` must not be blank".to_owned(),
            });
        }

        Ok(Self {
            name: header
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.clone()),
            id,
            path: path.to_owned(),
            catchphrases: header
                .voice
                .catchphrases
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect(),
            catchphrases_line: lines
                .field("voice.catchphrases")
                .or_else(|| lines.field("voice"))
                .unwrap_or(1),
        })
    }
}
