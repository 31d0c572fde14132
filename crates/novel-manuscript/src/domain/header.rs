//! Structured header splitting and source-line tracking.
//!
//! A document is a YAML front-matter block followed by a markdown body:
//!
//! ```text
//! ---
//! chapter_id: ch0001
//! scenes:
//!   - scene_id: s1
//!     objective: ...
//! ---
//! Prose starts here.
//! ```
//!
//! [`split_document`] separates the two parts and [`HeaderLines::index`]
//! records where each recognized key lives, so analyzers can cite exact lines
//! without re-reading the source.

use std::collections::BTreeMap;

use novel_core::error::EngineError;

/// A document split into its header and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Raw YAML between the delimiters.
    pub yaml: &'a str,
    /// 1-based line of the first YAML line.
    pub yaml_start_line: usize,
    /// Everything after the closing delimiter.
    pub body: &'a str,
    /// 1-based line where `body` starts.
    pub body_start_line: usize,
}

fn is_closing_delimiter(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed == "---" || trimmed == "..."
}

/// Splits `source` into header and body.
///
/// # Errors
///
/// Returns `EngineError::MissingHeader` if the first line is not `---` and
/// `EngineError::UnterminatedHeader` if no closing delimiter follows.
pub fn split_document<'a>(path: &str, source: &'a str) -> Result<SplitDocument<'a>, EngineError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let first_end = source.find('\n').unwrap_or(source.len());
    if source[..first_end].trim_end() != "---" {
        return Err(EngineError::MissingHeader {
            path: path.to_owned(),
        });
    }

    let yaml_start = (first_end + 1).min(source.len());
    let mut cursor = yaml_start;
    let mut line_no = 2;
    while cursor < source.len() {
        let line_end = source[cursor..]
            .find('\n')
            .map_or(source.len(), |i| cursor + i);
        if is_closing_delimiter(&source[cursor..line_end]) {
            let body_start = (line_end + 1).min(source.len());
            return Ok(SplitDocument {
                yaml: &source[yaml_start..cursor],
                yaml_start_line: 2,
                body: &source[body_start..],
                body_start_line: line_no + 1,
            });
        }
        cursor = line_end + 1;
        line_no += 1;
    }

    Err(EngineError::UnterminatedHeader {
        path: path.to_owned(),
        line: 1,
    })
}

/// Lines of one block-sequence item and of the keys directly inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLines {
    /// Line of the `-` that opens the item.
    pub line: usize,
    fields: BTreeMap<String, usize>,
}

impl ItemLines {
    /// An item known only by its own line.
    #[must_use]
    pub fn at(line: usize) -> Self {
        Self {
            line,
            fields: BTreeMap::new(),
        }
    }

    /// Line of `key` inside this item, falling back to the item's own line.
    #[must_use]
    pub fn field(&self, key: &str) -> usize {
        self.fields.get(key).copied().unwrap_or(self.line)
    }

    /// Per-key lines, keyed by field name.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, usize> {
        &self.fields
    }
}

/// Side-table mapping header keys to their source lines.
///
/// Top-level keys are stored by name, keys one level below a top-level
/// mapping as `parent.key`, and items of top-level block sequences under the
/// sequence's key. Flow-style values are not descended into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLines {
    fields: BTreeMap<String, usize>,
    items: BTreeMap<String, Vec<ItemLines>>,
}

fn key_of(content: &str) -> Option<&str> {
    let (key, rest) = content.split_once(':')?;
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }
    let key = key.trim().trim_matches(|c| c == '"' || c == '\'');
    if key.is_empty() || key.starts_with('#') || key.contains(char::is_whitespace) {
        return None;
    }
    Some(key)
}

fn sequence_entry(content: &str) -> Option<&str> {
    let rest = content.strip_prefix('-')?;
    if rest.is_empty() || rest.starts_with(' ') {
        Some(rest)
    } else {
        None
    }
}

impl HeaderLines {
    /// Scans `yaml` (whose first line is `first_line`) and records key lines.
    #[must_use]
    pub fn index(yaml: &str, first_line: usize) -> Self {
        let mut lines = Self::default();
        let mut top: Option<String> = None;
        let mut child_indent: Option<usize> = None;
        let mut item_indent: Option<usize> = None;

        for (offset, raw) in yaml.lines().enumerate() {
            let line = first_line + offset;
            let content = raw.trim_start();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            let indent = raw.len() - content.len();

            if indent == 0 && sequence_entry(content).is_none() {
                top = key_of(content).map(str::to_owned);
                if let Some(key) = &top {
                    lines.fields.insert(key.clone(), line);
                }
                child_indent = None;
                item_indent = None;
                continue;
            }

            let Some(parent) = top.as_deref() else {
                continue;
            };

            // Block sequences may sit at the parent's own indentation.
            if let Some(rest) = sequence_entry(content) {
                let level = *child_indent.get_or_insert(indent);
                if indent == level {
                    let inner = rest.trim_start();
                    let mut item = ItemLines {
                        line,
                        fields: BTreeMap::new(),
                    };
                    if let Some(key) = key_of(inner) {
                        item.fields.insert(key.to_owned(), line);
                    }
                    lines.items.entry(parent.to_owned()).or_default().push(item);
                    item_indent = Some(indent + 1 + (rest.len() - inner.len()));
                }
                continue;
            }

            let Some(key) = key_of(content) else {
                continue;
            };

            if let Some(level) = item_indent {
                if indent == level {
                    if let Some(item) = lines
                        .items
                        .get_mut(parent)
                        .and_then(|items| items.last_mut())
                    {
                        item.fields.entry(key.to_owned()).or_insert(line);
                    }
                }
                continue;
            }

            let level = *child_indent.get_or_insert(indent);
            if indent == level {
                lines
                    .fields
                    .entry(format!("{parent}.{key}"))
                    .or_insert(line);
            }
        }

        lines
    }

    /// Line of a top-level (`key`) or nested (`parent.key`) field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<usize> {
        self.fields.get(key).copied()
    }

    /// Items of the block sequence stored under `key`.
    #[must_use]
    pub fn items(&self, key: &str) -> &[ItemLines] {
        self.items.get(key).map_or(&[], Vec::as_slice)
    }
}

/// Converts a `serde_yaml` error into `EngineError::InvalidHeader`, mapping
/// its location onto the document's line numbers.
#[must_use]
pub fn decode_error(path: &str, yaml_start_line: usize, err: &serde_yaml::Error) -> EngineError {
    let line = err
        .location()
        .map_or(yaml_start_line, |loc| yaml_start_line + loc.line().saturating_sub(1));
    EngineError::InvalidHeader {
        path: path.to_owned(),
        line,
        message: err.to_string(),
    }
}
