//! Snippet definition files
//!
//! A definition is a small header of `key: value` lines between two `---` lines,
//! followed by the snippet body verbatim:
//!
//! ```text
//! ---
//! description: Foo
//! tabTrigger: foo
//! scope: text.plain
//! uuid: 0190c6d2-...
//! ---
//! bar $0
//! ```
//!
//! Recognized keys populate the fixed fields of [`SnippetDefinition`]; any other
//! key is carried in [`SnippetDefinition::extra`] untouched.

use crate::error::SnippetError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DELIMITER: &str = "---";

/// A parsed snippet definition.
///
/// Serializes to the compiled record: camelCase keys, unset fields omitted and
/// extra header keys flattened alongside the recognized ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDefinition {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub content: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SnippetDefinition {
    /// An otherwise empty definition displayed as `description`.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tab_trigger: None,
            scope: None,
            uuid: None,
            content: String::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Render the definition back into source text.
    pub fn to_source(&self) -> String {
        let mut out = format!("{DELIMITER}\ndescription: {}\n", self.description);
        let fields = [
            ("tabTrigger", &self.tab_trigger),
            ("scope", &self.scope),
            ("uuid", &self.uuid),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                out.push_str(&format!("{key}: {value}\n"));
            }
        }
        for (key, value) in &self.extra {
            out.push_str(&format!("{key}: {value}\n"));
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&self.content);
        out
    }
}

/// Parse definition `text`; `name` is the display name used when the header has
/// neither `description` nor `name`.
pub fn parse(name: &str, text: &str) -> Result<SnippetDefinition, SnippetError> {
    let text = text.replace("\r\n", "\n");
    let (header, body) = split_definition(&text).ok_or(SnippetError::MalformedDefinition)?;

    let mut definition = SnippetDefinition::new(name);
    definition.content = body.to_string();

    let mut description = None;
    let mut alias = None;

    // Line 1 is the opening delimiter.
    for (offset, line) in header.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = parse_header_line(line).ok_or_else(|| {
            SnippetError::MalformedHeaderLine {
                line: offset + 2,
                text: line.to_string(),
            }
        })?;
        let value = value.to_string();

        match key {
            "description" => description = Some(value),
            "name" => alias = Some(value),
            "tabTrigger" => definition.tab_trigger = Some(value),
            "scope" => definition.scope = Some(value),
            "uuid" => definition.uuid = Some(value),
            "content" => warn!("ignoring `content` header key; the body is the snippet content"),
            other => {
                definition.extra.insert(other.to_string(), value);
            }
        }
    }

    match (description, alias) {
        (Some(description), alias) => {
            definition.description = description;
            if let Some(name) = alias {
                definition.extra.insert("name".to_string(), name);
            }
        }
        (None, Some(name)) => definition.description = name,
        (None, None) => {}
    }

    Ok(definition)
}

/// Split into `(header, body)`; `None` when the delimiter pair is missing.
fn split_definition(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---\n")?;

    if let Some(body) = rest.strip_prefix("---\n") {
        return Some(("", body));
    }
    if rest == DELIMITER {
        return Some(("", ""));
    }
    if let Some(end) = rest.find("\n---\n") {
        return Some((&rest[..end], &rest[end + 5..]));
    }
    rest.strip_suffix("\n---").map(|header| (header, ""))
}

fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Display name derived from a definition's path: the file name without the
/// source extension.
pub fn definition_name(path: &Path, source_extension: &str) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{source_extension}");

    match file_name.strip_suffix(&suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(file_name),
    }
}
