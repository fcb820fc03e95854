//! Generated definition templates
//!
//! Both ways of starting a new snippet produce a definition template meant to be
//! inserted into a fresh scratch buffer with snippet semantics: header values are
//! placeholders the author tabs through, and the body is either `$0` or the
//! extracted content.
//!
//! Every template gets its own identity. The uuid is minted per call, never shared
//! across templates.

use crate::buffer::Buffer;
use crate::extract::escape_literal;
use uuid::Uuid;

/// Default header values for [`new_snippet_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefaults {
    pub description: String,
    pub tab_trigger: String,
    pub scope: String,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            description: "Lorizzle".to_string(),
            tab_trigger: "lorizzle".to_string(),
            scope: "text.plain".to_string(),
        }
    }
}

/// A fresh time-ordered identity.
pub fn new_identity() -> String {
    Uuid::now_v7().to_string()
}

/// Template for a brand new definition.
///
/// `content` replaces the `$0` body; it is inserted as snippet text, so callers
/// holding literal text should escape it first.
pub fn new_snippet_template(defaults: &TemplateDefaults, content: Option<&str>) -> String {
    format!(
        "---\n\
         description: ${{1:{}}}\n\
         tabTrigger:  ${{2:{}}}\n\
         scope:       ${{3:{}}}\n\
         uuid:        {}\n\
         ---\n\
         {}",
        escape_field(&defaults.description),
        escape_field(&defaults.tab_trigger),
        escape_field(&defaults.scope),
        new_identity(),
        content.unwrap_or("$0"),
    )
}

/// One template per non-empty selection, each holding the selected text.
///
/// Without any non-empty selection a single empty template is returned.
pub fn templates_for_selections<B: Buffer + ?Sized>(
    buffer: &B,
    defaults: &TemplateDefaults,
) -> Vec<String> {
    let templates: Vec<String> = buffer
        .selections()
        .iter()
        .filter(|selection| !selection.is_empty())
        .map(|selection| {
            let text = escape_literal(&buffer.substring(*selection));
            new_snippet_template(defaults, Some(&text))
        })
        .collect();

    if templates.is_empty() {
        vec![new_snippet_template(defaults, None)]
    } else {
        templates
    }
}

/// Header placeholders for the scope of the extraction point.
///
/// `scope_names` is the host's space separated list, outermost first. The
/// innermost scope becomes `${4:..}` and the remaining ones `${5:..}`.
pub fn scope_as_snippet(scope_names: &str) -> String {
    let mut scopes: Vec<&str> = scope_names.split_whitespace().collect();
    scopes.reverse();

    match scopes.split_first() {
        Some((innermost, rest)) => format!(
            "${{4:{}}} ${{5:{}}}",
            escape_field(innermost),
            escape_field(&rest.join(" "))
        ),
        None => "${4:text.plain} ${5:}".to_string(),
    }
}

/// Wrap extracted contents in a definition header with a fresh identity.
pub fn extracted_snippet_template(contents: &str, scope_names: &str) -> String {
    format!(
        "---\n\
         name: ${{1:name}}\n\
         tabTrigger: ${{2:tabTrigger}}\n\
         scope: ${{3:{}}}\n\
         uuid: ${{6:{}}}\n\
         ---\n\
         {}",
        scope_as_snippet(scope_names),
        new_identity(),
        contents
    )
}

fn escape_field(text: &str) -> String {
    escape_literal(text).replace('}', "\\}")
}
