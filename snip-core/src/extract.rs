//! Tab-stop extraction
//!
//! Turns the selections of a buffer into a snippet template. Every non-trivial
//! selection becomes a numbered placeholder holding the selected text; the text
//! between selections (found by inverting the selections within their span) is
//! copied as literal text.
//!
//! Placeholder numbers follow the position of the region in the merged sequence
//! of gaps and selections, offset by a base so they never collide with the
//! numbered fields of the generated header. Selections holding identical text
//! share a number, so editing one mirrors into the others after insertion.

use crate::buffer::Buffer;
use crate::error::SnippetError;
use crate::region::{invert, span_of, Region, RegionKind};
use std::collections::HashMap;

/// Offset added to every extracted placeholder index.
pub const DEFAULT_PLACEHOLDER_BASE: usize = 100;

/// Knobs for [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub placeholder_base: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            placeholder_base: DEFAULT_PLACEHOLDER_BASE,
        }
    }
}

/// Maps literal text to the first placeholder index that used it.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderMap {
    indices: HashMap<String, usize>,
}

impl PlaceholderMap {
    /// Index for `text`, assigning `candidate` if the text has not been seen.
    ///
    /// Empty text is never recorded, so every empty tab stop keeps its own index.
    pub fn index_for(&mut self, text: &str, candidate: usize) -> usize {
        if text.is_empty() {
            return candidate;
        }
        *self.indices.entry(text.to_string()).or_insert(candidate)
    }
}

/// Escape the snippet metacharacters `\` and `$`.
pub fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('$', "\\$")
}

/// Extract a snippet template from the buffer's selections.
///
/// The template is re-indented by the whitespace that precedes the span start on
/// its line ([`indentation_before`]), not by the full indentation of that line.
pub fn extract<B: Buffer + ?Sized>(
    buffer: &B,
    options: &ExtractOptions,
) -> Result<String, SnippetError> {
    let selections = buffer.selections();
    let span = span_of(selections).ok_or(SnippetError::NoSelection)?;

    let mut regions: Vec<Region> = selections
        .iter()
        .filter(|selection| is_tab_stop(selection, &span))
        .map(|selection| Region {
            kind: RegionKind::Selection,
            ..*selection
        })
        .collect();
    let gaps = invert(&regions, span);
    regions.extend(gaps);
    regions.sort();

    let mut placeholders = PlaceholderMap::default();
    let mut snippet = " ".repeat(indentation_before(buffer, span.begin));

    for (position, region) in regions.iter().enumerate() {
        let text = escape_literal(&buffer.substring(*region));
        if region.is_gap() {
            snippet.push_str(&text);
            continue;
        }

        let index = placeholders.index_for(&text, position + 1) + options.placeholder_base;
        snippet.push_str(&format!("${{{index}:{}}}", text.replace('}', "\\}")));
    }

    Ok(strip_leading_blank_lines(&dedent(&snippet)))
}

/// Carets on the edge of the span only mark where extraction starts or stops.
fn is_tab_stop(selection: &Region, span: &Region) -> bool {
    !(selection.is_empty() && selection.shares_extent(span))
}

/// Visual width of the leading whitespace on `point`'s line that precedes `point`.
///
/// Tabs advance to the next multiple of the buffer's tab width.
pub fn indentation_before<B: Buffer + ?Sized>(buffer: &B, point: usize) -> usize {
    let tab_width = buffer.tab_width().max(1);
    let line = buffer.line_containing(point);
    let leading = buffer.substring(Region::new(line.begin, point.max(line.begin)));

    let mut width = 0;
    for ch in leading.chars() {
        match ch {
            '\t' => width += tab_width - (width % tab_width),
            c if c.is_whitespace() => width += 1,
            _ => break,
        }
    }
    width
}

/// Remove the whitespace prefix shared by every non-blank line.
///
/// Lines of spaces and tabs are emptied and do not take part in the margin. A
/// trailing `\r` is kept, so CRLF text keeps its line endings.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| match (is_blank(line), line.ends_with('\r')) {
            (true, true) => "\r",
            (true, false) => "",
            (false, _) => line,
        })
        .collect();

    let margin = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| leading_whitespace(line))
        .reduce(common_prefix)
        .unwrap_or("");

    lines
        .iter()
        .map(|line| line.strip_prefix(margin).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only spaces and tabs, ignoring the `\r` of a CRLF line ending.
fn is_blank(line: &str) -> bool {
    line.strip_suffix('\r')
        .unwrap_or(line)
        .chars()
        .all(|c| c == ' ' || c == '\t')
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, c), _)| i + c.len_utf8());
    &a[..len]
}

fn strip_leading_blank_lines(text: &str) -> String {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !is_blank(line) {
            break;
        }
        rest = tail;
    }
    rest.to_string()
}
