//! Buffer access at the editor boundary
//!
//! The extractor never reaches into editor state on its own. Everything it needs
//! (text, selections, indentation settings and scope names) is read through the
//! [`Buffer`] trait, which an editor integration implements over its own view type.
//! [`TextBuffer`] is the in-memory implementation used by the CLI and the tests.
//!
//! Offsets are character offsets, not byte offsets.

use crate::error::SnippetError;
use crate::region::Region;

/// Tab width used when a buffer does not configure one.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Read access to an editor buffer.
pub trait Buffer {
    /// Number of characters in the buffer.
    fn size(&self) -> usize;

    /// Text covered by `region`, clamped to the buffer.
    fn substring(&self, region: Region) -> String;

    /// The full line containing `point`, excluding the trailing newline.
    fn line_containing(&self, point: usize) -> Region;

    fn tab_width(&self) -> usize {
        DEFAULT_TAB_WIDTH
    }

    /// Current selections, ordered and non-overlapping.
    fn selections(&self) -> &[Region];

    /// Space-separated scope names at `point`, outermost first.
    fn scope_name(&self, _point: usize) -> String {
        String::new()
    }
}

/// A plain text buffer with a fixed selection set.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    chars: Vec<char>,
    selections: Vec<Region>,
    tab_width: usize,
    scope: String,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            selections: Vec::new(),
            tab_width: DEFAULT_TAB_WIDTH,
            scope: String::new(),
        }
    }

    /// Replace the selection set.
    ///
    /// Selections are sorted; overlapping selections or selections reaching past
    /// the end of the buffer are rejected.
    pub fn with_selections(
        mut self,
        selections: impl IntoIterator<Item = Region>,
    ) -> Result<Self, SnippetError> {
        let mut selections: Vec<Region> = selections.into_iter().collect();
        selections.sort();

        if let Some(out_of_range) = selections.iter().find(|r| r.end > self.chars.len()) {
            return Err(SnippetError::InvalidSelection(format!(
                "{}..{} is outside the buffer (size {})",
                out_of_range.begin,
                out_of_range.end,
                self.chars.len()
            )));
        }

        for pair in selections.windows(2) {
            if pair[1].begin < pair[0].end {
                return Err(SnippetError::InvalidSelection(format!(
                    "{}..{} overlaps {}..{}",
                    pair[0].begin, pair[0].end, pair[1].begin, pair[1].end
                )));
            }
        }

        self.selections = selections;
        Ok(self)
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Scope names reported for every point, outermost first.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    fn clamp(&self, point: usize) -> usize {
        point.min(self.chars.len())
    }
}

impl Buffer for TextBuffer {
    fn size(&self) -> usize {
        self.chars.len()
    }

    fn substring(&self, region: Region) -> String {
        let begin = self.clamp(region.begin);
        let end = self.clamp(region.end);
        self.chars[begin..end].iter().collect()
    }

    fn line_containing(&self, point: usize) -> Region {
        let point = self.clamp(point);
        let begin = self.chars[..point]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let end = self.chars[point..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |i| point + i);
        Region::new(begin, end)
    }

    fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn selections(&self) -> &[Region] {
        &self.selections
    }

    fn scope_name(&self, _point: usize) -> String {
        self.scope.clone()
    }
}
