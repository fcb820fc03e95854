//! Shared helpers for snip-core integration tests

use snip_core::{Region, TextBuffer};
use std::fs;
use std::path::{Path, PathBuf};

/// Build a buffer with the given `(begin, end)` selections.
pub fn buffer(text: &str, selections: &[(usize, usize)]) -> TextBuffer {
    TextBuffer::new(text)
        .with_selections(selections.iter().map(|&(a, b)| Region::new(a, b)))
        .expect("valid selections")
}

/// Write a definition file with the given header lines and body.
pub fn write_definition(dir: &Path, file_name: &str, header: &[&str], body: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(file_name);
    fs::write(&path, format!("---\n{}\n---\n{body}", header.join("\n"))).unwrap();
    path
}

/// Sorted file names directly inside `dir`; empty when `dir` does not exist.
pub fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Expand a snippet template the way an insertion engine shows it before any
/// editing: placeholders collapse to their default text, `$n` tab stops vanish
/// and `\$`, `\\`, `\}` unescape.
pub fn render_defaults(template: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::new();
    let mut depth = 0;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if matches!(chars.get(i + 1), Some('$' | '\\' | '}')) => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '$' if chars.get(i + 1) == Some(&'{') => {
                let mut j = i + 2;
                while chars.get(j).is_some_and(char::is_ascii_digit) {
                    j += 1;
                }
                if j > i + 2 && chars.get(j) == Some(&':') {
                    depth += 1;
                    i = j + 1;
                } else {
                    out.push('$');
                    i += 1;
                }
            }
            '$' if chars.get(i + 1).is_some_and(char::is_ascii_digit) => {
                i += 1;
                while chars.get(i).is_some_and(char::is_ascii_digit) {
                    i += 1;
                }
            }
            '}' if depth > 0 => {
                depth -= 1;
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

#[test]
fn render_defaults_expands_nested_placeholders() {
    assert_eq!(
        render_defaults(r"scope: ${3:${4:a} ${5:b\}}} \$0 $0"),
        "scope: a b} $0 "
    );
}
