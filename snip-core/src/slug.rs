//! Filesystem-safe names for compiled artifacts

/// Characters, besides control characters and space, that are unsafe in a path
/// component on at least one common platform.
const ILLEGAL: &[char] = &['"', '&', '*', ',', '/', ':', '<', '>', '?', '\\', '|'];

const SEPARATOR: char = '-';

fn is_illegal(c: char) -> bool {
    c.is_ascii_control() || c == ' ' || ILLEGAL.contains(&c)
}

/// Derive a filesystem-safe slug from `text`.
///
/// Non-ASCII characters are dropped, illegal characters become `-`, runs of `-`
/// collapse into one and leading or trailing `-` and spaces are trimmed.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(char::is_ascii) {
        let c = if is_illegal(c) { SEPARATOR } else { c };
        if c == SEPARATOR && out.ends_with(SEPARATOR) {
            continue;
        }
        out.push(c);
    }
    out.trim_matches(|c| c == SEPARATOR || c == ' ').to_string()
}
