//! Column slicing helpers. Offsets count characters, not bytes, so accented
//! merchant names do not shift or split the columns.

/// Byte index of the `n`th character, or the string length past the end.
fn byte_index(line: &str, n: usize) -> usize {
    line.char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Characters `start..end` of `line`, clamped to the line.
pub fn char_slice(line: &str, start: usize, end: Option<usize>) -> &str {
    let from = byte_index(line, start);
    let to = match end {
        Some(end) if end > start => byte_index(line, end),
        Some(_) => from,
        None => line.len(),
    };
    &line[from..to]
}

/// Number of characters in `line`.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Character offset of a byte index.
pub fn char_offset(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

/// Collapse runs of whitespace to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
