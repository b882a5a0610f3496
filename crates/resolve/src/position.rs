//! Pure line/column ↔ offset translation.
//!
//! Both directions are linear scans. Embedded documents are short, so no
//! indexing structure is warranted; keeping these as pure functions makes
//! them directly unit-testable.

/// Convert a (line, character) position in `text` to a byte offset by
/// walking line lengths.
///
/// Positions past the last line clamp to the text length.
#[must_use]
pub fn offset_at(text: &str, line: u32, character: u32) -> usize {
    let mut offset = 0;
    for (index, line_text) in text.split('\n').enumerate() {
        if index as u32 == line {
            return offset + character as usize;
        }
        // line length plus the newline that was split out
        offset += line_text.len() + 1;
    }
    text.len()
}

/// Convert a byte offset in `text` to a (line, character) pair, both
/// 0-indexed.
#[must_use]
pub fn offset_to_line_col(text: &str, offset: usize) -> (u32, u32) {
    let mut line = 0;
    let mut col = 0;
    let mut current = 0;

    for ch in text.chars() {
        if current >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        current += ch.len_utf8();
    }

    (line, col)
}
