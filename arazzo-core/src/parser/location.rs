/// Byte offset of a 1-based `line`/`column` position.
///
/// Columns are counted in bytes, which is what serde_json reports.
pub(crate) fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, l) in input.split(|b| *b == b'\n').enumerate() {
        if idx + 1 == line {
            return (offset + column.saturating_sub(1)).min(input.len());
        }
        offset += l.len() + 1;
    }
    input.len()
}

pub(crate) fn looks_like_json(input: &[u8]) -> bool {
    let trimmed = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| &input[start..])
        .unwrap_or_default();
    // Skip a UTF-8 BOM if present.
    let trimmed = trimmed.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(trimmed);
    matches!(trimmed.first(), Some(b'{' | b'['))
}
