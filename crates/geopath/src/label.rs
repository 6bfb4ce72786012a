//! Label text helpers.

/// Replace the space that best balances a label over two lines with `\n`.
///
/// Balance is the length (in chars) of the longer half, the separator counted
/// on the left; the first best candidate wins. Lines without a space come
/// back unchanged.
pub fn line_break(line: &str) -> String {
    let total = line.chars().count();
    let mut best: Option<(usize, usize)> = None; // (longer half, byte offset of space)
    for (chars_before, (offset, ch)) in line.char_indices().enumerate() {
        if ch != ' ' {
            continue;
        }
        let left = chars_before + 1;
        let longer = left.max(total - left);
        if best.map_or(true, |(b, _)| longer < b) {
            best = Some((longer, offset));
        }
    }
    match best {
        Some((_, offset)) => format!("{}\n{}", &line[..offset], &line[offset + 1..]),
        None => line.to_string(),
    }
}
