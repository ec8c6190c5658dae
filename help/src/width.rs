//! Terminal display width.

/// Returns `true` for glyphs that occupy two terminal columns.
fn is_wide(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x4E00..=0x9FFF | 0x3000..=0x303F | 0xFF00..=0xFFEF
    )
}

/// Number of terminal columns `text` occupies.
///
/// CJK ideographs (U+4E00–U+9FFF), CJK punctuation (U+3000–U+303F) and
/// fullwidth forms (U+FF00–U+FFEF) count as two columns; every other
/// character counts as one.
///
/// # Examples
///
/// ```
/// use command_tree_help::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("中文"), 4);
/// assert_eq!(display_width("a中b"), 4);
/// ```
pub fn display_width(text: &str) -> usize {
    text.chars().map(|ch| if is_wide(ch) { 2 } else { 1 }).sum()
}

/// `count` spaces.
pub(crate) fn spaces(count: usize) -> String {
    " ".repeat(count)
}
