// Character-level helpers for word comparison.
//
// Upper-casing maps each character to exactly one character so that word
// lengths (and therefore edit-distance ratios) are unaffected by case.

/// Return the simple (single-character) uppercase mapping of `c`.
///
/// Characters whose full uppercase form expands to several characters
/// (e.g. `'ß'`) map to the first character of that expansion.
pub fn simple_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Upper-case a word character by character with [`simple_upper`].
pub fn to_upper_word(word: &str) -> String {
    word.chars().map(simple_upper).collect()
}

/// Thin glyphs that recognizers tend to hallucinate from noise, vertical
/// strokes, and texture: `i`, `l`, and `I`.
pub fn is_thin_glyph(c: char) -> bool {
    matches!(c, 'i' | 'l' | 'I')
}
