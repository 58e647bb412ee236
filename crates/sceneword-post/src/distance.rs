// Levenshtein edit distance between words.
//
// Insertion, deletion, and substitution each cost 1. Distances are measured
// in characters, not bytes, so multi-byte letters count once.

/// Minimum of three values.
#[inline]
pub fn min3(x: usize, y: usize, z: usize) -> usize {
    x.min(y).min(z)
}

/// Edit distance between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance_chars(&a, &b)
}

/// Edit distance between two character slices.
///
/// Fills the full `(|a| + 1) x (|b| + 1)` dynamic-programming table (stored
/// row-major in one allocation) and returns the bottom-right cell.
pub fn edit_distance_chars(a: &[char], b: &[char]) -> usize {
    let na = a.len();
    let nb = b.len();
    let cols = nb + 1;
    let mut table = vec![0usize; (na + 1) * cols];

    for i in 0..=na {
        table[i * cols] = i;
    }
    for j in 0..=nb {
        table[j] = j;
    }

    for i in 1..=na {
        for j in 1..=nb {
            let deletion = table[(i - 1) * cols + j] + 1;
            let insertion = table[i * cols + j - 1] + 1;
            let substitution =
                table[(i - 1) * cols + j - 1] + usize::from(a[i - 1] != b[j - 1]);
            table[i * cols + j] = min3(deletion, insertion, substitution);
        }
    }

    table[na * cols + nb]
}
