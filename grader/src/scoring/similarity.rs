//! Text similarity based on the longest common subsequence (LCS).
//!
//! `ratio = 2 * LCS(a, b) / (|a| + |b|)`, computed over Unicode scalar values. Identical
//! strings score 1, strings with no character in common score 0. Two empty strings are
//! considered identical.

/// Length of the longest common subsequence of `a` and `b`.
///
/// Classic dynamic programme with a single rolling row, O(|a|·|b|) time and O(|b|) space.
pub fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Normalized LCS similarity in [0, 1].
pub fn lcs_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(&a, &b)) as f64 / total as f64
}
