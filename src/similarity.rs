//! Title similarity for duplicate-coverage grouping.
//!
//! Implements the longest-matching-blocks ratio (Ratcliff/Obershelp) over
//! raw character sequences: find the longest common block, recurse on the
//! pieces to its left and right, and report `2 * matches / (len_a + len_b)`.
//! Symmetric, range [0, 1]. This is the same measure Python's
//! `difflib.SequenceMatcher.ratio()` computes, minus its junk heuristics,
//! which keeps historical grouping behavior intact.

/// Similarity ratio between two titles, in [0, 1].
///
/// Two empty titles are identical by convention.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matches = matching_chars(&a, &b);
    2.0 * matches as f64 / (a.len() + b.len()) as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (ai, bi, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..ai], &b[..bi]) + matching_chars(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block, preferring the earliest position in `a`
/// (then in `b`) on ties. O(len_a * len_b) with a rolling row.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut cur = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let run = prev[j] + 1;
                cur[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }
    best
}
