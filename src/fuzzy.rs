//! Fuzzy matching of free-text input against a fixed vocabulary.
//!
//! Similarity is the matching-blocks ratio `2 * M / T`, where `M` is the
//! number of characters covered by the recursively found longest common
//! substrings and `T` is the combined length of both strings. Matching is
//! case-sensitive.

/// Minimum similarity for [`fuzzy_correct`] to substitute a match.
pub const DEFAULT_CUTOFF: f64 = 0.75;

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start_a, start_b, len)`. Ties go to the match starting earliest in
/// `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    for i in alo..ahi {
        let mut cur = vec![0usize; width];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                cur[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = cur;
    }
    best
}

/// Characters covered by all matching blocks.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![((0, a.len()), (0, b.len()))];
    while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
        if alo >= ahi || blo >= bhi {
            continue;
        }
        let (i, j, k) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        total += k;
        pending.push(((alo, i), (blo, j)));
        pending.push(((i + k, ahi), (j + k, bhi)));
    }
    total
}

/// Similarity ratio in `[0, 1]`; two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Up to `n` candidates scoring at least `cutoff`, best first.
///
/// Equal scores are ordered by candidate, descending.
pub fn close_matches<'a, S: AsRef<str>>(
    word: &str,
    possibilities: &'a [S],
    n: usize,
    cutoff: f64,
) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &str)> = possibilities
        .iter()
        .map(|p| p.as_ref())
        .map(|p| (similarity(word, p), p))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    scored.sort_by(|x, y| y.0.total_cmp(&x.0).then_with(|| y.1.cmp(x.1)));
    scored.into_iter().take(n).map(|(_, p)| p).collect()
}

/// Best vocabulary match for `input`, or `input` unchanged when nothing
/// clears [`DEFAULT_CUTOFF`].
///
/// ```rust
/// # use eventsmith::fuzzy_correct;
/// let vocab = ["Technology", "Business", "Education"];
/// assert_eq!(fuzzy_correct("Tecnology", &vocab), "Technology");
/// assert_eq!(fuzzy_correct("Gardening", &vocab), "Gardening");
/// ```
pub fn fuzzy_correct<S: AsRef<str>>(input: &str, vocabulary: &[S]) -> String {
    close_matches(input, vocabulary, 1, DEFAULT_CUTOFF)
        .first()
        .map_or_else(|| input.to_string(), |m| (*m).to_string())
}
