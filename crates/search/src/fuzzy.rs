//! Edit distance primitives.

/// Calculate Levenshtein edit distance between two strings.
///
/// Counts single-character insertions, deletions and substitutions.
/// Comparison is exact; callers lower-case inputs for case-insensitive use.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 || n == 0 {
        return m.max(n);
    }

    // Two rolling rows of the DP table
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Smallest edit distance from `token` to any of `candidates`.
///
/// Returns `None` when there are no candidates.
pub fn min_token_distance<'a, I>(token: &str, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| levenshtein_distance(token, candidate))
        .min()
}
