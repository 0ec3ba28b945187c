//! Levenshtein distance with an early exit on length difference.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, so when it already
//! exceeds the cap the DP is skipped and `max + 1` is returned. Callers only
//! ever compare the result against the cap.

/// Edit distance between `a` and `b`, or `max + 1` when obviously too far.
///
/// Exact whenever the true distance is `<= max`. Counts are in chars.
pub fn bounded_edit_distance(a: &str, b: &str, max: usize) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }
    if a.len().abs_diff(b.len()) > max {
        return max + 1;
    }

    let mut dp: Vec<usize> = (0..=b.len()).collect();
    for (i, ac) in a.iter().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;

        for (j, bc) in b.iter().enumerate() {
            let temp = dp[j + 1];
            dp[j + 1] = if ac == bc {
                prev
            } else {
                1 + prev.min(dp[j]).min(dp[j + 1])
            };
            prev = temp;
        }
    }

    dp[b.len()]
}

/// Shorthand for "within `max` edits".
pub fn within(a: &str, b: &str, max: usize) -> Option<usize> {
    let d = bounded_edit_distance(a, b, max);
    (d <= max).then_some(d)
}
