use crate::utils::round_score;

/// Anything that carries a representative text for set comparison
pub trait HasText {
    fn text(&self) -> &str;
}

impl HasText for String {
    fn text(&self) -> &str {
        self
    }
}

impl HasText for &str {
    fn text(&self) -> &str {
        self
    }
}

/// Similarity of two strings as an integer percentage
///
/// Equal strings score 100 (this includes two empty strings), a single empty
/// side scores 0. Everything else is the Levenshtein distance of the
/// lowercased strings, normalized by the longer of the two input lengths.
pub fn similarity(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let distance = levenshtein_distance(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    // Lowercasing can lengthen a string (`İ`), so the distance may exceed it.
    round_score(max_len.saturating_sub(distance) as f64 / max_len as f64 * 100.0)
}

/// Levenshtein distance in chars between the lowercased strings
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Greedy best-match average of `a` against `b`
///
/// Every item of `a` is scored against all of `b` and the best score is
/// kept; the result is the mean over `a`. Not symmetric: swapping the sides
/// can change the result.
pub fn best_match_average<A, B, F>(a: &[A], b: &[B], score: F) -> u8
where
    F: Fn(&A, &B) -> u8,
{
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total: u32 = a
        .iter()
        .map(|left| {
            b.iter()
                .map(|right| u32::from(score(left, right)))
                .max()
                .unwrap_or(0)
        })
        .sum();

    round_score(f64::from(total) / a.len() as f64)
}

/// Collection-level text comparison using [`similarity`] per pair
pub fn compare_sets<A: HasText, B: HasText>(a: &[A], b: &[B]) -> u8 {
    best_match_average(a, b, |left, right| similarity(left.text(), right.text()))
}
