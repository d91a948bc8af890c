//! Fuzzy relevance scoring between a query and a candidate title.
//!
//! Combines three similarity measures on lower-cased, trimmed strings:
//!
//! - whole-string ratio (weight 0.4)
//! - best partial (substring window) ratio (weight 0.3)
//! - token-sort ratio, insensitive to word order (weight 0.3)
//!
//! Each measure lies in `[0, 1]`, so the weighted sum does too. An exact
//! case-insensitive match short-circuits to 1.0. Fully deterministic.

/// Score how well `title` matches `query`, in `[0, 1]`.
pub fn relevance(query: &str, title: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let title = title.trim().to_lowercase();

    if query == title {
        return 1.0;
    }

    let q: Vec<char> = query.chars().collect();
    let t: Vec<char> = title.chars().collect();

    ratio(&q, &t) * 0.4 + partial_ratio(&q, &t) * 0.3 + token_sort_ratio(&query, &title) * 0.3
}

/// Indel similarity: `2 * LCS(a, b) / (|a| + |b|)`.
///
/// Two empty strings are identical (1.0); one empty string matches
/// nothing (0.0).
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_length(a, b) as f64 / total as f64
}

/// Best [`ratio`] of the shorter string against every window of the longer
/// string with the shorter one's length.
fn partial_ratio(a: &[char], b: &[char]) -> f64 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return if long.is_empty() { 1.0 } else { 0.0 };
    }
    if short.len() == long.len() {
        return ratio(short, long);
    }

    let mut best: f64 = 0.0;
    for window in long.windows(short.len()) {
        best = best.max(ratio(short, window));
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// [`ratio`] after whitespace-tokenising, sorting and re-joining both
/// strings, which makes the measure insensitive to word order.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let sorted_a: Vec<char> = sort_tokens(a).chars().collect();
    let sorted_b: Vec<char> = sort_tokens(b).chars().collect();
    ratio(&sorted_a, &sorted_b)
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Longest common subsequence length, two-row dynamic programming.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_strings_score_one() {
        assert!((relevance("Daiquiri", "Daiquiri") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        assert!((relevance("  daiquiri ", "DAIQUIRI") - 1.0).abs() < f64::EPSILON);
        assert!((relevance("Old Fashioned", " old fashioned ") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scores_are_bounded() {
        let pairs = [
            ("daiquiri", "margarita"),
            ("", "mojito"),
            ("gin", ""),
            ("", ""),
            ("old fashioned", "fashioned old"),
            ("a", "aaaaaaaaaaaaaaaaaaaa"),
        ];
        for (q, t) in pairs {
            let score = relevance(q, t);
            assert!(
                (0.0..=1.0).contains(&score),
                "score out of bounds for ({q:?}, {t:?}): {score}"
            );
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = relevance("whiskey sour", "Whisky Sour No.2");
        let b = relevance("whiskey sour", "Whisky Sour No.2");
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn close_title_beats_unrelated_title() {
        let close = relevance("daiquiri", "Daiquiri No.2");
        let unrelated = relevance("daiquiri", "Espresso Martini");
        assert!(close > unrelated);
    }

    #[test]
    fn ratio_of_identical_is_one() {
        assert!((ratio(&chars("abc"), &chars("abc")) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_of_disjoint_is_zero() {
        assert!(ratio(&chars("abc"), &chars("xyz")).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_both_empty_is_one() {
        assert!((ratio(&[], &[]) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_one_empty_is_zero() {
        assert!(ratio(&chars("abc"), &[]).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_ratio_finds_embedded_substring() {
        // "daiquiri" appears verbatim inside the longer string.
        let score = partial_ratio(&chars("daiquiri"), &chars("frozen daiquiri cocktail"));
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_ratio_at_least_whole_ratio() {
        let q = chars("mojito");
        let t = chars("mojito royale");
        assert!(partial_ratio(&q, &t) >= ratio(&q, &t));
    }

    #[test]
    fn token_sort_ignores_word_order() {
        let score = token_sort_ratio("fashioned old", "old fashioned");
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reordered_words_score_higher_than_plain_ratio_alone() {
        // Word order differs, so the token-sort component lifts the score.
        let score = relevance("sour whiskey", "whiskey sour");
        assert!(score > 0.65, "got {score}");
        // The token-sort component alone contributes its full 0.3 weight.
        assert!((token_sort_ratio("sour whiskey", "whiskey sour") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lcs_length_basics() {
        assert_eq!(lcs_length(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(lcs_length(&chars("abc"), &chars("abc")), 3);
        assert_eq!(lcs_length(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(lcs_length(&[], &chars("abc")), 0);
    }

    #[test]
    fn non_ascii_titles_handled() {
        let score = relevance("caipirinha", "Caïpirinha");
        assert!((0.0..=1.0).contains(&score));
        assert!(score > 0.8);
    }
}
