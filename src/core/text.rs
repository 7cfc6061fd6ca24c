use crate::models::Sentiment;

/// Words counted as positive by [`classify_sentiment`]
pub const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "wonderful",
    "great",
    "excellent",
    "fantastic",
    "love",
    "enjoy",
    "happy",
    "fun",
    "awesome",
    "perfect",
    "helpful",
    "good",
];

/// Words counted as negative by [`classify_sentiment`]
pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "boring",
    "awful",
    "bad",
    "hate",
    "poor",
    "confusing",
    "tired",
    "disappointing",
    "worst",
    "annoying",
    "slow",
];

/// Lowercase a possibly absent string; `None` becomes `""`
#[inline]
pub fn to_lower_safe(s: Option<&str>) -> String {
    s.map(str::to_lowercase).unwrap_or_default()
}

/// Arithmetic mean, `0` for an empty slice
#[inline]
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[inline]
pub fn clamp(score: f64, lo: f64, hi: f64) -> f64 {
    score.max(lo).min(hi)
}

/// Clamp to the 0-100 score range
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    clamp(score, 0.0, 100.0)
}

/// `part / whole`, defined as `0` for an empty whole
#[inline]
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

/// Keyword-count sentiment classifier
///
/// Counts case-insensitive substring occurrences of every listed word.
/// Ties, including no hits at all, are neutral.
pub fn classify_sentiment(text: &str) -> Sentiment {
    let normalized = text.to_lowercase();
    let positive = count_occurrences(&normalized, POSITIVE_WORDS);
    let negative = count_occurrences(&normalized, NEGATIVE_WORDS);

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn count_occurrences(normalized: &str, words: &[&str]) -> usize {
    words.iter().map(|word| normalized.matches(word).count()).sum()
}

/// True if the lowercased text contains any of `words`
pub fn contains_any(text: &str, words: &[&str]) -> bool {
    let normalized = text.to_lowercase();
    words.iter().any(|word| normalized.contains(word))
}

/// Overlap ratio `(matches * 2) / (len(a) + len(b))`
///
/// Two empty lists are a full match. Comparison is case-insensitive.
pub fn overlap_ratio(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let b_lower: Vec<String> = b.iter().map(|item| item.to_lowercase()).collect();
    let matches = a
        .iter()
        .filter(|item| b_lower.contains(&item.to_lowercase()))
        .count();

    clamp((matches * 2) as f64 / (a.len() + b.len()) as f64, 0.0, 1.0)
}

/// Interests present in both lists, in `a`'s order and casing, without duplicates
pub fn shared_interests(a: &[String], b: &[String]) -> Vec<String> {
    let b_lower: Vec<String> = b.iter().map(|item| item.to_lowercase()).collect();
    let mut seen: Vec<String> = Vec::new();
    let mut shared = Vec::new();

    for interest in a {
        let key = interest.to_lowercase();
        if b_lower.contains(&key) && !seen.contains(&key) {
            seen.push(key);
            shared.push(interest.clone());
        }
    }

    shared
}
