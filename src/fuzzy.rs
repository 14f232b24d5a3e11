//! Fuzzy matching for "did you mean" suggestions on search misses

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::vocab::VocabularySet;

pub const DEFAULT_THRESHOLD: f64 = 0.8;
pub const MAX_SUGGESTIONS: usize = 3;

/// Similarity in `[0, 1]`, case and surrounding whitespace ignored
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return 1.0;
    }
    normalized_levenshtein(&a, &b) * 0.4 + jaro_winkler(&a, &b) * 0.6
}

/// Cached words closest to `query`, best first
pub fn suggest(vocab: &VocabularySet, query: &str, threshold: f64, limit: usize) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = vocab
        .iter()
        .map(|e| (similarity(query, &e.word), e.word.as_str()))
        .filter(|(score, _)| *score >= threshold)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    let mut words: Vec<String> = Vec::new();
    for (_, word) in scored {
        if words.len() == limit {
            break;
        }
        if !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_vocab;

    #[test]
    fn test_exact_match_ignores_case() {
        assert_eq!(similarity(" Candid", "candid"), 1.0);
    }

    #[test]
    fn test_typo_is_suggested() {
        let words = suggest(&sample_vocab(), "benevolnt", DEFAULT_THRESHOLD, MAX_SUGGESTIONS);
        assert_eq!(words, vec!["benevolent"]);
    }

    #[test]
    fn test_unrelated_query_has_no_suggestions() {
        assert!(suggest(&sample_vocab(), "xyz", DEFAULT_THRESHOLD, MAX_SUGGESTIONS).is_empty());
    }

    #[test]
    fn test_limit_respected() {
        let vocab = crate::vocab::VocabularySet::new(vec![
            crate::testing::entry("terse", &["brief"]),
            crate::testing::entry("tense", &["taut"]),
            crate::testing::entry("terce", &["hour"]),
        ]);
        assert_eq!(suggest(&vocab, "terse", 0.5, 2).len(), 2);
    }
}
