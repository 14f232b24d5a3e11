use super::*;
use crate::vocab::{VocabularySet, WordEntry};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn entry(word: &str, synonyms: &[&str]) -> WordEntry {
    WordEntry::new(word, synonyms.iter().map(|s| s.to_string()).collect()).unwrap()
}

fn sample_vocab() -> VocabularySet {
    VocabularySet::new(vec![
        entry("benevolent", &["kind", "generous"]),
        entry("austere", &["strict", "severe"]),
        entry("candid", &["honest", "frank"]),
        entry("diligent", &["hardworking", "industrious"]),
    ])
}

#[test]
fn test_options_are_four_distinct_with_answer_once() {
    let vocab = sample_vocab();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let q = generate_question(&vocab, &mut rng).expect("vocab is large enough");

        assert_eq!(q.options.len(), OPTION_COUNT);
        let distinct: HashSet<&String> = q.options.iter().collect();
        assert_eq!(distinct.len(), OPTION_COUNT, "options must not repeat: {:?}", q.options);
        assert_eq!(
            q.options.iter().filter(|o| **o == q.correct_answer).count(),
            1,
            "correct answer must appear exactly once"
        );
    }
}

#[test]
fn test_answer_matches_orientation() {
    let vocab = sample_vocab();
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let q = generate_question(&vocab, &mut rng).unwrap();
        if q.is_synonym_question {
            let owner = vocab.find_word(&q.correct_answer).expect("answer is a word");
            assert!(owner.has_synonym(&q.prompt));
            assert!(q.display_text().starts_with("What word matches the synonym"));
        } else {
            let owner = vocab.find_word(&q.prompt).expect("prompt is a word");
            assert!(owner.has_synonym(&q.correct_answer));
            assert!(q.display_text().starts_with("What is the synonym for"));
        }
    }
}

#[test]
fn test_distractors_never_belong_to_target() {
    let vocab = sample_vocab();
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let q = generate_question(&vocab, &mut rng).unwrap();
        let target_word = if q.is_synonym_question { &q.correct_answer } else { &q.prompt };
        let target = vocab.find_word(target_word).unwrap();
        for option in q.options.iter().filter(|o| **o != q.correct_answer) {
            assert_ne!(option, &target.word);
            assert!(!target.has_synonym(option));
        }
    }
}

#[test]
fn test_both_orientations_occur() {
    let vocab = sample_vocab();
    let mut rng = StdRng::seed_from_u64(7);
    let kinds: HashSet<bool> = (0..50)
        .map(|_| generate_question(&vocab, &mut rng).unwrap().is_synonym_question)
        .collect();
    assert_eq!(kinds.len(), 2);
}

#[test]
fn test_same_seed_same_question() {
    let vocab = sample_vocab();
    let a = generate_question(&vocab, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = generate_question(&vocab, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_too_few_words_fails_instead_of_looping() {
    let vocab = VocabularySet::new(vec![
        entry("benevolent", &["kind"]),
        entry("austere", &["strict"]),
        entry("candid", &["honest"]),
    ]);
    let target = vocab.find_word("candid").unwrap().clone();
    // Only two other entries exist, so neither orientation can find 3 distractors.
    for seed in 0..20 {
        let result = generate_question_for(&vocab, &target, &mut StdRng::seed_from_u64(seed));
        assert!(matches!(result, Err(Error::InsufficientData { available: 2 })));
    }
    assert_eq!(min_distractors(&vocab, &target), 2);
}

#[test]
fn test_duplicate_candidates_do_not_count_twice() {
    let vocab = VocabularySet::new(vec![
        entry("benevolent", &["kind", "generous"]),
        entry("amiable", &["kind"]),
        entry("cordial", &["kind"]),
        entry("genial", &["kind"]),
    ]);
    let target = vocab.find_word("benevolent").unwrap().clone();
    // every other entry only offers "kind", which is also a right answer
    assert_eq!(min_distractors(&vocab, &target), 0);
}

#[test]
fn test_empty_vocab_is_insufficient() {
    let result = generate_question(&VocabularySet::default(), &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(Error::InsufficientData { .. })));
}

#[test]
fn test_correct_index_points_at_answer() {
    let vocab = sample_vocab();
    let q = generate_question(&vocab, &mut StdRng::seed_from_u64(3)).unwrap();
    let idx = q.correct_index().unwrap();
    assert_eq!(q.options[idx], q.correct_answer);
}
