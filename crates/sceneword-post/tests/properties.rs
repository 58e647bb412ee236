//! Property-based tests for the post-processing stages.
//!
//! Run: cargo test -p sceneword-post --test properties

use proptest::prelude::*;
use sceneword_core::{Candidate, Rect};
use sceneword_post::distance::edit_distance;
use sceneword_post::filter::accept;
use sceneword_post::lexicon::{Vocabulary, reconcile};
use sceneword_post::suppression::OverlapSuppressor;

// ============================================================================
// Strategies
// ============================================================================

/// Candidates packed into a small area so overlaps are common. Confidences
/// come from a coarse grid so ties happen too.
fn candidate() -> impl Strategy<Value = Candidate> {
    (0i32..60, 0i32..60, 0i32..40, 0i32..40, "[A-Za-z]{2,8}", 0u8..12).prop_map(
        |(x, y, w, h, word, c)| Candidate::new(Rect::new(x, y, w, h), word, 40.0 + f32::from(c) * 5.0),
    )
}

fn candidates() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(candidate(), 0..24)
}

// ============================================================================
// Suppression properties
// ============================================================================

proptest! {
    #[test]
    fn suppression_never_grows(input in candidates()) {
        let out = OverlapSuppressor::default().suppress(input.clone());
        prop_assert!(out.len() <= input.len());
    }

    #[test]
    fn suppression_is_idempotent(input in candidates()) {
        let s = OverlapSuppressor::default();
        let once = s.suppress(input);
        let twice = s.suppress(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn survivors_do_not_overlap(input in candidates()) {
        let s = OverlapSuppressor::default();
        let out = s.suppress(input);
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                prop_assert!(!s.overlaps(&out[i].rect, &out[j].rect));
            }
        }
    }

    #[test]
    fn survivors_keep_relative_order(input in candidates()) {
        let s = OverlapSuppressor::default();
        let mask = s.survivors(&input);
        let expected: Vec<Candidate> = input
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(c, _)| c.clone())
            .collect();
        prop_assert_eq!(s.suppress(input), expected);
    }
}

// ============================================================================
// Edit distance properties
// ============================================================================

proptest! {
    #[test]
    fn distance_to_self_is_zero(a in "\\PC{0,12}") {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn distance_is_symmetric(a in "[A-Z]{0,10}", b in "[A-Z]{0,10}") {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn distance_is_bounded(a in "[A-Z]{0,10}", b in "[A-Z]{0,10}") {
        prop_assert!(edit_distance(&a, &b) <= a.chars().count() + b.chars().count());
        prop_assert!(edit_distance(&a, &b) <= a.len().max(b.len()));
    }
}

// ============================================================================
// Filter and reconciliation properties
// ============================================================================

proptest! {
    #[test]
    fn filter_is_pure(word in "[a-zA-Z]{0,6}", confidence in 0.0f32..100.0) {
        let first = accept(&word, confidence);
        let _ = accept("noise", 99.0);
        prop_assert_eq!(first, accept(&word, confidence));
    }

    #[test]
    fn emitted_words_belong_to_vocabulary(
        entries in prop::collection::vec("[A-Z]{1,8}", 1..10),
        word in "[a-zA-Z]{1,8}",
    ) {
        let vocabulary = Vocabulary::from_tokens(&entries);
        if let Some(out) = reconcile(&word, &vocabulary) {
            prop_assert!(vocabulary.contains(&out));
        }
    }
}
