// Nearest-entry lexicon reconciliation.
//
// A recognized word is upper-cased and looked up in the vocabulary. Exact
// members are kept. Otherwise the entry with the smallest edit distance is
// found (earliest entry wins ties); if distance / word length is below
// `max_edit_distance_ratio` the word is replaced by that entry, else the
// candidate is discarded.

use sceneword_core::case::to_upper_word;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::vocabulary::Vocabulary;
use crate::distance::edit_distance_chars;

/// Lexicon thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LexiconOptions {
    /// Corrections are accepted only when `distance / word_len` is strictly
    /// below this ratio.
    pub max_edit_distance_ratio: f64,
    /// Confidence assigned, before suppression, to accepted words that are
    /// not vocabulary members.
    pub out_of_vocabulary_confidence: f32,
}

impl Default for LexiconOptions {
    fn default() -> Self {
        Self {
            max_edit_distance_ratio: 0.34,
            out_of_vocabulary_confidence: 200.0,
        }
    }
}

/// Outcome of reconciling one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The vocabulary is empty; the word passes through as recognized.
    Unchanged(String),
    /// The upper-cased word is a vocabulary member.
    Exact(String),
    /// The word was replaced by its nearest entry.
    Corrected { word: String, distance: usize },
    /// No entry is close enough. `best_distance` is `None` when the word is
    /// empty.
    Discarded { best_distance: Option<usize> },
}

impl Reconciliation {
    /// The word to emit, or `None` if the candidate is dropped.
    pub fn into_word(self) -> Option<String> {
        match self {
            Reconciliation::Unchanged(w)
            | Reconciliation::Exact(w)
            | Reconciliation::Corrected { word: w, .. } => Some(w),
            Reconciliation::Discarded { .. } => None,
        }
    }
}

/// Reconciles words against a borrowed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct LexiconReconciler<'a> {
    vocabulary: &'a Vocabulary,
    options: LexiconOptions,
}

impl<'a> LexiconReconciler<'a> {
    pub fn new(vocabulary: &'a Vocabulary, options: LexiconOptions) -> Self {
        Self {
            vocabulary,
            options,
        }
    }

    /// Nearest vocabulary entry to an upper-cased word and its distance.
    ///
    /// Returns `None` only for an empty vocabulary.
    pub fn nearest(&self, word: &str) -> Option<(&'a str, usize)> {
        let word: Vec<char> = word.chars().collect();
        let mut best: Option<(&'a str, usize)> = None;
        for entry in self.vocabulary.iter() {
            let entry_chars: Vec<char> = entry.chars().collect();
            let dist = edit_distance_chars(&entry_chars, &word);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((entry, dist));
                if dist == 0 {
                    break;
                }
            }
        }
        best
    }

    pub fn reconcile(&self, word: &str) -> Reconciliation {
        if self.vocabulary.is_empty() {
            return Reconciliation::Unchanged(word.to_string());
        }

        let upper = to_upper_word(word);
        if self.vocabulary.contains(&upper) {
            return Reconciliation::Exact(upper);
        }

        let len = upper.chars().count();
        if len == 0 {
            return Reconciliation::Discarded { best_distance: None };
        }

        match self.nearest(&upper) {
            Some((entry, distance))
                if (distance as f64 / len as f64) < self.options.max_edit_distance_ratio =>
            {
                Reconciliation::Corrected {
                    word: entry.to_string(),
                    distance,
                }
            }
            Some((_, distance)) => Reconciliation::Discarded {
                best_distance: Some(distance),
            },
            None => Reconciliation::Discarded { best_distance: None },
        }
    }
}

/// Reconcile `word` with the default ratio; `None` means discard.
pub fn reconcile(word: &str, vocabulary: &Vocabulary) -> Option<String> {
    LexiconReconciler::new(vocabulary, LexiconOptions::default())
        .reconcile(word)
        .into_word()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(words: &[&str]) -> Vocabulary {
        Vocabulary::from_tokens(words.iter().copied())
    }

    #[test]
    fn one_substitution_is_corrected() {
        let v = vocab(&["HELLO"]);
        assert_eq!(reconcile("HELLC", &v).as_deref(), Some("HELLO"));
    }

    #[test]
    fn distant_word_is_discarded() {
        let v = vocab(&["HELLO"]);
        assert_eq!(reconcile("XYZPQ", &v), None);
        let r = LexiconReconciler::new(&v, LexiconOptions::default()).reconcile("XYZPQ");
        assert_eq!(r, Reconciliation::Discarded { best_distance: Some(5) });
    }

    #[test]
    fn empty_vocabulary_passes_word_through() {
        let v = Vocabulary::new();
        assert_eq!(reconcile("hello", &v).as_deref(), Some("hello"));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let v = vocab(&["exit"]);
        let r = LexiconReconciler::new(&v, LexiconOptions::default()).reconcile("Exit");
        assert_eq!(r, Reconciliation::Exact("EXIT".to_string()));
    }

    #[test]
    fn ratio_boundary() {
        // 1 / 3 = 0.333 < 0.34 -> corrected
        let v = vocab(&["CAT"]);
        assert_eq!(reconcile("CAX", &v).as_deref(), Some("CAT"));
        // 2 / 5 = 0.4 -> discarded
        let v = vocab(&["HELLO"]);
        assert_eq!(reconcile("HEXXO", &v), None);
        // 2 / 6 = 0.333 -> corrected
        let v = vocab(&["STREET"]);
        assert_eq!(reconcile("STRXXT", &v).as_deref(), Some("STREET"));
    }

    #[test]
    fn ratio_uses_recognized_word_length() {
        // distance 1 from a 2-char word: 0.5 -> discarded even though the
        // entry is long enough that 1 / 3 would pass.
        let v = vocab(&["CAT"]);
        assert_eq!(reconcile("CA", &v), None);
    }

    #[test]
    fn first_minimum_wins_ties() {
        let v = vocab(&["HELLO", "JELLO", "CELLO"]);
        let r = LexiconReconciler::new(&v, LexiconOptions::default());
        assert_eq!(r.nearest("BELLO"), Some(("HELLO", 1)));
        assert_eq!(r.reconcile("BELLO").into_word().as_deref(), Some("HELLO"));

        let v = vocab(&["CELLO", "HELLO"]);
        assert_eq!(reconcile("BELLO", &v).as_deref(), Some("CELLO"));
    }

    #[test]
    fn closest_entry_is_chosen() {
        let v = vocab(&["PARKING", "PARK", "PARIS"]);
        let r = LexiconReconciler::new(&v, LexiconOptions::default());
        assert_eq!(r.nearest("PARKS"), Some(("PARK", 1)));
    }

    #[test]
    fn empty_word_is_discarded() {
        let v = vocab(&["A"]);
        let r = LexiconReconciler::new(&v, LexiconOptions::default()).reconcile("");
        assert_eq!(r, Reconciliation::Discarded { best_distance: None });
    }

    #[test]
    fn custom_ratio() {
        let v = vocab(&["HELLO"]);
        let r = LexiconReconciler::new(
            &v,
            LexiconOptions {
                max_edit_distance_ratio: 0.5,
                ..LexiconOptions::default()
            },
        );
        assert_eq!(
            r.reconcile("HEXXO"),
            Reconciliation::Corrected {
                word: "HELLO".to_string(),
                distance: 2
            }
        );
    }

    #[test]
    fn corrected_words_are_vocabulary_members() {
        let v = vocab(&["OPEN", "CLOSED", "PUSH", "PULL"]);
        for w in ["0PEN", "CL0SED", "PUSH", "PUIL", "QQQQ", "pull"] {
            if let Some(out) = reconcile(w, &v) {
                assert!(v.contains(&out), "{w} -> {out}");
            }
        }
    }
}
