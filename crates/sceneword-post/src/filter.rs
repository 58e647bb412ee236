// Heuristic rejection of low-quality recognitions.
//
// The thresholds were tuned on the ICDAR 2015 training set for Tesseract's
// 0-100 word confidences. Every rule looks only at the word and its
// confidence, so the filter is a pure predicate.

use std::fmt;

use sceneword_core::case::is_thin_glyph;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds for [`CandidateFilter`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterOptions {
    /// Words shorter than this (in characters) are rejected.
    pub min_word_len: usize,
    /// Words below this confidence are rejected.
    pub min_confidence: f32,
    /// Words shorter than this are held to `short_word_min_confidence`.
    pub short_word_len: usize,
    /// Minimum confidence for words shorter than `short_word_len`.
    pub short_word_min_confidence: f32,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_word_len: 2,
            min_confidence: 51.0,
            short_word_len: 4,
            short_word_min_confidence: 60.0,
        }
    }
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Fewer characters than `min_word_len`.
    TooShort,
    /// Confidence below `min_confidence`.
    LowConfidence,
    /// Two identical characters, e.g. "ll".
    DoubledPair,
    /// Short word below `short_word_min_confidence`.
    ShortLowConfidence,
    /// Mostly thin glyphs; see [`is_repetitive`].
    Repetitive,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::TooShort => "too short",
            Rejection::LowConfidence => "low confidence",
            Rejection::DoubledPair => "doubled pair",
            Rejection::ShortLowConfidence => "short word with low confidence",
            Rejection::Repetitive => "repetitive thin glyphs",
        };
        f.write_str(s)
    }
}

/// Returns `true` if more than half (rounded up) of the characters of `word`
/// are thin glyphs (`i`, `l`, `I`).
pub fn is_repetitive(word: &str) -> bool {
    let len = word.chars().count();
    let thin = word.chars().filter(|&c| is_thin_glyph(c)).count();
    thin > len.div_ceil(2)
}

/// Rejects implausible (word, confidence) pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFilter {
    options: FilterOptions,
}

impl CandidateFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Return the first rule that rejects the pair, or `None` if it passes.
    pub fn rejection(&self, word: &str, confidence: f32) -> Option<Rejection> {
        let opts = &self.options;
        let len = word.chars().count();

        if len < opts.min_word_len {
            return Some(Rejection::TooShort);
        }
        if confidence < opts.min_confidence {
            return Some(Rejection::LowConfidence);
        }
        if len == 2 {
            let mut chars = word.chars();
            if chars.next() == chars.next() {
                return Some(Rejection::DoubledPair);
            }
        }
        if len < opts.short_word_len && confidence < opts.short_word_min_confidence {
            return Some(Rejection::ShortLowConfidence);
        }
        if is_repetitive(word) {
            return Some(Rejection::Repetitive);
        }
        None
    }

    pub fn accept(&self, word: &str, confidence: f32) -> bool {
        self.rejection(word, confidence).is_none()
    }
}

/// [`CandidateFilter::accept`] with the default thresholds.
pub fn accept(word: &str, confidence: f32) -> bool {
    CandidateFilter::default().accept(word, confidence)
}
