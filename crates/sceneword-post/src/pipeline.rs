// Pipeline: per-image orchestration of the post-processing stages.
//
// recognized lines -> line rejection + crop translation -> candidate filter
// (+ out-of-vocabulary boost) -> overlap suppression -> lexicon
// reconciliation -> clamped result records.
//
// Design notes:
// - The pipeline owns its options and the (read-only) vocabulary. Stage
//   objects are small `Copy` values created per call.
// - Filtering runs on the word exactly as recognized. Only accepted words are
//   upper-cased, and those missing from the vocabulary get the boost
//   confidence so that an in-vocabulary duplicate cannot suppress them.
//   Whether they are finally emitted is decided by reconciliation.
// - Images are independent. A shared `&Pipeline` can process many images at
//   once (see `process_batch`, parallel with the `parallel` feature).

#[cfg(feature = "lexicon")]
use std::path::Path;

#[cfg(feature = "lexicon")]
use sceneword_core::case::to_upper_word;
use sceneword_core::{Candidate, ImageSize, RecognizedLine, ResultRecord};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::filter::{CandidateFilter, FilterOptions};
#[cfg(feature = "lexicon")]
use crate::lexicon::{LexiconError, LexiconOptions, LexiconReconciler, Reconciliation, Vocabulary};
use crate::recognizer::{RecognizedImage, Recognizer};
use crate::suppression::{OverlapSuppressor, SuppressionOptions};

/// Error type for a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The recognizer could not process the input image.
    #[error("recognizer failed: {0}")]
    Recognizer(String),

    /// The recognizer reported an image with no pixels.
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    /// The vocabulary could not be loaded.
    #[cfg(feature = "lexicon")]
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

/// All tunable thresholds of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineOptions {
    pub filter: FilterOptions,
    pub suppression: SuppressionOptions,
    #[cfg(feature = "lexicon")]
    pub lexicon: LexiconOptions,
    /// Recognized lines whose text (newlines removed) is shorter than this
    /// are dropped with all their words.
    pub min_line_chars: usize,
    /// Output corners are clamped to `[0, size - edge_margin]`.
    pub edge_margin: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            filter: FilterOptions::default(),
            suppression: SuppressionOptions::default(),
            #[cfg(feature = "lexicon")]
            lexicon: LexiconOptions::default(),
            min_line_chars: 3,
            edge_margin: 2,
        }
    }
}

/// Turns recognizer output into final result records.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
    #[cfg(feature = "lexicon")]
    vocabulary: Vocabulary,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            #[cfg(feature = "lexicon")]
            vocabulary: Vocabulary::new(),
        }
    }

    /// Use `vocabulary` for boosting and reconciliation. An empty vocabulary
    /// disables both.
    #[cfg(feature = "lexicon")]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Load the vocabulary from a whitespace-separated word file.
    #[cfg(feature = "lexicon")]
    pub fn with_vocabulary_file(self, path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let vocabulary = Vocabulary::load(path)?;
        Ok(self.with_vocabulary(vocabulary))
    }

    #[cfg(feature = "lexicon")]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PipelineOptions) {
        self.options = options;
    }

    pub fn set_min_line_chars(&mut self, min_line_chars: usize) {
        self.options.min_line_chars = min_line_chars;
    }

    pub fn set_edge_margin(&mut self, edge_margin: u32) {
        self.options.edge_margin = edge_margin;
    }

    // =========================================================================
    // Stages
    // =========================================================================

    /// Drop lines with too little text and move the remaining words from crop
    /// coordinates into image coordinates.
    pub fn collect_candidates(&self, lines: Vec<RecognizedLine>) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for line in lines {
            if line.text_len_without_newlines() < self.options.min_line_chars {
                debug!(text = %line.text.trim(), "dropped short line");
                continue;
            }
            candidates.extend(line.words_in_image_space());
        }
        candidates
    }

    /// Apply the heuristic filter, then the out-of-vocabulary boost.
    pub fn filter_candidates(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let filter = CandidateFilter::new(self.options.filter);
        candidates
            .into_iter()
            .filter_map(|mut candidate| {
                if let Some(reason) = filter.rejection(&candidate.word, candidate.confidence) {
                    debug!(
                        word = %candidate.word,
                        confidence = candidate.confidence,
                        %reason,
                        "rejected candidate"
                    );
                    return None;
                }
                #[cfg(feature = "lexicon")]
                self.boost_out_of_vocabulary(&mut candidate);
                Some(candidate)
            })
            .collect()
    }

    #[cfg(feature = "lexicon")]
    fn boost_out_of_vocabulary(&self, candidate: &mut Candidate) {
        if self.vocabulary.is_empty() {
            return;
        }
        candidate.word = to_upper_word(&candidate.word);
        if !self.vocabulary.contains(&candidate.word) {
            candidate.confidence = self.options.lexicon.out_of_vocabulary_confidence;
        }
    }

    pub fn suppress(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        OverlapSuppressor::new(self.options.suppression).suppress(candidates)
    }

    /// Confirm, correct, or discard each word against the vocabulary.
    #[cfg(feature = "lexicon")]
    pub fn reconcile(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if self.vocabulary.is_empty() {
            return candidates;
        }
        let reconciler = LexiconReconciler::new(&self.vocabulary, self.options.lexicon);
        candidates
            .into_iter()
            .filter_map(|mut candidate| match reconciler.reconcile(&candidate.word) {
                Reconciliation::Discarded { best_distance } => {
                    debug!(word = %candidate.word, ?best_distance, "discarded unmatched word");
                    None
                }
                Reconciliation::Corrected { word, distance } => {
                    debug!(from = %candidate.word, to = %word, distance, "corrected word");
                    candidate.word = word;
                    Some(candidate)
                }
                Reconciliation::Exact(word) | Reconciliation::Unchanged(word) => {
                    candidate.word = word;
                    Some(candidate)
                }
            })
            .collect()
    }

    /// Convert surviving candidates into clamped result records.
    pub fn emit(&self, size: ImageSize, candidates: Vec<Candidate>) -> Vec<ResultRecord> {
        candidates
            .into_iter()
            .map(|c| ResultRecord::from_candidate(c, size, self.options.edge_margin))
            .collect()
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Run filter, suppression, reconciliation, and output on word candidates
    /// that are already in image coordinates.
    pub fn process_candidates(
        &self,
        size: ImageSize,
        candidates: Vec<Candidate>,
    ) -> Vec<ResultRecord> {
        let total = candidates.len();
        let accepted = self.filter_candidates(candidates);
        let accepted_count = accepted.len();
        let kept = self.suppress(accepted);
        let kept_count = kept.len();
        #[cfg(feature = "lexicon")]
        let kept = self.reconcile(kept);

        info!(
            candidates = total,
            accepted = accepted_count,
            after_suppression = kept_count,
            emitted = kept.len(),
            "processed image"
        );
        self.emit(size, kept)
    }

    pub fn process_lines(&self, size: ImageSize, lines: Vec<RecognizedLine>) -> Vec<ResultRecord> {
        let candidates = self.collect_candidates(lines);
        self.process_candidates(size, candidates)
    }

    pub fn process_image(&self, image: RecognizedImage) -> Vec<ResultRecord> {
        self.process_lines(image.size, image.lines)
    }

    /// Recognize `image` with `recognizer` and post-process the result.
    pub fn run<R>(&self, recognizer: &R, image: &R::Image) -> Result<Vec<ResultRecord>, PipelineError>
    where
        R: Recognizer + ?Sized,
    {
        let recognized = recognizer
            .recognize(image)
            .map_err(|e| PipelineError::Recognizer(e.to_string()))?;
        if recognized.size.is_empty() {
            return Err(PipelineError::InvalidImageSize {
                width: recognized.size.width,
                height: recognized.size.height,
            });
        }
        Ok(self.process_image(recognized))
    }

    /// Process independent images, returning results in input order.
    pub fn process_batch(&self, images: Vec<RecognizedImage>) -> Vec<Vec<ResultRecord>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            images
                .into_par_iter()
                .map(|image| self.process_image(image))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            images
                .into_iter()
                .map(|image| self.process_image(image))
                .collect()
        }
    }

    /// [`Pipeline::run`] over several inputs, returning results in input order.
    pub fn run_batch<R>(
        &self,
        recognizer: &R,
        images: &[&R::Image],
    ) -> Vec<Result<Vec<ResultRecord>, PipelineError>>
    where
        R: Recognizer + Sync + ?Sized,
        R::Image: Sync,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            images
                .par_iter()
                .map(|image| self.run(recognizer, image))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            images
                .iter()
                .map(|image| self.run(recognizer, image))
                .collect()
        }
    }
}
