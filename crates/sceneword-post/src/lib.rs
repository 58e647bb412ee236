//! Post-processing for scene-text detection and recognition output.
//!
//! Takes per-image word candidates (box, word, confidence) from an external
//! detector/recognizer and produces a deduplicated, optionally
//! lexicon-corrected list of word boxes in the ICDAR Robust Reading result
//! format.
//!
//! # Architecture
//!
//! - [`distance`] -- Levenshtein edit distance
//! - [`filter`] -- Heuristic rejection of implausible recognitions
//! - [`suppression`] -- Confidence-driven non-maximal suppression
//! - [`lexicon`] -- Vocabulary loading and nearest-entry reconciliation
//!   (feature `lexicon`, on by default)
//! - [`recognizer`] -- Boundary trait for the external recognizer
//! - [`pipeline`] -- Per-image orchestration of all stages
//!
//! # Features
//!
//! - `lexicon` -- vocabulary boost and reconciliation
//! - `parallel` -- batch processing on the rayon thread pool
//! - `serde` -- `Serialize`/`Deserialize` for options and recognizer output

pub mod distance;
pub mod filter;
#[cfg(feature = "lexicon")]
pub mod lexicon;
pub mod pipeline;
pub mod recognizer;
pub mod suppression;

pub use pipeline::{Pipeline, PipelineError, PipelineOptions};
pub use recognizer::{Precomputed, RecognizedImage, Recognizer};
