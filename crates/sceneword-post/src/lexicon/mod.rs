// Lexicon support: vocabulary loading and nearest-entry reconciliation.
//
// Architecture:
//   - `vocabulary`: ordered, deduplicated set of upper-case words
//   - `reconcile`: confirm, correct, or discard recognized words against it

pub mod reconcile;
pub mod vocabulary;

pub use reconcile::{LexiconOptions, LexiconReconciler, Reconciliation, reconcile};
pub use vocabulary::{LexiconError, Vocabulary};
