// Confidence-driven non-maximal suppression over word candidates.
//
// Two boxes overlap when their IoU exceeds `iou_threshold`, or when their
// intersection covers more than `containment_threshold` of either box. Of an
// overlapping pair the lower-confidence candidate is removed; on a tie the
// later one goes.
//
// Losers are marked in an alive mask during a single nested sweep and
// filtered out afterwards. A candidate that loses stops being compared, so a
// removed box never suppresses anything later in the list.

use sceneword_core::{Candidate, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overlap thresholds for [`OverlapSuppressor`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SuppressionOptions {
    /// Pairs with intersection-over-union strictly above this overlap.
    pub iou_threshold: f64,
    /// Pairs whose intersection covers strictly more than this fraction of
    /// either box overlap.
    pub containment_threshold: f64,
}

impl Default for SuppressionOptions {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            containment_threshold: 0.8,
        }
    }
}

/// Intersection-over-union of two rectangles.
///
/// Returns 0 when the union is empty (both boxes degenerate).
pub fn iou(a: &Rect, b: &Rect) -> f64 {
    let inter = a.intersection(b).area();
    let union = a.area() + b.area() - inter;
    if union <= 0 {
        return 0.0;
    }
    inter as f64 / union as f64
}

/// Removes overlapping lower-confidence duplicates from a candidate list.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapSuppressor {
    options: SuppressionOptions,
}

impl OverlapSuppressor {
    pub fn new(options: SuppressionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SuppressionOptions {
        &self.options
    }

    /// Overlap predicate. Zero-area boxes never overlap anything.
    pub fn overlaps(&self, a: &Rect, b: &Rect) -> bool {
        let area_a = a.area();
        let area_b = b.area();
        let inter = a.intersection(b).area();
        if area_a + area_b - inter <= 0 {
            return false;
        }
        let inter = inter as f64;
        let t = self.options.containment_threshold;
        iou(a, b) > self.options.iou_threshold
            || inter > t * area_a as f64
            || inter > t * area_b as f64
    }

    /// Compute which candidates survive suppression.
    ///
    /// `mask[i]` is `true` if `candidates[i]` is kept.
    pub fn survivors(&self, candidates: &[Candidate]) -> Vec<bool> {
        let n = candidates.len();
        let mut alive = vec![true; n];

        for i in 0..n {
            if !alive[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !alive[j] {
                    continue;
                }
                let (a, b) = (&candidates[i], &candidates[j]);
                if !self.overlaps(&a.rect, &b.rect) {
                    continue;
                }
                if a.confidence < b.confidence {
                    debug!(kept = %b.word, removed = %a.word, "suppressed overlapping candidate");
                    alive[i] = false;
                    break;
                }
                debug!(kept = %a.word, removed = %b.word, "suppressed overlapping candidate");
                alive[j] = false;
            }
        }

        alive
    }

    /// Return the surviving candidates in their original relative order.
    pub fn suppress(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let alive = self.survivors(&candidates);
        candidates
            .into_iter()
            .zip(alive)
            .filter_map(|(c, keep)| keep.then_some(c))
            .collect()
    }
}

/// [`OverlapSuppressor::suppress`] with the default thresholds.
pub fn suppress(candidates: Vec<Candidate>) -> Vec<Candidate> {
    OverlapSuppressor::default().suppress(candidates)
}
