// Boundary to the external text detector/recognizer.
//
// Region extraction, grouping, and OCR happen outside this crate. A
// `Recognizer` turns an image (whatever the implementor takes as one) into
// recognized lines; the pipeline only consumes the result.

use sceneword_core::{ImageSize, RecognizedLine};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything the recognizer reports for one image.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecognizedImage {
    pub size: ImageSize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lines: Vec<RecognizedLine>,
}

impl RecognizedImage {
    pub fn new(size: ImageSize, lines: Vec<RecognizedLine>) -> Self {
        Self { size, lines }
    }
}

/// A text detector + recognizer.
pub trait Recognizer {
    /// The input the recognizer works on (a decoded raster, a file path, ...).
    type Image: ?Sized;
    /// Failure reported for unreadable or malformed input.
    type Error: std::fmt::Display;

    fn recognize(&self, image: &Self::Image) -> Result<RecognizedImage, Self::Error>;
}

/// A recognizer whose output was computed ahead of time.
///
/// Useful for replaying stored detector output and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Precomputed;

impl Recognizer for Precomputed {
    type Image = RecognizedImage;
    type Error = std::convert::Infallible;

    fn recognize(&self, image: &RecognizedImage) -> Result<RecognizedImage, Self::Error> {
        Ok(image.clone())
    }
}
