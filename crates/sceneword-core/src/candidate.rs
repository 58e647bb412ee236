// Recognized words, recognized lines, and emitted result records.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{ImageSize, Quad, Rect};

/// Border (in pixels) the recognizer adds around each grouped region before
/// running OCR on the crop.
pub const DEFAULT_CROP_PADDING: i32 = 15;

/// A single recognized word: where it is, what it says, and how sure the
/// recognizer was.
///
/// The confidence scale is whatever the recognizer uses (Tesseract reports
/// 0-100). Values are only comparable within one image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub rect: Rect,
    pub word: String,
    pub confidence: f32,
}

impl Candidate {
    pub fn new(rect: Rect, word: impl Into<String>, confidence: f32) -> Self {
        Self {
            rect,
            word: word.into(),
            confidence,
        }
    }

    /// Word length in characters (not bytes).
    pub fn word_len(&self) -> usize {
        self.word.chars().count()
    }
}

/// One OCR run over a grouped text region.
///
/// `text` is the raw recognizer output for the whole crop (may contain
/// newlines). Word rectangles in `words` are relative to the padded crop, so
/// they must be shifted by `region.top_left() - padding` to land in image
/// space; see [`RecognizedLine::words_in_image_space`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecognizedLine {
    pub region: Rect,
    #[cfg_attr(feature = "serde", serde(default = "default_padding"))]
    pub padding: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub words: Vec<Candidate>,
}

#[cfg(feature = "serde")]
fn default_padding() -> i32 {
    DEFAULT_CROP_PADDING
}

impl RecognizedLine {
    pub fn new(region: Rect, text: impl Into<String>, words: Vec<Candidate>) -> Self {
        Self {
            region,
            padding: DEFAULT_CROP_PADDING,
            text: text.into(),
            words,
        }
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Length of the raw text with every `'\n'` removed, in characters.
    pub fn text_len_without_newlines(&self) -> usize {
        self.text.chars().filter(|&c| c != '\n').count()
    }

    /// Consume the line, returning its words with rectangles moved from crop
    /// coordinates into image coordinates.
    pub fn words_in_image_space(self) -> Vec<Candidate> {
        let dx = self.region.x - self.padding;
        let dy = self.region.y - self.padding;
        self.words
            .into_iter()
            .map(|mut c| {
                c.rect = c.rect.translate(dx, dy);
                c
            })
            .collect()
    }
}

/// A final, emitted word box.
///
/// `Display` renders the ICDAR Robust Reading line format:
/// `x1,y1,x2,y2,x3,y3,x4,y4,word`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultRecord {
    pub quad: Quad,
    pub word: String,
}

impl ResultRecord {
    /// Build a record from a surviving candidate, clamping its box into the
    /// image.
    pub fn from_candidate(candidate: Candidate, size: ImageSize, margin: u32) -> Self {
        Self {
            quad: Quad::from_clamped_rect(&candidate.rect, size, margin),
            word: candidate.word,
        }
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.quad.coords() {
            write!(f, "{v},")?;
        }
        f.write_str(&self.word)
    }
}
