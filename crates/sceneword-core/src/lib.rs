//! Shared types for scene-text candidate post-processing.
//!
//! This crate holds the plain data that flows between the external
//! detector/recognizer and the post-processing stages in `sceneword-post`:
//!
//! - [`geometry`] -- Axis-aligned rectangles, points, quadrilaterals, image sizes
//! - [`candidate`] -- Recognized words, recognized lines, emitted result records
//! - [`case`] -- Character-preserving upper-casing and glyph classification
//!
//! With the `serde` feature every data type derives `Serialize` and
//! `Deserialize`, which is how the command-line front end reads collaborator
//! output from JSON.

pub mod candidate;
pub mod case;
pub mod geometry;

pub use candidate::{Candidate, RecognizedLine, ResultRecord};
pub use geometry::{ImageSize, Point, Quad, Rect};
