// sceneword-cli: shared utilities for CLI tools.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sceneword_core::ResultRecord;
use sceneword_post::lexicon::Vocabulary;
use sceneword_post::{Pipeline, PipelineOptions, RecognizedImage, Recognizer};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a default vocabulary file.
pub const LEXICON_ENV: &str = "SCENEWORD_LEXICON";

/// Prefix of per-image result files expected by the ICDAR scorer.
const RESULT_PREFIX: &str = "res_";

/// Reads recognizer output stored as JSON (one [`RecognizedImage`] per file).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecognizer;

impl Recognizer for JsonRecognizer {
    type Image = Path;
    type Error = anyhow::Error;

    fn recognize(&self, path: &Path) -> Result<RecognizedImage> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let image: RecognizedImage = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        debug!(path = %path.display(), lines = image.lines.len(), "loaded recognizer output");
        Ok(image)
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level
/// (0 = warn, 1 = info, 2+ = debug).
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load pipeline options from a JSON file, or the defaults when `path` is
/// `None`. Missing fields keep their default values.
pub fn load_options(path: Option<&Path>) -> Result<PipelineOptions> {
    let Some(path) = path else {
        return Ok(PipelineOptions::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Load a vocabulary file, or an empty vocabulary when `path` is `None`.
pub fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    match path {
        Some(path) => Vocabulary::load(path).context("failed to load lexicon"),
        None => Ok(Vocabulary::new()),
    }
}

/// Build a pipeline from options and an optional vocabulary file.
pub fn build_pipeline(options: PipelineOptions, lexicon: Option<&Path>) -> Result<Pipeline> {
    let vocabulary = load_vocabulary(lexicon)?;
    Ok(Pipeline::new(options).with_vocabulary(vocabulary))
}

/// Result file name for an input: `res_<stem>.txt`.
///
/// Inputs named after their image (`img_12.json`, `img_12.jpg.json`) map to
/// `res_img_12.txt`.
pub fn result_file_name(input: &Path) -> PathBuf {
    let mut stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    // Strip a leftover image extension from `name.jpg.json`.
    if let Some(base_len) = stem
        .rsplit_once('.')
        .filter(|(_, ext)| is_image_extension(ext))
        .map(|(base, _)| base.len())
    {
        stem.truncate(base_len);
    }
    PathBuf::from(format!("{RESULT_PREFIX}{stem}.txt"))
}

fn is_image_extension(ext: &str) -> bool {
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "jpg" | "jpeg" | "png" | "bmp" | "gif" | "tif" | "tiff"
    )
}

/// Write records one per line.
pub fn write_records<W: Write>(out: &mut W, records: &[ResultRecord]) -> io::Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

/// Write records to `dir/res_<stem>.txt`, returning the path written.
pub fn write_result_file(dir: &Path, input: &Path, records: &[ResultRecord]) -> Result<PathBuf> {
    let path = dir.join(result_file_name(input));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = io::BufWriter::new(file);
    write_records(&mut out, records)
        .and_then(|()| out.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
