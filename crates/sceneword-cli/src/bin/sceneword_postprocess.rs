// sceneword-postprocess: turn stored recognizer output into ICDAR result files.
//
// Each INPUT is a JSON file holding one image's recognizer output:
//
//   { "size": { "width": W, "height": H },
//     "lines": [ { "region": RECT, "padding": 15, "text": "...",
//                  "words": [ { "rect": RECT, "word": "...", "confidence": C } ] } ] }
//
// With a single input and no --output-dir the result lines go to stdout.
// Otherwise each input gets `<output-dir>/res_<stem>.txt`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use sceneword_cli::{JsonRecognizer, LEXICON_ENV};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "sceneword-postprocess",
    version,
    about = "Filter, deduplicate, and lexicon-correct scene-text recognition output"
)]
struct Cli {
    /// Recognizer output files (JSON, one image each)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Vocabulary file: whitespace-separated words
    #[arg(short, long, env = LEXICON_ENV)]
    lexicon: Option<PathBuf>,

    /// Pipeline options as JSON; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for res_<stem>.txt result files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Override the minimum word confidence
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Override the IoU threshold for overlap suppression
    #[arg(long)]
    iou_threshold: Option<f64>,

    /// Override the maximum edit-distance ratio for lexicon correction
    #[arg(long)]
    max_edit_ratio: Option<f64>,

    /// Worker threads for batch processing (default: all cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    sceneword_cli::init_tracing(cli.verbose);

    if cli.inputs.len() > 1 && cli.output_dir.is_none() {
        bail!("--output-dir is required when processing more than one input");
    }

    if let Some(jobs) = cli.jobs.filter(|&n| n > 0) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let mut options = sceneword_cli::load_options(cli.config.as_deref())?;
    if let Some(v) = cli.min_confidence {
        options.filter.min_confidence = v;
    }
    if let Some(v) = cli.iou_threshold {
        options.suppression.iou_threshold = v;
    }
    if let Some(v) = cli.max_edit_ratio {
        options.lexicon.max_edit_distance_ratio = v;
    }

    let pipeline = sceneword_cli::build_pipeline(options, cli.lexicon.as_deref())?;
    if !pipeline.vocabulary().is_empty() {
        info!(words = pipeline.vocabulary().len(), "using vocabulary");
    }

    let inputs: Vec<&Path> = cli.inputs.iter().map(PathBuf::as_path).collect();
    let results = pipeline.run_batch(&JsonRecognizer, &inputs);

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let stdout = io::stdout();
    let mut failures = 0usize;
    for (input, result) in inputs.iter().zip(results) {
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                error!(input = %input.display(), "{e}");
                failures += 1;
                continue;
            }
        };
        match &cli.output_dir {
            Some(dir) => {
                let path = sceneword_cli::write_result_file(dir, input, &records)?;
                info!(input = %input.display(), output = %path.display(), records = records.len(), "wrote results");
            }
            None => {
                let mut out = io::BufWriter::new(stdout.lock());
                sceneword_cli::write_records(&mut out, &records)
                    .and_then(|()| out.flush())
                    .context("failed to write results")?;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} inputs failed", inputs.len());
    }
    Ok(())
}
