// sceneword-lexicon: reconcile words against a vocabulary.
//
// Reads words from the arguments, or from stdin (one per line), and prints
// each word with the vocabulary entry it maps to:
//
//   HELLC -> HELLO (distance 1)
//   HELLO (exact)
//   XYZPQ: discarded (best distance 5)

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sceneword_cli::LEXICON_ENV;
use sceneword_post::lexicon::{LexiconOptions, LexiconReconciler, Reconciliation};

#[derive(Parser, Debug)]
#[command(
    name = "sceneword-lexicon",
    version,
    about = "Match words to their nearest vocabulary entry"
)]
struct Cli {
    /// Words to reconcile; read from stdin when omitted
    words: Vec<String>,

    /// Vocabulary file: whitespace-separated words
    #[arg(short, long, env = LEXICON_ENV)]
    lexicon: PathBuf,

    /// Maximum edit-distance ratio for a correction
    #[arg(short = 'r', long, default_value_t = LexiconOptions::default().max_edit_distance_ratio)]
    max_edit_ratio: f64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn describe(word: &str, outcome: Reconciliation) -> String {
    match outcome {
        Reconciliation::Exact(w) | Reconciliation::Unchanged(w) => format!("{w} (exact)"),
        Reconciliation::Corrected { word: to, distance } => {
            format!("{word} -> {to} (distance {distance})")
        }
        Reconciliation::Discarded { best_distance: Some(d) } => {
            format!("{word}: discarded (best distance {d})")
        }
        Reconciliation::Discarded { best_distance: None } => format!("{word}: discarded"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    sceneword_cli::init_tracing(cli.verbose);

    let vocabulary = sceneword_cli::load_vocabulary(Some(cli.lexicon.as_path()))?;
    if vocabulary.is_empty() {
        bail!("vocabulary {} is empty", cli.lexicon.display());
    }
    let reconciler = LexiconReconciler::new(
        &vocabulary,
        LexiconOptions {
            max_edit_distance_ratio: cli.max_edit_ratio,
            ..LexiconOptions::default()
        },
    );

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut emit = |word: &str| -> Result<()> {
        writeln!(out, "{}", describe(word, reconciler.reconcile(word)))
            .context("failed to write output")
    };

    if cli.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            emit(word)?;
        }
    } else {
        for word in &cli.words {
            emit(word)?;
        }
    }

    out.flush().context("failed to write output")
}
