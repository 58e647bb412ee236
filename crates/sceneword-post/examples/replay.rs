// Replay stored recognizer output through the pipeline and print ICDAR lines.
//
// Usage:
//   cargo run -p sceneword-post --example replay -- tests/data/storefront.json [VOCABULARY]
use sceneword_core::{ImageSize, RecognizedLine};
use sceneword_post::Pipeline;
use serde::Deserialize;

#[derive(Deserialize)]
struct Recorded {
    size: ImageSize,
    lines: Vec<RecognizedLine>,
}

fn main() {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "tests/data/storefront.json".to_string());

    let contents = std::fs::read_to_string(&input).expect("Failed to read input");
    let recorded: Recorded = serde_json::from_str(&contents).expect("Failed to parse input");

    let mut pipeline = Pipeline::default();
    if let Some(vocabulary) = args.next() {
        pipeline = pipeline
            .with_vocabulary_file(&vocabulary)
            .expect("Failed to load vocabulary");
        println!("Loaded {} vocabulary words\n", pipeline.vocabulary().len());
    }

    for record in pipeline.process_lines(recorded.size, recorded.lines) {
        println!("{record}");
    }
}
