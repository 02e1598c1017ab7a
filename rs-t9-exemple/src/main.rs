use std::io::{self, BufRead, Write};

use log::info;
use rs_t9_core::{EngineConfig, Grammar, SuggestionEngine, SuggestionInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows how the engine is built or loaded
    env_logger::init();

    // Two context words per prediction, words and punctuation kept as tokens,
    // and words seen only once are never proposed as completions
    let config = EngineConfig::new(2)?
        .with_grammar(Grammar::WordsAndPunctuation)
        .with_min_frequency(Some(1));

    // Build from the corpus (one document per line)
    // Load automatically data/corpus.bin if existing
    let engine = SuggestionEngine::new("./data/corpus.txt", config)?;

    // Three completions and two continuations of four words each
    let mut input = SuggestionInput::default();
    input.set_max_words(3)?;
    input.set_max_texts(2)?;
    input.set_words_per_text(4)?;

    // Zero limits are rejected
    match input.set_max_words(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    info!("Type some text, one request per line (Ctrl-D to quit)");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let suggestions = engine.suggest(&line, &input)?;
        if suggestions.is_empty() {
            writeln!(stdout, "  (no suggestions)")?;
            continue;
        }
        writeln!(stdout, "  words: {}", suggestions.words.join(" | "))?;
        for text in &suggestions.texts {
            writeln!(stdout, "  text:  {}", text.join(" "))?;
        }
    }

    Ok(())
}
