//! End-to-end tests of the suggestion engine: building from raw text,
//! corpus files with binary caching, and shared read-only use.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use rs_t9_core::model::ngram_model::NGramModel;
use rs_t9_core::model::word_completor::WordCompletor;
use rs_t9_core::{EngineConfig, Grammar, SuggestError, SuggestionEngine, SuggestionInput, Token, tokenize};

const CORPUS: &[&str] = &[
	"Thank you for your email, I will reply tomorrow.",
	"Thank you for the report.",
	"Thank you so much for your help!",
	"Please send me the report before the meeting.",
	"I will send the report tomorrow morning.",
	"The meeting is moved to tomorrow.",
];

fn tokens(words: &[&str]) -> Vec<Token> {
	words.iter().map(|w| w.to_string()).collect()
}

fn corpus_engine(order: usize) -> SuggestionEngine {
	SuggestionEngine::from_documents(CORPUS, EngineConfig::new(order).unwrap()).unwrap()
}

#[test]
fn next_word_example() {
	let corpus = vec![vec!["i", "am", "happy"], vec!["i", "am", "sad"]];
	let model = NGramModel::from_corpus(&corpus, 1).unwrap();
	let (words, scores) = model.next_words(&tokens(&["i"]));
	assert_eq!(words, vec!["am"]);
	assert_eq!(scores, vec![1.0]);
}

#[test]
fn completion_example() {
	let corpus = vec![
		vec!["hello"; 3],
		vec!["help"; 2],
		vec!["world"; 5],
	];
	let engine = SuggestionEngine::build(&corpus, EngineConfig::new(1).unwrap()).unwrap();

	let (words, scores) = engine.complete("hel");
	let found: HashSet<(String, u64)> = words
		.into_iter()
		.zip(scores)
		.map(|(w, s)| (w, (s * 10.0).round() as u64))
		.collect();
	let expected: HashSet<(String, u64)> = [("hello".to_owned(), 3), ("help".to_owned(), 2)].into_iter().collect();
	assert_eq!(found, expected);

	assert_eq!(engine.suggest_word(&tokens(&["hel"]), 1).unwrap(), vec!["hello"]);

	let (words, scores) = engine.complete("xyz");
	assert!(words.is_empty() && scores.is_empty());
}

#[test]
fn empty_input_policy() {
	assert!(tokenize("", Grammar::WordsAndPunctuation).is_empty());
	let engine = corpus_engine(1);
	assert!(engine.suggest_word(&[], 3).unwrap().is_empty());
	assert!(engine.suggest_text(&[], 3, 3).unwrap().is_empty());
}

#[test]
fn suggestions_respect_limits_and_order() {
	let engine = corpus_engine(1);
	for prefix in ["t", "th", "r", "m", "s", "y"] {
		for limit in 1..4 {
			let words = engine.suggest_word(&tokens(&[prefix]), limit).unwrap();
			assert!(words.len() <= limit);

			let (all, scores) = engine.complete(prefix);
			let score_of = |w: &Token| scores[all.iter().position(|x| x == w).unwrap()];
			assert!(words.windows(2).all(|pair| score_of(&pair[0]) >= score_of(&pair[1])));
		}
	}

	for context in [tokens(&["thank"]), tokens(&["the"]), tokens(&["will", "send"])] {
		let branches = engine.suggest_text(&context, 2, 2).unwrap();
		assert!(branches.len() <= 2);
		assert!(branches.iter().all(|b| !b.is_empty() && b.len() <= 2));
	}
}

#[test]
fn every_observed_context_sums_to_one() {
	let corpus: Vec<Vec<Token>> = CORPUS.iter().map(|d| tokenize(d, Grammar::WordsAndPunctuation)).collect();
	let model = NGramModel::from_corpus(&corpus, 2).unwrap();
	for document in &corpus {
		for window in document.windows(3) {
			let (_, scores) = model.next_words(&window[..2]);
			assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-9, "{window:?}");
		}
	}
	let (words, scores) = model.next_words(&tokens(&["never", "seen"]));
	assert!(words.is_empty() && scores.is_empty());
}

#[test]
fn build_is_idempotent_and_order_free() {
	let forward: Vec<Vec<Token>> = CORPUS.iter().map(|d| tokenize(d, Grammar::LettersOnly)).collect();
	let mut backward = forward.clone();
	backward.reverse();

	let a = NGramModel::from_corpus(&forward, 2).unwrap();
	let b = NGramModel::from_corpus(&forward, 2).unwrap();
	let c = NGramModel::from_corpus(&backward, 2).unwrap();
	assert_eq!(a, b);
	assert_eq!(a, c);

	let x = WordCompletor::new(&forward, None).unwrap();
	let y = WordCompletor::new(&backward, None).unwrap();
	assert_eq!(x.vocabulary(), y.vocabulary());
}

#[test]
fn retained_vocabulary_is_the_completion_set() {
	let config = EngineConfig::new(1).unwrap().with_min_frequency(Some(1));
	let engine = SuggestionEngine::from_documents(CORPUS, config).unwrap();
	let vocabulary = engine.word_completor().vocabulary();

	let (words, _) = engine.complete("");
	let indexed: HashSet<&str> = words.iter().map(String::as_str).collect();
	let counted: HashSet<&str> = vocabulary.tokens().collect();
	assert_eq!(indexed, counted);
	assert!(indexed.iter().all(|w| vocabulary.count(w) > 1));
	assert!(indexed.contains("thank"));
	assert!(!indexed.contains("email"));
}

#[test]
fn trailing_space_completes_the_last_word() {
	let engine = corpus_engine(1);
	let input = SuggestionInput::default();
	assert_eq!(engine.suggest("thank you ", &input).unwrap(), engine.suggest("thank you", &input).unwrap());

	let suggestions = engine.suggest("send the rep", &input).unwrap();
	// report: 3 occurrences, reply: 1
	assert_eq!(suggestions.words, vec!["report", "reply"]);
	assert_eq!(suggestions.texts.len(), 1);
	assert_eq!(suggestions.texts[0][0], "report");
}

#[test]
fn invalid_configuration_fails_before_serving() {
	assert!(matches!(EngineConfig::new(0), Err(SuggestError::InvalidArgument(_))));
	let blank: &[&str] = &["", "  ", "..."];
	let letters = EngineConfig::default().with_grammar(Grammar::LettersOnly);
	assert!(matches!(SuggestionEngine::from_documents(blank, letters), Err(SuggestError::InvalidArgument(_))));
}

#[test]
fn corpus_file_matches_in_memory_build_and_is_cached() {
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("mails.txt");
	fs::write(&corpus_path, CORPUS.join("\n")).unwrap();
	let config = EngineConfig::new(2).unwrap();

	let from_file = SuggestionEngine::new(&corpus_path, config).unwrap();
	let in_memory = SuggestionEngine::from_documents(CORPUS, config).unwrap();
	assert_eq!(from_file.ngram_model(), in_memory.ngram_model());
	assert_eq!(from_file.word_completor().vocabulary(), in_memory.word_completor().vocabulary());

	let binary_path = dir.path().join("mails.bin");
	assert!(binary_path.exists());

	// The cached blob is used as long as the corpus file is not consulted
	fs::write(&corpus_path, "").unwrap();
	let cached = SuggestionEngine::new(&corpus_path, config).unwrap();
	assert_eq!(cached.ngram_model(), in_memory.ngram_model());

	// Another configuration rebuilds from the (now empty) corpus
	let other = EngineConfig::new(3).unwrap();
	assert!(matches!(SuggestionEngine::new(&corpus_path, other), Err(SuggestError::InvalidArgument(_))));
}

#[test]
fn corrupt_cached_blob_is_rebuilt() {
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("mails.txt");
	let binary_path = dir.path().join("mails.bin");
	fs::write(&corpus_path, CORPUS.join("\n")).unwrap();
	fs::write(&binary_path, b"\xff\xff\xff\xff not an engine").unwrap();
	let config = EngineConfig::new(2).unwrap();

	let rebuilt = SuggestionEngine::new(&corpus_path, config).unwrap();
	let in_memory = SuggestionEngine::from_documents(CORPUS, config).unwrap();
	assert_eq!(rebuilt.ngram_model(), in_memory.ngram_model());
	assert_eq!(rebuilt.word_completor().vocabulary(), in_memory.word_completor().vocabulary());

	// The blob was replaced by a decodable one and no temporary file is left
	assert!(SuggestionEngine::from_bytes(&fs::read(&binary_path).unwrap()).is_ok());
	assert!(!dir.path().join("mails.bin.tmp").exists());
}

#[test]
fn very_long_token_round_trips_through_cache() {
	let long_token = "a".repeat(100_000);
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("long.txt");
	let corpus = format!("hello {long_token} world\nhello there world\n");
	fs::write(&corpus_path, corpus).unwrap();
	let config = EngineConfig::new(1).unwrap();

	let built = SuggestionEngine::new(&corpus_path, config).unwrap();
	assert!(dir.path().join("long.bin").exists());
	let loaded = SuggestionEngine::new(&corpus_path, config).unwrap();

	for engine in [&built, &loaded] {
		let (words, _) = engine.complete("aaa");
		assert_eq!(words, vec![long_token.clone()]);
	}
	assert_eq!(built.ngram_model(), loaded.ngram_model());

	drop(built);
	drop(loaded);
}

#[test]
fn missing_corpus_file_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let result = SuggestionEngine::new(dir.path().join("absent.txt"), EngineConfig::default());
	assert!(matches!(result, Err(SuggestError::Io(_))));
}

#[test]
fn engine_is_shared_read_only_across_threads() {
	let engine = Arc::new(corpus_engine(1));
	let expected_words = engine.suggest_word(&tokens(&["t"]), 3).unwrap();
	let expected_texts = engine.suggest_text(&tokens(&["thank"]), 3, 2).unwrap();

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let engine = Arc::clone(&engine);
			thread::spawn(move || {
				let mut results = Vec::new();
				for _ in 0..50 {
					results.push((
						engine.suggest_word(&tokens(&["t"]), 3).unwrap(),
						engine.suggest_text(&tokens(&["thank"]), 3, 2).unwrap(),
					));
				}
				results
			})
		})
		.collect();

	for handle in handles {
		for (words, texts) in handle.join().unwrap() {
			assert_eq!(words, expected_words);
			assert_eq!(texts, expected_texts);
		}
	}
}
