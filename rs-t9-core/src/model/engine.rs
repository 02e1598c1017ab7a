use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::ngram_model::NGramModel;
use super::suggestion::{rank, Suggestions};
use super::suggestion_input::{positive, SuggestionInput};
use super::vocabulary::Vocabulary;
use super::word_completor::WordCompletor;
use crate::error::{Result, SuggestError};
use crate::io::{build_output_path, read_file};
use crate::tokenizer::{tokenize, Token};

/// Predicts how typed text continues.
///
/// This struct combines:
/// - `word_completor`: completes the last, partially typed token.
/// - `ngram_model`: proposes the tokens that follow the typed text.
/// - `config`: the configuration the engine was built with.
///
/// An engine is immutable once built: every query takes `&self`, so a
/// single instance can be shared between threads without locking.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SuggestionEngine {
	config: EngineConfig,
	word_completor: WordCompletor,
	ngram_model: NGramModel,
}

impl SuggestionEngine {
	/// Loads an engine for a corpus file.
	///
	/// - `filepath` is the corpus, one document per line.
	/// - If `<stem>.bin` exists next to it, decodes, and was built with the
	///   same configuration, it is loaded instead of rebuilding.
	/// - Otherwise the engine is built with `read_corpus_file` and the
	///   binary is (re)written for future fast loading. The blob is written
	///   to a temporary file first and renamed into place, so an interrupted
	///   write never leaves a truncated `.bin` behind.
	pub fn new<P: AsRef<Path>>(filepath: P, config: EngineConfig) -> Result<Self> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		if binary_data_path.exists() {
			let bytes = std::fs::read(&binary_data_path)?;
			match Self::from_bytes(&bytes) {
				Ok(engine) if engine.config == config => {
					debug!("Loaded cached engine from {}", binary_data_path.display());
					return Ok(engine);
				}
				Ok(engine) => warn!(
					"Cached engine {} was built with {:?}, rebuilding with {:?}",
					binary_data_path.display(),
					engine.config,
					config
				),
				Err(e) => warn!(
					"Cached engine {} cannot be decoded ({e}), rebuilding",
					binary_data_path.display()
				),
			}
		}

		let engine = Self::read_corpus_file(&filepath, config)?;
		let temporary_path = build_output_path(&filepath, "bin.tmp")?;
		std::fs::write(&temporary_path, engine.to_bytes()?)?;
		std::fs::rename(&temporary_path, &binary_data_path)?;
		info!("Saved engine to {}", binary_data_path.display());
		Ok(engine)
	}

	/// Builds an engine from a tokenized corpus.
	///
	/// # Errors
	/// - `MalformedCorpus` if a document contains an empty token
	/// - `InvalidArgument` if the retained vocabulary is empty
	pub fn build<D, T>(corpus: &[D], config: EngineConfig) -> Result<Self>
	where
		D: AsRef<[T]>,
		T: AsRef<str>,
	{
		let vocabulary = Vocabulary::from_corpus(corpus)?;
		let ngram_model = NGramModel::from_corpus(corpus, config.order())?;
		Self::assemble(vocabulary, ngram_model, config)
	}

	/// Tokenizes raw documents with the configured grammar, then builds.
	pub fn from_documents<S: AsRef<str>>(documents: &[S], config: EngineConfig) -> Result<Self> {
		let corpus: Vec<Vec<Token>> = documents
			.iter()
			.map(|document| tokenize(document.as_ref(), config.grammar))
			.collect();
		Self::build(&corpus, config)
	}

	/// Reads a corpus file, counts chunks of lines in parallel, merges the
	/// partial counts and assembles the engine.
	///
	/// # Behavior
	/// - Splits input lines into chunks (based on CPU cores * factor).
	/// - Spawns threads to count each chunk.
	/// - Merges all partial counts; counting is commutative, so the result is
	///   the same as `from_documents` over the same lines.
	fn read_corpus_file<P: AsRef<Path>>(filename: P, config: EngineConfig) -> Result<Self> {
		let lines = read_file(&filename)?;
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);
		info!("Building engine from {} documents in chunks of {}", lines.len(), chunk_size);

		let (tx, rx) = mpsc::channel();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let partial = count_documents(&chunk, config);
				// The receiver lives until every sender is dropped
				let _ = tx.send(partial);
			});
		}
		drop(tx);

		let mut vocabulary = Vocabulary::default();
		let mut ngram_model = NGramModel::new(config.order())?;
		for partial in rx.iter() {
			let (partial_vocabulary, partial_model) = partial?;
			vocabulary.merge(&partial_vocabulary);
			ngram_model.merge(&partial_model)?;
		}

		Self::assemble(vocabulary, ngram_model, config)
	}

	fn assemble(vocabulary: Vocabulary, ngram_model: NGramModel, config: EngineConfig) -> Result<Self> {
		let word_completor = WordCompletor::from_vocabulary(vocabulary, config.min_frequency)?;
		info!(
			"Engine built: {} tokens, {} indexed words, {} contexts of order {}",
			word_completor.vocabulary().total(),
			word_completor.vocabulary().len(),
			ngram_model.context_count(),
			ngram_model.order()
		);
		Ok(Self { config, word_completor, ngram_model })
	}

	/// Serializes the engine into an opaque binary blob.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Restores an engine serialized with `to_bytes`.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn word_completor(&self) -> &WordCompletor {
		&self.word_completor
	}

	pub fn ngram_model(&self) -> &NGramModel {
		&self.ngram_model
	}

	/// Tokenizes `text` with the grammar the engine was built with.
	pub fn tokenize(&self, text: &str) -> Vec<Token> {
		tokenize(text, self.config.grammar)
	}

	/// See `WordCompletor::complete`.
	pub fn complete(&self, prefix: &str) -> (Vec<Token>, Vec<f64>) {
		self.word_completor.complete(prefix)
	}

	/// See `NGramModel::next_words`.
	pub fn next_words(&self, context: &[Token]) -> (Vec<Token>, Vec<f64>) {
		self.ngram_model.next_words(context)
	}

	/// Returns at most `max_results` completions of the last token, best first.
	///
	/// An empty token sequence has nothing to complete and yields an empty list.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `max_results` is 0 or the last token is empty.
	pub fn suggest_word(&self, tokens: &[Token], max_results: usize) -> Result<Vec<Token>> {
		positive("max_results", max_results)?;
		let Some(prefix) = tokens.last() else {
			return Ok(Vec::new());
		};
		if prefix.is_empty() {
			return Err(SuggestError::invalid("cannot complete an empty token"));
		}

		let (words, scores) = self.word_completor.complete(prefix);
		Ok(rank(words, scores, max_results).into_iter().map(|(word, _)| word).collect())
	}

	/// Returns at most `max_results` continuations of `tokens`, best first.
	///
	/// The best next tokens are ranked; each one starts a branch that is then
	/// extended greedily with the single most frequent follower, until the
	/// branch holds `words_per_suggestion` tokens or the model has nothing to
	/// add. Branches may therefore be shorter than `words_per_suggestion`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if a limit is 0 or a token is empty.
	pub fn suggest_text(
		&self,
		tokens: &[Token],
		words_per_suggestion: usize,
		max_results: usize,
	) -> Result<Vec<Vec<Token>>> {
		positive("words_per_suggestion", words_per_suggestion)?;
		positive("max_results", max_results)?;
		if tokens.iter().any(String::is_empty) {
			return Err(SuggestError::invalid("context contains an empty token"));
		}

		let (words, scores) = self.ngram_model.next_words(tokens);
		let candidates = rank(words, scores, max_results);

		let mut branches = Vec::with_capacity(candidates.len());
		for (candidate, _) in candidates {
			let mut text = tokens.to_vec();
			text.push(candidate.clone());
			let mut branch = vec![candidate];

			while branch.len() < words_per_suggestion {
				let (words, scores) = self.ngram_model.next_words(&text);
				match rank(words, scores, 1).pop() {
					Some((next, _)) => {
						text.push(next.clone());
						branch.push(next);
					}
					None => break,
				}
			}
			branches.push(branch);
		}

		debug!("{} continuations for {} context tokens", branches.len(), tokens.len());
		Ok(branches)
	}

	/// Computes everything an input field shows for the typed `text`.
	///
	/// - `words`: completions of the last token (`suggest_word`).
	/// - `texts`: the last token is replaced by its best completion (kept as
	///   typed if there is none), then continued with `suggest_text`; every
	///   text starts with that completed token. Empty when the model knows no
	///   continuation.
	///
	/// Text without any token yields empty suggestions.
	pub fn suggest(&self, text: &str, input: &SuggestionInput) -> Result<Suggestions> {
		let mut tokens = self.tokenize(text);
		if tokens.is_empty() {
			return Ok(Suggestions::default());
		}

		let words = self.suggest_word(&tokens, input.max_words())?;
		if let (Some(best), Some(last)) = (words.first(), tokens.last_mut()) {
			*last = best.clone();
		}
		let completed = tokens.last().cloned().unwrap_or_default();

		let texts = self
			.suggest_text(&tokens, input.words_per_text(), input.max_texts())?
			.into_iter()
			.map(|continuation| {
				let mut text = Vec::with_capacity(continuation.len() + 1);
				text.push(completed.clone());
				text.extend(continuation);
				text
			})
			.collect();

		Ok(Suggestions { words, texts })
	}
}

/// Counts the tokens and n-grams of a chunk of raw documents.
fn count_documents(documents: &[String], config: EngineConfig) -> Result<(Vocabulary, NGramModel)> {
	let mut vocabulary = Vocabulary::default();
	let mut ngram_model = NGramModel::new(config.order())?;
	for document in documents {
		let tokens = tokenize(document, config.grammar);
		vocabulary.add_document(&tokens)?;
		ngram_model.add_document(&tokens)?;
	}
	Ok((vocabulary, ngram_model))
}
