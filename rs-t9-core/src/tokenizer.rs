use serde::{Deserialize, Serialize};

/// A normalized unit of text (lower-cased word or punctuation mark).
pub type Token = String;

/// Token grammar used to cut raw text into tokens.
///
/// # Variants
/// - `WordsAndPunctuation`: maximal runs of word characters (letters, digits,
///   `_`), and every other non-space character as a token of its own.
/// - `LettersOnly`: maximal runs of alphabetic characters; digits, punctuation
///   and whitespace are dropped.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Grammar {
	#[default]
	WordsAndPunctuation,
	LettersOnly,
}

impl Grammar {
	/// Returns `true` if `c` may be part of a multi-character token.
	fn is_word_char(self, c: char) -> bool {
		match self {
			Grammar::WordsAndPunctuation => c.is_alphanumeric() || c == '_',
			Grammar::LettersOnly => c.is_alphabetic(),
		}
	}
}

/// Splits `text` into lower-cased tokens following `grammar`.
///
/// Tokens are returned in order of appearance. Whitespace never produces a
/// token, so `"hello "` and `"hello"` tokenize identically.
pub fn tokenize(text: &str, grammar: Grammar) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut current = String::new();

	for c in text.to_lowercase().chars() {
		if grammar.is_word_char(c) {
			current.push(c);
			continue;
		}

		if !current.is_empty() {
			tokens.push(std::mem::take(&mut current));
		}

		if grammar == Grammar::WordsAndPunctuation && !c.is_whitespace() {
			tokens.push(c.to_string());
		}
	}

	if !current.is_empty() {
		tokens.push(current);
	}

	tokens
}
