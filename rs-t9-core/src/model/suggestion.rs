use crate::tokenizer::Token;

/// Ranked suggestions for one keystroke.
///
/// - `words`: completions of the last typed token, best first
/// - `texts`: continuations, each starting with the completed last token, best first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
	pub words: Vec<Token>,
	pub texts: Vec<Vec<Token>>,
}

impl Suggestions {
	/// Returns `true` when there is nothing to show.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty() && self.texts.is_empty()
	}
}

/// Sorts candidates by score and keeps the `limit` best.
///
/// Ordering: score descending, then token ascending, so equal scores
/// always come out in the same order whatever the map iteration order was.
pub(crate) fn rank(words: Vec<Token>, scores: Vec<f64>, limit: usize) -> Vec<(Token, f64)> {
	let mut ranked: Vec<(Token, f64)> = words.into_iter().zip(scores).collect();
	ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	ranked.truncate(limit);
	ranked
}
