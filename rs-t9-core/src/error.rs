/// Errors raised while building or querying a suggestion engine.
///
/// "Nothing to suggest" is never an error: unknown prefixes and unseen
/// contexts produce empty results instead.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
	/// A parameter is outside its valid range (zero limits, order 0, empty vocabulary...).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// The training corpus contains something that is not a usable token.
	#[error("malformed corpus: {0}")]
	MalformedCorpus(String),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// The binary model blob could not be encoded or decoded.
	#[error("serialization error: {0}")]
	Serialization(#[from] postcard::Error),
}

impl SuggestError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		SuggestError::InvalidArgument(message.into())
	}
}

pub type Result<T> = std::result::Result<T, SuggestError>;
