use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised while registering, compiling, or building patterns.
///
/// Generation itself never fails: once a `WordGenerator` exists, every
/// call to `generate` returns a string.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
	/// A character outside `A..=Z` was used where a shortcut letter is required.
	#[error("invalid shortcut '{0}': shortcut letters must be between A and Z")]
	InvalidShortcut(char),

	/// A shortcut was referenced before it was compiled.
	///
	/// Complex subpatterns only see primitive ones, so a complex-to-complex
	/// reference always ends up here, whatever the definition order.
	#[error(
		"subpattern {shortcut} referenced from {referenced_from} has not been loaded yet \
		 (complex subpatterns cannot reference other complex subpatterns)"
	)]
	UnresolvedShortcut {
		shortcut: char,
		referenced_from: String,
	},

	/// A weight that is zero, negative or not a number reached a `WeightedSet`.
	#[error("invalid weight {0}: weights must be strictly positive")]
	InvalidWeight(f64),

	/// Unbalanced brackets or quotes.
	#[error("malformed group at offset {position} in \"{pattern}\": {reason}")]
	MalformedGroup {
		pattern: String,
		position: usize,
		reason: MalformedReason,
	},
}

/// Detail of a `GeneratorError::MalformedGroup`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
	#[error("group opened with '{0}' is never closed")]
	UnterminatedGroup(char),

	#[error("quoted literal is never closed")]
	UnterminatedQuote,

	#[error("unexpected '{0}' without a matching opener")]
	UnexpectedCloser(char),

	#[error("expected '{expected}' but found '{found}'")]
	MismatchedCloser { expected: char, found: char },

	#[error("groups nested deeper than {0} levels")]
	TooDeep(usize),
}
