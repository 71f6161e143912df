use std::fmt;
use std::sync::Arc;

use rand::Rng;

use super::weighted_set::WeightedSet;

/// Shared handle on a compiled token.
///
/// Subpattern tokens are referenced from every place their shortcut appears,
/// and literals are interned, so nodes are shared rather than copied.
pub type TokenRef = Arc<PatternToken>;

/// A node of a compiled pattern.
///
/// The tree is immutable once built and acyclic: shortcut resolution only
/// ever points at tokens compiled earlier.
///
/// Optional groups have no variant of their own. They compile to an
/// alternation holding an extra empty literal.
#[derive(Debug)]
pub enum PatternToken {
	/// Fixed text.
	Literal(String),
	/// Concatenation of every child, in order.
	Sequence(Vec<TokenRef>),
	/// One child, chosen with equal probability.
	UniformAlternation(Vec<TokenRef>),
	/// One child, chosen according to its weight.
	WeightedAlternation(WeightedSet<TokenRef>),
}

impl PatternToken {
	/// Samples this token into a new string.
	pub fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		let mut output = String::new();
		self.evaluate_into(rng, &mut output);
		output
	}

	/// Samples this token, appending the result to `output`.
	pub fn evaluate_into<R: Rng + ?Sized>(&self, rng: &mut R, output: &mut String) {
		match self {
			PatternToken::Literal(text) => output.push_str(text),
			PatternToken::Sequence(items) => {
				for item in items {
					item.evaluate_into(rng, output);
				}
			}
			PatternToken::UniformAlternation(choices) => {
				if choices.is_empty() {
					return;
				}
				let index = rng.random_range(0..choices.len());
				choices[index].evaluate_into(rng, output);
			}
			PatternToken::WeightedAlternation(choices) => {
				if let Some(choice) = choices.next(rng) {
					choice.evaluate_into(rng, output);
				}
			}
		}
	}

	/// Returns the text of a literal token.
	pub fn as_literal(&self) -> Option<&str> {
		match self {
			PatternToken::Literal(text) => Some(text),
			_ => None,
		}
	}
}

impl fmt::Display for PatternToken {
	/// Canonical, grammar-like rendering meant for debugging.
	///
	/// Literals are quoted, sequences joined with ` + `, alternations
	/// bracketed with `/` separators and weights shown as `*N`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PatternToken::Literal(text) => write!(f, "\"{}\"", text),
			PatternToken::Sequence(items) => {
				for (index, item) in items.iter().enumerate() {
					if index > 0 {
						f.write_str(" + ")?;
					}
					write!(f, "{}", item)?;
				}
				Ok(())
			}
			PatternToken::UniformAlternation(choices) => {
				f.write_str("[")?;
				for (index, choice) in choices.iter().enumerate() {
					if index > 0 {
						f.write_str("/")?;
					}
					write!(f, "{}", choice)?;
				}
				f.write_str("]")
			}
			PatternToken::WeightedAlternation(choices) => write!(f, "{}", choices),
		}
	}
}
