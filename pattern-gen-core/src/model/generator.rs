use std::fmt;

use rand::Rng;

use super::builder::GeneratorBuilder;
use super::token::{PatternToken, TokenRef};

/// Compiled pattern ready for sampling.
///
/// # Responsibilities
/// - Hold the root of an immutable token tree
/// - Sample any number of independent strings from it
///
/// The tree is never mutated after compilation, so a generator can be shared
/// across threads. `generate` draws from the thread-local RNG; the `_with`
/// variants take an explicit (possibly seeded) one.
#[derive(Clone, Debug)]
pub struct WordGenerator {
	root: TokenRef,
}

impl WordGenerator {
	/// Starts a new `GeneratorBuilder`.
	pub fn builder() -> GeneratorBuilder {
		GeneratorBuilder::new()
	}

	pub(crate) fn new(root: TokenRef) -> Self {
		Self { root }
	}

	/// Root token of the compiled pattern.
	pub fn root(&self) -> &PatternToken {
		&self.root
	}

	/// Samples one string using the thread-local RNG.
	pub fn generate(&self) -> String {
		self.generate_with(&mut rand::rng())
	}

	/// Samples one string using `rng`.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		self.root.evaluate(rng)
	}

	/// Endless iterator of samples drawn from `rng`.
	pub fn samples<'g, R: Rng + ?Sized>(&'g self, rng: &'g mut R) -> impl Iterator<Item = String> + 'g {
		std::iter::repeat_with(move || self.generate_with(rng))
	}
}

impl fmt::Display for WordGenerator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.root)
	}
}
