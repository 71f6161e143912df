use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::builder::GeneratorBuilder;
use super::generator::WordGenerator;
use crate::error::{GeneratorError, Result};

/// Serializable description of a generator: one main pattern and its
/// subpatterns keyed by shortcut letter.
///
/// Nothing is validated until `builder` or `compile` is called.
///
/// ```
/// use pattern_gen_core::model::definitions::PatternDefinitions;
///
/// let definitions = PatternDefinitions::new("CV(N)")
/// 	.with_subpattern('C', "p/t/k")
/// 	.with_subpattern('V', "a/i/u")
/// 	.with_subpattern('N', "m/n");
/// let generator = definitions.compile().unwrap();
/// assert!(!generator.generate().is_empty());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternDefinitions {
	/// Pattern sampled by the generator.
	pub main: String,

	/// Subpattern text by shortcut letter.
	#[serde(default)]
	pub subpatterns: BTreeMap<char, String>,
}

impl PatternDefinitions {
	pub fn new(main: &str) -> Self {
		Self {
			main: main.to_owned(),
			subpatterns: BTreeMap::new(),
		}
	}

	/// Adds or replaces a subpattern.
	pub fn with_subpattern(mut self, shortcut: char, pattern: &str) -> Self {
		self.subpatterns.insert(shortcut, pattern.to_owned());
		self
	}

	/// Registers every subpattern in a new builder.
	///
	/// # Errors
	/// Returns `InvalidShortcut` for a key outside `A..=Z`.
	pub fn builder(&self) -> Result<GeneratorBuilder> {
		let mut builder = GeneratorBuilder::new();
		for (&shortcut, pattern) in &self.subpatterns {
			builder.define_pattern(shortcut, pattern)?;
		}
		Ok(builder)
	}

	/// Compiles the definitions into a generator.
	pub fn compile(&self) -> Result<WordGenerator> {
		self.builder()?.compile(&self.main)
	}
}

impl TryFrom<&PatternDefinitions> for WordGenerator {
	type Error = GeneratorError;

	fn try_from(definitions: &PatternDefinitions) -> Result<Self> {
		definitions.compile()
	}
}

impl TryFrom<PatternDefinitions> for WordGenerator {
	type Error = GeneratorError;

	fn try_from(definitions: PatternDefinitions) -> Result<Self> {
		definitions.compile()
	}
}
