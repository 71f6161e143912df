use std::collections::BTreeMap;

use tracing::debug;

use super::compiler::{is_shortcut, references_shortcuts, LiteralInterner, PatternCompiler, Scope};
use super::generator::WordGenerator;
use crate::error::{GeneratorError, Result};

/// Collects subpattern definitions and compiles them into a `WordGenerator`.
///
/// Subpatterns are named by a single letter `A..=Z`. Each definition is
/// classified when it is registered:
/// - *primitive*: references no shortcut (outside quoted literals)
/// - *complex*: references at least one shortcut
///
/// # Compilation order
/// 1. Every primitive subpattern (order among them is irrelevant)
/// 2. Every complex subpattern, which may only reference primitives
/// 3. The main pattern, which may reference any subpattern
///
/// The first error aborts compilation; no generator is produced.
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
	primitive: BTreeMap<char, String>,
	complex: BTreeMap<char, String>,
}

impl GeneratorBuilder {
	/// Creates a builder without any subpattern.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers (or replaces) the subpattern named `shortcut`.
	///
	/// # Errors
	/// Returns `InvalidShortcut` if `shortcut` is not an uppercase ASCII letter.
	pub fn define_pattern(&mut self, shortcut: char, pattern: &str) -> Result<&mut Self> {
		if !is_shortcut(shortcut) {
			return Err(GeneratorError::InvalidShortcut(shortcut));
		}

		// A redefinition may move the letter from one partition to the other
		self.primitive.remove(&shortcut);
		self.complex.remove(&shortcut);

		if references_shortcuts(pattern) {
			self.complex.insert(shortcut, pattern.to_owned());
		} else {
			self.primitive.insert(shortcut, pattern.to_owned());
		}
		Ok(self)
	}

	/// Owned variant of `define_pattern`, for chaining from a fresh builder.
	pub fn with_pattern(mut self, shortcut: char, pattern: &str) -> Result<Self> {
		self.define_pattern(shortcut, pattern)?;
		Ok(self)
	}

	/// Letters of the registered primitive subpatterns, in order.
	pub fn primitive_shortcuts(&self) -> impl Iterator<Item = char> + '_ {
		self.primitive.keys().copied()
	}

	/// Letters of the registered complex subpatterns, in order.
	pub fn complex_shortcuts(&self) -> impl Iterator<Item = char> + '_ {
		self.complex.keys().copied()
	}

	/// Compiles every subpattern, then `main_pattern`.
	///
	/// # Errors
	/// - `UnresolvedShortcut` for a reference to an unknown subpattern, or from
	///   a complex subpattern to another complex one
	/// - `MalformedGroup` for unbalanced brackets or quotes
	pub fn compile(&self, main_pattern: &str) -> Result<WordGenerator> {
		let mut interner = LiteralInterner::default();

		let no_shortcuts = Scope::new();
		let mut primitives = Scope::new();
		for (&shortcut, pattern) in &self.primitive {
			let origin = format!("subpattern {shortcut}");
			let token = PatternCompiler::new(&no_shortcuts, &mut interner, &origin).compile(pattern)?;
			debug!(%shortcut, %pattern, %token, "compiled primitive subpattern");
			primitives.insert(shortcut, token);
		}

		let mut scope = primitives.clone();
		for (&shortcut, pattern) in &self.complex {
			let origin = format!("subpattern {shortcut}");
			let token = PatternCompiler::new(&primitives, &mut interner, &origin).compile(pattern)?;
			debug!(%shortcut, %pattern, %token, "compiled complex subpattern");
			scope.insert(shortcut, token);
		}

		let root = PatternCompiler::new(&scope, &mut interner, "main pattern").compile(main_pattern)?;
		debug!(pattern = %main_pattern, token = %root, "compiled main pattern");

		Ok(WordGenerator::new(root))
	}
}
