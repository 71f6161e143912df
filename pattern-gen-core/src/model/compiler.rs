use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::trace;

use super::token::{PatternToken, TokenRef};
use super::weighted_set::WeightedSet;
use crate::cursor::Cursor;
use crate::error::{GeneratorError, MalformedReason, Result};

/// Weight of a fragment without a `*N` suffix, and of the empty option
/// injected into optional groups.
pub const DEFAULT_WEIGHT: u32 = 1;
pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 128;

/// Deepest group nesting a pattern may use.
///
/// Deeper patterns fail with `MalformedReason::TooDeep` before any token is
/// built, which keeps the recursive compiler within a bounded stack.
pub const MAX_DEPTH: usize = 64;

/// Compiled tokens a pattern may reference, by shortcut letter.
pub(crate) type Scope = BTreeMap<char, TokenRef>;

/// Returns whether `c` can name a subpattern.
pub fn is_shortcut(c: char) -> bool {
	c.is_ascii_uppercase()
}

/// Returns whether `pattern` references a shortcut outside quoted literals.
///
/// This is what makes a subpattern complex rather than primitive.
pub fn references_shortcuts(pattern: &str) -> bool {
	let mut quoted = false;
	for c in pattern.chars() {
		match c {
			'"' => quoted = !quoted,
			c if !quoted && is_shortcut(c) => return true,
			_ => (),
		}
	}
	false
}

/// Deduplicates literal tokens by text.
///
/// Lives for one compilation, so every subpattern and the main pattern share
/// the same literal nodes.
#[derive(Debug, Default)]
pub(crate) struct LiteralInterner {
	literals: HashMap<String, TokenRef>,
}

impl LiteralInterner {
	pub(crate) fn literal(&mut self, text: &str) -> TokenRef {
		if let Some(token) = self.literals.get(text) {
			return Arc::clone(token);
		}
		let token = Arc::new(PatternToken::Literal(text.to_owned()));
		self.literals.insert(text.to_owned(), Arc::clone(&token));
		token
	}

	pub(crate) fn empty(&mut self) -> TokenRef {
		self.literal("")
	}
}

/// One `/`-delimited alternative, before compilation.
struct Fragment<'a> {
	body: Cursor<'a>,
	/// `Some` when the fragment carried an explicit `*N` suffix.
	weight: Option<u32>,
}

/// Recursive-descent compiler turning pattern text into a token tree.
///
/// Shortcuts are resolved against `scope` only: whatever is not in it at
/// compile time is an `UnresolvedShortcut`.
pub(crate) struct PatternCompiler<'s> {
	scope: &'s Scope,
	interner: &'s mut LiteralInterner,
	/// Where the pattern comes from, for error messages.
	origin: &'s str,
}

impl<'s> PatternCompiler<'s> {
	pub(crate) fn new(scope: &'s Scope, interner: &'s mut LiteralInterner, origin: &'s str) -> Self {
		Self { scope, interner, origin }
	}

	/// Compiles a whole (non-optional) pattern.
	///
	/// Group nesting is validated for the whole pattern first, so a malformed
	/// or too deeply nested pattern fails before anything is compiled.
	pub(crate) fn compile(&mut self, pattern: &str) -> Result<TokenRef> {
		let groups = GroupIndex::build(pattern)?;
		self.parse_fragments(&groups, Cursor::new(pattern), false)
	}

	/// Compiles a list of alternatives.
	///
	/// - Several fragments build an alternation, weighted as soon as one
	///   fragment used the `*N` syntax.
	/// - An optional group gets one more alternative: the empty literal,
	///   with the default weight when the alternation is weighted.
	/// - A single mandatory fragment is returned as is.
	fn parse_fragments(&mut self, groups: &GroupIndex, cursor: Cursor<'_>, optional: bool) -> Result<TokenRef> {
		let fragments = split_fragments(groups, cursor)?;
		let weighted = fragments.iter().any(|fragment| fragment.weight.is_some());
		trace!(fragments = fragments.len(), optional, weighted, "split pattern");

		match fragments.len() {
			0 => return Ok(self.interner.empty()),
			1 if !optional => return self.parse_fragment(groups, fragments[0].body),
			_ => (),
		}

		if weighted {
			let mut choices = WeightedSet::new();
			for fragment in fragments {
				let weight = fragment.weight.unwrap_or(DEFAULT_WEIGHT);
				choices.add(f64::from(weight), self.parse_fragment(groups, fragment.body)?)?;
			}
			if optional {
				choices.add(f64::from(DEFAULT_WEIGHT), self.interner.empty())?;
			}
			return Ok(Arc::new(PatternToken::WeightedAlternation(choices)));
		}

		let mut choices = fragments
			.into_iter()
			.map(|fragment| self.parse_fragment(groups, fragment.body))
			.collect::<Result<Vec<_>>>()?;
		if optional {
			choices.push(self.interner.empty());
		}
		Ok(Arc::new(PatternToken::UniformAlternation(choices)))
	}

	/// Compiles one alternative into a sequence of atoms.
	fn parse_fragment(&mut self, groups: &GroupIndex, cursor: Cursor<'_>) -> Result<TokenRef> {
		let mut tokens = Vec::new();
		let mut current = cursor;

		while let Some(c) = current.peek() {
			match c {
				'"' => {
					let (text, after) = scan_quoted(current)?;
					tokens.push(self.interner.literal(text));
					current = after;
				}
				'[' | '(' => {
					let closer = groups.closer(current)?;
					let interior = Cursor::between(current.bump(), closer);
					tokens.push(self.parse_fragments(groups, interior, c == '(')?);
					current = closer.bump();
				}
				']' | ')' => return Err(malformed(current, MalformedReason::UnexpectedCloser(c))),
				c if is_shortcut(c) => {
					let token = self.scope.get(&c).ok_or_else(|| GeneratorError::UnresolvedShortcut {
						shortcut: c,
						referenced_from: self.origin.to_owned(),
					})?;
					tokens.push(Arc::clone(token));
					current = current.bump();
				}
				_ => {
					let end = current.skip_while(|c| !starts_atom(c));
					tokens.push(self.interner.literal(current.text_until(end)));
					current = end;
				}
			}
		}

		Ok(match tokens.len() {
			0 => self.interner.empty(),
			1 => tokens.remove(0),
			_ => Arc::new(PatternToken::Sequence(tokens)),
		})
	}
}

/// Characters that end a plain literal run.
fn starts_atom(c: char) -> bool {
	matches!(c, '"' | '[' | '(' | ']' | ')') || is_shortcut(c)
}

/// Splits a pattern on top-level `/`, reading `*N` weight suffixes.
///
/// Slashes inside groups or quotes do not split. A weight suffix closes its
/// fragment: text following the digits starts the next one. Empty fragments
/// between slashes are dropped, but an empty fragment carrying a weight is
/// kept.
fn split_fragments<'a>(groups: &GroupIndex, cursor: Cursor<'a>) -> Result<Vec<Fragment<'a>>> {
	let mut fragments = Vec::new();
	let mut start = cursor;
	let mut current = cursor;

	loop {
		match current.peek() {
			None | Some('/') => {
				if current.offset() > start.offset() {
					fragments.push(Fragment {
						body: Cursor::between(start, current),
						weight: None,
					});
				}
				if current.is_at_end() {
					break;
				}
				current = current.bump();
				start = current;
			}
			Some('[') | Some('(') => current = groups.closer(current)?.bump(),
			Some('"') => current = scan_quoted(current)?.1,
			Some(c @ (']' | ')')) => {
				return Err(malformed(current, MalformedReason::UnexpectedCloser(c)));
			}
			Some('*') => {
				let digits = current.bump();
				let after = digits.skip_while(|c| c.is_ascii_digit());
				fragments.push(Fragment {
					body: Cursor::between(start, current),
					weight: Some(parse_weight(digits.text_until(after))),
				});
				current = after;
				start = current;
			}
			Some(_) => current = current.bump(),
		}
	}

	Ok(fragments)
}

/// Reads the digits of a `*N` suffix, clamped to `[MIN_WEIGHT, MAX_WEIGHT]`.
///
/// No digits means the default weight. Only digits reach this function, so
/// a failed parse can only be an overflow.
fn parse_weight(digits: &str) -> u32 {
	if digits.is_empty() {
		return DEFAULT_WEIGHT;
	}
	digits
		.parse::<u32>()
		.map_or(MAX_WEIGHT, |weight| weight.clamp(MIN_WEIGHT, MAX_WEIGHT))
}

/// Reads a quoted literal starting at `open` (on the opening quote).
///
/// Returns the unquoted text and the cursor past the closing quote.
fn scan_quoted(open: Cursor<'_>) -> Result<(&str, Cursor<'_>)> {
	let body = open.bump();
	let close = body.skip_while(|c| c != '"');
	if close.is_at_end() {
		return Err(malformed(open, MalformedReason::UnterminatedQuote));
	}
	Ok((body.text_until(close), close.bump()))
}

/// Offset of the matching closer for every group opener of a pattern.
///
/// Built in a single pass over the whole pattern, so nested groups are
/// never rescanned while compiling.
///
/// ## Invariants
/// - Nested groups close with their own kind of bracket
/// - Quoted spans are skipped whole: a bracket inside quotes never counts
/// - Nesting never exceeds `MAX_DEPTH`
struct GroupIndex {
	closers: HashMap<usize, usize>,
}

impl GroupIndex {
	fn build(pattern: &str) -> Result<Self> {
		let mut closers = HashMap::new();
		let mut unclosed: Vec<(char, Cursor<'_>)> = Vec::new();
		let mut current = Cursor::new(pattern);

		while let Some(c) = current.peek() {
			match c {
				'[' | '(' => {
					if unclosed.len() >= MAX_DEPTH {
						return Err(malformed(current, MalformedReason::TooDeep(MAX_DEPTH)));
					}
					unclosed.push((c, current));
					current = current.bump();
				}
				'"' => current = scan_quoted(current)?.1,
				']' | ')' => match unclosed.pop() {
					Some((opener, open)) if closer_for(opener) == c => {
						closers.insert(open.offset(), current.offset());
						current = current.bump();
					}
					Some((opener, _)) => {
						return Err(malformed(
							current,
							MalformedReason::MismatchedCloser {
								expected: closer_for(opener),
								found: c,
							},
						));
					}
					None => return Err(malformed(current, MalformedReason::UnexpectedCloser(c))),
				},
				_ => current = current.bump(),
			}
		}

		if let Some((opener, open)) = unclosed.pop() {
			return Err(malformed(open, MalformedReason::UnterminatedGroup(opener)));
		}
		Ok(Self { closers })
	}

	/// Cursor on the closer of the group opened at `open`.
	fn closer<'a>(&self, open: Cursor<'a>) -> Result<Cursor<'a>> {
		match self.closers.get(&open.offset()) {
			Some(&offset) => Ok(open.jump_to(offset)),
			None => {
				let opener = open.peek().unwrap_or('[');
				Err(malformed(open, MalformedReason::UnterminatedGroup(opener)))
			}
		}
	}
}

fn closer_for(opener: char) -> char {
	if opener == '[' { ']' } else { ')' }
}

fn malformed(at: Cursor<'_>, reason: MalformedReason) -> GeneratorError {
	GeneratorError::MalformedGroup {
		pattern: at.source().to_owned(),
		position: at.offset(),
		reason,
	}
}
