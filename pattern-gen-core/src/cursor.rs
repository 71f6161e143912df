/// Read position within a pattern.
///
/// A cursor is a copyable value: scanning functions take one and hand back
/// the advanced one, so no caller ever adjusts a raw index by hand.
/// Offsets are byte offsets into the whole pattern text, which keeps error
/// positions meaningful even when scanning a nested group.
///
/// ## Invariants
/// - `offset <= end <= source.len()`
/// - `offset` and `end` always sit on char boundaries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
	source: &'a str,
	offset: usize,
	end: usize,
}

impl<'a> Cursor<'a> {
	/// Cursor over the whole of `source`.
	pub(crate) fn new(source: &'a str) -> Self {
		Self {
			source,
			offset: 0,
			end: source.len(),
		}
	}

	/// Cursor over `source[start..end]`, sharing the same source text.
	///
	/// Both bounds must come from other cursors over the same source.
	pub(crate) fn between(start: Cursor<'a>, end: Cursor<'a>) -> Self {
		Self {
			source: start.source,
			offset: start.offset,
			end: end.offset,
		}
	}

	pub(crate) fn source(&self) -> &'a str {
		self.source
	}

	pub(crate) fn offset(&self) -> usize {
		self.offset
	}

	pub(crate) fn is_at_end(&self) -> bool {
		self.offset >= self.end
	}

	/// Next character, if any.
	pub(crate) fn peek(&self) -> Option<char> {
		self.source[self.offset..self.end].chars().next()
	}

	/// Cursor moved past the next character. Stays put at the end.
	pub(crate) fn bump(self) -> Self {
		match self.peek() {
			Some(c) => Self {
				offset: self.offset + c.len_utf8(),
				..self
			},
			None => self,
		}
	}

	/// Cursor moved to `offset`, which must come from a cursor over the same
	/// source and lie within this cursor's bounds.
	pub(crate) fn jump_to(self, offset: usize) -> Self {
		debug_assert!(offset >= self.offset && offset <= self.end);
		Self { offset, ..self }
	}

	/// Cursor moved past every leading character matching `predicate`.
	pub(crate) fn skip_while<P: Fn(char) -> bool>(self, predicate: P) -> Self {
		let mut cursor = self;
		while let Some(c) = cursor.peek() {
			if !predicate(c) {
				break;
			}
			cursor = cursor.bump();
		}
		cursor
	}

	/// Text from this cursor up to `other`.
	pub(crate) fn text_until(&self, other: Cursor<'a>) -> &'a str {
		&self.source[self.offset..other.offset]
	}
}
