use std::fmt;

use rand::Rng;

use crate::error::{GeneratorError, Result};

/// A collection of items with assigned weights supporting weighted random draws.
///
/// Items are stored against their cumulative weight, in insertion order. A
/// draw picks `v` uniformly in `[0, total)` and returns the first item whose
/// cumulative weight is strictly greater than `v`, found by binary search.
///
/// ## Responsibilities:
/// - Accumulate items with a strictly positive weight
/// - Draw an item with probability `weight / total`
///
/// ## Invariants
/// - Every recorded weight is strictly positive
/// - Cumulative weights are strictly increasing
/// - `total` equals the last cumulative weight (or 0.0 when empty)
#[derive(Clone, Debug)]
pub struct WeightedSet<T> {
	/// `(cumulative weight, item)` pairs, sorted by construction.
	entries: Vec<(f64, T)>,
	/// Sum of all weights.
	total: f64,
}

impl<T> Default for WeightedSet<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> WeightedSet<T> {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			total: 0.0,
		}
	}

	/// Adds an item with the given weight.
	///
	/// # Errors
	/// Returns `InvalidWeight` if `weight` is not strictly positive, or if
	/// adding it would overflow the total or be lost to rounding. The set is
	/// left untouched in that case.
	pub fn add(&mut self, weight: f64, item: T) -> Result<&mut Self> {
		Self::check_weight(self.total, weight)?;
		self.push(weight, item);
		Ok(self)
	}

	/// Adds every item of `items` with the same weight.
	///
	/// # Errors
	/// Returns `InvalidWeight` under the same conditions as `add`, checked
	/// for every item before any of them is inserted.
	pub fn add_all<I>(&mut self, weight: f64, items: I) -> Result<&mut Self>
	where
		I: IntoIterator<Item = T>,
	{
		let items: Vec<T> = items.into_iter().collect();
		let mut total = self.total;
		for _ in &items {
			Self::check_weight(total, weight)?;
			total += weight;
		}
		for item in items {
			self.push(weight, item);
		}
		Ok(self)
	}

	/// Draws an item using weighted random sampling.
	///
	/// Returns `None` if the set is empty.
	pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
		if self.entries.is_empty() {
			return None;
		}
		let value = rng.random_range(0.0..self.total);
		self.item_above(value)
	}

	/// Sum of all recorded weights.
	pub fn total(&self) -> f64 {
		self.total
	}

	/// Number of items.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no item was added.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(item, weight)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
		let mut previous = 0.0;
		self.entries.iter().map(move |(cumulative, item)| {
			let weight = cumulative - previous;
			previous = *cumulative;
			(item, weight)
		})
	}

	/// Item at the smallest cumulative weight strictly greater than `value`.
	fn item_above(&self, value: f64) -> Option<&T> {
		let index = self.entries.partition_point(|(cumulative, _)| *cumulative <= value);
		self.entries.get(index).map(|(_, item)| item)
	}

	/// Checks that `weight` can be added on top of `total`.
	///
	/// The new total must stay finite and strictly greater than `total`, so
	/// cumulative weights keep increasing and draws stay in range.
	fn check_weight(total: f64, weight: f64) -> Result<()> {
		let next_total = total + weight;
		// `!(weight > 0.0)` also rejects NaN
		if !(weight > 0.0) || !next_total.is_finite() || next_total <= total {
			return Err(GeneratorError::InvalidWeight(weight));
		}
		Ok(())
	}

	fn push(&mut self, weight: f64, item: T) {
		self.total += weight;
		self.entries.push((self.total, item));
	}
}

impl<T: PartialEq> WeightedSet<T> {
	/// Returns whether `item` was added to this set.
	pub fn contains(&self, item: &T) -> bool {
		self.entries.iter().any(|(_, candidate)| candidate == item)
	}
}

impl<T: fmt::Display> fmt::Display for WeightedSet<T> {
	/// Renders as `[a*1/b*3]`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (index, (item, weight)) in self.iter().enumerate() {
			if index > 0 {
				f.write_str("/")?;
			}
			write!(f, "{}*{}", item, weight)?;
		}
		f.write_str("]")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn empty_set_draws_nothing() {
		let set: WeightedSet<&str> = WeightedSet::new();
		let mut rng = ChaCha8Rng::seed_from_u64(7);
		assert_eq!(set.next(&mut rng), None);
		assert!(set.is_empty());
	}

	#[test]
	fn non_positive_weights_are_rejected() {
		let mut set = WeightedSet::new();
		set.add(2.0, "a").expect("positive weight");

		assert_eq!(set.add(0.0, "b").err(), Some(GeneratorError::InvalidWeight(0.0)));
		assert_eq!(set.add(-1.0, "b").err(), Some(GeneratorError::InvalidWeight(-1.0)));
		assert!(set.add(f64::NAN, "b").is_err());
		assert!(set.add_all(0.0, ["c", "d"]).is_err());

		assert_eq!(set.total(), 2.0);
		assert_eq!(set.len(), 1);
		assert!(!set.contains(&"b"));
	}

	#[test]
	fn overflowing_total_is_rejected() {
		let mut set = WeightedSet::new();
		set.add(f64::MAX, "a").expect("finite total");

		assert_eq!(set.add(f64::MAX, "b").err(), Some(GeneratorError::InvalidWeight(f64::MAX)));
		assert_eq!(set.len(), 1);
		assert_eq!(set.total(), f64::MAX);

		let mut rng = ChaCha8Rng::seed_from_u64(3);
		assert_eq!(set.next(&mut rng), Some(&"a"));
	}

	#[test]
	fn weight_lost_to_rounding_is_rejected() {
		let mut set = WeightedSet::new();
		set.add(1e17, "a").unwrap();

		assert_eq!(set.add(1.0, "b").err(), Some(GeneratorError::InvalidWeight(1.0)));
		let weights: Vec<_> = set.iter().map(|(item, weight)| (*item, weight)).collect();
		assert_eq!(weights, vec![("a", 1e17)]);
	}

	#[test]
	fn add_all_checks_every_item_before_inserting() {
		let mut set = WeightedSet::new();
		set.add(1.0, "a").unwrap();

		// the first item fits, the second overflows
		assert!(set.add_all(f64::MAX / 1.5, ["b", "c"]).is_err());
		assert_eq!(set.len(), 1);
		assert_eq!(set.total(), 1.0);
	}

	#[test]
	fn draw_picks_smallest_key_strictly_above_value() {
		let mut set = WeightedSet::new();
		set.add(1.0, "a").unwrap().add(3.0, "b").unwrap().add(1.0, "c").unwrap();

		assert_eq!(set.item_above(0.0), Some(&"a"));
		assert_eq!(set.item_above(0.99), Some(&"a"));
		assert_eq!(set.item_above(1.0), Some(&"b"));
		assert_eq!(set.item_above(3.99), Some(&"b"));
		assert_eq!(set.item_above(4.0), Some(&"c"));
		assert_eq!(set.item_above(4.99), Some(&"c"));
	}

	#[test]
	fn draws_follow_weights() {
		let mut set = WeightedSet::new();
		set.add(1.0, "light").unwrap();
		set.add(3.0, "heavy").unwrap();

		let mut rng = ChaCha8Rng::seed_from_u64(42);
		let draws = 100_000;
		let heavy = (0..draws)
			.filter(|_| set.next(&mut rng) == Some(&"heavy"))
			.count();
		let frequency = heavy as f64 / draws as f64;
		assert!((0.70..=0.80).contains(&frequency), "frequency was {frequency}");
	}

	#[test]
	fn clone_is_independent() {
		let mut source = WeightedSet::new();
		source.add(1.0, "a").unwrap();

		let mut copy = source.clone();
		copy.add(5.0, "b").unwrap();

		assert_eq!(source.len(), 1);
		assert_eq!(source.total(), 1.0);
		assert_eq!(copy.len(), 2);
		assert_eq!(copy.total(), 6.0);
	}

	#[test]
	fn add_all_and_display() {
		let mut set = WeightedSet::new();
		set.add_all(2.0, ["x", "y"]).unwrap();
		set.add(1.0, "z").unwrap();

		let weights: Vec<_> = set.iter().map(|(item, weight)| (*item, weight)).collect();
		assert_eq!(weights, vec![("x", 2.0), ("y", 2.0), ("z", 1.0)]);
		assert_eq!(set.to_string(), "[x*2/y*2/z*1]");
	}
}
