//! Pattern-based word generation library.
//!
//! Words are described by a small grammar meant for constructed languages:
//! - `a/i/u` picks one alternative uniformly
//! - `a*3/i` weights alternatives (`*N`, clamped to `1..=128`)
//! - `[...]` groups, `(...)` optional groups
//! - `"..."` quoted literal text
//! - `A`..`Z` shortcuts to named subpatterns
//!
//! Patterns are compiled once into an immutable token tree, then sampled
//! any number of times.
//!
//! ```
//! use pattern_gen_core::model::generator::WordGenerator;
//!
//! let mut builder = WordGenerator::builder();
//! builder.define_pattern('C', "p/t/k").unwrap();
//! builder.define_pattern('V', "a/i/u").unwrap();
//! builder.define_pattern('N', "m/n").unwrap();
//! let generator = builder.compile("CV(CV)(N)").unwrap();
//!
//! let word = generator.generate();
//! assert!(word.len() >= 2);
//! ```

/// Weighted sets, token tree, compiler and generator.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Scanning position used by the compiler.
///
/// Not exposed
pub(crate) mod cursor;

pub use error::{GeneratorError, MalformedReason, Result};
pub use model::builder::GeneratorBuilder;
pub use model::definitions::PatternDefinitions;
pub use model::generator::WordGenerator;
