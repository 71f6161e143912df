//! Top-level module for the pattern-based word generator.
//!
//! This module provides:
//! - A weighted random sampling structure (`WeightedSet`)
//! - The compiled token tree (`PatternToken`)
//! - The pattern compiler, driven by `GeneratorBuilder`
//! - Serializable generator definitions (`PatternDefinitions`)
//! - The sampling interface (`WordGenerator`)

/// Weighted random draw over a set of items.
///
/// Items are stored against cumulative weights; a draw is a binary search.
pub mod weighted_set;

/// Immutable token tree produced by the compiler.
///
/// Each node samples itself into a string.
pub mod token;

/// Recursive-descent compiler from pattern text to token tree.
///
/// Handles alternation, `*N` weights, optional and mandatory groups,
/// quoted literals and shortcut resolution.
pub mod compiler;

/// Registration and compilation of subpatterns and main pattern.
pub mod builder;

/// Serializable generator configuration.
pub mod definitions;

/// Compiled generator exposing repeated sampling.
pub mod generator;
