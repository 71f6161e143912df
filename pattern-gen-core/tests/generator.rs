//! End-to-end tests: pattern text in, sampled words out.

use pattern_gen_core::{GeneratorError, MalformedReason, PatternDefinitions, WordGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use regex::Regex;

/// The classic `CV(CV)(N)` syllable generator.
fn syllables() -> WordGenerator {
	let mut builder = WordGenerator::builder();
	builder.define_pattern('C', "p/t/k").expect("valid shortcut");
	builder.define_pattern('V', "a/i/u").expect("valid shortcut");
	builder.define_pattern('N', "m/n").expect("valid shortcut");
	builder.compile("CV(CV)(N)").expect("pattern compiles")
}

#[test]
fn generates_requested_number_of_words() {
	let generator = syllables();
	let mut rng = ChaCha8Rng::seed_from_u64(1);
	let words: Vec<String> = generator.samples(&mut rng).take(250).collect();
	assert_eq!(words.len(), 250);
}

#[test]
fn syllable_words_have_expected_shape() {
	let generator = syllables();
	let shape = Regex::new("^[ptk][aiu]([ptk][aiu])?[mn]?$").unwrap();
	let mut rng = ChaCha8Rng::seed_from_u64(2);

	let mut lengths = std::collections::HashSet::new();
	for word in generator.samples(&mut rng).take(2_000) {
		assert!(shape.is_match(&word), "unexpected word {word}");
		lengths.insert(word.len());
	}
	// 2, 3, 4 and 5 characters are all reachable
	assert_eq!(lengths.len(), 4);
}

#[test]
fn weighted_alternatives_follow_ratio() {
	let generator = WordGenerator::builder().compile("a*3/b*1").unwrap();
	let mut rng = ChaCha8Rng::seed_from_u64(3);

	let (mut a, mut b) = (0_u32, 0_u32);
	for word in generator.samples(&mut rng).take(40_000) {
		match word.as_str() {
			"a" => a += 1,
			"b" => b += 1,
			other => panic!("unexpected word {other}"),
		}
	}
	let ratio = f64::from(a) / f64::from(b);
	assert!((2.7..=3.3).contains(&ratio), "ratio was {ratio}");
}

#[test]
fn seeded_generation_is_reproducible() {
	let generator = syllables();
	let first: Vec<String> = generator.samples(&mut ChaCha8Rng::seed_from_u64(9)).take(20).collect();
	let second: Vec<String> = generator.samples(&mut ChaCha8Rng::seed_from_u64(9)).take(20).collect();
	assert_eq!(first, second);
}

#[test]
fn complex_to_complex_reference_fails() {
	let mut builder = WordGenerator::builder();
	builder.define_pattern('C', "p/t").unwrap();
	builder.define_pattern('A', "BC").unwrap();
	builder.define_pattern('B', "CC").unwrap();

	let error = builder.compile("A").unwrap_err();
	assert!(matches!(error, GeneratorError::UnresolvedShortcut { shortcut: 'B', .. }));
}

#[test]
fn unmatched_bracket_fails_the_same_way_every_time() {
	let compile = || {
		let mut builder = WordGenerator::builder();
		builder.define_pattern('C', "p/t/k").unwrap();
		builder.define_pattern('V', "a/i/u").unwrap();
		builder.compile("C(V")
	};

	let expected = GeneratorError::MalformedGroup {
		pattern: "C(V".to_owned(),
		position: 1,
		reason: MalformedReason::UnterminatedGroup('('),
	};
	for _ in 0..5 {
		assert_eq!(compile().unwrap_err(), expected);
	}
}

#[test]
fn malformed_subpattern_aborts_compilation() {
	let mut builder = WordGenerator::builder();
	builder.define_pattern('V', "a/[i").unwrap();
	assert!(matches!(
		builder.compile("V"),
		Err(GeneratorError::MalformedGroup { reason: MalformedReason::UnterminatedGroup('['), .. })
	));
}

#[test]
fn deeply_nested_groups_fail_with_an_error() {
	let pattern = format!("{}a{}", "(".repeat(600), ")".repeat(600));
	let error = WordGenerator::builder().compile(&pattern).unwrap_err();
	assert!(matches!(
		error,
		GeneratorError::MalformedGroup { reason: MalformedReason::TooDeep(_), .. }
	));
}

#[test]
fn quoted_text_is_copied_verbatim() {
	let generator = WordGenerator::builder().compile("\"Q[a/b](c)\"").unwrap();
	assert_eq!(generator.generate(), "Q[a/b](c)");
}

#[test]
fn error_messages_name_the_culprit() {
	let error = WordGenerator::builder().compile("kaX").unwrap_err();
	let message = error.to_string();
	assert!(message.contains("subpattern X"), "{message}");
	assert!(message.contains("main pattern"), "{message}");
}

#[test]
fn definitions_deserialize_and_compile() {
	let json = r#"{
		"main": "CV(N)",
		"subpatterns": { "C": "p/t/k", "V": "a/i/u", "N": "m/n" }
	}"#;
	let definitions: PatternDefinitions = serde_json::from_str(json).unwrap();
	assert_eq!(definitions.subpatterns.len(), 3);

	let generator = WordGenerator::try_from(&definitions).unwrap();
	let shape = Regex::new("^[ptk][aiu][mn]?$").unwrap();
	let mut rng = ChaCha8Rng::seed_from_u64(4);
	for word in generator.samples(&mut rng).take(200) {
		assert!(shape.is_match(&word), "unexpected word {word}");
	}

	let round_trip: PatternDefinitions =
		serde_json::from_str(&serde_json::to_string(&definitions).unwrap()).unwrap();
	assert_eq!(round_trip, definitions);
}

#[test]
fn definitions_reject_lowercase_shortcuts() {
	let definitions = PatternDefinitions::new("x").with_subpattern('c', "p");
	assert_eq!(definitions.compile().unwrap_err(), GeneratorError::InvalidShortcut('c'));
}

#[test]
fn generator_is_shared_across_threads() {
	let generator = syllables();
	let shape = Regex::new("^[ptk][aiu]([ptk][aiu])?[mn]?$").unwrap();

	std::thread::scope(|scope| {
		for _ in 0..4 {
			scope.spawn(|| {
				for _ in 0..500 {
					let word = generator.generate();
					assert!(shape.is_match(&word), "unexpected word {word}");
				}
			});
		}
	});
}
