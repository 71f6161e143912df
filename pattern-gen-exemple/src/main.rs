use clap::Parser;
use pattern_gen_core::{GeneratorError, WordGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pattern-gen-exemple", version, about = "Prints words sampled from a CV(CV)(N) pattern")]
struct Args {
    /// Number of words to print.
    #[arg(default_value_t = 10)]
    count: usize,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG=debug shows every compiled subpattern
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Consonants, vowels and an optional nasal coda
    let mut builder = WordGenerator::builder();
    builder.define_pattern('V', "a/i/u")?;
    builder.define_pattern('C', "p/t/k/s/m/n")?;
    builder.define_pattern('N', "m/n")?;

    // Complex subpatterns may only reference primitive ones
    builder.define_pattern('S', "CV")?;

    let generator = builder.compile("S(S)(N)")?;
    println!("Compiled pattern: {}", generator);

    // Shortcut letters must be between A and Z
    match WordGenerator::builder().define_pattern('v', "a") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    // Unbalanced groups are rejected at compile time
    match builder.compile("C(V") {
        Ok(_) => println!("Should not happen"),
        Err(e @ GeneratorError::MalformedGroup { .. }) => println!("{}", e),
        Err(e) => return Err(e.into()),
    }

    // A seed makes the output reproducible
    match args.seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for (i, word) in generator.samples(&mut rng).take(args.count).enumerate() {
                println!("Generated word {}: {}", i + 1, word);
            }
        }
        None => {
            for i in 0..args.count {
                println!("Generated word {}: {}", i + 1, generator.generate());
            }
        }
    }

    Ok(())
}
