use rand::SeedableRng;
use rand::rngs::StdRng;

use wordgen_core::model::generator::generate;
use wordgen_core::model::ngram_model::NGramModel;
use wordgen_core::tokenize::tokenize;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tokenize a small corpus: lowercase, punctuation stripped,
    // apostrophes preserved
    let tokens = tokenize("To be, or not to be, that is the question!");
    println!("Tokens: {:?}", tokens);

    // Build an order-2 model (each 2-word context predicts the next word)
    let model = NGramModel::build(&tokens, 2)?;

    // Query conditional probabilities; values are rounded to 2 decimals
    // at this boundary only, sampling keeps full precision
    let context = vec!["to".to_owned(), "be".to_owned()];
    println!("P(or | to be) = {:?}", model.probability_of(&context, "or"));
    println!("P(that | to be) = {:?}", model.probability_of(&context, "that"));

    // An unknown (context, token) pair is None, not an error
    println!("P(question | to be) = {:?}", model.probability_of(&context, "question"));

    // Order 0 can never form a context and fails fast
    match NGramModel::build(&tokens, 0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Order 0 is rejected: {}", e),
    }

    // Generate with the process-wide random source
    let generated = model.generate(&context, 12, &mut rand::rng());
    println!("Generated: {}", generated.join(" "));

    // Or with a seeded source for reproducible sequences
    let mut rng = StdRng::seed_from_u64(42);
    let generated = generate(&model, &context, 12, &mut rng);
    println!("Seeded generation: {}", generated.join(" "));

    // A seed the model never saw terminates immediately and returns
    // only the seed itself
    let unknown = vec!["question".to_owned(), "deep".to_owned()];
    let generated = model.generate(&unknown, 12, &mut rand::rng());
    println!("Unknown seed: {}", generated.join(" "));

    // Larger corpora can be loaded from disk; a missing file simply
    // yields an empty model ("no tokens available")
    let from_file = NGramModel::from_corpus_file(
        "./data/shakespeare_sonnets.txt",
        Some("From fairest creatures we desire increase,"),
        3,
    )?;
    if from_file.is_empty() {
        println!("No corpus file found, skipping file-based generation");
    } else {
        let mut rng = rand::rng();
        if let Some(seed) = from_file.random_context(&mut rng) {
            let seed_tokens = seed.tokens().to_vec();
            let generated = from_file.generate(&seed_tokens, 40, &mut rng);
            println!("From the sonnets: {}", generated.join(" "));
        }
    }

    Ok(())
}
