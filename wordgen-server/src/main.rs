use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use wordgen_core::corpus::list_corpus_files;
use wordgen_core::model::ngram_model::NGramModel;
use wordgen_core::tokenize::tokenize;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	seed: Option<String> // -> random, or custom(str)
}

/// Struct representing query parameters for the `/v1/probability` endpoint
#[derive(Deserialize)]
struct ProbabilityParams {
	context: String,
	token: String
}

/// Struct representing query parameters for the `/v1/load_corpus` endpoint
#[derive(Deserialize)]
struct LoadCorpusParams {
	name: Option<String>,
	order: Option<usize>,
	marker: Option<String>
}

/// Seed strategy resolved from the `seed` query parameter.
enum Seed {
	Random,
	Custom(Vec<String>),
}

struct SharedData {
	model: NGramModel
}

impl GenerateParams {
	/// Determines the starting seed strategy for sequence generation.
	fn seed_strategy(&self) -> Result<Seed, String> {
		match &self.seed {
			None => Ok(Seed::Random),
			Some(s) if s.to_lowercase() == "random" => Ok(Seed::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let tokens = tokenize(&s["custom:".len()..]);
				if tokens.is_empty() {
					Err("Custom seed cannot be empty".into())
				} else {
					Ok(Seed::Custom(tokens))
				}
			}
			Some(_) => Err("Seed must start with 'custom:' or be 'random'".into()),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a word sequence from the loaded model based on query
/// parameters. Returns the tokens joined by spaces as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let words = query.words.unwrap_or(50);

	let seed = match query.seed_strategy() {
		Ok(s) => s,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	if shared_data.model.is_empty() {
		return HttpResponse::BadRequest().body("No corpus loaded");
	}

	let mut rng = rand::rng();
	let seed_tokens = match seed {
		Seed::Custom(tokens) => tokens,
		Seed::Random => match shared_data.model.random_context(&mut rng) {
			Some(context) => context.tokens().to_vec(),
			None => return HttpResponse::InternalServerError().body("No seed available"),
		},
	};

	let generated = shared_data.model.generate(&seed_tokens, words, &mut rng);
	HttpResponse::Ok().body(generated.join(" "))
}

/// HTTP GET endpoint `/v1/probability`
///
/// Looks up the conditional probability of `token` after `context`
/// (whitespace-separated words). The value is rounded to 2 decimals at
/// this boundary; an unknown (context, token) pair is a 404, not an error.
#[get("/v1/probability")]
async fn get_probability(data: web::Data<Mutex<SharedData>>, query: web::Query<ProbabilityParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let context_tokens = tokenize(&query.context);
	let token_words = tokenize(&query.token);
	let token = match token_words.as_slice() {
		[single] => single,
		_ => return HttpResponse::BadRequest().body("Token must be a single word"),
	};

	match shared_data.model.probability_of(&context_tokens, token) {
		Some(p) => HttpResponse::Ok().body(p.to_string()),
		None => HttpResponse::NotFound().body("Unknown (context, token) pair"),
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_corpus_files("./data") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, query: web::Query<LoadCorpusParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let order = query.order.unwrap_or(2);
	let marker = query.marker.as_deref();

	// One corpus per model: loading replaces, it never blends
	let corpus_path = format!("./data/{}.txt", name);
	shared_data.model = match NGramModel::from_corpus_file(corpus_path, marker, order) {
		Ok(m) => m,
		Err(e) => return HttpResponse::BadRequest().body(format!("Failed to build model: {e}"))
	};

	if shared_data.model.is_empty() {
		return HttpResponse::Ok().body("Corpus loaded, but it was too short for this order");
	}
	HttpResponse::Ok().body("Corpus loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty model, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server. A corpus must be loaded through
/// `PUT /v1/load_corpus` before `/v1/generate` can answer.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Currently, the corpus directory is hardcoded to ./data and should
///   be made configurable.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	// unwrap() is safe, the order constant is >= 1
	let shared_data = SharedData {
		model: NGramModel::build(&[], 2).unwrap(),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_probability)
			.service(get_corpora)
			.service(put_corpus)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
