//! Corpus loading.
//!
//! The loader supplies token sequences to the model builder. It never
//! turns a missing or unreadable file into a fatal failure: from the
//! model's point of view that is simply "no tokens available".

use std::path::Path;

use crate::io;
use crate::tokenize::tokenize;

/// Loads a corpus file and tokenizes its relevant content.
///
/// When `start_marker` is given and found in the text, everything up to
/// and including the marker is skipped, which is how front matter
/// (tables of contents, licensing preambles) is cut out of project
/// Gutenberg style corpora. A marker that does not occur leaves the
/// whole text in.
///
/// A file that cannot be opened or read yields an empty token sequence,
/// which in turn builds an empty model.
pub fn load_tokens<P: AsRef<Path>>(filepath: P, start_marker: Option<&str>) -> Vec<String> {
	let text = match io::read_file(filepath) {
		Ok(text) => text,
		Err(_) => return Vec::new(),
	};
	tokenize(slice_after_marker(&text, start_marker))
}

/// Lists the `.txt` corpus files of a directory (names only).
///
/// Both `"folder"` and `"folder/"` are accepted; `"."` resolves to the
/// current working directory.
pub fn list_corpus_files(dir: &str) -> std::io::Result<Vec<String>> {
	io::list_files(io::normalize_folder(dir), "txt")
}

/// Returns the part of `text` after the first occurrence of the marker,
/// or all of `text` when no marker is given or it is not found.
fn slice_after_marker<'a>(text: &'a str, start_marker: Option<&str>) -> &'a str {
	match start_marker {
		Some(marker) => match text.find(marker) {
			Some(index) => &text[index + marker.len()..],
			None => text,
		},
		None => text,
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn slices_after_the_marker() {
		let text = "PREFACE and notes. START HERE to be or not to be";
		assert_eq!(slice_after_marker(text, Some("START HERE")), " to be or not to be");
	}

	#[test]
	fn missing_marker_keeps_everything() {
		let text = "to be or not to be";
		assert_eq!(slice_after_marker(text, Some("NOWHERE")), text);
		assert_eq!(slice_after_marker(text, None), text);
	}

	#[test]
	fn missing_file_yields_no_tokens() {
		assert!(load_tokens("no/such/file.txt", None).is_empty());
	}

	#[test]
	fn loads_and_tokenizes_a_file() {
		let dir = std::env::temp_dir();
		let path = dir.join("wordgen_corpus_test.txt");
		let mut file = std::fs::File::create(&path).unwrap();
		write!(file, "Contents page.\nBEGIN\nTo be, or NOT to be!").unwrap();

		let tokens = load_tokens(&path, Some("BEGIN"));
		assert_eq!(tokens, vec!["to", "be", "or", "not", "to", "be"]);

		std::fs::remove_file(&path).unwrap();
	}
}
