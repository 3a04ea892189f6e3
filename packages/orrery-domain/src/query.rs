/// The word fragment currently being typed, plus the words already committed
/// before it. Autocomplete sends only `token` upstream; `prefix` is
/// reattached to whatever comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParts {
	pub token: String,
	pub prefix: String,
}

/// Splits a raw input into the trailing token and its leading context.
/// Returns `None` for blank input.
pub fn split_query(raw: &str) -> Option<QueryParts> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	let mut words = trimmed.split_whitespace();
	let token = words.next_back()?.to_string();
	let prefix = words.collect::<Vec<_>>().join(" ");

	Some(QueryParts { token, prefix })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_word_has_empty_prefix() {
		let parts = split_query("neural").expect("Expected parts.");

		assert_eq!(parts.token, "neural");
		assert_eq!(parts.prefix, "");
	}

	#[test]
	fn last_word_becomes_the_token() {
		let parts = split_query("graph neural net").expect("Expected parts.");

		assert_eq!(parts.token, "net");
		assert_eq!(parts.prefix, "graph neural");
	}

	#[test]
	fn interior_whitespace_is_collapsed_in_the_prefix() {
		let parts = split_query("  deep   learning   ode ").expect("Expected parts.");

		assert_eq!(parts.token, "ode");
		assert_eq!(parts.prefix, "deep learning");
	}

	#[test]
	fn blank_input_yields_nothing() {
		assert!(split_query("").is_none());
		assert!(split_query("   ").is_none());
	}
}
