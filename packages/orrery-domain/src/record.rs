use serde_json::{Map, Value};

/// Fields consulted for a display label, first non-empty string wins.
const LABEL_FIELDS: [&str; 3] = ["title", "name", "id"];

/// A backend search record: an object map with arbitrary fields. Field access
/// tolerates missing keys and non-string values instead of probing blindly.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	fields: Map<String, Value>,
}

impl Record {
	pub fn new(fields: Map<String, Value>) -> Self {
		Self { fields }
	}

	/// A trimmed, non-empty string field, or `None`.
	pub fn text_field(&self, key: &str) -> Option<&str> {
		self.fields
			.get(key)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|text| !text.is_empty())
	}

	pub fn label(&self) -> Option<&str> {
		LABEL_FIELDS.iter().find_map(|key| self.text_field(key))
	}

	pub fn fields(&self) -> &Map<String, Value> {
		&self.fields
	}
}

/// Tolerant decode of a response body: anything that is not an array
/// contributes nothing, and non-object array elements are skipped.
pub fn parse_records(body: Value) -> Vec<Record> {
	let Value::Array(items) = body else {
		return Vec::new();
	};

	items
		.into_iter()
		.filter_map(|item| match item {
			Value::Object(fields) => Some(Record { fields }),
			_ => None,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(raw: Value) -> Record {
		match raw {
			Value::Object(fields) => Record { fields },
			_ => panic!("Expected an object."),
		}
	}

	#[test]
	fn label_prefers_title_then_name_then_id() {
		let full = record(serde_json::json!({ "title": "A", "name": "B", "id": "C" }));
		let named = record(serde_json::json!({ "name": "B", "id": "C" }));
		let keyed = record(serde_json::json!({ "id": "C" }));

		assert_eq!(full.label(), Some("A"));
		assert_eq!(named.label(), Some("B"));
		assert_eq!(keyed.label(), Some("C"));
	}

	#[test]
	fn blank_and_non_string_fields_are_skipped() {
		let rec = record(serde_json::json!({ "title": "   ", "name": 42, "id": "fallback" }));

		assert_eq!(rec.label(), Some("fallback"));
		assert_eq!(record(serde_json::json!({ "score": 0.9 })).label(), None);
	}

	#[test]
	fn non_array_bodies_decode_to_nothing() {
		assert!(parse_records(Value::Null).is_empty());
		assert!(parse_records(serde_json::json!({ "error": "nope" })).is_empty());
		assert!(parse_records(serde_json::json!("text")).is_empty());
	}

	#[test]
	fn non_object_elements_are_dropped() {
		let records = parse_records(serde_json::json!([{ "title": "A" }, "loose", 7, null]));

		assert_eq!(records.len(), 1);
		assert_eq!(records[0].label(), Some("A"));
	}
}
