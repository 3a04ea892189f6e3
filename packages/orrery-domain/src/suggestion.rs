use std::collections::HashSet;

use crate::record::Record;

/// Distills backend records into display labels: label per record (records
/// without one are skipped), capped at `max_chars` characters, exact-string
/// deduplicated keeping the first occurrence's formatting, at most
/// `max_entries` survivors in backend order.
pub fn suggestion_labels(records: &[Record], max_entries: usize, max_chars: usize) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut labels = Vec::new();

	for record in records {
		let Some(label) = record.label() else {
			continue;
		};
		let capped: String = label.chars().take(max_chars).collect();

		if capped.is_empty() || !seen.insert(capped.clone()) {
			continue;
		}

		labels.push(capped);

		if labels.len() == max_entries {
			break;
		}
	}

	labels
}

/// Reattaches the words typed before the completed token, so the suggestion
/// replaces the whole input rather than just the trailing word.
pub fn attach_prefix(labels: Vec<String>, prefix: &str) -> Vec<String> {
	if prefix.is_empty() {
		return labels;
	}

	labels.into_iter().map(|label| format!("{prefix} {label}")).collect()
}
