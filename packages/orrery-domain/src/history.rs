/// List policy for past search terms: most-recent-first, case-sensitive
/// exact dedup, bounded length. The persistence side lives with the caller.
///
/// Records a term: any existing equal entry moves to the front instead of
/// duplicating, and the list is truncated to `cap`.
pub fn record_term(entries: &mut Vec<String>, term: &str, cap: usize) {
	entries.retain(|existing| existing != term);
	entries.insert(0, term.to_string());
	entries.truncate(cap);
}

pub fn remove_term(entries: &mut Vec<String>, term: &str) {
	entries.retain(|existing| existing != term);
}

/// Entries containing `query` as a case-insensitive substring, recency order
/// preserved.
pub fn matching_terms(entries: &[String], query: &str) -> Vec<String> {
	let needle = query.to_lowercase();

	entries.iter().filter(|entry| entry.to_lowercase().contains(&needle)).cloned().collect()
}
