use std::sync::Arc;

use orrery_domain::history as policy;
use orrery_store::{KvStore, models::HistoryEnvelope};

pub const HISTORY_KEY: &str = "search_history";

/// Past search terms: most-recent-first, deduplicated, bounded. The list is
/// read from the key-value collaborator once at construction and written back
/// on every mutation; a missing or corrupt persisted value starts empty.
pub struct HistoryStore {
	store: Arc<dyn KvStore>,
	entries: Vec<String>,
	max_entries: usize,
	recent_entries: usize,
}

impl HistoryStore {
	pub fn load(store: Arc<dyn KvStore>, cfg: &orrery_config::History) -> Self {
		let mut entries = read_entries(store.as_ref());

		entries.truncate(cfg.max_entries);

		Self {
			store,
			entries,
			max_entries: cfg.max_entries,
			recent_entries: cfg.recent_entries,
		}
	}

	/// Dedup-then-prepend: an existing equal term moves to the front, the
	/// list truncates to the bound, and the result is persisted.
	pub fn record(&mut self, term: &str) {
		let term = term.trim();

		if term.is_empty() {
			return;
		}

		policy::record_term(&mut self.entries, term, self.max_entries);
		self.persist();
	}

	pub fn remove(&mut self, term: &str) {
		let before = self.entries.len();

		policy::remove_term(&mut self.entries, term);

		if self.entries.len() != before {
			self.persist();
		}
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	/// The empty-query panel: the most recent handful of terms.
	pub fn recent(&self) -> Vec<String> {
		self.entries.iter().take(self.recent_entries).cloned().collect()
	}

	/// Terms containing `query` case-insensitively, capped like the recent
	/// panel, for merging under a live suggestion list.
	pub fn matching(&self, query: &str) -> Vec<String> {
		let mut matches = policy::matching_terms(&self.entries, query);

		matches.truncate(self.recent_entries);

		matches
	}

	fn persist(&self) {
		let envelope = HistoryEnvelope::new(self.entries.clone());
		let value = match serde_json::to_value(&envelope) {
			Ok(value) => value,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to encode search history.");

				return;
			},
		};

		if let Err(err) = self.store.set(HISTORY_KEY, &value) {
			tracing::warn!(error = %err, "Failed to persist search history.");
		}
	}
}

fn read_entries(store: &dyn KvStore) -> Vec<String> {
	let value = match store.get(HISTORY_KEY) {
		Ok(Some(value)) => value,
		Ok(None) => return Vec::new(),
		Err(err) => {
			tracing::warn!(error = %err, "Failed to read search history. Starting empty.");

			return Vec::new();
		},
	};

	match serde_json::from_value::<HistoryEnvelope>(value) {
		Ok(envelope) => envelope.entries,
		Err(err) => {
			tracing::warn!(error = %err, "Persisted search history is corrupt. Starting empty.");

			Vec::new()
		},
	}
}
