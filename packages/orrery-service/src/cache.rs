use std::{collections::HashMap, time::Duration};

use tokio::time::Instant;

/// Suggestion lists keyed by the query (or token) that produced them. A hit
/// is valid while `now - fetched_at < ttl` and never refreshes `fetched_at`;
/// expired entries linger until overwritten or evicted. The store is
/// capacity-bounded: inserting into a full cache evicts the entry that went
/// longest without being read.
///
/// Not internally synchronized; owned by the coordinator task.
pub struct SuggestionCache {
	ttl: Duration,
	capacity: usize,
	entries: HashMap<String, CacheEntry>,
}

struct CacheEntry {
	suggestions: Vec<String>,
	fetched_at: Instant,
	last_used: Instant,
}

impl SuggestionCache {
	pub fn new(ttl: Duration, capacity: usize) -> Self {
		Self { ttl, capacity, entries: HashMap::new() }
	}

	pub fn get(&mut self, key: &str) -> Option<Vec<String>> {
		let now = Instant::now();
		let entry = self.entries.get_mut(key)?;

		if now.duration_since(entry.fetched_at) >= self.ttl {
			return None;
		}

		entry.last_used = now;

		Some(entry.suggestions.clone())
	}

	pub fn put(&mut self, key: String, suggestions: Vec<String>) {
		let now = Instant::now();

		if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
			self.evict_least_recently_used();
		}

		self.entries.insert(key, CacheEntry { suggestions, fetched_at: now, last_used: now });
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn evict_least_recently_used(&mut self) {
		let oldest = self
			.entries
			.iter()
			.min_by_key(|(_, entry)| entry.last_used)
			.map(|(key, _)| key.clone());

		if let Some(key) = oldest {
			self.entries.remove(&key);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use tokio::time;

	const TTL: Duration = Duration::from_secs(300);

	fn list(labels: &[&str]) -> Vec<String> {
		labels.iter().map(|label| label.to_string()).collect()
	}

	#[tokio::test(start_paused = true)]
	async fn a_fresh_entry_hits() {
		let mut cache = SuggestionCache::new(TTL, 16);

		cache.put("neural".to_string(), list(&["Neural Networks"]));

		assert_eq!(cache.get("neural"), Some(list(&["Neural Networks"])));
		assert_eq!(cache.get("other"), None);
	}

	#[tokio::test(start_paused = true)]
	async fn an_entry_at_ttl_age_misses() {
		let mut cache = SuggestionCache::new(TTL, 16);

		cache.put("neural".to_string(), list(&["Neural Networks"]));
		time::advance(TTL).await;

		assert_eq!(cache.get("neural"), None);
	}

	#[tokio::test(start_paused = true)]
	async fn a_hit_does_not_extend_validity() {
		let mut cache = SuggestionCache::new(TTL, 16);

		cache.put("neural".to_string(), list(&["Neural Networks"]));
		time::advance(TTL - Duration::from_secs(1)).await;

		assert!(cache.get("neural").is_some());

		time::advance(Duration::from_secs(1)).await;

		assert_eq!(cache.get("neural"), None);
	}

	#[tokio::test(start_paused = true)]
	async fn put_overwrites_and_restarts_the_clock() {
		let mut cache = SuggestionCache::new(TTL, 16);

		cache.put("neural".to_string(), list(&["old"]));
		time::advance(TTL - Duration::from_secs(1)).await;
		cache.put("neural".to_string(), list(&["new"]));
		time::advance(Duration::from_secs(2)).await;

		assert_eq!(cache.get("neural"), Some(list(&["new"])));
		assert_eq!(cache.len(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn the_least_recently_read_entry_is_evicted_at_capacity() {
		let mut cache = SuggestionCache::new(TTL, 2);

		cache.put("a".to_string(), list(&["a"]));
		time::advance(Duration::from_secs(1)).await;
		cache.put("b".to_string(), list(&["b"]));
		time::advance(Duration::from_secs(1)).await;

		// Reading "a" makes "b" the eviction candidate.
		assert!(cache.get("a").is_some());

		cache.put("c".to_string(), list(&["c"]));

		assert_eq!(cache.len(), 2);
		assert!(cache.get("a").is_some());
		assert_eq!(cache.get("b"), None);
		assert!(cache.get("c").is_some());
	}
}
