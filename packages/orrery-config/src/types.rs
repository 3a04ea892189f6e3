use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub suggest: Suggest,
	#[serde(default)]
	pub history: History,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub base_url: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Knobs for the plain search-box profile and the on-submit full search.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub timeout_ms: u64,
	pub debounce_ms: u64,
	pub cache_ttl_secs: u64,
	pub cache_capacity: usize,
}
impl Default for Search {
	fn default() -> Self {
		Self { timeout_ms: 10_000, debounce_ms: 300, cache_ttl_secs: 300, cache_capacity: 128 }
	}
}

/// Knobs for the token-level autocomplete profile.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Suggest {
	pub timeout_ms: u64,
	pub debounce_ms: u64,
	pub max_suggestions: usize,
	pub max_label_chars: usize,
	/// Whether token-level fetches consult the suggestion cache. Off by
	/// default: partial tokens change on nearly every keystroke, so freshness
	/// wins over reuse there.
	pub cache_tokens: bool,
}
impl Default for Suggest {
	fn default() -> Self {
		Self {
			timeout_ms: 5_000,
			debounce_ms: 100,
			max_suggestions: 10,
			max_label_chars: 100,
			cache_tokens: false,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct History {
	pub max_entries: usize,
	pub recent_entries: usize,
	pub storage_path: String,
}
impl Default for History {
	fn default() -> Self {
		Self {
			max_entries: 20,
			recent_entries: 5,
			storage_path: "orrery-history.json".to_string(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}
