use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const HISTORY_ENVELOPE_VERSION: u32 = 1;

/// Persisted shape of the search-history list.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEnvelope {
	pub version: u32,
	#[serde(with = "time::serde::rfc3339")]
	pub saved_at: OffsetDateTime,
	pub entries: Vec<String>,
}

impl HistoryEnvelope {
	pub fn new(entries: Vec<String>) -> Self {
		Self { version: HISTORY_ENVELOPE_VERSION, saved_at: OffsetDateTime::now_utc(), entries }
	}
}
