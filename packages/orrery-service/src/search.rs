use std::time::Duration;

use tokio_util::sync::CancellationToken;

use orrery_domain::record::Record;
use orrery_providers::SearchClient;

#[derive(Debug, thiserror::Error)]
#[error("Search request to {endpoint} failed: {source}")]
pub struct SearchError {
	pub endpoint: String,
	#[source]
	pub source: orrery_providers::Error,
}

/// The on-submit full search: one attempt against `/search` with the longer
/// deadline. This is the only path allowed to show the user a failure, so
/// the error names the endpoint it tried.
pub async fn full_search(
	client: &SearchClient,
	cfg: &orrery_config::Search,
	query: &str,
) -> Result<Vec<Record>, SearchError> {
	let cancel = CancellationToken::new();

	client.search(query, Duration::from_millis(cfg.timeout_ms), &cancel).await.map_err(|source| {
		SearchError { endpoint: format!("{}/search", client.base_url()), source }
	})
}
