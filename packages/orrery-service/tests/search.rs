use std::time::Duration;

use orrery_providers::SearchClient;
use orrery_service::full_search;
use orrery_testkit::{StubResponse, StubService};

fn config_for(stub: &StubService) -> orrery_config::Config {
	orrery_config::Config {
		service: orrery_config::Service {
			base_url: stub.base_url(),
			log_level: "info".to_string(),
		},
		search: orrery_config::Search::default(),
		suggest: orrery_config::Suggest::default(),
		history: orrery_config::History::default(),
	}
}

#[tokio::test]
async fn full_search_returns_the_record_list() {
	let stub = StubService::spawn().await.expect("Failed to spawn stub.");

	stub.enqueue(
		"search",
		StubResponse::ok(serde_json::json!([
			{ "title": "Neural Networks", "abstract": "A survey." },
			{ "title": "Neural ODEs" },
		])),
	);

	let cfg = config_for(&stub);
	let client = SearchClient::new(&cfg.service).expect("Failed to build client.");
	let records =
		full_search(&client, &cfg.search, "neural").await.expect("Expected records.");

	assert_eq!(records.len(), 2);
	assert_eq!(records[0].text_field("abstract"), Some("A survey."));
}

#[tokio::test]
async fn full_search_failures_name_the_attempted_endpoint() {
	let stub = StubService::spawn().await.expect("Failed to spawn stub.");

	stub.enqueue("search", StubResponse::status(500));

	let cfg = config_for(&stub);
	let client = SearchClient::new(&cfg.service).expect("Failed to build client.");
	let err = full_search(&client, &cfg.search, "neural")
		.await
		.expect_err("Expected a search error.");
	let message = err.to_string();

	assert!(message.contains("/search"), "Unexpected error: {message}");
	assert!(message.contains("status 500"), "Unexpected error: {message}");
}

#[tokio::test]
async fn full_search_times_out_against_a_stalled_service() {
	let stub = StubService::spawn().await.expect("Failed to spawn stub.");

	stub.enqueue(
		"search",
		StubResponse::delayed(Duration::from_millis(500), serde_json::json!([])),
	);

	let mut cfg = config_for(&stub);

	cfg.search.timeout_ms = 50;

	let client = SearchClient::new(&cfg.service).expect("Failed to build client.");
	let err = full_search(&client, &cfg.search, "neural")
		.await
		.expect_err("Expected a timeout.");

	assert!(matches!(err.source, orrery_providers::Error::Timeout), "Unexpected error: {err}");
}
