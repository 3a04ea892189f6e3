use std::time::Duration;

use reqwest::{Client, header::ACCEPT};
use serde_json::Value;
use tokio::time;
use tokio_util::sync::CancellationToken;

use orrery_domain::record::{Record, parse_records};

use crate::{Error, Result};

/// HTTP client for the remote search service. One attempt per call, a hard
/// deadline, and a cancellation token checked while the call is in flight; a
/// cancelled call resolves to `Error::Cancelled` without ever reaching the
/// response path.
#[derive(Clone, Debug)]
pub struct SearchClient {
	http: Client,
	base_url: String,
}

impl SearchClient {
	pub fn new(cfg: &orrery_config::Service) -> Result<Self> {
		let http = Client::builder().build()?;

		Ok(Self { http, base_url: cfg.base_url.clone() })
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub async fn search(
		&self,
		query: &str,
		deadline: Duration,
		cancel: &CancellationToken,
	) -> Result<Vec<Record>> {
		self.fetch_records("search", query, deadline, cancel).await
	}

	pub async fn autocomplete(
		&self,
		token: &str,
		deadline: Duration,
		cancel: &CancellationToken,
	) -> Result<Vec<Record>> {
		self.fetch_records("autocomplete", token, deadline, cancel).await
	}

	/// The sibling write path. No cancellation here; document submission is
	/// an explicit action, not something a keystroke supersedes.
	pub async fn add_document(&self, document: &Value, deadline: Duration) -> Result<()> {
		let url = format!("{}/adddoc", self.base_url);
		let send = async {
			let response = self.http.post(&url).json(document).send().await?;
			let status = response.status();

			if !status.is_success() {
				return Err(Error::RequestFailed { status: status.as_u16() });
			}

			Ok(())
		};

		match time::timeout(deadline, send).await {
			Ok(result) => result,
			Err(_) => Err(Error::Timeout),
		}
	}

	async fn fetch_records(
		&self,
		endpoint: &str,
		q: &str,
		deadline: Duration,
		cancel: &CancellationToken,
	) -> Result<Vec<Record>> {
		let url = format!("{}/{endpoint}", self.base_url);
		let call = async {
			let response = self
				.http
				.get(&url)
				.query(&[("q", q)])
				.header(ACCEPT, "application/json")
				.send()
				.await?;
			let status = response.status();

			if !status.is_success() {
				return Err(Error::RequestFailed { status: status.as_u16() });
			}

			// Absent or malformed bodies are an empty result, not an error.
			let body = response.json::<Value>().await.unwrap_or(Value::Null);

			Ok(parse_records(body))
		};

		tokio::select! {
			biased;

			_ = cancel.cancelled() => {
				tracing::debug!(endpoint, q, "Request cancelled in flight.");

				Err(Error::Cancelled)
			},
			result = time::timeout(deadline, call) => match result {
				Ok(inner) => inner,
				Err(_) => Err(Error::Timeout),
			},
		}
	}
}
