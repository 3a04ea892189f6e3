mod error;

pub use error::{Error, Result};

use std::{
	collections::{HashMap, VecDeque},
	net::SocketAddr,
	sync::{Arc, Mutex},
	time::Duration,
};

use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	routing::{get, post},
};
use serde_json::Value;
use tokio::net::TcpListener;

/// One scripted reply: wait `delay`, then answer with `status` and `body`.
#[derive(Clone, Debug)]
pub struct StubResponse {
	pub delay: Duration,
	pub status: u16,
	pub body: Value,
}

impl StubResponse {
	pub fn ok(body: Value) -> Self {
		Self { delay: Duration::ZERO, status: 200, body }
	}

	pub fn status(status: u16) -> Self {
		Self { delay: Duration::ZERO, status, body: Value::Null }
	}

	pub fn delayed(delay: Duration, body: Value) -> Self {
		Self { delay, status: 200, body }
	}

	/// A raw string body, for exercising malformed-payload tolerance.
	pub fn raw(body: &str) -> Self {
		Self { delay: Duration::ZERO, status: 200, body: Value::String(body.to_string()) }
	}
}

#[derive(Debug)]
pub struct ReceivedRequest {
	pub endpoint: String,
	pub query: String,
}

#[derive(Default)]
struct StubState {
	scripted: Mutex<HashMap<String, VecDeque<StubResponse>>>,
	received: Mutex<Vec<ReceivedRequest>>,
}

/// A scripted stand-in for the remote search service, bound to an ephemeral
/// loopback port. Unscripted endpoints answer `200 []`.
pub struct StubService {
	addr: SocketAddr,
	state: Arc<StubState>,
}

impl StubService {
	pub async fn spawn() -> Result<Self> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let state = Arc::new(StubState::default());
		let app = Router::new()
			.route("/{endpoint}", get(serve_query))
			.route("/adddoc", post(serve_adddoc))
			.with_state(state.clone());

		tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, app).await {
				eprintln!("Stub service stopped: {err}.");
			}
		});

		Ok(Self { addr, state })
	}

	pub fn base_url(&self) -> String {
		format!("http://{}", self.addr)
	}

	/// Queues the next reply for an endpoint ("search", "autocomplete",
	/// "adddoc"). Replies are consumed in order.
	pub fn enqueue(&self, endpoint: &str, response: StubResponse) {
		let mut scripted = self.state.scripted.lock().unwrap_or_else(|err| err.into_inner());

		scripted.entry(endpoint.to_string()).or_default().push_back(response);
	}

	pub fn received(&self) -> Vec<(String, String)> {
		let received = self.state.received.lock().unwrap_or_else(|err| err.into_inner());

		received.iter().map(|request| (request.endpoint.clone(), request.query.clone())).collect()
	}

	pub fn request_count(&self, endpoint: &str) -> usize {
		let received = self.state.received.lock().unwrap_or_else(|err| err.into_inner());

		received.iter().filter(|request| request.endpoint == endpoint).count()
	}
}

async fn serve_query(
	State(state): State<Arc<StubState>>,
	Path(endpoint): Path<String>,
	Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
	let query = params.get("q").cloned().unwrap_or_default();

	respond(&state, endpoint, query).await
}

async fn serve_adddoc(
	State(state): State<Arc<StubState>>,
	Json(_body): Json<Value>,
) -> (StatusCode, Json<Value>) {
	respond(&state, "adddoc".to_string(), String::new()).await
}

async fn respond(
	state: &StubState,
	endpoint: String,
	query: String,
) -> (StatusCode, Json<Value>) {
	let scripted = {
		let mut scripted = state.scripted.lock().unwrap_or_else(|err| err.into_inner());

		scripted.get_mut(&endpoint).and_then(VecDeque::pop_front)
	};

	{
		let mut received = state.received.lock().unwrap_or_else(|err| err.into_inner());

		received.push(ReceivedRequest { endpoint, query });
	}

	let Some(response) = scripted else {
		return (StatusCode::OK, Json(Value::Array(Vec::new())));
	};

	if !response.delay.is_zero() {
		tokio::time::sleep(response.delay).await;
	}

	let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

	(status, Json(response.body))
}
