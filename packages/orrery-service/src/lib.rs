pub mod cache;
pub mod coordinator;
pub mod debounce;
pub mod history;
pub mod lifecycle;
pub mod search;

use std::{future::Future, pin::Pin, time::Duration};

use tokio_util::sync::CancellationToken;

use orrery_domain::record::Record;
use orrery_providers::SearchClient;

pub use cache::SuggestionCache;
pub use coordinator::{
	PAGE_SIZE, SuggestCoordinator, SuggestEvent, SuggestInput, SuggestMode, SuggestionUpdate,
};
pub use debounce::Debouncer;
pub use history::{HISTORY_KEY, HistoryStore};
pub use lifecycle::{RequestLifecycle, RequestTicket};
pub use search::{SearchError, full_search};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The seam between the coordinator and the wire. Implementations must honor
/// the deadline and the cancellation token; a cancelled call resolves to
/// `Error::Cancelled` without side effects.
pub trait SuggestionProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		deadline: Duration,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, orrery_providers::Result<Vec<Record>>>;

	fn autocomplete<'a>(
		&'a self,
		token: &'a str,
		deadline: Duration,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, orrery_providers::Result<Vec<Record>>>;
}

impl SuggestionProvider for SearchClient {
	fn search<'a>(
		&'a self,
		query: &'a str,
		deadline: Duration,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, orrery_providers::Result<Vec<Record>>> {
		Box::pin(SearchClient::search(self, query, deadline, cancel))
	}

	fn autocomplete<'a>(
		&'a self,
		token: &'a str,
		deadline: Duration,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, orrery_providers::Result<Vec<Record>>> {
		Box::pin(SearchClient::autocomplete(self, token, deadline, cancel))
	}
}
