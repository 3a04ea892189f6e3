use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};

use orrery_domain::{
	query::split_query,
	suggestion::{attach_prefix, suggestion_labels},
};

use crate::{
	SuggestionProvider, cache::SuggestionCache, debounce::Debouncer, history::HistoryStore,
	lifecycle::RequestLifecycle,
};

/// How many entries each "show more" step reveals.
pub const PAGE_SIZE: usize = 10;

/// Which input surface this coordinator drives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SuggestMode {
	/// Plain search box: the full query goes to `/search` behind the slower
	/// quiet window, through the TTL cache.
	FullQuery,
	/// Token autocomplete: the trailing word goes to `/autocomplete` behind
	/// the near-immediate window, with the leading words reattached to every
	/// suggestion. Cache participation is a configuration choice.
	Token,
}

#[derive(Debug)]
pub enum SuggestInput {
	Keystroke(String),
	ShowMore,
	Select(String),
	Submit(String),
	/// Drop one remembered term, as the per-entry delete on the recent panel
	/// does.
	Forget(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SuggestEvent {
	Suggestions(SuggestionUpdate),
	Submitted { query: String },
}

/// One rendered panel state: the full suggestion list, the matching history
/// entries shown under it, and how many rows the consumer should reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionUpdate {
	pub query: String,
	pub suggestions: Vec<String>,
	pub history: Vec<String>,
	pub visible: usize,
}

struct FetchOutcome {
	generation: u64,
	key: String,
	query: String,
	prefix: String,
	result: orrery_providers::Result<Vec<orrery_domain::record::Record>>,
}

#[derive(Default)]
struct Shown {
	query: String,
	suggestions: Vec<String>,
}

enum Step {
	Input(Option<SuggestInput>),
	WindowElapsed(String),
	FetchResolved(FetchOutcome),
}

/// The composition: keystrokes in, debounced cache-aware lifecycle-managed
/// suggestion updates out. Runs as a single task owning all mutable state;
/// concurrency is the outstanding fetch and the quiet-window timer, nothing
/// else.
pub struct SuggestCoordinator {
	mode: SuggestMode,
	provider: Arc<dyn SuggestionProvider>,
	cache: SuggestionCache,
	history: HistoryStore,
	lifecycle: RequestLifecycle,
	debounce: Debouncer,
	deadline: Duration,
	cache_tokens: bool,
	max_suggestions: usize,
	max_label_chars: usize,
	visible: usize,
	shown: Shown,
}

impl SuggestCoordinator {
	pub fn new(
		cfg: &orrery_config::Config,
		mode: SuggestMode,
		provider: Arc<dyn SuggestionProvider>,
		history: HistoryStore,
	) -> Self {
		let debounce_ms = match mode {
			SuggestMode::FullQuery => cfg.search.debounce_ms,
			SuggestMode::Token => cfg.suggest.debounce_ms,
		};

		Self {
			mode,
			provider,
			cache: SuggestionCache::new(
				Duration::from_secs(cfg.search.cache_ttl_secs),
				cfg.search.cache_capacity,
			),
			history,
			lifecycle: RequestLifecycle::new(),
			debounce: Debouncer::new(Duration::from_millis(debounce_ms)),
			deadline: Duration::from_millis(cfg.suggest.timeout_ms),
			cache_tokens: cfg.suggest.cache_tokens,
			max_suggestions: cfg.suggest.max_suggestions,
			max_label_chars: cfg.suggest.max_label_chars,
			visible: PAGE_SIZE,
			shown: Shown::default(),
		}
	}

	pub fn spawn(
		self,
	) -> (mpsc::Sender<SuggestInput>, mpsc::Receiver<SuggestEvent>, JoinHandle<()>) {
		let (input_tx, input_rx) = mpsc::channel(32);
		let (event_tx, event_rx) = mpsc::channel(32);
		let handle = tokio::spawn(self.run(input_rx, event_tx));

		(input_tx, event_rx, handle)
	}

	pub async fn run(
		mut self,
		mut inputs: mpsc::Receiver<SuggestInput>,
		events: mpsc::Sender<SuggestEvent>,
	) {
		let (results_tx, mut results_rx) = mpsc::channel::<FetchOutcome>(8);

		loop {
			// The quiet-window arm borrows the coordinator, so each step is
			// resolved first and handled once the race is settled.
			let step = tokio::select! {
				maybe_input = inputs.recv() => Step::Input(maybe_input),
				query = self.debounce.fire() => Step::WindowElapsed(query),
				Some(outcome) = results_rx.recv() => Step::FetchResolved(outcome),
			};
			let keep_going = match step {
				Step::Input(Some(input)) => self.handle_input(input, &events).await,
				Step::Input(None) => false,
				Step::WindowElapsed(query) => {
					self.window_elapsed(query, &results_tx, &events).await
				},
				Step::FetchResolved(outcome) => self.fetch_resolved(outcome, &events).await,
			};

			if !keep_going {
				break;
			}
		}

		// Teardown: nothing may fire or land after the consumer goes away.
		self.debounce.cancel();
		self.lifecycle.cancel_current();
	}

	async fn handle_input(
		&mut self,
		input: SuggestInput,
		events: &mpsc::Sender<SuggestEvent>,
	) -> bool {
		match input {
			SuggestInput::Keystroke(text) => self.keystroke(text, events).await,
			SuggestInput::ShowMore => self.show_more(events).await,
			SuggestInput::Select(text) | SuggestInput::Submit(text) => {
				self.submit(text, events).await
			},
			SuggestInput::Forget(text) => self.forget(text, events).await,
		}
	}

	async fn keystroke(&mut self, text: String, events: &mpsc::Sender<SuggestEvent>) -> bool {
		let query = text.trim().to_string();

		if query != self.shown.query {
			self.visible = PAGE_SIZE;
		}

		if query.is_empty() {
			// Back to idle: drop pending work, show the recent-searches
			// panel.
			self.debounce.cancel();
			self.lifecycle.cancel_current();

			let update = SuggestionUpdate {
				query,
				suggestions: Vec::new(),
				history: self.history.recent(),
				visible: self.visible,
			};

			self.shown = Shown::default();

			return events.send(SuggestEvent::Suggestions(update)).await.is_ok();
		}

		self.debounce.schedule(query);

		true
	}

	async fn window_elapsed(
		&mut self,
		query: String,
		results_tx: &mpsc::Sender<FetchOutcome>,
		events: &mpsc::Sender<SuggestEvent>,
	) -> bool {
		let (key, term, prefix) = match self.mode {
			SuggestMode::FullQuery => (query.clone(), query.clone(), String::new()),
			SuggestMode::Token => {
				let Some(parts) = split_query(&query) else {
					return true;
				};

				(parts.token.clone(), parts.token, parts.prefix)
			},
		};

		if self.consults_cache()
			&& let Some(labels) = self.cache.get(&key)
		{
			tracing::debug!(key = %key, "Suggestion cache hit.");

			return self.show(query, attach_prefix(labels, &prefix), events).await;
		}

		let ticket = self.lifecycle.begin();
		let provider = self.provider.clone();
		let mode = self.mode;
		let deadline = self.deadline;
		let results_tx = results_tx.clone();

		tokio::spawn(async move {
			let result = match mode {
				SuggestMode::FullQuery => provider.search(&term, deadline, &ticket.cancel).await,
				SuggestMode::Token => provider.autocomplete(&term, deadline, &ticket.cancel).await,
			};
			let _ = results_tx
				.send(FetchOutcome { generation: ticket.generation, key, query, prefix, result })
				.await;
		});

		true
	}

	async fn fetch_resolved(
		&mut self,
		outcome: FetchOutcome,
		events: &mpsc::Sender<SuggestEvent>,
	) -> bool {
		if !self.lifecycle.is_current(outcome.generation) {
			tracing::debug!(query = %outcome.query, "Dropping a superseded suggestion response.");

			return true;
		}

		self.lifecycle.finish(outcome.generation);

		match outcome.result {
			Ok(records) => {
				let labels =
					suggestion_labels(&records, self.max_suggestions, self.max_label_chars);

				if self.consults_cache() {
					// Bare labels go in; the prefix is reattached per query
					// so a hit under different leading words stays correct.
					self.cache.put(outcome.key, labels.clone());
				}

				self.show(outcome.query, attach_prefix(labels, &outcome.prefix), events).await
			},
			Err(err) if err.is_cancelled() => true,
			Err(err) => {
				tracing::warn!(error = %err, query = %outcome.query, "Suggestion fetch failed. Showing no results.");

				// Failures degrade to an empty panel; typing is never blocked.
				self.show(outcome.query, Vec::new(), events).await
			},
		}
	}

	async fn show_more(&mut self, events: &mpsc::Sender<SuggestEvent>) -> bool {
		self.visible += PAGE_SIZE;

		let update = SuggestionUpdate {
			query: self.shown.query.clone(),
			suggestions: self.shown.suggestions.clone(),
			history: self.history.matching(&self.shown.query),
			visible: self.visible,
		};

		events.send(SuggestEvent::Suggestions(update)).await.is_ok()
	}

	async fn submit(&mut self, text: String, events: &mpsc::Sender<SuggestEvent>) -> bool {
		let query = text.trim().to_string();

		if query.is_empty() {
			tracing::debug!("Ignoring an empty submission.");

			return true;
		}

		// Terminal for the suggestion session: nothing in flight may land
		// afterwards.
		self.debounce.cancel();
		self.lifecycle.cancel_current();
		self.history.record(&query);

		events.send(SuggestEvent::Submitted { query }).await.is_ok()
	}

	async fn forget(&mut self, text: String, events: &mpsc::Sender<SuggestEvent>) -> bool {
		self.history.remove(text.trim());

		let history = if self.shown.query.is_empty() {
			self.history.recent()
		} else {
			self.history.matching(&self.shown.query)
		};
		let update = SuggestionUpdate {
			query: self.shown.query.clone(),
			suggestions: self.shown.suggestions.clone(),
			history,
			visible: self.visible,
		};

		events.send(SuggestEvent::Suggestions(update)).await.is_ok()
	}

	async fn show(
		&mut self,
		query: String,
		suggestions: Vec<String>,
		events: &mpsc::Sender<SuggestEvent>,
	) -> bool {
		let update = SuggestionUpdate {
			history: self.history.matching(&query),
			visible: self.visible,
			query: query.clone(),
			suggestions: suggestions.clone(),
		};

		self.shown = Shown { query, suggestions };

		events.send(SuggestEvent::Suggestions(update)).await.is_ok()
	}

	fn consults_cache(&self) -> bool {
		match self.mode {
			SuggestMode::FullQuery => true,
			SuggestMode::Token => self.cache_tokens,
		}
	}
}
