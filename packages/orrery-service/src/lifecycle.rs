use tokio_util::sync::CancellationToken;

/// Owns the single in-flight suggestion request. Beginning a new one cancels
/// whatever is outstanding, and completions are applied only while their
/// ticket is still current. Issue order always beats arrival order, so a
/// slow early response can never clobber a fast later one.
///
/// Not internally synchronized; owned by the coordinator task.
#[derive(Debug, Default)]
pub struct RequestLifecycle {
	generation: u64,
	current: Option<CancellationToken>,
}

/// Identity of one issued request: its generation and the token the
/// transport watches.
#[derive(Debug)]
pub struct RequestTicket {
	pub generation: u64,
	pub cancel: CancellationToken,
}

impl RequestLifecycle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Supersedes any outstanding request and issues a new ticket.
	pub fn begin(&mut self) -> RequestTicket {
		self.cancel_current();

		self.generation += 1;

		let cancel = CancellationToken::new();

		self.current = Some(cancel.clone());

		RequestTicket { generation: self.generation, cancel }
	}

	/// Whether a completion for `generation` may still be applied.
	pub fn is_current(&self, generation: u64) -> bool {
		self.current.is_some() && generation == self.generation
	}

	/// Marks the current request resolved. No-op for stale generations.
	pub fn finish(&mut self, generation: u64) {
		if generation == self.generation {
			self.current = None;
		}
	}

	/// Cancels the outstanding request, if any. Its eventual completion is
	/// no longer current and gets dropped.
	pub fn cancel_current(&mut self) {
		if let Some(token) = self.current.take() {
			token.cancel();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn begin_cancels_the_previous_ticket() {
		let mut lifecycle = RequestLifecycle::new();
		let first = lifecycle.begin();
		let second = lifecycle.begin();

		assert!(first.cancel.is_cancelled());
		assert!(!second.cancel.is_cancelled());
		assert!(second.generation > first.generation);
	}

	#[test]
	fn only_the_latest_generation_is_current() {
		let mut lifecycle = RequestLifecycle::new();
		let first = lifecycle.begin();
		let second = lifecycle.begin();

		assert!(!lifecycle.is_current(first.generation));
		assert!(lifecycle.is_current(second.generation));
	}

	#[test]
	fn finish_retires_the_current_request() {
		let mut lifecycle = RequestLifecycle::new();
		let ticket = lifecycle.begin();

		lifecycle.finish(ticket.generation);

		assert!(!lifecycle.is_current(ticket.generation));
	}

	#[test]
	fn finishing_a_stale_generation_leaves_the_current_one_alone() {
		let mut lifecycle = RequestLifecycle::new();
		let stale = lifecycle.begin();
		let current = lifecycle.begin();

		lifecycle.finish(stale.generation);

		assert!(lifecycle.is_current(current.generation));
	}

	#[test]
	fn cancel_current_is_the_teardown_path() {
		let mut lifecycle = RequestLifecycle::new();
		let ticket = lifecycle.begin();

		lifecycle.cancel_current();

		assert!(ticket.cancel.is_cancelled());
		assert!(!lifecycle.is_current(ticket.generation));
	}
}
