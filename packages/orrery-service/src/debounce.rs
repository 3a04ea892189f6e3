use std::{future, pin::Pin, time::Duration};

use tokio::time::{Instant, Sleep, sleep_until};

/// Coalesces a burst of inputs into a single action after a quiet interval.
/// `schedule` replaces whatever was pending, so only the last value inside a
/// quiet window ever fires, exactly once, once the window elapses.
///
/// Not internally synchronized; owned by a single task.
pub struct Debouncer {
	quiet: Duration,
	pending: Option<Pending>,
}

struct Pending {
	value: String,
	sleep: Pin<Box<Sleep>>,
}

impl Debouncer {
	pub fn new(quiet: Duration) -> Self {
		Self { quiet, pending: None }
	}

	/// Arms (or re-arms) the quiet window carrying `value`. A previously
	/// scheduled value is discarded and will never fire.
	pub fn schedule(&mut self, value: String) {
		let deadline = Instant::now() + self.quiet;

		self.pending = Some(Pending { value, sleep: Box::pin(sleep_until(deadline)) });
	}

	/// Disarms the window. The teardown path: nothing fires afterwards.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	pub fn is_armed(&self) -> bool {
		self.pending.is_some()
	}

	/// Resolves with the pending value once the quiet window elapses, and
	/// stays pending forever while disarmed, so a `select!` arm built on it
	/// simply never wins. Cancel-safe: losing the race leaves the armed
	/// deadline untouched.
	pub async fn fire(&mut self) -> String {
		let Some(pending) = self.pending.as_mut() else {
			return future::pending().await;
		};

		pending.sleep.as_mut().await;

		let value = std::mem::take(&mut pending.value);

		self.pending = None;

		value
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use tokio::time::{self, timeout};

	const QUIET: Duration = Duration::from_millis(300);

	#[tokio::test(start_paused = true)]
	async fn only_the_last_value_in_a_burst_fires() {
		let mut debounce = Debouncer::new(QUIET);

		debounce.schedule("ne".to_string());
		time::sleep(Duration::from_millis(100)).await;
		debounce.schedule("neu".to_string());

		let fired = debounce.fire().await;

		assert_eq!(fired, "neu");
		assert!(!debounce.is_armed());
	}

	#[tokio::test(start_paused = true)]
	async fn nothing_fires_before_the_window_elapses() {
		let mut debounce = Debouncer::new(QUIET);

		debounce.schedule("neu".to_string());

		let early = timeout(Duration::from_millis(299), debounce.fire()).await;

		assert!(early.is_err());

		let fired = timeout(Duration::from_millis(2), debounce.fire()).await;

		assert_eq!(fired.expect("Expected the window to elapse."), "neu");
	}

	#[tokio::test(start_paused = true)]
	async fn rescheduling_restarts_the_window() {
		let mut debounce = Debouncer::new(QUIET);

		debounce.schedule("ne".to_string());
		time::sleep(Duration::from_millis(299)).await;
		debounce.schedule("neu".to_string());

		// The first window would have elapsed here; the restart keeps quiet.
		let early = timeout(Duration::from_millis(100), debounce.fire()).await;

		assert!(early.is_err());

		let fired = timeout(QUIET, debounce.fire()).await;

		assert_eq!(fired.expect("Expected the restarted window to elapse."), "neu");
	}

	#[tokio::test(start_paused = true)]
	async fn cancel_discards_the_pending_value() {
		let mut debounce = Debouncer::new(QUIET);

		debounce.schedule("neu".to_string());
		debounce.cancel();

		let fired = timeout(Duration::from_secs(10), debounce.fire()).await;

		assert!(fired.is_err());
		assert!(!debounce.is_armed());
	}

	#[tokio::test(start_paused = true)]
	async fn windows_of_different_widths_are_independent() {
		let mut slow = Debouncer::new(Duration::from_millis(300));
		let mut fast = Debouncer::new(Duration::from_millis(100));

		slow.schedule("history or fetch".to_string());
		fast.schedule("token".to_string());

		let first = timeout(Duration::from_millis(150), fast.fire()).await;

		assert_eq!(first.expect("Expected the fast window to elapse."), "token");
		assert!(slow.is_armed());

		let second = timeout(Duration::from_millis(250), slow.fire()).await;

		assert_eq!(second.expect("Expected the slow window to elapse."), "history or fetch");
	}
}
