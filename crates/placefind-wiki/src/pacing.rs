//! Minimum spacing between consecutive encyclopedia requests.
//!
//! The public wiki API asks clients to avoid bursts. [`RequestPacer`]
//! remembers when the last request went out and sleeps the caller until
//! the configured interval has elapsed. It never retries anything.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub(crate) struct RequestPacer {
    min_interval: Option<Duration>,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// `None` disables pacing entirely.
    pub(crate) fn new(min_interval: Option<Duration>) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until a request may be sent, then records it as sent.
    pub(crate) async fn wait_turn(&self) {
        let Some(min_interval) = self.min_interval else {
            return;
        };

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + min_interval;
            let now = Instant::now();
            if ready_at > now {
                let delay = ready_at - now;
                tracing::debug!(
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "pacing wiki request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_request_is_not_delayed() {
        let pacer = RequestPacer::new(Some(Duration::from_millis(50)));
        let start = Instant::now();
        pacer.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_requests_are_spaced() {
        let pacer = RequestPacer::new(Some(Duration::from_millis(50)));
        let start = Instant::now();
        pacer.wait_turn().await;
        pacer.wait_turn().await;
        pacer.wait_turn().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_pacer_never_sleeps() {
        let pacer = RequestPacer::new(None);
        let start = Instant::now();
        for _ in 0..5 {
            pacer.wait_turn().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_once_interval_has_passed() {
        let pacer = RequestPacer::new(Some(Duration::from_millis(50)));
        pacer.wait_turn().await;
        tokio::time::advance(Duration::from_millis(80)).await;
        let start = Instant::now();
        pacer.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
