//! Request pacing
//!
//! Enforces a minimum interval between the starts of consecutive requests.
//! Shared by the list-page loop and concurrent item fetches, so the delay
//! holds across both.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces out request starts by at least `min_interval`
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Creates a pacer; a zero interval disables pacing
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until the next request may start, then claims that slot
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        // Held across the sleep so waiters are released one interval apart
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tracing::trace!("Pacing: sleeping until next request slot");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// The configured interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
