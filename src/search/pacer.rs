//! Global request pacing shared by all scan workers.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Spaces request starts at least `interval` apart across every caller.
///
/// A zero interval never waits.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for this caller's slot.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        // Reserve a slot under the lock, sleep outside it.
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        let now = Instant::now();
        if slot > now {
            debug!("Pacing request: waiting {:?}", slot - now);
            tokio::time::sleep_until(slot).await;
        }
    }
}
