//! Rate limiting for warnings emitted on the per-message path.
//!
//! A misbehaving client can trigger the same warning on every publish. Hooks
//! ask a [`WarnThrottle`] before logging: each broker event kind gets its own
//! window, so a flood of rejected subscribes never hides a rejected connect,
//! and the line that reopens a window reports how many were swallowed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use topic_tenancy_sdk::EventKind;

/// Default interval between two warnings for the same event kind.
pub const WARN_INTERVAL: Duration = Duration::from_secs(10);

const KINDS: usize = 5;

fn slot_of(kind: EventKind) -> usize {
    match kind {
        EventKind::Connect => 0,
        EventKind::MessageIn => 1,
        EventKind::MessageOut => 2,
        EventKind::Subscribe => 3,
        EventKind::Unsubscribe => 4,
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Default)]
struct Window {
    /// Milliseconds since the throttle's origin at which this window reopens.
    reopens_at: AtomicU64,
    suppressed: AtomicU64,
}

/// Per-[`EventKind`] warning gate.
#[derive(Debug)]
pub struct WarnThrottle {
    origin: Instant,
    interval_ms: u64,
    windows: [Window; KINDS],
}

impl WarnThrottle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            interval_ms: millis(interval),
            windows: std::array::from_fn(|_| Window::default()),
        }
    }

    /// Asks to log one warning about `kind`.
    ///
    /// Returns `Some(n)` when the caller should log, `n` being the number of
    /// warnings about `kind` dropped since the previous permitted one. Returns
    /// `None` and counts the warning as dropped otherwise. Concurrent callers
    /// racing for a reopened window get exactly one `Some`.
    #[must_use]
    pub fn permit(&self, kind: EventKind) -> Option<u64> {
        let window = &self.windows[slot_of(kind)];
        let now = millis(self.origin.elapsed());
        let reopens_at = window.reopens_at.load(Ordering::Acquire);
        let won = now >= reopens_at
            && window
                .reopens_at
                .compare_exchange(
                    reopens_at,
                    now.saturating_add(self.interval_ms),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok();
        if won {
            Some(window.suppressed.swap(0, Ordering::AcqRel))
        } else {
            window.suppressed.fetch_add(1, Ordering::AcqRel);
            None
        }
    }
}

impl Default for WarnThrottle {
    fn default() -> Self {
        Self::new(WARN_INTERVAL)
    }
}
