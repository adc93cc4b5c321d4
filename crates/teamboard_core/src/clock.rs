//! Time source and synthetic id generation.
//!
//! # Responsibility
//! - Provide the wall clock used for `createdAt`/`updatedAt`/`timestamp`.
//! - Issue creation-time ids of the form `<prefix>_<epoch millis>`.
//!
//! # Invariants
//! - Ids issued by one `IdGenerator` are strictly increasing in their millis
//!   component, so two creates in the same millisecond never collide.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Wall clock port.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic callers and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    epoch_ms: AtomicI64,
}

impl ManualClock {
    pub fn at_epoch_ms(epoch_ms: i64) -> Self {
        Self {
            epoch_ms: AtomicI64::new(epoch_ms),
        }
    }

    pub fn set_epoch_ms(&self, epoch_ms: i64) {
        self.epoch_ms.store(epoch_ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.epoch_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.epoch_ms.load(Ordering::SeqCst))
            .unwrap_or_default()
    }
}

/// Issues timestamps and synthetic ids from one shared clock.
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
    last_issued_ms: AtomicI64,
}

impl IdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_issued_ms: AtomicI64::new(0),
        }
    }

    /// Generator over the system clock.
    pub fn system() -> Arc<Self> {
        Arc::new(Self::new(Arc::new(SystemClock)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns `<prefix>_<millis>`, bumping past the last issued value when
    /// the clock has not moved forward.
    pub fn next_id(&self, prefix: &str) -> String {
        let now_ms = self.clock.now().timestamp_millis();
        let mut last = self.last_issued_ms.load(Ordering::SeqCst);
        loop {
            let candidate = now_ms.max(last + 1);
            match self.last_issued_ms.compare_exchange(
                last,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return format!("{prefix}_{candidate}"),
                Err(actual) => last = actual,
            }
        }
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last_issued_ms", &self.last_issued_ms.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, IdGenerator, ManualClock};
    use std::sync::Arc;

    #[test]
    fn manual_clock_reports_configured_instant() {
        let clock = ManualClock::at_epoch_ms(1_729_000_000_000);
        assert_eq!(clock.now().timestamp_millis(), 1_729_000_000_000);
        clock.advance_ms(500);
        assert_eq!(clock.now().timestamp_millis(), 1_729_000_000_500);
    }

    #[test]
    fn ids_stay_distinct_within_one_millisecond() {
        let ids = IdGenerator::new(Arc::new(ManualClock::at_epoch_ms(1_000)));
        assert_eq!(ids.next_id("task"), "task_1000");
        assert_eq!(ids.next_id("task"), "task_1001");
        assert_eq!(ids.next_id("msg"), "msg_1002");
    }

    #[test]
    fn ids_follow_clock_when_it_moves_forward() {
        let clock = Arc::new(ManualClock::at_epoch_ms(1_000));
        let ids = IdGenerator::new(clock.clone());
        assert_eq!(ids.next_id("case"), "case_1000");
        clock.set_epoch_ms(5_000);
        assert_eq!(ids.next_id("case"), "case_5000");
    }
}
