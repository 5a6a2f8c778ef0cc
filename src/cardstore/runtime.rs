//! Injectable runtime dependencies: identifiers, wall clock and simulated latency.
//!
//! Production code uses [`UuidGenerator`], [`SystemClock`] and
//! [`Latency::default`]. Tests swap in deterministic versions so that timestamps
//! and ids are predictable and no real time passes.

use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Default simulated round-trip to the store.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(100);

pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random v4 UUIDs, hyphenated.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Artificial delay inserted before every store access, so callers exercise the
/// same async code paths they would against a remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency(Duration);

impl Default for Latency {
    fn default() -> Self {
        Self(DEFAULT_LATENCY)
    }
}

impl Latency {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

    /// A clock that advances by `step` ms every time it is read.
    pub struct StepClock {
        now: AtomicI64,
        step: i64,
    }

    impl StepClock {
        pub fn new(start: i64, step: i64) -> Self {
            Self {
                now: AtomicI64::new(start),
                step,
            }
        }

        /// A clock frozen at `at`.
        pub fn fixed(at: i64) -> Self {
            Self::new(at, 0)
        }
    }

    impl Clock for StepClock {
        fn now_millis(&self) -> i64 {
            self.now.fetch_add(self.step, Ordering::SeqCst)
        }
    }

    /// Ids of the form `{prefix}-{n}`, counting from 1.
    pub struct SequentialIds {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIds {
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn new_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{}", self.prefix, n)
        }
    }
}
