//! # Todo Testing
//!
//! Testing utilities and helpers for the todo engine.
//!
//! This crate provides:
//! - Deterministic implementations of the `todo-core` environment traits
//! - A Given-When-Then [`ScenarioTest`] harness
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use todo_core::environment::{Clock, IdGenerator};
//! use todo_testing::{SequentialIdGenerator, StepClock, test_clock};
//!
//! let clock = StepClock::from(test_clock());
//! let first = clock.now();
//! assert!(clock.now() > first);
//!
//! let ids = SequentialIdGenerator::new();
//! assert_ne!(ids.next_id(), ids.next_id());
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::{Clock, IdGenerator};

pub mod scenario;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use chrono::Duration;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Mutex, PoisonError};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step every time it is read.
    ///
    /// Each call to `now()` returns the current reading and then moves the
    /// clock forward, so consecutive readings are strictly increasing.
    #[derive(Debug)]
    pub struct StepClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl StepClock {
        /// Create a clock starting at `start` and advancing by `step`
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }

        /// Move the clock forward without reading it
        pub fn advance(&self, by: Duration) {
            let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
            *next += by;
        }
    }

    impl From<FixedClock> for StepClock {
        /// Start where the fixed clock stands, one second per reading
        fn from(clock: FixedClock) -> Self {
            Self::new(clock.time, Duration::seconds(1))
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
            let reading = *next;
            *next += self.step;
            reading
        }
    }

    /// Predictable identifiers: `00000000-0000-0000-0000-000000000001`, `...02`, ...
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        counter: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                counter: AtomicU64::new(1),
            }
        }

        /// The identifier the `n`th call (1-based) returns
        #[must_use]
        pub fn nth(n: u64) -> Uuid {
            Uuid::from_u128(u128::from(n))
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Self::nth(self.counter.fetch_add(1, Ordering::Relaxed))
        }
    }

    /// Broken generator that always hands out the same identifier.
    ///
    /// Exists to exercise the store's refusal to recycle identifiers.
    #[derive(Debug, Clone)]
    pub struct RepeatingIdGenerator {
        id: Uuid,
    }

    impl RepeatingIdGenerator {
        /// Always return `id`
        #[must_use]
        pub const fn new(id: Uuid) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for RepeatingIdGenerator {
        fn next_id(&self) -> Uuid {
            self.id
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing strategies for todo inputs.
pub mod properties {
    use proptest::prelude::*;

    /// Non-empty plain text that starts with a visible character
    pub fn plain_title() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 .,!?-]{0,60}"
    }

    /// Whitespace-only strings (including the empty string)
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n\r]{0,8}"
    }

    /// Leading/trailing whitespace to wrap around generated text
    pub fn padding() -> impl Strategy<Value = (String, String)> {
        (blank_text(), blank_text())
    }

    /// `(plain, marked_up)` pairs where stripping every tag from
    /// `marked_up` yields exactly `plain`
    pub fn marked_up_text() -> impl Strategy<Value = (String, String)> {
        (
            plain_title(),
            proptest::sample::select(vec!["b", "em", "strong", "span", "p", "a"]),
        )
            .prop_map(|(plain, tag)| {
                let marked_up = format!("<{tag} class=\"x\">{plain}</{tag}>");
                (plain, marked_up)
            })
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from many tests; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, RepeatingIdGenerator, SequentialIdGenerator, StepClock, test_clock};
pub use scenario::ScenarioTest;
